//! Parsing of the weights and impacts, as typed by a user.

use log::debug;

use crate::config::*;

fn tokens(text: &str) -> Result<Vec<&str>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(text.split(',').map(|t| t.trim()).collect())
}

/// Parses a list of comma-separated weights such as `"0.5, 0.3, 0.2"`.
///
/// The weights are returned in the order of the text and are not normalized.
pub fn parse_weights(text: &str) -> Result<WeightVector, TopsisError> {
    let mut weights: WeightVector = Vec::new();
    for token in tokens(text)? {
        match token.parse::<f64>() {
            Ok(w) if w.is_finite() && w >= 0.0 => weights.push(w),
            _ => return Err(ParseError::Weight(token.to_string()).into()),
        }
    }
    debug!("parse_weights: {:?} -> {:?}", text, weights);
    Ok(weights)
}

/// Parses a list of comma-separated impacts such as `"+,+,-"`.
pub fn parse_impacts(text: &str) -> Result<ImpactVector, TopsisError> {
    let mut impacts: ImpactVector = Vec::new();
    for token in tokens(text)? {
        let impact = match token {
            "+" => Impact::Benefit,
            "-" => Impact::Cost,
            x => return Err(ParseError::Impact(x.to_string()).into()),
        };
        impacts.push(impact);
    }
    debug!("parse_impacts: {:?} -> {:?}", text, impacts);
    Ok(impacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_with_spaces() {
        assert_eq!(parse_weights("0.5, 0.3, 0.2"), Ok(vec![0.5, 0.3, 0.2]));
        assert_eq!(parse_weights(" 1,1 ,1 "), Ok(vec![1.0, 1.0, 1.0]));
    }

    #[test]
    fn weights_zero_is_allowed() {
        assert_eq!(parse_weights("1,0,2"), Ok(vec![1.0, 0.0, 2.0]));
    }

    #[test]
    fn weights_negative() {
        assert_eq!(
            parse_weights("1,-1,2"),
            Err(TopsisError::Parse(ParseError::Weight("-1".to_string())))
        );
    }

    #[test]
    fn weights_malformed() {
        assert_eq!(
            parse_weights("1,abc"),
            Err(TopsisError::Parse(ParseError::Weight("abc".to_string())))
        );
        assert_eq!(
            parse_weights("1,,2"),
            Err(TopsisError::Parse(ParseError::Weight("".to_string())))
        );
        assert_eq!(
            parse_weights("1,NaN"),
            Err(TopsisError::Parse(ParseError::Weight("NaN".to_string())))
        );
        assert_eq!(
            parse_weights("inf,1"),
            Err(TopsisError::Parse(ParseError::Weight("inf".to_string())))
        );
    }

    #[test]
    fn weights_empty() {
        assert_eq!(parse_weights(""), Err(TopsisError::Parse(ParseError::Empty)));
        assert_eq!(
            parse_weights("  "),
            Err(TopsisError::Parse(ParseError::Empty))
        );
    }

    #[test]
    fn impacts_simple() {
        assert_eq!(
            parse_impacts("+,+,-"),
            Ok(vec![Impact::Benefit, Impact::Benefit, Impact::Cost])
        );
        assert_eq!(
            parse_impacts(" - , +"),
            Ok(vec![Impact::Cost, Impact::Benefit])
        );
    }

    #[test]
    fn impacts_malformed() {
        assert_eq!(
            parse_impacts("+,x,-"),
            Err(TopsisError::Parse(ParseError::Impact("x".to_string())))
        );
        assert_eq!(
            parse_impacts("+,,-"),
            Err(TopsisError::Parse(ParseError::Impact("".to_string())))
        );
        assert_eq!(
            parse_impacts("++"),
            Err(TopsisError::Parse(ParseError::Impact("++".to_string())))
        );
    }

    #[test]
    fn impacts_empty() {
        assert_eq!(parse_impacts(""), Err(TopsisError::Parse(ParseError::Empty)));
    }
}
