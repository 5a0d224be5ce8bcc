pub mod builder;
pub mod coerce;
mod config;
pub mod manual;
pub mod parse;

use log::{debug, info};

pub use crate::coerce::{ensure_numeric, Table};
pub use crate::config::*;
pub use crate::parse::{parse_impacts, parse_weights};

/// The score given to alternatives that are both at the ideal best and at the
/// ideal worst solution, i.e. when nothing distinguishes the alternatives.
pub const INDISTINGUISHABLE_SCORE: f64 = 0.5;

/// Number of decimals of the published scores.
pub const SCORE_DECIMALS: i32 = 6;

/// Rounds a score to [`SCORE_DECIMALS`] decimals.
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}

fn check_inputs(
    matrix: &DecisionMatrix,
    weights: &[f64],
    impacts: &[Impact],
) -> Result<(), ShapeError> {
    if matrix.num_alternatives() == 0 {
        return Err(ShapeError::NoAlternatives);
    }
    let num_criteria = matrix.num_criteria();
    if num_criteria < 2 {
        return Err(ShapeError::TooFewCriteria {
            actual: num_criteria,
        });
    }
    if weights.len() != num_criteria {
        return Err(ShapeError::WeightCount {
            expected: num_criteria,
            actual: weights.len(),
        });
    }
    if impacts.len() != num_criteria {
        return Err(ShapeError::ImpactCount {
            expected: num_criteria,
            actual: impacts.len(),
        });
    }
    if let Some((index, value)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(ShapeError::InvalidWeight {
            index,
            value: *value,
        });
    }
    if weights.iter().sum::<f64>() <= 0.0 {
        return Err(ShapeError::ZeroWeightSum);
    }
    Ok(())
}

fn euclidean_distance(xs: &[f64], ys: &[f64]) -> f64 {
    xs.iter()
        .zip(ys.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Runs the TOPSIS method and returns all the intermediate quantities.
///
/// See [`compute_topsis`] for the description of the arguments.
pub fn compute_topsis_details(
    matrix: &DecisionMatrix,
    weights: &[f64],
    impacts: &[Impact],
) -> Result<TopsisDetails, TopsisError> {
    check_inputs(matrix, weights, impacts)?;
    let num_criteria = matrix.num_criteria();

    let norms: Vec<f64> = (0..num_criteria)
        .map(|c| matrix.column(c).map(|x| x * x).sum::<f64>().sqrt())
        .collect();

    // Scaled by the largest weight first so that the sum stays finite.
    let max_weight = weights.iter().cloned().fold(0.0, f64::max);
    let scaled_weights: Vec<f64> = weights.iter().map(|w| w / max_weight).collect();
    let total_weight: f64 = scaled_weights.iter().sum();
    let normalized_weights: Vec<f64> = scaled_weights
        .iter()
        .map(|w| w / total_weight)
        .collect();
    debug!(
        "compute_topsis: column norms: {:?} normalized weights: {:?}",
        norms, normalized_weights
    );

    let weighted: Vec<Vec<f64>> = matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(c, x)| {
                    // Columns made only of zeros stay at zero instead of turning into NaN.
                    if norms[c] == 0.0 {
                        0.0
                    } else {
                        x / norms[c] * normalized_weights[c]
                    }
                })
                .collect()
        })
        .collect();

    let mut ideal_best: Vec<f64> = Vec::with_capacity(num_criteria);
    let mut ideal_worst: Vec<f64> = Vec::with_capacity(num_criteria);
    for (c, impact) in impacts.iter().enumerate() {
        let max = weighted
            .iter()
            .map(|r| r[c])
            .fold(f64::NEG_INFINITY, f64::max);
        let min = weighted.iter().map(|r| r[c]).fold(f64::INFINITY, f64::min);
        let (best, worst) = match impact {
            Impact::Benefit => (max, min),
            Impact::Cost => (min, max),
        };
        ideal_best.push(best);
        ideal_worst.push(worst);
    }
    debug!(
        "compute_topsis: ideal best: {:?} ideal worst: {:?}",
        ideal_best, ideal_worst
    );

    let distance_best: Vec<f64> = weighted
        .iter()
        .map(|r| euclidean_distance(r, &ideal_best))
        .collect();
    let distance_worst: Vec<f64> = weighted
        .iter()
        .map(|r| euclidean_distance(r, &ideal_worst))
        .collect();

    let scores: Vec<f64> = distance_best
        .iter()
        .zip(distance_worst.iter())
        .map(|(d_best, d_worst)| {
            let total = d_best + d_worst;
            if total == 0.0 {
                INDISTINGUISHABLE_SCORE
            } else {
                d_worst / total
            }
        })
        .collect();

    Ok(TopsisDetails {
        normalized_weights,
        ideal_best,
        ideal_worst,
        distance_best,
        distance_worst,
        scores,
    })
}

/// Computes the relative closeness score of each alternative.
///
/// Arguments:
/// * `matrix` the values of the criteria, one row per alternative. It needs at least
/// one row and two columns.
/// * `weights` one non-negative weight per criterion. They are normalized internally
/// and must not all be zero.
/// * `impacts` one impact per criterion.
///
/// The scores are between 0 and 1, in the order of the rows. Higher is better.
pub fn compute_topsis(
    matrix: &DecisionMatrix,
    weights: &[f64],
    impacts: &[Impact],
) -> Result<Vec<f64>, TopsisError> {
    compute_topsis_details(matrix, weights, impacts).map(|d| d.scores)
}

/// Ranks scores, the highest score getting rank 1.
///
/// Ties get the largest rank of their group: the rank of a score is the number of
/// scores that are greater than or equal to it. For example, `[0.9, 0.5, 0.5, 0.1]`
/// is ranked `[1, 3, 3, 4]`.
pub fn rank_scores(scores: &[f64]) -> Vec<u32> {
    scores
        .iter()
        .map(|s| scores.iter().filter(|other| *other >= s).count() as u32)
        .collect()
}

/// Scores and ranks the alternatives.
///
/// `labels` are attached to the rows of the matrix in order, and are not interpreted.
pub fn run_topsis(
    labels: &[String],
    matrix: &DecisionMatrix,
    weights: &[f64],
    impacts: &[Impact],
) -> Result<Vec<ScoreResult>, TopsisError> {
    analyze(labels, matrix, weights, impacts).map(|a| a.results)
}

/// Same as [`run_topsis`], but also returns the intermediate quantities (ideal
/// solutions, distances).
///
/// The scores of the results are not rounded, but the ranks are decided on the
/// scores rounded with [`round_score`].
pub fn analyze(
    labels: &[String],
    matrix: &DecisionMatrix,
    weights: &[f64],
    impacts: &[Impact],
) -> Result<Analysis, TopsisError> {
    info!(
        "analyze: Processing {:?} alternatives with {:?} criteria",
        matrix.num_alternatives(),
        matrix.num_criteria()
    );
    if labels.len() != matrix.num_alternatives() {
        return Err(ShapeError::LabelCount {
            expected: matrix.num_alternatives(),
            actual: labels.len(),
        }
        .into());
    }
    let details = compute_topsis_details(matrix, weights, impacts)?;
    // Ranked on the published precision: scores that print the same share a rank.
    let rounded: Vec<f64> = details.scores.iter().map(|s| round_score(*s)).collect();
    let ranks = rank_scores(&rounded);
    let results: Vec<ScoreResult> = labels
        .iter()
        .zip(details.scores.iter())
        .zip(ranks.iter())
        .map(|((label, score), rank)| ScoreResult {
            label: label.clone(),
            score: *score,
            rank: *rank,
        })
        .collect();
    for r in results.iter() {
        info!("{:>4} {:.6} {}", r.rank, r.score, r.label);
    }
    Ok(Analysis { results, details })
}
