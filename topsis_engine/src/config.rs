// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The direction in which a criterion is preferred.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Impact {
    /// Higher raw values are preferred (performance, capacity, ...).
    Benefit,
    /// Lower raw values are preferred (price, weight, ...).
    Cost,
}

impl Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Benefit => write!(f, "+"),
            Impact::Cost => write!(f, "-"),
        }
    }
}

/// The weight of each criterion, in column order.
///
/// The weights do not need to sum to 1, they get normalized by the engine.
pub type WeightVector = Vec<f64>;

/// The impact of each criterion, in column order.
pub type ImpactVector = Vec<Impact>;

/// A rectangular matrix of criteria values: one row per alternative,
/// one column per criterion.
#[derive(PartialEq, Debug, Clone)]
pub struct DecisionMatrix {
    rows: Vec<Vec<f64>>,
    num_criteria: usize,
}

impl DecisionMatrix {
    /// Builds a matrix from its rows.
    ///
    /// All the rows must have the same length and all the values must be finite.
    /// An empty list of rows is accepted here: the engine rejects it later.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<DecisionMatrix, TopsisError> {
        let num_criteria = rows.first().map(|r| r.len()).unwrap_or(0);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != num_criteria {
                return Err(ShapeError::RaggedRow {
                    row: row_idx,
                    expected: num_criteria,
                    actual: row.len(),
                }
                .into());
            }
            if let Some((col_idx, x)) = row.iter().enumerate().find(|(_, x)| !x.is_finite()) {
                return Err(CoercionError {
                    row: row_idx,
                    column: col_idx,
                    raw_value: x.to_string(),
                }
                .into());
            }
        }
        Ok(DecisionMatrix { rows, num_criteria })
    }

    pub fn num_alternatives(&self) -> usize {
        self.rows.len()
    }

    pub fn num_criteria(&self) -> usize {
        self.num_criteria
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// The values of one criterion across all the alternatives.
    pub fn column(&self, column: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |r| r.get(column).cloned())
    }
}

// ******** Output data structures *********

/// The outcome of the analysis for one alternative.
#[derive(PartialEq, Debug, Clone)]
pub struct ScoreResult {
    pub label: String,
    /// Relative closeness to the ideal solution, between 0 and 1.
    pub score: f64,
    /// 1 is the best rank.
    pub rank: u32,
}

/// All the intermediate quantities of one TOPSIS computation.
#[derive(PartialEq, Debug, Clone)]
pub struct TopsisDetails {
    /// The weights, scaled to sum to 1.
    pub normalized_weights: Vec<f64>,
    pub ideal_best: Vec<f64>,
    pub ideal_worst: Vec<f64>,
    pub distance_best: Vec<f64>,
    pub distance_worst: Vec<f64>,
    pub scores: Vec<f64>,
}

/// The ranked alternatives together with the details of the computation.
#[derive(PartialEq, Debug, Clone)]
pub struct Analysis {
    pub results: Vec<ScoreResult>,
    pub details: TopsisDetails,
}

// ********* Errors **********

/// Malformed text for the weights or the impacts.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ParseError {
    /// No token at all.
    Empty,
    /// A token that is not a finite, non-negative number.
    Weight(String),
    /// A token that is neither `+` nor `-`.
    Impact(String),
}

/// A cell of a criteria column that does not hold a number.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CoercionError {
    /// Index of the data row (the header is not counted).
    pub row: usize,
    pub column: usize,
    pub raw_value: String,
}

/// Inputs whose dimensions do not fit together.
///
/// These are contract violations of the caller: nothing gets computed.
#[derive(PartialEq, Debug, Clone)]
pub enum ShapeError {
    NoAlternatives,
    EmptyHeader,
    TooFewCriteria { actual: usize },
    RaggedRow { row: usize, expected: usize, actual: usize },
    UnknownColumn { column: usize, num_columns: usize },
    WeightCount { expected: usize, actual: usize },
    ImpactCount { expected: usize, actual: usize },
    LabelCount { expected: usize, actual: usize },
    InvalidWeight { index: usize, value: f64 },
    ZeroWeightSum,
}

/// Errors that prevent the scoring from completing.
#[derive(PartialEq, Debug, Clone)]
pub enum TopsisError {
    Parse(ParseError),
    Coercion(CoercionError),
    Shape(ShapeError),
}

impl From<ParseError> for TopsisError {
    fn from(e: ParseError) -> Self {
        TopsisError::Parse(e)
    }
}

impl From<CoercionError> for TopsisError {
    fn from(e: CoercionError) -> Self {
        TopsisError::Coercion(e)
    }
}

impl From<ShapeError> for TopsisError {
    fn from(e: ShapeError) -> Self {
        TopsisError::Shape(e)
    }
}

impl Error for TopsisError {}

impl Display for TopsisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopsisError::Parse(ParseError::Empty) => write!(f, "no value provided"),
            TopsisError::Parse(ParseError::Weight(token)) => write!(
                f,
                "invalid weight {:?}: weights must be non-negative numbers",
                token
            ),
            TopsisError::Parse(ParseError::Impact(token)) => {
                write!(f, "invalid impact {:?}: impacts must be '+' or '-'", token)
            }
            TopsisError::Coercion(CoercionError {
                row,
                column,
                raw_value,
            }) => write!(
                f,
                "non-numeric value {:?} at row {}, column {}",
                raw_value,
                row + 1,
                column + 1
            ),
            TopsisError::Shape(s) => match s {
                ShapeError::NoAlternatives => write!(f, "no alternative to rank"),
                ShapeError::EmptyHeader => write!(f, "the table has no column"),
                ShapeError::TooFewCriteria { actual } => {
                    write!(f, "at least 2 criteria are required, found {}", actual)
                }
                ShapeError::RaggedRow {
                    row,
                    expected,
                    actual,
                } => write!(
                    f,
                    "row {} has {} values, expected {}",
                    row + 1,
                    actual,
                    expected
                ),
                ShapeError::UnknownColumn {
                    column,
                    num_columns,
                } => write!(
                    f,
                    "column index {} is out of range (the table has {} columns)",
                    column, num_columns
                ),
                ShapeError::WeightCount { expected, actual } => write!(
                    f,
                    "number of weights ({}) must equal number of criteria ({})",
                    actual, expected
                ),
                ShapeError::ImpactCount { expected, actual } => write!(
                    f,
                    "number of impacts ({}) must equal number of criteria ({})",
                    actual, expected
                ),
                ShapeError::LabelCount { expected, actual } => write!(
                    f,
                    "number of labels ({}) must equal number of alternatives ({})",
                    actual, expected
                ),
                ShapeError::InvalidWeight { index, value } => write!(
                    f,
                    "weight #{} is {}: weights must be finite and non-negative",
                    index + 1,
                    value
                ),
                ShapeError::ZeroWeightSum => write!(f, "the weights sum to zero"),
            },
        }
    }
}
