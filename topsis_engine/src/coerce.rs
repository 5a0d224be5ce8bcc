//! Conversion of a raw table of text cells into a numeric decision matrix.

use log::debug;

use crate::config::*;

/// A table as read from a file: a header and rows of raw cells.
///
/// Use the [`crate::builder::Builder`] to create one.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Table {
    pub(crate) header: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

impl Table {
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.header.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The content of a column, passed through unchanged.
    pub fn labels(&self, column: usize) -> Result<Vec<String>, TopsisError> {
        self.check_column(column)?;
        Ok(self.rows.iter().map(|r| r[column].clone()).collect())
    }

    /// All the column indexes except the label column, in order.
    pub fn criteria_columns(&self, label_column: usize) -> Vec<usize> {
        (0..self.num_columns())
            .filter(|idx| *idx != label_column)
            .collect()
    }

    fn check_column(&self, column: usize) -> Result<(), ShapeError> {
        if column >= self.num_columns() {
            return Err(ShapeError::UnknownColumn {
                column,
                num_columns: self.num_columns(),
            });
        }
        Ok(())
    }
}

/// Coerces the given columns of the table into numbers.
///
/// The coercion is strict: empty cells, text and non-finite numbers are
/// rejected with their position. The rows keep the order of the table and the
/// columns follow the order of `criteria_columns`.
pub fn ensure_numeric(
    table: &Table,
    criteria_columns: &[usize],
) -> Result<DecisionMatrix, TopsisError> {
    for col in criteria_columns {
        table.check_column(*col)?;
    }
    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(table.num_rows());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let mut values: Vec<f64> = Vec::with_capacity(criteria_columns.len());
        for col in criteria_columns.iter().cloned() {
            let raw = &row[col];
            match raw.trim().parse::<f64>() {
                Ok(x) if x.is_finite() => values.push(x),
                _ => {
                    return Err(CoercionError {
                        row: row_idx,
                        column: col,
                        raw_value: raw.clone(),
                    }
                    .into())
                }
            }
        }
        debug!("ensure_numeric: row {}: {:?}", row_idx, values);
        rows.push(values);
    }
    DecisionMatrix::from_rows(rows)
}
