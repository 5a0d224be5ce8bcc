pub use crate::coerce::Table;
pub use crate::config::*;

/// A builder for tables of alternatives.
///
/// Readers of files should use the builder to assemble the table row by row.
///
/// ```
/// pub use topsis_engine::builder::Builder;
/// # use topsis_engine::TopsisError;
///
/// let header = ["Phone".to_string(), "Price".to_string(), "Storage".to_string()];
/// let mut builder = Builder::new(&header)?;
///
/// builder.add_row(&["P1".to_string(), "250".to_string(), "16".to_string()])?;
/// builder.add_row(&["P2".to_string(), "200".to_string(), "32".to_string()])?;
///
/// let table = builder.build();
/// assert_eq!(table.num_rows(), 2);
///
/// # Ok::<(), TopsisError>(())
/// ```
pub struct Builder {
    pub(crate) _header: Vec<String>,
    pub(crate) _rows: Vec<Vec<String>>,
}

impl Builder {
    pub fn new(header: &[String]) -> Result<Builder, TopsisError> {
        if header.is_empty() {
            return Err(ShapeError::EmptyHeader.into());
        }
        Ok(Builder {
            _header: header.to_vec(),
            _rows: Vec::new(),
        })
    }

    /// Adds a row of raw cells.
    ///
    /// The row must have exactly one cell per column of the header.
    pub fn add_row(&mut self, cells: &[String]) -> Result<(), TopsisError> {
        if cells.len() != self._header.len() {
            return Err(ShapeError::RaggedRow {
                row: self._rows.len(),
                expected: self._header.len(),
                actual: cells.len(),
            }
            .into());
        }
        self._rows.push(cells.to_vec());
        Ok(())
    }

    pub fn build(self) -> Table {
        Table {
            header: self._header,
            rows: self._rows,
        }
    }
}
