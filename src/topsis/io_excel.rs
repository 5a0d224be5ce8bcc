// Primitives for reading Excel files.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use topsis_engine::builder::Builder;

use crate::topsis::*;

pub fn read_excel_table(path: &str, worksheet_name: &Option<String>) -> CliResult<Table> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(MissingHeaderSnafu {})?
        .iter()
        .map(read_cell)
        .collect();
    debug!("read_excel_table: header: {:?}", header);

    let mut builder = Builder::new(&header).context(InvalidTableSnafu {})?;
    for (idx, row) in iter.enumerate() {
        // Spreadsheets often carry formatted but empty rows at the end.
        if row.iter().all(is_blank) {
            debug!("read_excel_table: skipping empty row {}", idx + 2);
            continue;
        }
        let cells: Vec<String> = row.iter().map(read_cell).collect();
        debug!("read_excel_table: row {}: {:?}", idx + 2, &cells);
        builder.add_row(&cells).context(InvalidTableSnafu {})?;
    }
    Ok(builder.build())
}

fn is_blank(cell: &DataType) -> bool {
    match cell {
        DataType::Empty => true,
        DataType::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// The text of a cell, as it would appear in a CSV export.
///
/// Whether the content is numeric is decided later, by the same rules as for the CSV files.
/// Dates and errors are not numbers and get rejected there with a readable value.
fn read_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(serial) => match cell.as_datetime() {
            Some(dt) => dt.to_string(),
            None => format!("date {}", serial),
        },
        DataType::Error(e) => e.to_string(),
        DataType::Empty => "".to_string(),
    }
}

fn get_range(path: &str, worksheet_name_o: &Option<String>) -> CliResult<Range<DataType>> {
    debug!(
        "read_excel_table: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })
    }
}
