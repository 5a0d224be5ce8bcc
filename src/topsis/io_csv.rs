// Primitives for reading and writing CSV files.

use topsis_engine::builder::Builder;

use crate::topsis::{io_common::format_score, *};

/// The columns appended to the input table in the results.
pub const SCORE_COLUMN: &str = "Topsis Score";
pub const RANK_COLUMN: &str = "Rank";

pub fn read_csv_table(path: &str) -> CliResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        // Short rows get reported by the table builder with their position.
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;

    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1_usize })?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_table: header: {:?}", header);
    ensure!(!header.is_empty(), MissingHeaderSnafu {});

    let mut builder = Builder::new(&header).context(InvalidTableSnafu {})?;
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        debug!("read_csv_table: lineno: {:?} row: {:?}", lineno, &cells);
        builder.add_row(&cells).context(InvalidTableSnafu {})?;
    }
    Ok(builder.build())
}

/// The input table followed by the score and rank of each alternative, in the
/// order of the input.
pub fn results_to_csv(table: &Table, results: &[ScoreResult]) -> CliResult<String> {
    let mut buf: Vec<u8> = Vec::new();
    {
        let mut wtr = csv::Writer::from_writer(&mut buf);
        let mut header: Vec<String> = table.header().to_vec();
        header.push(SCORE_COLUMN.to_string());
        header.push(RANK_COLUMN.to_string());
        wtr.write_record(&header).context(WritingCsvSnafu {})?;
        for (row, res) in table.rows().iter().zip(results.iter()) {
            let mut record: Vec<String> = row.clone();
            record.push(format_score(res.score));
            record.push(res.rank.to_string());
            wtr.write_record(&record).context(WritingCsvSnafu {})?;
        }
        wtr.flush().context(WritingOutputSnafu { path: "buffer" })?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// The example table offered to new users.
pub fn sample_csv() -> String {
    [
        "Alternative,Criterion 1,Criterion 2,Criterion 3",
        "A1,250,16,12",
        "A2,200,20,8",
        "A3,300,12,15",
        "A4,275,14,10",
    ]
    .iter()
    .map(|l| format!("{}\n", l))
    .collect()
}

pub fn write_sample(path: &str) -> CliResult<()> {
    write_output(path, &sample_csv())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topsis::tests::test_file;

    #[test]
    fn read_sample_file() {
        let table = read_csv_table(&test_file("sample_data.csv")).unwrap();
        assert_eq!(
            table.header(),
            &["Alternative", "Criterion 1", "Criterion 2", "Criterion 3"]
        );
        assert_eq!(table.num_rows(), 4);
        assert_eq!(table.rows()[3], vec!["A4", "275", "14", "10"]);
    }

    #[test]
    fn short_line_is_reported() {
        let res = read_csv_table(&test_file("short_line.csv"));
        assert!(
            matches!(
                res,
                Err(TopsisCliError::InvalidTable {
                    source: TopsisError::Shape(ShapeError::RaggedRow { row: 1, .. })
                })
            ),
            "{:?}",
            res
        );
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_csv_table(&test_file("does_not_exist.csv")),
            Err(TopsisCliError::OpeningCsv { .. })
        ));
    }

    #[test]
    fn results_table() {
        let table = read_csv_table(&test_file("sample_data.csv")).unwrap();
        let results: Vec<ScoreResult> = table
            .labels(0)
            .unwrap()
            .iter()
            .enumerate()
            .map(|(idx, label)| ScoreResult {
                label: label.clone(),
                score: 0.25 * (idx as f64),
                rank: 4 - idx as u32,
            })
            .collect();
        let csv = results_to_csv(&table, &results).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Alternative,Criterion 1,Criterion 2,Criterion 3,Topsis Score,Rank"
        );
        assert_eq!(lines[1], "A1,250,16,12,0.0,4");
        assert_eq!(lines[3], "A3,300,12,15,0.5,2");
    }

    #[test]
    fn sample_is_readable() {
        let path = std::env::temp_dir().join("topsis_sample_data.csv");
        let path_s = path.display().to_string();
        write_sample(&path_s).unwrap();
        let table = read_csv_table(&path_s).unwrap();
        assert_eq!(table.num_columns(), 4);
        assert_eq!(table.labels(0).unwrap(), vec!["A1", "A2", "A3", "A4"]);
    }
}
