use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use topsis_engine::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::topsis::config_reader::*;
use crate::topsis::io_common::*;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod summary;

#[derive(Debug, Snafu)]
pub enum TopsisCliError {
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error writing the CSV results"))]
    WritingCsv { source: csv::Error },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} does not contain any worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Cannot find the worksheet {name:?} in the Excel file"))]
    MissingWorksheet { name: String },
    #[snafu(display("The input file does not have a header row"))]
    MissingHeader {},
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Invalid value for {field} in the configuration file"))]
    InvalidConfigValue { field: String },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Error writing to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(display("Please provide an input file (with --input or in the configuration file)"))]
    MissingInput {},
    #[snafu(display("Please provide weights (for example --weights 1,1,1)"))]
    MissingWeights {},
    #[snafu(display("Please provide impacts (for example --impacts +,+,-)"))]
    MissingImpacts {},
    #[snafu(display("Unknown input type {input_type:?}: expected csv or excel"))]
    UnknownInputType { input_type: String },
    #[snafu(display(
        "Input file must contain at least 3 columns (1 name + 2 criteria), found {num_columns}"
    ))]
    TooFewColumns { num_columns: usize },
    #[snafu(display(
        "Number of weights ({num_weights}) must equal number of criteria ({num_criteria})"
    ))]
    WeightCountMismatch {
        num_weights: usize,
        num_criteria: usize,
    },
    #[snafu(display(
        "Number of impacts ({num_impacts}) must equal number of criteria ({num_criteria})"
    ))]
    ImpactCountMismatch {
        num_impacts: usize,
        num_criteria: usize,
    },

    #[snafu(display("Invalid input table"))]
    InvalidTable { source: TopsisError },
    #[snafu(display("Invalid weights"))]
    InvalidWeights { source: TopsisError },
    #[snafu(display("Invalid impacts"))]
    InvalidImpacts { source: TopsisError },
    #[snafu(display("Invalid criteria values in the input file"))]
    InvalidCriteria { source: TopsisError },
    #[snafu(display("The analysis could not be completed"))]
    Analysis { source: TopsisError },

    #[snafu(display("Difference detected between the results and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type CliResult<T> = Result<T, TopsisCliError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Excel,
}

impl InputType {
    fn from_name(name: &str) -> CliResult<InputType> {
        match name.to_lowercase().as_str() {
            "csv" => Ok(InputType::Csv),
            "excel" | "xlsx" => Ok(InputType::Excel),
            _ => UnknownInputTypeSnafu { input_type: name }.fail(),
        }
    }
}

/// Everything needed to run one analysis, after merging the command line
/// and the configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AnalysisSettings {
    pub name: Option<String>,
    pub input_path: String,
    pub input_type: InputType,
    pub excel_worksheet_name: Option<String>,
    pub weights: String,
    pub impacts: String,
    pub out: Option<String>,
    pub summary: Option<String>,
    pub reference: Option<String>,
}

/// The products of an analysis, before they get written anywhere.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub table: Table,
    pub analysis: Analysis,
    pub results_csv: String,
    pub summary_js: JSValue,
}

fn resolve_path(root: &Path, path: &str) -> String {
    if path == "stdout" {
        return path.to_string();
    }
    let p: PathBuf = [root, Path::new(path)].iter().collect();
    p.as_path().display().to_string()
}

/// Builds the settings of the analysis. The options on the command line take
/// precedence over the configuration file, whose paths are relative to its own
/// directory.
pub fn resolve_settings(args: &Args) -> CliResult<AnalysisSettings> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            info!("Reading configuration {:?}", config_path);
            let config = read_config(config_path)?;
            debug!("config: {:?}", config);
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (Some(config), root)
        }
        None => (None, PathBuf::new()),
    };
    let source = config.as_ref().and_then(|c| c.input_source.clone());
    let output = config
        .as_ref()
        .map(|c| c.output_settings.clone())
        .unwrap_or_default();

    let input_path = match (&args.input, &source) {
        (Some(p), _) => p.clone(),
        (None, Some(s)) => resolve_path(&root, &s.file_path),
        (None, None) => return MissingInputSnafu {}.fail(),
    };
    let input_type = match (&args.input_type, source.as_ref().and_then(|s| s.provider.as_ref())) {
        (Some(t), _) => InputType::from_name(t)?,
        (None, Some(t)) => InputType::from_name(t)?,
        (None, None) => input_type_from_path(&input_path),
    };
    let excel_worksheet_name = args
        .excel_worksheet_name
        .clone()
        .or_else(|| source.as_ref().and_then(|s| s.excel_worksheet_name.clone()));

    let weights = match &args.weights {
        Some(w) => w.clone(),
        None => config
            .as_ref()
            .map(|c| c.weights())
            .transpose()?
            .flatten()
            .context(MissingWeightsSnafu {})?,
    };
    let impacts = match &args.impacts {
        Some(i) => i.clone(),
        None => config
            .as_ref()
            .map(|c| c.impacts())
            .transpose()?
            .flatten()
            .context(MissingImpactsSnafu {})?,
    };

    Ok(AnalysisSettings {
        name: output.analysis_name.clone(),
        input_path,
        input_type,
        excel_worksheet_name,
        weights,
        impacts,
        out: args
            .out
            .clone()
            .or_else(|| output.output_path.as_ref().map(|p| resolve_path(&root, p))),
        summary: args
            .summary
            .clone()
            .or_else(|| output.summary_path.as_ref().map(|p| resolve_path(&root, p))),
        reference: args.reference.clone(),
    })
}

fn read_table(settings: &AnalysisSettings) -> CliResult<Table> {
    info!(
        "Attempting to read input file {:?} ({:?})",
        settings.input_path, settings.input_type
    );
    match settings.input_type {
        InputType::Csv => io_csv::read_csv_table(&settings.input_path),
        InputType::Excel => {
            io_excel::read_excel_table(&settings.input_path, &settings.excel_worksheet_name)
        }
    }
}

/// Reads the input, validates it and ranks the alternatives.
///
/// All the inputs are validated before any score is computed.
pub fn run_analysis(settings: &AnalysisSettings) -> CliResult<AnalysisOutcome> {
    let table = read_table(settings)?;
    ensure!(
        table.num_columns() >= 3,
        TooFewColumnsSnafu {
            num_columns: table.num_columns()
        }
    );

    let weights = parse_weights(&settings.weights).context(InvalidWeightsSnafu {})?;
    let impacts = parse_impacts(&settings.impacts).context(InvalidImpactsSnafu {})?;

    // The first column holds the names of the alternatives.
    let criteria_columns = table.criteria_columns(0);
    let num_criteria = criteria_columns.len();
    ensure!(
        weights.len() == num_criteria,
        WeightCountMismatchSnafu {
            num_weights: weights.len(),
            num_criteria
        }
    );
    ensure!(
        impacts.len() == num_criteria,
        ImpactCountMismatchSnafu {
            num_impacts: impacts.len(),
            num_criteria
        }
    );

    let matrix = ensure_numeric(&table, &criteria_columns).context(InvalidCriteriaSnafu {})?;
    let labels = table.labels(0).context(InvalidTableSnafu {})?;
    let analysis = analyze(&labels, &matrix, &weights, &impacts).context(AnalysisSnafu {})?;

    let criteria: Vec<String> = criteria_columns
        .iter()
        .map(|c| table.header()[*c].clone())
        .collect();
    let summary_js =
        summary::build_summary_js(settings, &criteria, &weights, &impacts, &analysis);
    let results_csv = io_csv::results_to_csv(&table, &analysis.results)?;

    Ok(AnalysisOutcome {
        table,
        analysis,
        results_csv,
        summary_js,
    })
}

/// Compares the results with a reference CSV file, ignoring line endings and trailing spaces.
pub fn check_reference(path: &str, results_csv: &str) -> CliResult<()> {
    let reference = fs::read_to_string(path).context(OpeningReferenceSnafu { path })?;
    let normalize = |s: &str| -> String {
        s.lines()
            .map(|l| l.trim_end())
            .collect::<Vec<&str>>()
            .join("\n")
    };
    let expected = normalize(&reference);
    let actual = normalize(results_csv);
    if expected != actual {
        warn!("Found differences with the reference file {:?}", path);
        print_diff(expected.as_str(), actual.as_str(), "\n");
        return ReferenceMismatchSnafu { path }.fail();
    }
    info!("The results match the reference {:?}", path);
    Ok(())
}

fn write_outputs(settings: &AnalysisSettings, outcome: &AnalysisOutcome) -> CliResult<()> {
    let to_stdout = [&settings.out, &settings.summary]
        .iter()
        .any(|o| o.as_deref() == Some("stdout"));
    if !to_stdout {
        println!("{}", summary::format_rankings(&outcome.analysis.results));
    }

    if let Some(out) = &settings.out {
        write_output(out, &outcome.results_csv)?;
    }
    if let Some(summary_path) = &settings.summary {
        let pretty_js =
            serde_json::to_string_pretty(&outcome.summary_js).context(ParsingJsonSnafu {})?;
        write_output(summary_path, &format!("{}\n", pretty_js))?;
    }
    // The reference, if provided for comparison
    if let Some(reference) = &settings.reference {
        check_reference(reference, &outcome.results_csv)?;
    }
    Ok(())
}

pub fn run_analysis_cli(args: &Args) -> CliResult<()> {
    if let Some(sample_path) = &args.write_sample {
        info!("Writing sample input to {:?}", sample_path);
        return io_csv::write_sample(sample_path);
    }
    let settings = resolve_settings(args)?;
    debug!("settings: {:?}", settings);
    let outcome = run_analysis(&settings)?;
    write_outputs(&settings, &outcome)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use clap::Parser;

    pub fn test_file(name: &str) -> String {
        format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn temp_file(name: &str) -> String {
        std::env::temp_dir().join(name).display().to_string()
    }

    fn args(extra: &[&str]) -> Args {
        let mut all = vec!["topsis"];
        all.extend_from_slice(extra);
        Args::parse_from(all)
    }

    fn sample_settings(weights: &str, impacts: &str) -> AnalysisSettings {
        let input = test_file("sample_data.csv");
        resolve_settings(&args(&[
            "-i",
            &input,
            "--weights",
            weights,
            "--impacts",
            impacts,
        ]))
        .unwrap()
    }

    #[test]
    fn settings_from_command_line() {
        let settings = sample_settings("1,1,1", "+,-,-");
        assert_eq!(settings.input_type, InputType::Csv);
        assert_eq!(settings.weights, "1,1,1");
        assert_eq!(settings.impacts, "+,-,-");
        assert_eq!(settings.out, None);
        assert_eq!(settings.name, None);
    }

    #[test]
    fn settings_from_config() {
        let config = test_file("sample_config.json");
        let settings = resolve_settings(&args(&["--config", &config])).unwrap();
        assert_eq!(settings.input_path, test_file("sample_data.csv"));
        assert_eq!(settings.name.as_deref(), Some("Sample analysis"));
        assert_eq!(settings.weights, "1,1,1");
        assert_eq!(settings.impacts, "+,-,-");
    }

    #[test]
    fn command_line_overrides_config() {
        let config = test_file("sample_config.json");
        let settings = resolve_settings(&args(&[
            "--config",
            &config,
            "--impacts",
            "-,+,+",
            "--input-type",
            "excel",
        ]))
        .unwrap();
        assert_eq!(settings.impacts, "-,+,+");
        assert_eq!(settings.weights, "1,1,1");
        assert_eq!(settings.input_type, InputType::Excel);
    }

    #[test]
    fn missing_settings() {
        assert!(matches!(
            resolve_settings(&args(&["--weights", "1,1"])),
            Err(TopsisCliError::MissingInput {})
        ));
        assert!(matches!(
            resolve_settings(&args(&["-i", "data.csv", "--impacts", "+,+"])),
            Err(TopsisCliError::MissingWeights {})
        ));
        assert!(matches!(
            resolve_settings(&args(&["-i", "data.csv", "--weights", "1,1"])),
            Err(TopsisCliError::MissingImpacts {})
        ));
        assert!(matches!(
            resolve_settings(&args(&[
                "-i",
                "data.csv",
                "--input-type",
                "json",
                "--weights",
                "1,1",
                "--impacts",
                "+,+"
            ])),
            Err(TopsisCliError::UnknownInputType { .. })
        ));
    }

    #[test]
    fn sample_matches_reference() {
        let settings = sample_settings("1,1,1", "+,-,-");
        let outcome = run_analysis(&settings).unwrap();
        let ranks: Vec<u32> = outcome.analysis.results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![4, 3, 2, 1]);
        check_reference(&test_file("sample_expected.csv"), &outcome.results_csv).unwrap();
    }

    #[test]
    fn excel_input_matches_reference() {
        let input = test_file("sample_data.xlsx");
        let settings = resolve_settings(&args(&[
            "-i",
            &input,
            "--weights",
            "1,1,1",
            "--impacts",
            "+,-,-",
        ]))
        .unwrap();
        assert_eq!(settings.input_type, InputType::Excel);
        let outcome = run_analysis(&settings).unwrap();
        check_reference(&test_file("sample_expected.csv"), &outcome.results_csv).unwrap();
    }

    #[test]
    fn reference_mismatch() {
        let settings = sample_settings("1,1,1", "+,+,+");
        let outcome = run_analysis(&settings).unwrap();
        assert!(matches!(
            check_reference(&test_file("sample_expected.csv"), &outcome.results_csv),
            Err(TopsisCliError::ReferenceMismatch { .. })
        ));
    }

    #[test]
    fn summary_content() {
        let settings = sample_settings("1,1,1", "+,-,-");
        let outcome = run_analysis(&settings).unwrap();
        let js = &outcome.summary_js;
        assert_eq!(js["config"]["input"], "sample_data.csv");
        assert_eq!(js["config"]["impacts"][1], "-");
        assert_eq!(js["top"][0]["alternative"], "A4");
        assert_eq!(js["top"][0]["score"], 0.732653);
        assert_eq!(js["top"].as_array().map(|a| a.len()), Some(3));
        assert_eq!(js["statistics"]["totalAlternatives"], 4);
        assert_eq!(js["results"][0]["rank"], 4);
        assert_eq!(js["idealBest"].as_array().map(|a| a.len()), Some(3));
    }

    #[test]
    fn weight_count_mismatch() {
        let settings = sample_settings("1,1", "+,-,-");
        assert!(matches!(
            run_analysis(&settings),
            Err(TopsisCliError::WeightCountMismatch {
                num_weights: 2,
                num_criteria: 3
            })
        ));
        let settings = sample_settings("1,1,1", "+,-,-,+");
        assert!(matches!(
            run_analysis(&settings),
            Err(TopsisCliError::ImpactCountMismatch {
                num_impacts: 4,
                num_criteria: 3
            })
        ));
    }

    #[test]
    fn invalid_weights_and_impacts() {
        assert!(matches!(
            run_analysis(&sample_settings("1,-1,1", "+,-,-")),
            Err(TopsisCliError::InvalidWeights {
                source: TopsisError::Parse(ParseError::Weight(_))
            })
        ));
        assert!(matches!(
            run_analysis(&sample_settings("1,1,1", "+,x,-")),
            Err(TopsisCliError::InvalidImpacts {
                source: TopsisError::Parse(ParseError::Impact(_))
            })
        ));
        assert!(matches!(
            run_analysis(&sample_settings("0,0,0", "+,-,-")),
            Err(TopsisCliError::Analysis {
                source: TopsisError::Shape(ShapeError::ZeroWeightSum)
            })
        ));
    }

    #[test]
    fn too_few_columns() {
        let input = test_file("two_columns.csv");
        let settings = resolve_settings(&args(&[
            "-i",
            &input,
            "--weights",
            "1",
            "--impacts",
            "+",
        ]))
        .unwrap();
        assert!(matches!(
            run_analysis(&settings),
            Err(TopsisCliError::TooFewColumns { num_columns: 2 })
        ));
    }

    #[test]
    fn non_numeric_cell() {
        let input = test_file("bad_cell.csv");
        let settings = resolve_settings(&args(&[
            "-i",
            &input,
            "--weights",
            "1,1,1",
            "--impacts",
            "+,-,-",
        ]))
        .unwrap();
        let res = run_analysis(&settings);
        match res {
            Err(TopsisCliError::InvalidCriteria {
                source: TopsisError::Coercion(e),
            }) => {
                assert_eq!(e.row, 2);
                assert_eq!(e.column, 2);
                assert_eq!(e.raw_value, "n/a");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn end_to_end() {
        let config = test_file("sample_config.json");
        let out = temp_file("topsis_end_to_end_results.csv");
        let summary_path = temp_file("topsis_end_to_end_summary.json");
        let reference = test_file("sample_expected.csv");
        run_analysis_cli(&args(&[
            "--config",
            &config,
            "--out",
            &out,
            "--summary",
            &summary_path,
            "--reference",
            &reference,
        ]))
        .unwrap();
        let written = fs::read_to_string(&out).unwrap();
        check_reference(&reference, &written).unwrap();
        let js: JSValue =
            serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
        assert_eq!(js["config"]["analysisName"], "Sample analysis");
        assert_eq!(js["top"][0]["alternative"], "A4");
    }

    #[test]
    fn write_sample_option() {
        let sample = temp_file("topsis_cli_sample.csv");
        run_analysis_cli(&args(&["--write-sample", &sample])).unwrap();
        let settings = resolve_settings(&args(&[
            "-i",
            &sample,
            "--weights",
            "1,1,1",
            "--impacts",
            "+,+,-",
        ]))
        .unwrap();
        let outcome = run_analysis(&settings).unwrap();
        assert_eq!(outcome.table.num_rows(), 4);
    }
}
