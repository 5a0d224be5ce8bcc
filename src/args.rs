use clap::Parser;

/// This is a multi-criteria decision program: it ranks alternatives with the TOPSIS method.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the analysis: input file, weights, impacts and outputs.
    /// The other options take precedence over the content of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The table of alternatives. The first row is the header, the first column
    /// contains the names of the alternatives and the other columns are the criteria.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or excel) The type of the input. If not provided, it is deduced from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (list of comma-separated numbers) The weight of each criterion, for example "1,1,2".
    #[clap(short, long, value_parser, allow_hyphen_values = true)]
    pub weights: Option<String>,

    /// (list of comma-separated + or -) The impact of each criterion, for example "+,+,-".
    /// '+' means that higher values are better, '-' that lower values are better.
    #[clap(long, value_parser, allow_hyphen_values = true)]
    pub impacts: Option<String>,

    /// (file path or 'stdout') If specified, the input table with the score and the rank of
    /// each alternative will be written in CSV format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or 'stdout') If specified, a summary of the analysis will be written in JSON
    /// format to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference CSV file with the expected results. If provided, the program will
    /// check that the results match the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path) Writes a sample input file to the given location and exits.
    #[clap(long, value_parser)]
    pub write_sample: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
