use std::io::Write;
use std::path::Path;

use crate::topsis::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The score as printed in the result tables, with at most [`SCORE_DECIMALS`] decimals.
pub fn format_score(score: f64) -> String {
    let x = round_score(score);
    if x.fract() == 0.0 {
        format!("{:.1}", x)
    } else {
        x.to_string()
    }
}

/// Guesses the type of input from the extension of the file.
pub fn input_type_from_path(path: &str) -> InputType {
    match Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .as_deref()
    {
        Some("xlsx") | Some("xlsm") => InputType::Excel,
        _ => InputType::Csv,
    }
}

/// Writes the content to the given file path, or to the standard output for `stdout`.
pub fn write_output(dest: &str, content: &str) -> CliResult<()> {
    if dest == "stdout" {
        let mut out = std::io::stdout();
        out.write_all(content.as_bytes())
            .context(WritingOutputSnafu { path: dest })?;
        out.flush().context(WritingOutputSnafu { path: dest })?;
    } else {
        info!("Writing {}", dest);
        fs::write(dest, content).context(WritingOutputSnafu { path: dest })?;
    }
    Ok(())
}
