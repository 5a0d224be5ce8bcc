use crate::topsis::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "analysisName")]
    pub analysis_name: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "summaryPath")]
    pub summary_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct InputSource {
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TopsisConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "inputSource")]
    pub input_source: Option<InputSource>,
    // Either a string "1,1,2" or a list [1, 1, 2]
    #[serde(rename = "weights")]
    _weights: Option<JSValue>,
    // Either a string "+,-" or a list ["+", "-"]
    #[serde(rename = "impacts")]
    _impacts: Option<JSValue>,
}

impl TopsisConfig {
    pub fn weights(&self) -> CliResult<Option<String>> {
        read_js_list(&self._weights, "weights")
    }

    pub fn impacts(&self) -> CliResult<Option<String>> {
        read_js_list(&self._impacts, "impacts")
    }
}

pub fn read_config(path: &str) -> CliResult<TopsisConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: TopsisConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Turns a list in a JSON configuration into the comma-separated notation of the
/// command line.
fn read_js_list(x: &Option<JSValue>, field: &str) -> CliResult<Option<String>> {
    match x {
        None | Some(JSValue::Null) => Ok(None),
        Some(JSValue::String(s)) => Ok(Some(s.clone())),
        Some(JSValue::Array(elts)) => {
            let mut tokens: Vec<String> = Vec::new();
            for elt in elts {
                match elt {
                    JSValue::Number(n) => tokens.push(n.to_string()),
                    JSValue::String(s) => tokens.push(s.clone()),
                    _ => return InvalidConfigValueSnafu { field }.fail(),
                }
            }
            Ok(Some(tokens.join(",")))
        }
        _ => InvalidConfigValueSnafu { field }.fail(),
    }
}
