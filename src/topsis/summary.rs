// Presentation of the results: statistics, rankings and the JSON summary.

use serde::Serialize;
use serde_json::json;
use serde_json::Value as JSValue;

use crate::topsis::*;

/// Number of alternatives listed in the podium of the summary.
const PODIUM_SIZE: usize = 3;

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct Statistics {
    #[serde(rename = "bestScore")]
    pub best_score: f64,
    #[serde(rename = "worstScore")]
    pub worst_score: f64,
    #[serde(rename = "averageScore")]
    pub average_score: f64,
    #[serde(rename = "totalAlternatives")]
    pub total_alternatives: usize,
}

pub fn compute_statistics(results: &[ScoreResult]) -> Option<Statistics> {
    if results.is_empty() {
        return None;
    }
    // Same precision as the published scores and the ranks.
    let scores = results.iter().map(|r| round_score(r.score));
    let best_score = scores.clone().fold(f64::NEG_INFINITY, f64::max);
    let worst_score = scores.clone().fold(f64::INFINITY, f64::min);
    let average_score = scores.sum::<f64>() / (results.len() as f64);
    Some(Statistics {
        best_score,
        worst_score,
        average_score,
        total_alternatives: results.len(),
    })
}

/// The results ordered by rank. Alternatives with the same rank keep the order of the input.
pub fn sorted_by_rank(results: &[ScoreResult]) -> Vec<&ScoreResult> {
    let mut sorted: Vec<&ScoreResult> = results.iter().collect();
    sorted.sort_by_key(|r| r.rank);
    sorted
}

/// Human-readable listing of the rankings and statistics.
pub fn format_rankings(results: &[ScoreResult]) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("Rankings:".to_string());
    for r in sorted_by_rank(results) {
        lines.push(format!("  #{} {} - Score: {:.4}", r.rank, r.label, r.score));
    }
    if let Some(stats) = compute_statistics(results) {
        lines.push("Statistics:".to_string());
        lines.push(format!("  Best Score: {:.4}", stats.best_score));
        lines.push(format!("  Worst Score: {:.4}", stats.worst_score));
        lines.push(format!("  Average Score: {:.4}", stats.average_score));
        lines.push(format!(
            "  Total Alternatives: {}",
            stats.total_alternatives
        ));
    }
    lines.join("\n")
}

fn round_all(xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|x| round_score(*x)).collect()
}

fn result_to_json(r: &ScoreResult) -> JSValue {
    json!({"alternative": r.label, "score": round_score(r.score), "rank": r.rank})
}

pub fn build_summary_js(
    settings: &AnalysisSettings,
    criteria: &[String],
    weights: &[f64],
    impacts: &[Impact],
    analysis: &Analysis,
) -> JSValue {
    let impacts_s: Vec<String> = impacts.iter().map(|i| i.to_string()).collect();
    let podium: Vec<JSValue> = sorted_by_rank(&analysis.results)
        .into_iter()
        .take(PODIUM_SIZE)
        .map(result_to_json)
        .collect();
    let results: Vec<JSValue> = analysis.results.iter().map(result_to_json).collect();
    json!({
        "config": {
            "analysisName": settings.name,
            "input": simplify_file_name(&settings.input_path),
            "criteria": criteria,
            "weights": weights,
            "impacts": impacts_s,
        },
        "statistics": compute_statistics(&analysis.results),
        "idealBest": round_all(&analysis.details.ideal_best),
        "idealWorst": round_all(&analysis.details.ideal_worst),
        "top": podium,
        "results": results,
    })
}
