pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::score::{FactorCounts, FactorScore, round2};

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub leads: String,
    pub branches: String,
    pub geocoder_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub leads: usize,
    pub branches: usize,
    pub branches_with_coordinates: usize,
    pub postcodes_looked_up: usize,
    pub geocoded: usize,
    pub nearest_branch_found: usize,
    pub scored: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RiskScoreStats {
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub counts: Counts,
    pub not_computable: FactorCounts,
    pub risk_score: RiskScoreStats,
}

/// Mean of the computable totals, rounded to two decimals.
pub fn average_risk_score(totals: &[FactorScore]) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for value in totals.iter().filter_map(|t| t.value()) {
        sum += value;
        n += 1;
    }
    if n == 0 {
        return None;
    }
    Some(round2(sum / n as f64))
}

pub fn risk_score_stats(totals: &[FactorScore]) -> RiskScoreStats {
    let values: Vec<f64> = totals.iter().filter_map(|t| t.value()).collect();
    RiskScoreStats {
        average: average_risk_score(totals),
        min: values.iter().copied().reduce(f64::min),
        max: values.iter().copied().reduce(f64::max),
    }
}

pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{v}")
}

/// Sub-scores are written rounded to two decimals; `NotComputable` becomes
/// the marker.
pub fn format_score(score: FactorScore, marker: &str) -> String {
    match score {
        FactorScore::Scored(v) => format_number(round2(v)),
        FactorScore::NotComputable => marker.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
