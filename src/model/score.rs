use serde::Serialize;

/// Marker that appears in input cells meaning "no value".
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactorScore {
    Scored(f64),
    NotComputable,
}

impl FactorScore {
    pub fn value(self) -> Option<f64> {
        match self {
            FactorScore::Scored(v) => Some(v),
            FactorScore::NotComputable => None,
        }
    }

    pub fn is_computable(self) -> bool {
        matches!(self, FactorScore::Scored(_))
    }
}

/// Counts of leads whose factor could not be scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactorCounts {
    pub ncd: usize,
    pub age: usize,
    pub vehicle_value: usize,
    pub address: usize,
    pub total: usize,
}

/// Rounds half away from zero to two decimals.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Parses a raw cell as a number. Empty cells, the `N/A` marker, unparsable
/// text and NaN all yield `None`.
pub fn parse_numeric(raw: Option<&str>) -> Option<f64> {
    let text = raw?.trim();
    if text.is_empty() || text == NOT_AVAILABLE {
        return None;
    }
    let value = text.parse::<f64>().ok()?;
    if value.is_nan() {
        return None;
    }
    Some(value)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/score.rs"]
mod tests;
