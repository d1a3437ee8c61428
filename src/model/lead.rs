use crate::model::geo::Coordinates;
use crate::model::score::FactorScore;

/// One row of the leads table. Factor inputs are kept as raw cell text so the
/// scorer decides what counts as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub row: usize,
    pub post_code: Option<String>,
    pub age: Option<String>,
    pub ncd_years: Option<String>,
    pub vehicle_value: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub nearest: NearestBranch,
    pub scores: LeadScores,
}

impl Lead {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            post_code: None,
            age: None,
            ncd_years: None,
            vehicle_value: None,
            coordinates: None,
            nearest: NearestBranch::NotAvailable,
            scores: LeadScores::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NearestBranch {
    Found { name: String, miles: f64 },
    NotAvailable,
}

impl NearestBranch {
    pub fn name(&self) -> Option<&str> {
        match self {
            NearestBranch::Found { name, .. } => Some(name),
            NearestBranch::NotAvailable => None,
        }
    }

    pub fn miles(&self) -> Option<f64> {
        match self {
            NearestBranch::Found { miles, .. } => Some(*miles),
            NearestBranch::NotAvailable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadScores {
    pub ncd: FactorScore,
    pub age: FactorScore,
    pub vehicle_value: FactorScore,
    pub address: FactorScore,
    pub total: FactorScore,
}

impl Default for LeadScores {
    fn default() -> Self {
        Self {
            ncd: FactorScore::NotComputable,
            age: FactorScore::NotComputable,
            vehicle_value: FactorScore::NotComputable,
            address: FactorScore::NotComputable,
            total: FactorScore::NotComputable,
        }
    }
}
