use crate::model::buckets::{ADDRESS_DISTANCE, AGE, BucketTable, NCD_YEARS, VEHICLE_VALUE};
use crate::model::lead::{Lead, LeadScores, NearestBranch};
use crate::model::score::{FactorCounts, FactorScore, parse_numeric, round2};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stage3Output {
    pub scored: usize,
    pub not_computable: FactorCounts,
}

fn score_cell(table: &BucketTable, raw: Option<&str>) -> FactorScore {
    let Some(x) = parse_numeric(raw) else {
        return FactorScore::NotComputable;
    };
    let score = table.score(x);
    if !score.is_computable() {
        tracing::trace!("{} value {} is outside every bucket", table.factor, x);
    }
    score
}

pub fn ncd_score(raw: Option<&str>) -> FactorScore {
    score_cell(&NCD_YEARS, raw)
}

pub fn age_score(raw: Option<&str>) -> FactorScore {
    score_cell(&AGE, raw)
}

pub fn vehicle_value_score(raw: Option<&str>) -> FactorScore {
    score_cell(&VEHICLE_VALUE, raw)
}

/// Scores the already rounded distance to the nearest branch.
pub fn address_score(nearest: &NearestBranch) -> FactorScore {
    match nearest.miles() {
        Some(miles) => ADDRESS_DISTANCE.score(miles),
        None => FactorScore::NotComputable,
    }
}

pub fn total_score(
    ncd: FactorScore,
    age: FactorScore,
    vehicle_value: FactorScore,
    address: FactorScore,
) -> FactorScore {
    match (ncd, age, vehicle_value, address) {
        (
            FactorScore::Scored(m),
            FactorScore::Scored(o),
            FactorScore::Scored(q),
            FactorScore::Scored(t),
        ) => FactorScore::Scored(round2(m + o + q + t)),
        _ => FactorScore::NotComputable,
    }
}

pub fn score_lead(lead: &Lead) -> LeadScores {
    let ncd = ncd_score(lead.ncd_years.as_deref());
    let age = age_score(lead.age.as_deref());
    let vehicle_value = vehicle_value_score(lead.vehicle_value.as_deref());
    let address = address_score(&lead.nearest);
    LeadScores {
        ncd,
        age,
        vehicle_value,
        address,
        total: total_score(ncd, age, vehicle_value, address),
    }
}

pub fn run_stage3(leads: &mut [Lead]) -> Stage3Output {
    let mut out = Stage3Output::default();

    for lead in leads.iter_mut() {
        let scores = score_lead(lead);
        let missing = &mut out.not_computable;
        missing.ncd += usize::from(!scores.ncd.is_computable());
        missing.age += usize::from(!scores.age.is_computable());
        missing.vehicle_value += usize::from(!scores.vehicle_value.is_computable());
        missing.address += usize::from(!scores.address.is_computable());
        if scores.total.is_computable() {
            out.scored += 1;
        } else {
            missing.total += 1;
            tracing::debug!("lead row {} has no computable risk score", lead.row + 2);
        }
        lead.scores = scores;
    }

    tracing::info!(
        "scored {}/{} leads (not computable: ncd={}, age={}, vehicle_value={}, address={})",
        out.scored,
        leads.len(),
        out.not_computable.ncd,
        out.not_computable.age,
        out.not_computable.vehicle_value,
        out.not_computable.address
    );
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_scores.rs"]
mod tests;
