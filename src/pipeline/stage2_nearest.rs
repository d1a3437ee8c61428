use crate::geodesy::distance_miles;
use crate::model::branch::Branch;
use crate::model::geo::Coordinates;
use crate::model::lead::{Lead, NearestBranch};
use crate::model::score::round2;
use crate::pipeline::progress::Progress;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stage2Output {
    pub matched: usize,
    pub unmatched: usize,
}

/// Brute-force nearest branch. Branches without coordinates are never
/// candidates; the first branch at the minimum distance wins.
pub fn nearest_branch(lead: Option<Coordinates>, branches: &[Branch]) -> NearestBranch {
    let Some(origin) = lead else {
        return NearestBranch::NotAvailable;
    };

    let mut min_miles = f64::INFINITY;
    let mut nearest: Option<&Branch> = None;
    for branch in branches {
        let Some(target) = branch.coordinates else {
            continue;
        };
        let miles = distance_miles(origin, target);
        if miles < min_miles {
            min_miles = miles;
            nearest = Some(branch);
        }
    }

    match nearest {
        Some(branch) => NearestBranch::Found {
            name: branch.name.clone(),
            miles: round2(min_miles),
        },
        None => NearestBranch::NotAvailable,
    }
}

pub fn run_stage2(
    leads: &mut [Lead],
    branches: &[Branch],
    progress: &mut Progress<'_>,
) -> Stage2Output {
    let mut out = Stage2Output::default();

    for lead in leads.iter_mut() {
        lead.nearest = nearest_branch(lead.coordinates, branches);
        match lead.nearest.name() {
            Some(name) => {
                tracing::trace!("lead row {} nearest branch {}", lead.row + 2, name);
                out.matched += 1;
            }
            None => out.unmatched += 1,
        }
        progress.step();
    }

    tracing::info!(
        "matched {} leads to a branch ({} N/A)",
        out.matched,
        out.unmatched
    );
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_nearest.rs"]
mod tests;
