use crate::geocode::{GeocodeOutcome, PostcodeLookup, geocode_postcode};
use crate::model::lead::Lead;
use crate::pipeline::progress::Progress;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stage1Output {
    pub looked_up: usize,
    pub resolved: usize,
    pub no_postcode: usize,
}

pub fn run_stage1(
    leads: &mut [Lead],
    lookup: &mut dyn PostcodeLookup,
    progress: &mut Progress<'_>,
) -> Stage1Output {
    let mut out = Stage1Output::default();

    for lead in leads.iter_mut() {
        let outcome = geocode_postcode(lookup, lead.post_code.as_deref());
        match outcome {
            GeocodeOutcome::NoPostcode => out.no_postcode += 1,
            GeocodeOutcome::Resolved(_) => {
                out.looked_up += 1;
                out.resolved += 1;
            }
            GeocodeOutcome::Unavailable => out.looked_up += 1,
        }
        lead.coordinates = outcome.coordinates();
        progress.step();
    }

    tracing::info!(
        "geocoded {}/{} postcodes ({} leads without a postcode)",
        out.resolved,
        out.looked_up,
        out.no_postcode
    );
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_geocode.rs"]
mod tests;
