pub mod progress;
pub mod stage1_geocode;
pub mod stage2_nearest;
pub mod stage3_scores;
pub mod stage4_report;

use crate::config::RunConfig;
use crate::error::RunError;
use crate::geocode::PostcodeLookup;
use crate::input::{LeadInput, load_branches, load_leads};
use progress::{Progress, ProgressObserver};
use stage1_geocode::run_stage1;
use stage2_nearest::run_stage2;
use stage3_scores::run_stage3;
use stage4_report::{Stage4Input, Stage4Output, write_reports};

/// Loads both tables, runs the four stages in order and writes the outputs.
/// Nothing is written unless every stage completes.
pub fn run_pipeline(
    config: &RunConfig,
    lookup: &mut dyn PostcodeLookup,
    observer: &mut dyn ProgressObserver,
) -> Result<Stage4Output, RunError> {
    let LeadInput { table, mut leads } = load_leads(&config.leads_path)?;
    let branches = load_branches(&config.branches_path)?;

    let mut progress = Progress::new(leads.len() * 2, observer);
    let stage1 = run_stage1(&mut leads, lookup, &mut progress);
    let stage2 = run_stage2(&mut leads, &branches, &mut progress);
    progress.finish();
    tracing::debug!("progress steps reported: {}", progress.completed());

    let stage3 = run_stage3(&mut leads);

    let input = Stage4Input {
        table: &table,
        leads: &leads,
        branches: &branches,
        stage1,
        stage2,
        stage3,
        leads_path: &config.leads_path,
        branches_path: &config.branches_path,
        geocoder_url: &config.geocoder_url,
        na_marker: &config.na_marker,
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let out = write_reports(&input, &config.out_dir)?;
    tracing::info!(
        "wrote {}, {} and {}",
        out.results_path.display(),
        out.summary_path.display(),
        out.report_path.display()
    );

    match out.summary.risk_score.average {
        Some(avg) => tracing::info!("Risk Score Average: {}", avg),
        None => tracing::warn!("no lead has a computable risk score"),
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
