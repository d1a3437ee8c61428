use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::input::table::Table;
use crate::model::branch::Branch;
use crate::model::lead::{Lead, NearestBranch};
use crate::pipeline::stage1_geocode::Stage1Output;
use crate::pipeline::stage2_nearest::Stage2Output;
use crate::pipeline::stage3_scores::Stage3Output;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    Counts, InputMeta, SummaryData, ToolMeta, format_number, format_score, risk_score_stats,
};

pub const RESULTS_FILE: &str = "Risk_Scoring_Results.csv";
pub const SUMMARY_FILE: &str = "summary.json";
pub const REPORT_FILE: &str = "report.txt";

pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_NEAREST_BRANCH: &str = "Nearest Branch";
pub const COL_DISTANCE: &str = "Distance to Nearest Branch (miles)";
pub const COL_NCD_SCORE: &str = "NCDRiskScore";
pub const COL_AGE_SCORE: &str = "AgeRiskScore";
pub const COL_VEHICLE_VALUE_SCORE: &str = "VehicleValueRiskScore";
pub const COL_ADDRESS_SCORE: &str = "AddressBranchScore";
pub const COL_RISK_SCORE: &str = "RiskScore";

pub const DERIVED_COLUMNS: [&str; 9] = [
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_NEAREST_BRANCH,
    COL_DISTANCE,
    COL_NCD_SCORE,
    COL_AGE_SCORE,
    COL_VEHICLE_VALUE_SCORE,
    COL_ADDRESS_SCORE,
    COL_RISK_SCORE,
];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub table: &'a Table,
    pub leads: &'a [Lead],
    pub branches: &'a [Branch],

    pub stage1: Stage1Output,
    pub stage2: Stage2Output,
    pub stage3: Stage3Output,

    pub leads_path: &'a Path,
    pub branches_path: &'a Path,
    pub geocoder_url: &'a str,
    pub na_marker: &'a str,

    pub tool_name: String,
    pub tool_version: String,
}

#[derive(Debug, Clone)]
pub struct Stage4Output {
    pub summary: SummaryData,
    pub results_path: PathBuf,
    pub summary_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn write_reports(input: &Stage4Input<'_>, out_dir: &Path) -> Result<Stage4Output, ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let results_path = out_dir.join(RESULTS_FILE);
    let output = render_output_table(input.table, input.leads, input.na_marker);
    write_table(&results_path, &output)?;

    let summary = build_summary(input);

    let summary_path = out_dir.join(SUMMARY_FILE);
    let json = render_summary_json(&summary)?;
    write_text(&summary_path, &json)?;

    let report_path = out_dir.join(REPORT_FILE);
    write_text(&report_path, &render_report_text(&summary))?;

    Ok(Stage4Output {
        summary,
        results_path,
        summary_path,
        report_path,
    })
}

pub fn build_summary(input: &Stage4Input<'_>) -> SummaryData {
    let totals: Vec<_> = input.leads.iter().map(|l| l.scores.total).collect();
    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        input: InputMeta {
            leads: input.leads_path.display().to_string(),
            branches: input.branches_path.display().to_string(),
            geocoder_url: input.geocoder_url.to_string(),
        },
        counts: Counts {
            leads: input.leads.len(),
            branches: input.branches.len(),
            branches_with_coordinates: input
                .branches
                .iter()
                .filter(|b| b.coordinates.is_some())
                .count(),
            postcodes_looked_up: input.stage1.looked_up,
            geocoded: input.stage1.resolved,
            nearest_branch_found: input.stage2.matched,
            scored: input.stage3.scored,
        },
        not_computable: input.stage3.not_computable,
        risk_score: risk_score_stats(&totals),
    }
}

/// Original columns followed by the derived ones. A derived column that
/// already exists in the input is overwritten in place.
pub fn render_output_table(table: &Table, leads: &[Lead], marker: &str) -> Table {
    let mut headers = table.headers.clone();
    let mut derived_idx = Vec::with_capacity(DERIVED_COLUMNS.len());
    for name in DERIVED_COLUMNS {
        let idx = match headers.iter().position(|h| h.trim() == name) {
            Some(idx) => idx,
            None => {
                headers.push(name.to_string());
                headers.len() - 1
            }
        };
        derived_idx.push(idx);
    }

    let width = headers.len();
    let mut rows = Vec::with_capacity(leads.len());
    for lead in leads {
        let mut cells = table.rows.get(lead.row).cloned().unwrap_or_default();
        cells.resize(width, String::new());
        for (&idx, value) in derived_idx.iter().zip(derived_cells(lead, marker)) {
            cells[idx] = value;
        }
        rows.push(cells);
    }

    Table { headers, rows }
}

fn derived_cells(lead: &Lead, marker: &str) -> [String; 9] {
    let (latitude, longitude) = match lead.coordinates {
        Some(c) => (format_number(c.latitude()), format_number(c.longitude())),
        None => (String::new(), String::new()),
    };
    let (branch, distance) = match &lead.nearest {
        NearestBranch::Found { name, miles } if name.is_empty() => {
            (marker.to_string(), format_number(*miles))
        }
        NearestBranch::Found { name, miles } => (name.clone(), format_number(*miles)),
        NearestBranch::NotAvailable => (marker.to_string(), marker.to_string()),
    };
    let scores = &lead.scores;
    [
        latitude,
        longitude,
        branch,
        distance,
        format_score(scores.ncd, marker),
        format_score(scores.age, marker),
        format_score(scores.vehicle_value, marker),
        format_score(scores.address, marker),
        format_score(scores.total, marker),
    ]
}

fn write_table(path: &Path, table: &Table) -> Result<(), ReportError> {
    let csv_err = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut w = csv::Writer::from_path(path).map_err(csv_err)?;
    w.write_record(&table.headers).map_err(csv_err)?;
    for row in &table.rows {
        w.write_record(row).map_err(csv_err)?;
    }
    w.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    w.write_all(contents.as_bytes()).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
