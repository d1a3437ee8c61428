use std::path::{Path, PathBuf};

pub mod table;

use thiserror::Error;

use crate::model::branch::Branch;
use crate::model::geo::Coordinates;
use crate::model::lead::Lead;
use crate::model::score::parse_numeric;
use table::{Table, read_table};

pub const LEAD_POST_CODE: &str = "Post Code";
pub const LEAD_AGE: &str = "Age";
pub const LEAD_NCD_YEARS: &str = "NCD Years";
pub const LEAD_VEHICLE_VALUE: &str = "MotorVehicleValue";

pub const BRANCH_NAME: &str = "Branch Name";
pub const BRANCH_LATITUDE: &str = "Latitude";
pub const BRANCH_LONGITUDE: &str = "Longitude";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} has no header row", .0.display())]
    Empty(PathBuf),
    #[error("{} is missing required column \"{column}\"", .path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[error("missing input: {0}")]
    MissingInput(String),
}

#[derive(Debug, Clone)]
pub struct LeadInput {
    pub table: Table,
    pub leads: Vec<Lead>,
}

pub fn load_leads(path: &Path) -> Result<LeadInput, InputError> {
    let table = read_table(path)?;
    let leads = leads_from_table(&table, path)?;
    tracing::info!("loaded {} leads from {}", leads.len(), path.display());
    Ok(LeadInput { table, leads })
}

pub fn leads_from_table(table: &Table, path: &Path) -> Result<Vec<Lead>, InputError> {
    let post_code = table.require_column(LEAD_POST_CODE, path)?;
    let age = table.require_column(LEAD_AGE, path)?;
    let ncd_years = table.require_column(LEAD_NCD_YEARS, path)?;
    let vehicle_value = table.require_column(LEAD_VEHICLE_VALUE, path)?;

    let owned = |row: usize, col: usize| table.cell(row, col).map(|s| s.to_string());

    let mut leads = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let mut lead = Lead::new(row);
        lead.post_code = owned(row, post_code);
        lead.age = owned(row, age);
        lead.ncd_years = owned(row, ncd_years);
        lead.vehicle_value = owned(row, vehicle_value);
        leads.push(lead);
    }
    Ok(leads)
}

pub fn load_branches(path: &Path) -> Result<Vec<Branch>, InputError> {
    let table = read_table(path)?;
    let branches = branches_from_table(&table, path)?;
    let located = branches.iter().filter(|b| b.coordinates.is_some()).count();
    tracing::info!(
        "loaded {} branches from {} ({} with coordinates)",
        branches.len(),
        path.display(),
        located
    );
    if located == 0 {
        tracing::warn!("no branch has usable coordinates; every lead will be N/A");
    }
    Ok(branches)
}

pub fn branches_from_table(table: &Table, path: &Path) -> Result<Vec<Branch>, InputError> {
    let name = table.require_column(BRANCH_NAME, path)?;
    let latitude = table.require_column(BRANCH_LATITUDE, path)?;
    let longitude = table.require_column(BRANCH_LONGITUDE, path)?;

    let mut branches = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let branch_name = table
            .cell(row, name)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let lat = parse_numeric(table.cell(row, latitude));
        let lon = parse_numeric(table.cell(row, longitude));
        let coordinates = match (lat, lon) {
            (Some(lat), Some(lon)) => {
                let coords = Coordinates::new(lat, lon);
                if coords.is_none() {
                    tracing::warn!(
                        "branch {:?} has out-of-range coordinates ({}, {}); skipping it (row {})",
                        branch_name,
                        lat,
                        lon,
                        row + 2
                    );
                }
                coords
            }
            _ => None,
        };
        if branch_name.is_empty() && coordinates.is_some() {
            tracing::warn!(
                "branch at row {} has coordinates but no name; its name is written as the missing-value marker",
                row + 2
            );
        }
        branches.push(Branch {
            name: branch_name,
            coordinates,
        });
    }
    Ok(branches)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
