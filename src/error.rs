use thiserror::Error;

use crate::geocode::GeocodeError;
use crate::input::InputError;
use crate::pipeline::stage4_report::ReportError;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
