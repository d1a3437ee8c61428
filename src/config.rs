use std::path::PathBuf;
use std::time::Duration;

use crate::error::RunError;
use crate::input::InputError;

pub const DEFAULT_THROTTLE_MS: u64 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub leads_path: PathBuf,
    pub branches_path: PathBuf,
    pub out_dir: PathBuf,
    pub geocoder_url: String,
    /// Minimum spacing between postcode lookups.
    pub throttle: Duration,
    pub timeout: Duration,
    /// Written to output cells that have no value.
    pub na_marker: String,
    pub quiet: bool,
}

impl RunConfig {
    /// Both input tables must exist before the pipeline starts.
    pub fn validate(&self) -> Result<(), RunError> {
        for (label, path) in [("leads", &self.leads_path), ("branches", &self.branches_path)] {
            if !path.is_file() {
                return Err(InputError::MissingInput(format!(
                    "{label} file {} does not exist",
                    path.display()
                ))
                .into());
            }
        }

        let url = self.geocoder_url.trim();
        if url.is_empty() {
            return Err(RunError::Config("geocoder url cannot be empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(RunError::Config(
                "geocoder url must start with http:// or https://".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(RunError::Config("timeout must be positive".to_string()));
        }

        tracing::debug!("geocoder url: {}", url);
        tracing::debug!(
            "throttle: {:?}, timeout: {:?}",
            self.throttle,
            self.timeout
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
