use std::thread;
use std::time::{Duration, Instant};

pub mod postcodes_io;

pub use postcodes_io::PostcodesIoClient;

use thiserror::Error;

use crate::model::geo::Coordinates;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("lookup returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("invalid geocoder url: {0}")]
    BaseUrl(String),
}

/// Resolves one normalized postcode to coordinates.
pub trait PostcodeLookup {
    fn lookup(&mut self, postcode: &str) -> Result<Coordinates, GeocodeError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeOutcome {
    NoPostcode,
    Resolved(Coordinates),
    Unavailable,
}

impl GeocodeOutcome {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            GeocodeOutcome::Resolved(c) => Some(*c),
            _ => None,
        }
    }
}

/// Strips all whitespace; `None` when nothing is left.
pub fn normalize_postcode(raw: Option<&str>) -> Option<String> {
    let code: String = raw?.chars().filter(|c| !c.is_whitespace()).collect();
    if code.is_empty() { None } else { Some(code) }
}

/// Geocodes a raw postcode cell. Lookup failures are logged and reported as
/// `Unavailable`; they never abort the run.
pub fn geocode_postcode(lookup: &mut dyn PostcodeLookup, raw: Option<&str>) -> GeocodeOutcome {
    let Some(code) = normalize_postcode(raw) else {
        return GeocodeOutcome::NoPostcode;
    };
    match lookup.lookup(&code) {
        Ok(coords) => GeocodeOutcome::Resolved(coords),
        Err(GeocodeError::Status(404)) => {
            tracing::debug!("postcode {} not found", code);
            GeocodeOutcome::Unavailable
        }
        Err(err) => {
            tracing::warn!("geocoding {} failed: {}", code, err);
            GeocodeOutcome::Unavailable
        }
    }
}

/// Enforces a minimum interval between consecutive lookups of the wrapped
/// client.
pub struct Throttled<L> {
    inner: L,
    interval: Duration,
    last: Option<Instant>,
}

impl<L: PostcodeLookup> Throttled<L> {
    pub fn new(inner: L, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            last: None,
        }
    }

    fn wait_turn(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
    }
}

impl<L: PostcodeLookup> PostcodeLookup for Throttled<L> {
    fn lookup(&mut self, postcode: &str) -> Result<Coordinates, GeocodeError> {
        self.wait_turn();
        let result = self.inner.lookup(postcode);
        self.last = Some(Instant::now());
        result
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/geocode/tests.rs"]
mod tests;
