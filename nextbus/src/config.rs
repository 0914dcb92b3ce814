//! Application configuration.

use std::path::PathBuf;

use crate::nextrip::{MockNexTripClient, NexTripApi, NexTripClient, NexTripConfig, NexTripError};
use crate::resolve::DirectionMatchPolicy;

/// Everything needed to run one lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Live API settings
    pub api: NexTripConfig,
    /// How several matching direction labels are handled
    pub direction_policy: DirectionMatchPolicy,
    /// Serve responses from fixture files in this directory instead of HTTP
    pub mock_data: Option<PathBuf>,
}

impl Config {
    /// Build the API backend this configuration selects.
    pub fn build_api(&self) -> Result<Box<dyn NexTripApi>, NexTripError> {
        match &self.mock_data {
            Some(dir) => Ok(Box::new(MockNexTripClient::from_dir(dir)?)),
            None => Ok(Box::new(NexTripClient::new(self.api.clone())?)),
        }
    }
}
