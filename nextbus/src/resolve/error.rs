//! Resolution error types.

use crate::domain::InvalidId;
use crate::nextrip::{ConversionError, NexTripError};

/// Errors from a single resolution stage.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Fetching the candidate list failed
    #[error("error getting {resource}: {source}")]
    Api {
        resource: &'static str,
        #[source]
        source: NexTripError,
    },

    /// The candidate list arrived but could not be decoded
    #[error(transparent)]
    Parse(NexTripError),

    /// No candidate matched the description
    #[error("no {resource} found matching your description")]
    NotFound { resource: &'static str },

    /// No direction matched; carries every label the route offers
    #[error(
        "requested direction not found for route\navailable directions: {}",
        .available.join(", ")
    )]
    DirectionNotFound { available: Vec<String> },

    /// More than one candidate matched the description
    #[error("{count} matching {resource} found, please be more specific")]
    Ambiguous {
        resource: &'static str,
        count: usize,
    },

    /// Departure list was empty
    #[error("no upcoming departures found for today")]
    NoDeparture,

    /// Scheduled departure time could not be decoded
    #[error("error converting time: {0}")]
    Conversion(#[from] ConversionError),

    /// The API handed back an unusable identifier
    #[error("{0}")]
    InvalidId(#[from] InvalidId),
}

impl ResolveError {
    pub(crate) fn api(resource: &'static str) -> impl FnOnce(NexTripError) -> Self {
        move |source| match source {
            NexTripError::Json { .. } => ResolveError::Parse(source),
            source => ResolveError::Api { resource, source },
        }
    }

    /// Returns true if the stage failed before any matching happened.
    pub fn is_transport(&self) -> bool {
        matches!(self, ResolveError::Api { source, .. } if source.is_transport())
    }
}
