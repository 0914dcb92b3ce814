//! Stop lookup for a route and direction.

use tracing::{debug, instrument};

use crate::domain::{DirectionId, RouteId, StopId};
use crate::nextrip::{NexTripApi, TextValuePair};

use super::error::ResolveError;
use super::matching::exactly_one;

/// Find the single stop whose label contains `description`. Case-sensitive.
pub fn match_stop<'s>(
    stops: &'s [TextValuePair],
    description: &str,
) -> Result<&'s TextValuePair, ResolveError> {
    let matches: Vec<&TextValuePair> = stops
        .iter()
        .filter(|s| s.text.contains(description))
        .collect();

    exactly_one(matches, "stops")
}

/// Maps a stop description on a route and direction to a stop identifier.
#[derive(Debug)]
pub struct StopResolver<'a, A: ?Sized> {
    api: &'a A,
}

impl<'a, A: NexTripApi + ?Sized> StopResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        route: &RouteId,
        direction: &DirectionId,
        description: &str,
    ) -> Result<StopId, ResolveError> {
        let stops = self
            .api
            .stops(route, direction)
            .await
            .map_err(ResolveError::api("stops"))?;
        debug!(candidates = stops.len(), "fetched stops");

        let stop = match_stop(&stops, description)?;
        debug!(stop = %stop.value, label = %stop.text, "matched stop");

        Ok(StopId::parse(&stop.value)?)
    }
}
