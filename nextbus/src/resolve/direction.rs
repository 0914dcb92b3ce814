//! Direction lookup for a route.

use tracing::{debug, instrument, warn};

use crate::domain::{DirectionId, RouteId};
use crate::nextrip::{NexTripApi, TextValuePair};

use super::error::ResolveError;
use super::matching::{DirectionMatchPolicy, exactly_one};

/// Find the direction whose label starts with `description`, ignoring case.
///
/// Prefix matching lets users write "north" for "NORTHBOUND". When nothing
/// matches, the error lists every label the route offers.
pub fn match_direction<'d>(
    directions: &'d [TextValuePair],
    description: &str,
    policy: DirectionMatchPolicy,
) -> Result<&'d TextValuePair, ResolveError> {
    let wanted = description.to_uppercase();
    let matches: Vec<&TextValuePair> = directions
        .iter()
        .filter(|d| d.text.to_uppercase().starts_with(&wanted))
        .collect();

    if matches.is_empty() {
        return Err(ResolveError::DirectionNotFound {
            available: directions.iter().map(|d| d.text.clone()).collect(),
        });
    }

    match policy {
        DirectionMatchPolicy::Strict => exactly_one(matches, "directions"),
        DirectionMatchPolicy::LastMatchWins => {
            if matches.len() > 1 {
                warn!(
                    count = matches.len(),
                    "several directions match, using the last one"
                );
            }
            matches
                .last()
                .copied()
                .ok_or(ResolveError::NotFound {
                    resource: "directions",
                })
        }
    }
}

/// Maps a direction description on a route to a direction identifier.
#[derive(Debug)]
pub struct DirectionResolver<'a, A: ?Sized> {
    api: &'a A,
    policy: DirectionMatchPolicy,
}

impl<'a, A: NexTripApi + ?Sized> DirectionResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            policy: DirectionMatchPolicy::default(),
        }
    }

    /// Set how several matching labels are handled.
    pub fn with_policy(mut self, policy: DirectionMatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        route: &RouteId,
        description: &str,
    ) -> Result<DirectionId, ResolveError> {
        let directions = self
            .api
            .directions(route)
            .await
            .map_err(ResolveError::api("directions"))?;
        debug!(candidates = directions.len(), "fetched directions");

        let direction = match_direction(&directions, description, self.policy)?;
        debug!(direction = %direction.value, label = %direction.text, "matched direction");

        Ok(DirectionId::parse(&direction.value)?)
    }
}
