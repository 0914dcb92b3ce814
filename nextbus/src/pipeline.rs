//! Route → direction → stop → departure driver.
//!
//! Stages run strictly in order; each needs the identifiers produced
//! before it. The first failing stage ends the lookup and is reported
//! tagged with its stage, later stages are never requested.

use std::fmt;

use tracing::{info, instrument};

use crate::domain::{DirectionId, RouteId, StopId};
use crate::nextrip::NexTripApi;
use crate::resolve::{
    DepartureFormatter, DirectionMatchPolicy, DirectionResolver, ResolveError, RouteResolver,
    StopResolver,
};

/// A pipeline stage, used to label errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Route,
    Direction,
    Stop,
    Departure,
}

impl Stage {
    /// Name of the value the stage produces, as shown in error lines.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Route => "routeID",
            Stage::Direction => "directionID",
            Stage::Stop => "stopID",
            Stage::Departure => "departure",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stage failure. Displays as the line shown to the user.
#[derive(Debug, thiserror::Error)]
#[error("error getting {stage}: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: ResolveError,
}

impl PipelineError {
    fn at(stage: Stage) -> impl FnOnce(ResolveError) -> Self {
        move |source| PipelineError { stage, source }
    }
}

/// Free-text descriptions supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureQuery {
    pub route: String,
    pub direction: String,
    pub stop: String,
}

impl DepartureQuery {
    pub fn new(
        route: impl Into<String>,
        direction: impl Into<String>,
        stop: impl Into<String>,
    ) -> Self {
        Self {
            route: route.into(),
            direction: direction.into(),
            stop: stop.into(),
        }
    }
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextDeparture {
    pub route: RouteId,
    pub direction: DirectionId,
    pub stop: StopId,
    /// e.g. "5 Min (per schedule)" or "Due (Actual vehicle report)"
    pub display: String,
}

/// Runs the four stages against one API.
#[derive(Debug)]
pub struct Pipeline<'a, A: ?Sized> {
    api: &'a A,
    direction_policy: DirectionMatchPolicy,
}

impl<'a, A: NexTripApi + ?Sized> Pipeline<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            direction_policy: DirectionMatchPolicy::default(),
        }
    }

    pub fn with_direction_policy(mut self, policy: DirectionMatchPolicy) -> Self {
        self.direction_policy = policy;
        self
    }

    /// Resolve a query to its next departure.
    #[instrument(skip(self))]
    pub async fn run(&self, query: &DepartureQuery) -> Result<NextDeparture, PipelineError> {
        let route = RouteResolver::new(self.api)
            .resolve(&query.route)
            .await
            .map_err(PipelineError::at(Stage::Route))?;

        let direction = DirectionResolver::new(self.api)
            .with_policy(self.direction_policy)
            .resolve(&route, &query.direction)
            .await
            .map_err(PipelineError::at(Stage::Direction))?;

        let stop = StopResolver::new(self.api)
            .resolve(&route, &direction, &query.stop)
            .await
            .map_err(PipelineError::at(Stage::Stop))?;

        let text = DepartureFormatter::new(self.api)
            .resolve(&route, &direction, &stop)
            .await
            .map_err(PipelineError::at(Stage::Departure))?;

        info!(%route, %direction, %stop, display = %text, "resolved next departure");

        Ok(NextDeparture {
            route,
            direction,
            stop,
            display: text,
        })
    }
}
