//! The four resolution stages.
//!
//! Each stage turns free text (plus the identifiers found so far) into the
//! next identifier, issuing a single API request:
//!
//! 1. [`RouteResolver`]: route description → [`RouteId`](crate::domain::RouteId)
//! 2. [`DirectionResolver`]: direction description → [`DirectionId`](crate::domain::DirectionId)
//! 3. [`StopResolver`]: stop description → [`StopId`](crate::domain::StopId)
//! 4. [`DepartureFormatter`]: identifiers → next-departure text
//!
//! Matching rules differ per stage: routes match by suffix, directions by
//! case-insensitive prefix, stops by substring.

mod departure;
mod direction;
mod error;
mod matching;
mod route;
mod stop;

pub use departure::{DepartureFormatter, describe_departure, format_schedule_estimate};
pub use direction::{DirectionResolver, match_direction};
pub use error::ResolveError;
pub use matching::DirectionMatchPolicy;
pub use route::{RouteResolver, match_route};
pub use stop::{StopResolver, match_stop};
