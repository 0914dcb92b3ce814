//! Domain types for the departure lookup.
//!
//! Identifiers are validated at construction, so a stage that hands one
//! to the next stage has, by construction, produced a non-empty value.

mod ids;

pub use ids::{DirectionId, InvalidId, RouteId, StopId};
