//! Metro Transit NexTrip client.
//!
//! This module provides an HTTP client for the NexTrip API, which answers
//! four lookups: routes, directions for a route, stops for a route and
//! direction, and upcoming departures at a stop.
//!
//! Key characteristics of NexTrip:
//! - Every endpoint returns a JSON array; errors come back as XML pages
//! - Identifiers are short opaque strings ("901", "4", "TF1I")
//! - Scheduled times use the `/Date(ms-offset)/` format

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, NexTripApi, NexTripClient, NexTripConfig};
pub use convert::{ConversionError, extract_epoch_millis, parse_departure_time};
pub use error::NexTripError;
pub use mock::MockNexTripClient;
pub use types::{NexTripDeparture, NexTripRoute, TextValuePair};
