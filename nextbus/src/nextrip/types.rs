//! NexTrip API response DTOs.
//!
//! These types map directly to the NexTrip JSON responses. Field names on
//! the wire are PascalCase. Fields the resolvers never read are kept as
//! `Option` because the API omits or nulls them depending on the vehicle.

use serde::Deserialize;

/// An entry from `GET /Routes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NexTripRoute {
    /// Human-readable route name, sometimes prefixed with extra text
    /// (e.g. "Express - Target - Hwy 252 and 73rd Av P&R - Mpls").
    pub description: String,

    /// Operating agency.
    #[serde(rename = "ProviderID")]
    pub provider_id: String,

    /// Route identifier used in later requests (e.g. "901").
    pub route: String,
}

/// A label/identifier pair, as returned by `GET /Directions/{route}` and
/// `GET /Stops/{route}/{direction}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextValuePair {
    /// Display label (e.g. "NORTHBOUND", "Target Field Station Platform 1").
    pub text: String,

    /// Identifier used in later requests (e.g. "4", "TF1I").
    pub value: String,
}

/// An entry from `GET /{route}/{direction}/{stop}`.
///
/// The API returns these ordered soonest first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NexTripDeparture {
    /// True when the time comes from a live vehicle location report.
    pub actual: bool,

    /// Display text, e.g. "3 Min", "Due" or "10:42".
    pub departure_text: String,

    /// Scheduled departure in the vendor date format, e.g.
    /// `/Date(1700000000000-0600)/`.
    pub departure_time: String,

    pub block_number: Option<i64>,
    pub description: Option<String>,
    pub gate: Option<String>,
    pub route: Option<String>,
    pub route_direction: Option<String>,
    pub terminal: Option<String>,
    pub vehicle_heading: Option<f64>,
    pub vehicle_latitude: Option<f64>,
    pub vehicle_longitude: Option<f64>,
}

impl NexTripDeparture {
    /// Build a departure with only the fields the formatter reads.
    pub fn new(
        actual: bool,
        departure_text: impl Into<String>,
        departure_time: impl Into<String>,
    ) -> Self {
        Self {
            actual,
            departure_text: departure_text.into(),
            departure_time: departure_time.into(),
            block_number: None,
            description: None,
            gate: None,
            route: None,
            route_direction: None,
            terminal: None,
            vehicle_heading: None,
            vehicle_latitude: None,
            vehicle_longitude: None,
        }
    }
}
