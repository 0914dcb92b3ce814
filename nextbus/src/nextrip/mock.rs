//! Mock NexTrip client for testing without API access.
//!
//! Serves canned responses either from JSON fixture files or from data
//! supplied in code. Unknown lookups fail with `404 Not Found`, the same
//! way the live API answers a bad identifier.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::{DirectionId, RouteId, StopId};

use super::client::NexTripApi;
use super::error::NexTripError;
use super::types::{NexTripDeparture, NexTripRoute, TextValuePair};

/// Mock NexTrip client that serves preloaded data.
///
/// Fixture directory layout:
///
/// ```text
/// routes.json
/// directions/{route}.json
/// stops/{route}_{direction}.json
/// departures/{route}_{direction}_{stop}.json
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockNexTripClient {
    routes: Vec<NexTripRoute>,
    directions: HashMap<String, Vec<TextValuePair>>,
    stops: HashMap<(String, String), Vec<TextValuePair>>,
    departures: HashMap<(String, String, String), Vec<NexTripDeparture>>,
    /// Paths requested so far, in order.
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockNexTripClient {
    /// Create an empty mock. `/Routes` returns an empty list and every
    /// other lookup is a 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from a directory.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, NexTripError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        mock.routes = read_json(&data_dir.join("routes.json"))?;

        for (stem, path) in json_files(&data_dir.join("directions"))? {
            mock.directions.insert(stem, read_json(&path)?);
        }

        for (stem, path) in json_files(&data_dir.join("stops"))? {
            let key = match stem.split('_').collect::<Vec<_>>().as_slice() {
                [route, direction] => (route.to_string(), direction.to_string()),
                _ => return Err(bad_fixture_name(&path)),
            };
            mock.stops.insert(key, read_json(&path)?);
        }

        for (stem, path) in json_files(&data_dir.join("departures"))? {
            let key = match stem.split('_').collect::<Vec<_>>().as_slice() {
                [route, direction, stop] => {
                    (route.to_string(), direction.to_string(), stop.to_string())
                }
                _ => return Err(bad_fixture_name(&path)),
            };
            mock.departures.insert(key, read_json(&path)?);
        }

        Ok(mock)
    }

    /// Set the route list.
    pub fn with_routes(mut self, routes: Vec<NexTripRoute>) -> Self {
        self.routes = routes;
        self
    }

    /// Set the directions for a route.
    pub fn with_directions(mut self, route: &str, directions: Vec<TextValuePair>) -> Self {
        self.directions.insert(route.to_string(), directions);
        self
    }

    /// Set the stops for a route and direction.
    pub fn with_stops(mut self, route: &str, direction: &str, stops: Vec<TextValuePair>) -> Self {
        self.stops
            .insert((route.to_string(), direction.to_string()), stops);
        self
    }

    /// Set the departures for a route, direction and stop.
    pub fn with_departures(
        mut self,
        route: &str,
        direction: &str,
        stop: &str,
        departures: Vec<NexTripDeparture>,
    ) -> Self {
        self.departures.insert(
            (route.to_string(), direction.to_string(), stop.to_string()),
            departures,
        );
        self
    }

    /// Request paths served so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, path: String) {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path);
    }
}

#[async_trait]
impl NexTripApi for MockNexTripClient {
    async fn routes(&self) -> Result<Vec<NexTripRoute>, NexTripError> {
        self.record("/Routes".to_string());
        Ok(self.routes.clone())
    }

    async fn directions(&self, route: &RouteId) -> Result<Vec<TextValuePair>, NexTripError> {
        self.record(format!("/Directions/{route}"));
        self.directions
            .get(route.as_str())
            .cloned()
            .ok_or_else(not_found)
    }

    async fn stops(
        &self,
        route: &RouteId,
        direction: &DirectionId,
    ) -> Result<Vec<TextValuePair>, NexTripError> {
        self.record(format!("/Stops/{route}/{direction}"));
        self.stops
            .get(&(route.to_string(), direction.to_string()))
            .cloned()
            .ok_or_else(not_found)
    }

    async fn departures(
        &self,
        route: &RouteId,
        direction: &DirectionId,
        stop: &StopId,
    ) -> Result<Vec<NexTripDeparture>, NexTripError> {
        self.record(format!("/{route}/{direction}/{stop}"));
        self.departures
            .get(&(route.to_string(), direction.to_string(), stop.to_string()))
            .cloned()
            .ok_or_else(not_found)
    }
}

fn not_found() -> NexTripError {
    NexTripError::bad_status(reqwest::StatusCode::NOT_FOUND)
}

fn bad_fixture_name(path: &Path) -> NexTripError {
    NexTripError::Fixture(format!("unexpected fixture name: {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, NexTripError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| NexTripError::Fixture(format!("failed to read {}: {e}", path.display())))?;

    serde_json::from_str(&json).map_err(|e| NexTripError::Json {
        message: format!("{}: {e}", path.display()),
        body: None,
    })
}

/// List `*.json` files in `dir` as (file stem, path). A missing directory
/// yields no files.
fn json_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, NexTripError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| NexTripError::Fixture(format!("failed to read {}: {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| NexTripError::Fixture(format!("failed to read directory entry: {e}")))?
            .path();

        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| bad_fixture_name(&path))?
            .to_string();

        files.push((stem, path));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(id: &str) -> RouteId {
        RouteId::parse(id).unwrap()
    }

    fn direction(id: &str) -> DirectionId {
        DirectionId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn load_mock_data() {
        let client = MockNexTripClient::from_dir("data/mock_nextrip").unwrap();

        let routes = client.routes().await.unwrap();
        assert!(routes.iter().any(|r| r.route == "901"));

        let directions = client.directions(&route("901")).await.unwrap();
        assert!(directions.iter().any(|d| d.text == "NORTHBOUND"));

        let stops = client.stops(&route("901"), &direction("4")).await.unwrap();
        assert!(stops.iter().any(|s| s.value == "TF1I"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let client = MockNexTripClient::from_dir("data/mock_nextrip").unwrap();

        let err = client.directions(&route("999999")).await.unwrap_err();
        assert_eq!(err.to_string(), "bad response code from API: 404 Not Found");
    }

    #[tokio::test]
    async fn records_requests_in_order() {
        let client = MockNexTripClient::new().with_directions("901", vec![]);

        client.routes().await.unwrap();
        client.directions(&route("901")).await.unwrap();
        let _ = client.stops(&route("901"), &direction("4")).await;

        assert_eq!(
            client.requests(),
            vec!["/Routes", "/Directions/901", "/Stops/901/4"]
        );
    }

    #[test]
    fn missing_routes_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MockNexTripClient::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, NexTripError::Fixture(_)));
    }

    #[test]
    fn malformed_fixture_name_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("routes.json"), "[]").unwrap();
        std::fs::create_dir(dir.path().join("stops")).unwrap();
        std::fs::write(dir.path().join("stops").join("901.json"), "[]").unwrap();

        let err = MockNexTripClient::from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("unexpected fixture name"));
    }

    #[test]
    fn malformed_fixture_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("routes.json"), "<xml/>").unwrap();

        let err = MockNexTripClient::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, NexTripError::Json { .. }));
    }
}
