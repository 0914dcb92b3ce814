//! Route lookup by description.

use tracing::{debug, instrument};

use crate::domain::RouteId;
use crate::nextrip::{NexTripApi, NexTripRoute};

use super::error::ResolveError;
use super::matching::exactly_one;

/// Find the single route whose description ends with `description`.
///
/// Suffix matching lets users omit the prefix some routes carry, e.g.
/// "Target - Hwy 252 and 73rd Av P&R - Mpls" still finds
/// "Express - Target - Hwy 252 and 73rd Av P&R - Mpls". Case-sensitive.
pub fn match_route<'r>(
    routes: &'r [NexTripRoute],
    description: &str,
) -> Result<&'r NexTripRoute, ResolveError> {
    let matches: Vec<&NexTripRoute> = routes
        .iter()
        .filter(|r| r.description.ends_with(description))
        .collect();

    exactly_one(matches, "routes")
}

/// Maps a route description to a route identifier.
#[derive(Debug)]
pub struct RouteResolver<'a, A: ?Sized> {
    api: &'a A,
}

impl<'a, A: NexTripApi + ?Sized> RouteResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Fetch all routes and resolve `description` to one identifier.
    #[instrument(skip(self))]
    pub async fn resolve(&self, description: &str) -> Result<RouteId, ResolveError> {
        let routes = self
            .api
            .routes()
            .await
            .map_err(ResolveError::api("routes"))?;
        debug!(candidates = routes.len(), "fetched routes");

        let route = match_route(&routes, description)?;
        debug!(route = %route.route, description = %route.description, "matched route");

        Ok(RouteId::parse(&route.route)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nextrip::MockNexTripClient;

    fn route(description: &str, id: &str) -> NexTripRoute {
        NexTripRoute {
            description: description.to_string(),
            provider_id: "8".to_string(),
            route: id.to_string(),
        }
    }

    fn sample_routes() -> Vec<NexTripRoute> {
        vec![
            route("METRO Blue Line", "901"),
            route("METRO Green Line", "902"),
            route("Express - Target - Hwy 252 and 73rd Av P&R - Mpls", "765"),
        ]
    }

    #[test]
    fn exact_description_matches() {
        let routes = sample_routes();
        assert_eq!(match_route(&routes, "METRO Blue Line").unwrap().route, "901");
    }

    #[test]
    fn suffix_tolerates_missing_prefix() {
        let routes = sample_routes();
        let found = match_route(&routes, "Target - Hwy 252 and 73rd Av P&R - Mpls").unwrap();
        assert_eq!(found.route, "765");
    }

    #[test]
    fn match_is_case_sensitive() {
        let routes = sample_routes();
        let err = match_route(&routes, "metro blue line").unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[test]
    fn shared_suffix_is_ambiguous() {
        let routes = sample_routes();
        let err = match_route(&routes, "Line").unwrap_err();
        assert!(matches!(err, ResolveError::Ambiguous { count: 2, .. }));
        assert_eq!(
            err.to_string(),
            "2 matching routes found, please be more specific"
        );
    }

    #[test]
    fn prefix_alone_does_not_match() {
        let routes = sample_routes();
        assert!(match_route(&routes, "METRO Blue").is_err());
    }

    #[tokio::test]
    async fn resolves_from_fixtures() {
        let api = MockNexTripClient::from_dir("data/mock_nextrip").unwrap();
        let resolver = RouteResolver::new(&api);

        let id = resolver.resolve("METRO Blue Line").await.unwrap();
        assert_eq!(id.as_str(), "901");

        let id = resolver
            .resolve("Express - Target - Hwy 252 and 73rd Av P&R - Mpls")
            .await
            .unwrap();
        assert_eq!(id.as_str(), "765");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let api = MockNexTripClient::from_dir("data/mock_nextrip").unwrap();
        let err = RouteResolver::new(&api)
            .resolve("Hogwarts Express")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no routes found"));
    }

    #[tokio::test]
    async fn empty_route_id_is_rejected() {
        let api = MockNexTripClient::new().with_routes(vec![route("Ghost Line", "")]);
        let err = RouteResolver::new(&api)
            .resolve("Ghost Line")
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::InvalidId(_)));
    }

    #[tokio::test]
    async fn repeated_resolution_is_stable() {
        let api = MockNexTripClient::from_dir("data/mock_nextrip").unwrap();
        let resolver = RouteResolver::new(&api);

        let first = resolver.resolve("METRO Blue Line").await.unwrap();
        let second = resolver.resolve("METRO Blue Line").await.unwrap();
        assert_eq!(first, second);
    }
}
