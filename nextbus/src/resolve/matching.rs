//! Match-count policy shared by the resolvers.

use super::error::ResolveError;

/// How the direction resolver treats several labels matching one prefix.
///
/// Routes and stops always require exactly one match. Directions
/// historically let the last matching label win; `Strict` applies the
/// same rule as the other two stages instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectionMatchPolicy {
    /// Take the last label that matches.
    #[default]
    LastMatchWins,
    /// More than one matching label is an `Ambiguous` error.
    Strict,
}

/// Require exactly one match.
///
/// `resource` is the plural noun used in error messages ("routes", "stops").
pub(crate) fn exactly_one<T>(matches: Vec<T>, resource: &'static str) -> Result<T, ResolveError> {
    let count = matches.len();
    let mut iter = matches.into_iter();
    match (iter.next(), count) {
        (Some(only), 1) => Ok(only),
        (None, _) => Err(ResolveError::NotFound { resource }),
        _ => Err(ResolveError::Ambiguous { resource, count }),
    }
}
