//! NexTrip identifier types.

use std::fmt;

/// Error returned when constructing an identifier from an invalid string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} identifier: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    reason: &'static str,
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Parse an identifier as returned by the API.
            ///
            /// Rejects empty strings and strings containing `/`, which
            /// would change the shape of request paths.
            pub fn parse(s: &str) -> Result<Self, InvalidId> {
                if s.is_empty() {
                    return Err(InvalidId {
                        kind: $kind,
                        reason: "must not be empty",
                    });
                }
                if s.contains('/') {
                    return Err(InvalidId {
                        kind: $kind,
                        reason: "must not contain '/'",
                    });
                }
                Ok(Self(s.to_string()))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// A route identifier, e.g. `901` for the METRO Blue Line.
    ///
    /// # Examples
    ///
    /// ```
    /// use nextbus::domain::RouteId;
    ///
    /// let blue = RouteId::parse("901").unwrap();
    /// assert_eq!(blue.as_str(), "901");
    ///
    /// assert!(RouteId::parse("").is_err());
    /// ```
    RouteId,
    "route"
);

identifier!(
    /// A direction identifier, e.g. `4` for northbound.
    DirectionId,
    "direction"
);

identifier!(
    /// A stop identifier, e.g. `TF1I`.
    StopId,
    "stop"
);
