//! NexTrip client error types.

/// Errors from the NexTrip HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum NexTripError {
    /// HTTP request failed (connection refused, DNS, body read, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a status code of 400 or above.
    ///
    /// `status` is the full status line, e.g. "404 Not Found".
    #[error("bad response code from API: {status}")]
    BadStatus { status: String },

    /// Response was not JSON. The API sends XML error pages.
    #[error("unexpected response content-type from API: {0}")]
    UnexpectedContentType(String),

    /// JSON deserialization failed
    #[error("error processing response body: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Mock fixture could not be read
    #[error("mock data error: {0}")]
    Fixture(String),
}

impl NexTripError {
    /// Build a `BadStatus` from a numeric code, using the canonical reason
    /// phrase when one exists.
    pub fn bad_status(status: reqwest::StatusCode) -> Self {
        Self::bad_status_with_reason(status, None)
    }

    /// Build a `BadStatus` from the code and the reason phrase the server
    /// sent. An absent or empty phrase falls back to the canonical one.
    pub fn bad_status_with_reason(status: reqwest::StatusCode, reason: Option<&str>) -> Self {
        let code = status.as_u16();
        let status = match reason
            .filter(|r| !r.is_empty())
            .or(status.canonical_reason())
        {
            Some(reason) => format!("{code} {reason}"),
            None => code.to_string(),
        };
        NexTripError::BadStatus { status }
    }

    /// Returns true for errors that came from the transport rather than
    /// the response payload.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            NexTripError::Http(_)
                | NexTripError::BadStatus { .. }
                | NexTripError::UnexpectedContentType(_)
        )
    }
}
