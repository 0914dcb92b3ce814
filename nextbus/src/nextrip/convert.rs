//! Conversion of NexTrip's embedded date format.
//!
//! Scheduled departure times arrive as `/Date(1700000000000-0600)/`: epoch
//! milliseconds followed by a UTC offset. The offset is informational only;
//! the millisecond count is already absolute.

use chrono::{DateTime, Utc};

/// Error during timestamp conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Fewer than two fields after splitting on the delimiters
    #[error("no timestamp field in {0:?}")]
    MissingField(String),

    /// The timestamp field is not an integer
    #[error("invalid timestamp {0:?}")]
    InvalidInteger(String),

    /// The integer is outside the representable date range
    #[error("timestamp out of range: {0}")]
    OutOfRange(i64),
}

/// Extract the epoch-millisecond field from a raw NexTrip date string.
///
/// The string is split on `(` and `-`, empty fields are dropped, and the
/// second remaining field is taken as the integer.
///
/// # Examples
///
/// ```
/// use nextbus::nextrip::extract_epoch_millis;
///
/// assert_eq!(
///     extract_epoch_millis("/Date(1700000000000-0500)/").unwrap(),
///     1_700_000_000_000
/// );
/// assert!(extract_epoch_millis("10:42").is_err());
/// ```
pub fn extract_epoch_millis(raw: &str) -> Result<i64, ConversionError> {
    let field = raw
        .split(['(', '-'])
        .filter(|s| !s.is_empty())
        .nth(1)
        .ok_or_else(|| ConversionError::MissingField(raw.to_string()))?;

    field
        .parse::<i64>()
        .map_err(|_| ConversionError::InvalidInteger(field.to_string()))
}

/// Parse a raw NexTrip date string into an absolute point in time.
pub fn parse_departure_time(raw: &str) -> Result<DateTime<Utc>, ConversionError> {
    let millis = extract_epoch_millis(raw)?;
    DateTime::from_timestamp_millis(millis).ok_or(ConversionError::OutOfRange(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_millis_with_negative_offset() {
        assert_eq!(
            extract_epoch_millis("/Date(1700000000000-0500)/"),
            Ok(1_700_000_000_000)
        );
    }

    #[test]
    fn extracts_millis_from_bare_prefix() {
        assert_eq!(
            extract_epoch_millis("...(1700000000000-0500)"),
            Ok(1_700_000_000_000)
        );
    }

    #[test]
    fn positive_offset_is_not_a_delimiter() {
        // Only '(' and '-' split; "+0100)/" stays glued to the integer
        assert_eq!(
            extract_epoch_millis("/Date(1700000000000+0100)/"),
            Err(ConversionError::InvalidInteger(
                "1700000000000+0100)/".to_string()
            ))
        );
    }

    #[test]
    fn missing_prefix_shifts_fields() {
        // Leading '(' produces an empty field which is dropped, so the
        // offset becomes the second field.
        assert_eq!(
            extract_epoch_millis("(1700000000000-0500)"),
            Err(ConversionError::InvalidInteger("0500)".to_string()))
        );
    }

    #[test]
    fn no_delimiters_is_missing_field() {
        assert_eq!(
            extract_epoch_millis("10:42"),
            Err(ConversionError::MissingField("10:42".to_string()))
        );
        assert!(matches!(
            extract_epoch_millis(""),
            Err(ConversionError::MissingField(_))
        ));
    }

    #[test]
    fn parses_to_utc() {
        let time = parse_departure_time("/Date(1700000000000-0600)/").unwrap();
        assert_eq!(time.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }

    #[test]
    fn out_of_range_rejected() {
        let raw = format!("/Date({}-0600)/", i64::MAX);
        assert_eq!(
            parse_departure_time(&raw),
            Err(ConversionError::OutOfRange(i64::MAX))
        );
    }
}
