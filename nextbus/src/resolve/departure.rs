//! Next-departure formatting for a stop.
//!
//! NexTrip returns departures soonest first. Only the first is used:
//! - A live vehicle report (`Actual`) is shown as the API words it.
//! - A schedule entry is turned into minutes from now, rounded to the
//!   nearest minute. Past-due entries come out negative.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, instrument};

use crate::domain::{DirectionId, RouteId, StopId};
use crate::nextrip::{ConversionError, NexTripApi, NexTripDeparture, parse_departure_time};

use super::error::ResolveError;

/// Describe a single departure relative to `now`.
///
/// Live reports never touch the timestamp field.
pub fn describe_departure(
    departure: &NexTripDeparture,
    now: DateTime<Utc>,
) -> Result<String, ConversionError> {
    if departure.actual {
        return Ok(format!(
            "{} (Actual vehicle report)",
            departure.departure_text
        ));
    }

    let scheduled = parse_departure_time(&departure.departure_time)?;
    Ok(format_schedule_estimate(scheduled - now))
}

/// Format time until a scheduled departure, e.g. "7 Min (per schedule)".
///
/// Half minutes round to even, so 2m30s shows as "2 Min" and 3m30s as "4 Min".
pub fn format_schedule_estimate(until: TimeDelta) -> String {
    let minutes = until.num_milliseconds() as f64 / 60_000.0;
    format!("{} Min (per schedule)", minutes.round_ties_even() as i64)
}

/// Maps a route, direction and stop to a next-departure description.
#[derive(Debug)]
pub struct DepartureFormatter<'a, A: ?Sized> {
    api: &'a A,
}

impl<'a, A: NexTripApi + ?Sized> DepartureFormatter<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Describe the next departure relative to the current time.
    pub async fn resolve(
        &self,
        route: &RouteId,
        direction: &DirectionId,
        stop: &StopId,
    ) -> Result<String, ResolveError> {
        self.resolve_at(route, direction, stop, Utc::now()).await
    }

    /// Describe the next departure relative to `now`.
    #[instrument(skip(self))]
    pub async fn resolve_at(
        &self,
        route: &RouteId,
        direction: &DirectionId,
        stop: &StopId,
        now: DateTime<Utc>,
    ) -> Result<String, ResolveError> {
        let departures = self
            .api
            .departures(route, direction, stop)
            .await
            .map_err(ResolveError::api("departures"))?;
        debug!(candidates = departures.len(), "fetched departures");

        let next = departures.first().ok_or(ResolveError::NoDeparture)?;
        debug!(
            actual = next.actual,
            text = %next.departure_text,
            time = %next.departure_time,
            "next departure"
        );

        Ok(describe_departure(next, now)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nextrip::MockNexTripClient;

    /// 2023-11-14T22:13:20Z
    const BASE_MS: i64 = 1_700_000_000_000;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(BASE_MS).unwrap()
    }

    fn scheduled_in(ms: i64) -> NexTripDeparture {
        NexTripDeparture::new(false, "10:42", format!("/Date({}-0600)/", BASE_MS + ms))
    }

    #[test]
    fn actual_report_is_verbatim() {
        let dep = NexTripDeparture::new(true, "4 Min", "/Date(0-0600)/");
        assert_eq!(
            describe_departure(&dep, now()).unwrap(),
            "4 Min (Actual vehicle report)"
        );
    }

    #[test]
    fn actual_report_skips_timestamp() {
        let dep = NexTripDeparture::new(true, "Due", "not a date");
        assert_eq!(
            describe_departure(&dep, now()).unwrap(),
            "Due (Actual vehicle report)"
        );
    }

    #[test]
    fn schedule_rounds_to_nearest_minute() {
        let cases = [
            (7 * 60_000, "7 Min (per schedule)"),
            (7 * 60_000 + 29_000, "7 Min (per schedule)"),
            (7 * 60_000 + 31_000, "8 Min (per schedule)"),
            (0, "0 Min (per schedule)"),
            (20_000, "0 Min (per schedule)"),
        ];
        for (offset, want) in cases {
            assert_eq!(describe_departure(&scheduled_in(offset), now()).unwrap(), want);
        }
    }

    #[test]
    fn half_minutes_round_to_even() {
        assert_eq!(
            format_schedule_estimate(TimeDelta::seconds(150)),
            "2 Min (per schedule)"
        );
        assert_eq!(
            format_schedule_estimate(TimeDelta::seconds(210)),
            "4 Min (per schedule)"
        );
    }

    #[test]
    fn past_due_is_negative() {
        assert_eq!(
            describe_departure(&scheduled_in(-3 * 60_000), now()).unwrap(),
            "-3 Min (per schedule)"
        );
    }

    #[test]
    fn bad_timestamp_is_conversion_error() {
        let dep = NexTripDeparture::new(false, "10:42", "10:42");
        assert!(matches!(
            describe_departure(&dep, now()),
            Err(ConversionError::MissingField(_))
        ));
    }

    #[tokio::test]
    async fn empty_schedule_is_no_departure() {
        let api = MockNexTripClient::from_dir("data/mock_nextrip").unwrap();
        let err = DepartureFormatter::new(&api)
            .resolve(
                &RouteId::parse("901").unwrap(),
                &DirectionId::parse("4").unwrap(),
                &StopId::parse("TF1I").unwrap(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::NoDeparture));
    }

    #[tokio::test]
    async fn only_first_departure_is_used() {
        let api = MockNexTripClient::new().with_departures(
            "901",
            "4",
            "FRHI",
            vec![
                scheduled_in(5 * 60_000),
                NexTripDeparture::new(true, "Due", ""),
            ],
        );

        let text = DepartureFormatter::new(&api)
            .resolve_at(
                &RouteId::parse("901").unwrap(),
                &DirectionId::parse("4").unwrap(),
                &StopId::parse("FRHI").unwrap(),
                now(),
            )
            .await
            .unwrap();

        assert_eq!(text, "5 Min (per schedule)");
    }

    #[tokio::test]
    async fn conversion_failure_is_reported() {
        let api = MockNexTripClient::new().with_departures(
            "901",
            "4",
            "FRHI",
            vec![NexTripDeparture::new(false, "10:42", "/Date(soon-0600)/")],
        );

        let err = DepartureFormatter::new(&api)
            .resolve(
                &RouteId::parse("901").unwrap(),
                &DirectionId::parse("4").unwrap(),
                &StopId::parse("FRHI").unwrap(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "error converting time: invalid timestamp \"soon\"");
    }
}
