//! Timestamp arithmetic for charts and audio players.

use crate::schema::base::{DurationError, Timestamp};

/// Anything that occupies a `[start_time, end_time]` span of the recording.
pub trait TimeSpan {
    fn start_time(&self) -> &Timestamp;

    fn end_time(&self) -> &Timestamp;

    fn contains(&self, seconds: f64) -> bool {
        is_time_in_segment(seconds, self.start_time(), self.end_time())
    }
}

pub fn parse_duration(timestamp: &Timestamp) -> u32 {
    timestamp.seconds()
}

/// Inverse of [`parse_duration`]. Fails past 99:59:59.
pub fn format_duration(seconds: u32) -> Result<Timestamp, DurationError> {
    Timestamp::from_seconds(seconds)
}

/// Player-style clock: `M:SS` under an hour, `H:MM:SS` from there on.
/// Negative and non-finite input renders as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_owned();
    }
    let total = seconds.floor() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Inclusive on both ends.
pub fn is_time_in_segment(seconds: f64, start: &Timestamp, end: &Timestamp) -> bool {
    seconds >= f64::from(start.seconds()) && seconds <= f64::from(end.seconds())
}

/// Index of the first span containing `seconds`.
pub fn find_active_segment<T: TimeSpan>(seconds: f64, segments: &[T]) -> Option<usize> {
    segments.iter().position(|segment| segment.contains(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::base::MAX_TIMESTAMP_SECONDS;

    fn ts(text: &str) -> Timestamp {
        Timestamp::parse(text).expect("valid timestamp")
    }

    struct Span(Timestamp, Timestamp);

    impl TimeSpan for Span {
        fn start_time(&self) -> &Timestamp {
            &self.0
        }

        fn end_time(&self) -> &Timestamp {
            &self.1
        }
    }

    #[test]
    fn parse_and_format_agree() {
        assert_eq!(parse_duration(&ts("01:02:03")), 3723);
        assert_eq!(format_duration(3723).expect("fits").as_str(), "01:02:03");
        assert_eq!(format_duration(0).expect("fits").as_str(), "00:00:00");
    }

    #[test]
    fn round_trip_is_stable() {
        for text in ["00:00:00", "00:00:59", "00:59:59", "12:34:56", "99:59:59"] {
            let seconds = parse_duration(&ts(text));
            let again = format_duration(seconds).expect("fits");
            assert_eq!(again.as_str(), text);
            assert_eq!(parse_duration(&again), seconds);
        }
        let samples = (0..=MAX_TIMESTAMP_SECONDS)
            .step_by(997)
            .chain([MAX_TIMESTAMP_SECONDS]);
        for seconds in samples {
            let formatted = format_duration(seconds).expect("fits");
            assert_eq!(parse_duration(&formatted), seconds);
        }
    }

    #[test]
    fn format_rejects_values_past_99_hours() {
        assert!(format_duration(MAX_TIMESTAMP_SECONDS).is_ok());
        assert_eq!(
            format_duration(360_000),
            Err(DurationError::OutOfRange(360_000))
        );
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(65.9), "1:05");
        assert_eq!(format_clock(3723.0), "1:02:03");
        assert_eq!(format_clock(-3.0), "0:00");
        assert_eq!(format_clock(f64::NAN), "0:00");
    }

    #[test]
    fn segment_bounds_are_inclusive() {
        let (start, end) = (ts("00:00:10"), ts("00:00:20"));
        assert!(is_time_in_segment(10.0, &start, &end));
        assert!(is_time_in_segment(20.0, &start, &end));
        assert!(!is_time_in_segment(20.5, &start, &end));
        assert!(!is_time_in_segment(9.99, &start, &end));
    }

    #[test]
    fn first_matching_segment_wins() {
        let spans = vec![
            Span(ts("00:00:00"), ts("00:00:10")),
            Span(ts("00:00:10"), ts("00:00:20")),
        ];
        assert_eq!(find_active_segment(5.0, &spans), Some(0));
        assert_eq!(find_active_segment(10.0, &spans), Some(0));
        assert_eq!(find_active_segment(15.0, &spans), Some(1));
        assert_eq!(find_active_segment(25.0, &spans), None);
    }
}
