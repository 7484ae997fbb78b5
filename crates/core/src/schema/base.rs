use crate::validate::{Context, Schema};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Largest value an `HH:MM:SS` timestamp can hold (99:59:59).
pub const MAX_TIMESTAMP_SECONDS: u32 = 99 * 3600 + 59 * 60 + 59;

static TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2}):([0-5][0-9]):([0-5][0-9])$").expect("Invalid regex"));

static SPEAKER_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^SPEAKER_([0-9]{2})$").expect("Invalid regex"));

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("not an HH:MM:SS timestamp: {0:?}")]
    Malformed(String),
    #[error("{0} seconds does not fit in HH:MM:SS (max 99:59:59)")]
    OutOfRange(u64),
}

/// A zero-padded `HH:MM:SS` offset into a recording. Hours run 00-99.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn parse(text: &str) -> Result<Self, DurationError> {
        if TIMESTAMP_RE.is_match(text) {
            Ok(Self(text.to_owned()))
        } else {
            Err(DurationError::Malformed(text.to_owned()))
        }
    }

    pub fn from_seconds(seconds: u32) -> Result<Self, DurationError> {
        if seconds > MAX_TIMESTAMP_SECONDS {
            return Err(DurationError::OutOfRange(u64::from(seconds)));
        }
        let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
        Ok(Self(format!("{h:02}:{m:02}:{s:02}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn seconds(&self) -> u32 {
        // The pattern guarantees three all-digit fields.
        self.0
            .split(':')
            .filter_map(|part| part.parse::<u32>().ok())
            .fold(0, |acc, part| acc * 60 + part)
    }
}

impl FromStr for Timestamp {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.seconds().cmp(&other.seconds())
    }
}

impl Schema for Timestamp {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let text = cx.string(value)?;
        match Self::parse(text) {
            Ok(ts) => Some(ts),
            Err(_) => {
                cx.constraint("timestamp matching HH:MM:SS", value);
                None
            }
        }
    }
}

/// Diarization label of the form `SPEAKER_NN`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SpeakerId(String);

impl SpeakerId {
    pub fn parse(text: &str) -> Option<Self> {
        SPEAKER_ID_RE.is_match(text).then(|| Self(text.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `NN` suffix; `Some` for every id [`SpeakerId::parse`] accepts.
    pub fn number(&self) -> Option<u8> {
        self.0.strip_prefix("SPEAKER_")?.parse().ok()
    }
}

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Schema for SpeakerId {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let text = cx.string(value)?;
        match Self::parse(text) {
            Some(id) => Some(id),
            None => {
                cx.constraint("speaker id matching SPEAKER_NN", value);
                None
            }
        }
    }
}

closed_enum! {
    pub enum ConfidenceLevel as "confidence level" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

/// A score in the closed interval [0, 100]. Out-of-range input is rejected,
/// never clamped.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    pub fn new(value: f64) -> Option<Self> {
        (SCORE_MIN..=SCORE_MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Schema for Score {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let n = cx.number(value)?;
        match Self::new(n) {
            Some(score) => Some(score),
            None => {
                cx.constraint("number in [0, 100]", value);
                None
            }
        }
    }
}

/// Shared verdict block of every dimension. `strengths` and `limitations`
/// are ordered most significant first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BaseScore {
    pub strengths: Vec<String>,
    pub limitations: Vec<String>,
    pub score: Score,
    pub confidence_level: ConfidenceLevel,
    pub reason: String,
}

impl Schema for BaseScore {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let strengths = cx.field(map, "strengths");
        let limitations = cx.field(map, "limitations");
        let score = cx.field(map, "score");
        let confidence_level = cx.field(map, "confidence_level");
        let reason = cx.field(map, "reason");
        Some(Self {
            strengths: strengths?,
            limitations: limitations?,
            score: score?,
            confidence_level: confidence_level?,
            reason: reason?,
        })
    }
}
