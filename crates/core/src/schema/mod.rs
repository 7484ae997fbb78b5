//! Typed report tree. Each type validates itself from raw JSON through
//! [`crate::validate::Schema`].

#[macro_use]
mod macros;

pub mod analysis;
pub mod base;
pub mod dimension;
pub mod measure;
pub mod segment;
pub mod summary;
pub mod transcript;
pub mod webhook;

pub use analysis::{Analysis, Emotion, EmotionEvent, SafetyFlags, SpeakerSentiment, TopicSegment};
pub use base::{BaseScore, ConfidenceLevel, DurationError, Score, SpeakerId, Timestamp};
pub use dimension::{tag_vocabulary, AnyDimensionReport, Dimension, DimensionReport};
pub use summary::{DimensionScores, Summary};
pub use transcript::{TalkTime, Transcript, TranscriptResponse, TranscriptSegment};
pub use webhook::{
    CefrReports, CompletedPayload, FailedPayload, Reports, V2EvaluationData, WebhookPayload,
};
