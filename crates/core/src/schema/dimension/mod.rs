//! The five CEFR dimension reports.
//!
//! Every dimension shares one skeleton (`type` tag, feedback segments,
//! metrics, base score). What differs per dimension is the tag vocabulary
//! and the metrics bundle, both supplied through [`DimensionMetrics`].

pub mod clarity;
pub mod fluency;
pub mod grammar;
pub mod pronunciation;
pub mod vocabulary;

use crate::schema::base::BaseScore;
use crate::schema::segment::{FeedbackSegment, SegmentTag};
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

pub use clarity::{ClarityMetrics, ClarityReport, ClarityTag};
pub use fluency::{FluencyMetrics, FluencyReport, FluencyTag};
pub use grammar::{GrammarMetrics, GrammarReport, GrammarTag};
pub use pronunciation::{PronunciationMetrics, PronunciationReport, PronunciationTag};
pub use vocabulary::{VocabularyMetrics, VocabularyReport, VocabularyTag};

pub const MAX_SEGMENTS: usize = 10;

closed_enum! {
    pub enum Dimension as "dimension" {
        Fluency => "fluency",
        Grammar => "grammar",
        Vocabulary => "vocabulary",
        Pronunciation => "pronunciation",
        Clarity => "clarity",
    }
}

/// Per-dimension metrics bundle; ties a dimension to its tag vocabulary.
pub trait DimensionMetrics: Schema + Clone + Debug + PartialEq + Serialize {
    type Tag: SegmentTag;
    const DIMENSION: Dimension;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DimensionReport<M: DimensionMetrics> {
    #[serde(rename = "type")]
    pub dimension: Dimension,
    pub segments: Vec<FeedbackSegment<M::Tag>>,
    pub metrics: M,
    pub score: BaseScore,
}

impl<M: DimensionMetrics> DimensionReport<M> {
    /// Distinct tags used across all segments, in first-seen order.
    pub fn used_tags(&self) -> Vec<M::Tag> {
        let mut seen = Vec::new();
        for tag in self.segments.iter().flat_map(|s| s.tags.iter()) {
            if !seen.contains(tag) {
                seen.push(*tag);
            }
        }
        seen
    }
}

impl<M: DimensionMetrics> Schema for DimensionReport<M> {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        // A wrong `type` means the rest of the object is some other shape.
        cx.discriminator(map, "type", &[M::DIMENSION.as_str()])?;
        let segments = cx.field_with(map, "segments", |v, cx| cx.list_within(v, 0..=MAX_SEGMENTS));
        let metrics = cx.field(map, "metrics");
        let score = cx.field(map, "score");
        Some(Self {
            dimension: M::DIMENSION,
            segments: segments?,
            metrics: metrics?,
            score: score?,
        })
    }
}

/// Any one of the five dimension reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyDimensionReport {
    Fluency(FluencyReport),
    Grammar(GrammarReport),
    Vocabulary(VocabularyReport),
    Pronunciation(PronunciationReport),
    Clarity(ClarityReport),
}

impl AnyDimensionReport {
    pub(crate) fn validate_as(dimension: Dimension, value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        match dimension {
            Dimension::Fluency => FluencyReport::validate(value, cx).map(Self::Fluency),
            Dimension::Grammar => GrammarReport::validate(value, cx).map(Self::Grammar),
            Dimension::Vocabulary => VocabularyReport::validate(value, cx).map(Self::Vocabulary),
            Dimension::Pronunciation => {
                PronunciationReport::validate(value, cx).map(Self::Pronunciation)
            }
            Dimension::Clarity => ClarityReport::validate(value, cx).map(Self::Clarity),
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Self::Fluency(r) => r.dimension,
            Self::Grammar(r) => r.dimension,
            Self::Vocabulary(r) => r.dimension,
            Self::Pronunciation(r) => r.dimension,
            Self::Clarity(r) => r.dimension,
        }
    }

    pub fn score(&self) -> &BaseScore {
        match self {
            Self::Fluency(r) => &r.score,
            Self::Grammar(r) => &r.score,
            Self::Vocabulary(r) => &r.score,
            Self::Pronunciation(r) => &r.score,
            Self::Clarity(r) => &r.score,
        }
    }

    pub fn segment_count(&self) -> usize {
        match self {
            Self::Fluency(r) => r.segments.len(),
            Self::Grammar(r) => r.segments.len(),
            Self::Vocabulary(r) => r.segments.len(),
            Self::Pronunciation(r) => r.segments.len(),
            Self::Clarity(r) => r.segments.len(),
        }
    }
}

/// Read-only tag vocabulary for a dimension, in declaration order.
pub fn tag_vocabulary(dimension: Dimension) -> &'static [&'static str] {
    match dimension {
        Dimension::Fluency => FluencyTag::LABELS,
        Dimension::Grammar => GrammarTag::LABELS,
        Dimension::Vocabulary => VocabularyTag::LABELS,
        Dimension::Pronunciation => PronunciationTag::LABELS,
        Dimension::Clarity => ClarityTag::LABELS,
    }
}
