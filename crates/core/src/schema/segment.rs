use crate::schema::base::Timestamp;
use crate::schema::dimension::Dimension;
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;
use std::hash::Hash;

pub const SUGGESTIONS_MIN: usize = 1;
pub const SUGGESTIONS_MAX: usize = 3;

/// A closed per-dimension tag vocabulary.
pub trait SegmentTag:
    Schema + Copy + Debug + PartialEq + Eq + Hash + Serialize + Send + Sync + 'static
{
    const DIMENSION: Dimension;

    fn labels() -> &'static [&'static str];

    fn label(&self) -> &'static str;
}

/// One flagged moment in the recording, with corrected alternatives.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeedbackSegment<T> {
    pub timestamp: Timestamp,
    pub content: String,
    pub suggestion: Vec<String>,
    pub explanation: String,
    pub tags: Vec<T>,
}

impl<T: SegmentTag> FeedbackSegment<T> {
    pub fn has_tag(&self, tag: T) -> bool {
        self.tags.contains(&tag)
    }
}

impl<T: SegmentTag> Schema for FeedbackSegment<T> {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let timestamp = cx.field(map, "timestamp");
        let content = cx.field(map, "content");
        let suggestion = cx.field_with(map, "suggestion", |v, cx| {
            cx.list_within(v, SUGGESTIONS_MIN..=SUGGESTIONS_MAX)
        });
        let explanation = cx.field(map, "explanation");
        let tags = cx.field(map, "tags");
        Some(Self {
            timestamp: timestamp?,
            content: content?,
            suggestion: suggestion?,
            explanation: explanation?,
            tags: tags?,
        })
    }
}
