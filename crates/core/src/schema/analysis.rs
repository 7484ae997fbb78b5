use crate::schema::base::Timestamp;
use crate::util::duration::TimeSpan;
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::Value;

closed_enum! {
    pub enum SafetyCategory as "safety category" {
        Profanity => "profanity",
        SexualContent => "sexual_content",
        Violence => "violence",
        HateSpeech => "hate_speech",
        Harassment => "harassment",
        SelfHarm => "self_harm",
        Discrimination => "discrimination",
        Bullying => "bullying",
        Spam => "spam",
    }
}

closed_enum! {
    pub enum SentimentCategory as "sentiment" {
        Positive => "positive",
        Negative => "negative",
        Neutral => "neutral",
        Mixed => "mixed",
    }
}

closed_enum! {
    pub enum Intensity as "emotion intensity" {
        Low => "low",
        Moderate => "moderate",
        High => "high",
        VeryHigh => "very_high",
    }
}

closed_enum! {
    /// Closed emotion vocabulary for a speaker's dominant emotion.
    pub enum Emotion as "emotion" {
        Happy => "happy",
        Joyful => "joyful",
        Excited => "excited",
        Enthusiastic => "enthusiastic",
        Content => "content",
        Satisfied => "satisfied",
        Confident => "confident",
        Proud => "proud",
        Grateful => "grateful",
        Hopeful => "hopeful",
        Amused => "amused",
        Pleased => "pleased",
        Cheerful => "cheerful",
        Encouraging => "encouraging",
        Supportive => "supportive",
        Optimistic => "optimistic",
        Relieved => "relieved",
        Calm => "calm",
        Peaceful => "peaceful",
        Sad => "sad",
        Unhappy => "unhappy",
        Disappointed => "disappointed",
        Frustrated => "frustrated",
        Angry => "angry",
        Annoyed => "annoyed",
        Irritated => "irritated",
        Anxious => "anxious",
        Worried => "worried",
        Nervous => "nervous",
        Fearful => "fearful",
        Scared => "scared",
        Confused => "confused",
        Uncertain => "uncertain",
        Doubtful => "doubtful",
        Bored => "bored",
        Tired => "tired",
        Stressed => "stressed",
        Overwhelmed => "overwhelmed",
        Embarrassed => "embarrassed",
        Ashamed => "ashamed",
        Guilty => "guilty",
        Jealous => "jealous",
        Lonely => "lonely",
        Hurt => "hurt",
        Disgusted => "disgusted",
        Neutral => "neutral",
        Indifferent => "indifferent",
        Curious => "curious",
        Inquisitive => "inquisitive",
        Interested => "interested",
        Thoughtful => "thoughtful",
        Focused => "focused",
        Attentive => "attentive",
        Surprised => "surprised",
        Shocked => "shocked",
        Skeptical => "skeptical",
        Serious => "serious",
        Contemplative => "contemplative",
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicSegment {
    pub topic: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

impl TimeSpan for TopicSegment {
    fn start_time(&self) -> &Timestamp {
        &self.start_time
    }

    fn end_time(&self) -> &Timestamp {
        &self.end_time
    }
}

impl Schema for TopicSegment {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let topic = cx.field(map, "topic");
        let start_time = cx.field(map, "start_time");
        let end_time = cx.field(map, "end_time");
        Some(Self {
            topic: topic?,
            start_time: start_time?,
            end_time: end_time?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SafetyFlags {
    pub profanity_detected: bool,
    pub flagged_words: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flagged_categories: Option<Vec<SafetyCategory>>,
}

impl SafetyFlags {
    pub fn is_clean(&self) -> bool {
        !self.profanity_detected
            && self.flagged_words.is_empty()
            && self.flagged_categories.as_ref().map_or(true, Vec::is_empty)
    }
}

impl Schema for SafetyFlags {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let profanity_detected = cx.field(map, "profanity_detected");
        let flagged_words = cx.field(map, "flagged_words");
        let flagged_categories = cx.optional_field(map, "flagged_categories");
        Some(Self {
            profanity_detected: profanity_detected?,
            flagged_words: flagged_words?,
            flagged_categories: flagged_categories?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpeakerSentiment {
    /// Free-form speaker reference; not checked against the speaker map here.
    pub speaker_id: String,
    pub average_sentiment: SentimentCategory,
    pub dominant_emotion: Emotion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_score: Option<f64>,
}

impl Schema for SpeakerSentiment {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let speaker_id = cx.field(map, "speaker_id");
        let average_sentiment = cx.field(map, "average_sentiment");
        let dominant_emotion = cx.field(map, "dominant_emotion");
        let sentiment_score = cx.optional_field(map, "sentiment_score");
        Some(Self {
            speaker_id: speaker_id?,
            average_sentiment: average_sentiment?,
            dominant_emotion: dominant_emotion?,
            sentiment_score: sentiment_score?,
        })
    }
}

/// One point on the emotion timeline. Unlike `dominant_emotion`, the
/// `emotion` label here is an open string.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmotionEvent {
    pub speaker: String,
    pub emotion: String,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl EmotionEvent {
    /// The label as a closed-vocabulary emotion, when it is one.
    pub fn known_emotion(&self) -> Option<Emotion> {
        Emotion::from_label(&self.emotion)
    }
}

impl Schema for EmotionEvent {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let speaker = cx.field(map, "speaker");
        let emotion = cx.field(map, "emotion");
        let timestamp = cx.field(map, "timestamp");
        let intensity = cx.optional_field(map, "intensity");
        let confidence = cx.optional_field(map, "confidence");
        Some(Self {
            speaker: speaker?,
            emotion: emotion?,
            timestamp: timestamp?,
            intensity: intensity?,
            confidence: confidence?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    pub topic_segments: Vec<TopicSegment>,
    pub safety_flags: SafetyFlags,
    pub overall_sentiment: Vec<SpeakerSentiment>,
    pub emotion_timeline: Vec<EmotionEvent>,
}

impl Schema for Analysis {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let topic_segments = cx.field(map, "topic_segments");
        let safety_flags = cx.field(map, "safety_flags");
        let overall_sentiment = cx.field(map, "overall_sentiment");
        let emotion_timeline = cx.field(map, "emotion_timeline");
        Some(Self {
            topic_segments: topic_segments?,
            safety_flags: safety_flags?,
            overall_sentiment: overall_sentiment?,
            emotion_timeline: emotion_timeline?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;
    use crate::fixtures;
    use crate::validate::{ValidationErrors, ViolationKind};
    use serde_json::json;

    fn check(value: &Value) -> Result<Analysis, ValidationErrors> {
        let config = ValidatorConfig::default();
        let mut cx = Context::new(&config);
        let out = Analysis::validate(value, &mut cx);
        cx.finish(out)
    }

    #[test]
    fn emotion_vocabulary_has_58_labels() {
        assert_eq!(Emotion::LABELS.len(), 58);
        assert_eq!(Emotion::from_label("contemplative"), Some(Emotion::Contemplative));
        assert_eq!(Emotion::from_label("ecstatic"), None);
    }

    #[test]
    fn fixture_analysis_is_valid() {
        let analysis = check(&fixtures::analysis()).expect("valid analysis");
        assert!(analysis.safety_flags.is_clean());
        assert_eq!(analysis.overall_sentiment[0].dominant_emotion, Emotion::Encouraging);
        assert_eq!(analysis.emotion_timeline[0].intensity, Some(Intensity::Moderate));
    }

    #[test]
    fn dominant_emotion_is_closed_but_timeline_emotion_is_open() {
        let mut value = fixtures::analysis();
        value["emotion_timeline"][0]["emotion"] = json!("ecstatic");
        let analysis = check(&value).expect("open timeline label");
        assert_eq!(analysis.emotion_timeline[0].known_emotion(), None);

        value["overall_sentiment"][0]["dominant_emotion"] = json!("ecstatic");
        let err = check(&value).expect_err("closed dominant emotion");
        let v = err
            .at_path("overall_sentiment[0].dominant_emotion")
            .expect("emotion violation");
        assert_eq!(v.kind, ViolationKind::Constraint);
        assert_eq!(v.expected, "one of the 58 emotion values");
    }

    #[test]
    fn optional_fields_may_be_absent_but_not_null() {
        let mut value = fixtures::analysis();
        value["safety_flags"]
            .as_object_mut()
            .expect("object")
            .remove("flagged_categories");
        value["emotion_timeline"][0]
            .as_object_mut()
            .expect("object")
            .remove("intensity");
        let analysis = check(&value).expect("absent optionals");
        assert_eq!(analysis.safety_flags.flagged_categories, None);

        value["emotion_timeline"][0]["confidence"] = Value::Null;
        let err = check(&value).expect_err("null confidence");
        let v = err
            .at_path("emotion_timeline[0].confidence")
            .expect("null is a mismatch");
        assert_eq!(v.kind, ViolationKind::TypeMismatch);
    }

    #[test]
    fn unknown_safety_category_is_rejected() {
        let mut value = fixtures::analysis();
        value["safety_flags"]["flagged_categories"] = json!(["spam", "gossip"]);
        let err = check(&value).expect_err("unknown category");
        assert!(err.at_path("safety_flags.flagged_categories[1]").is_some());
        assert_eq!(err.len(), 1);
    }
}
