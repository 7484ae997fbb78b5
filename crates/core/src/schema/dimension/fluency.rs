use crate::schema::dimension::{Dimension, DimensionMetrics, DimensionReport};
use crate::schema::measure::{Measure, Unit};
use crate::schema::segment::{FeedbackSegment, SegmentTag};
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::Value;

closed_enum! {
    pub enum FluencyTag as "fluency tag" {
        LongPause => "Long Pause",
        FillerCluster => "Filler Cluster",
        SelfCorrection => "Self-Correction",
        Repetition => "Repetition",
        GrammaticalError => "Grammatical Error",
        Accuracy => "Accuracy",
        StructuralError => "Structural Error",
        Clarity => "Clarity",
        FalseStart => "False Start",
        MetaCommentary => "Meta-Commentary",
        TenseError => "Tense Error",
        RetrievalLag => "Retrieval Lag",
        Redundancy => "Redundancy",
        StructuralBreakdown => "Structural Breakdown",
        HighEffort => "High Effort",
        LexicalChoice => "Lexical Choice",
        IncompletePhrase => "Incomplete Phrase",
        Fragmentation => "Fragmentation",
        AwkwardPhrasing => "Awkward Phrasing",
        Vagueness => "Vagueness",
    }
}

impl SegmentTag for FluencyTag {
    const DIMENSION: Dimension = Dimension::Fluency;

    fn labels() -> &'static [&'static str] {
        Self::LABELS
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

closed_enum! {
    pub enum SpeechRateBand as "speech rate interpretation" {
        Slow => "slow",
        Functional => "functional",
        NearB2 => "near-B2 speed",
        Natural => "natural",
        Fast => "fast",
    }
}

closed_enum! {
    pub enum FillerLevel as "filler level" {
        None => "none",
        Minimal => "minimal",
        Low => "low",
        Moderate => "moderate",
        High => "high",
        Excessive => "excessive",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpeechRate {
    #[serde(flatten)]
    pub measure: Measure,
    pub interpretation: SpeechRateBand,
}

impl Schema for SpeechRate {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, None);
        let interpretation = cx.field(map, "interpretation");
        Some(Self {
            measure: measure?,
            interpretation: interpretation?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PauseDuration {
    #[serde(flatten)]
    pub measure: Measure,
    pub threshold_exceeded: bool,
}

impl Schema for PauseDuration {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Seconds));
        let threshold_exceeded = cx.field(map, "threshold_exceeded");
        Some(Self {
            measure: measure?,
            threshold_exceeded: threshold_exceeded?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FillerCount {
    pub filler: String,
    pub count: f64,
}

impl Schema for FillerCount {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let filler = cx.field(map, "filler");
        let count = cx.field(map, "count");
        Some(Self {
            filler: filler?,
            count: count?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FillerRate {
    #[serde(flatten)]
    pub measure: Measure,
    pub level: FillerLevel,
    pub breakdown: Vec<FillerCount>,
}

impl Schema for FillerRate {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Per100Words));
        let level = cx.field(map, "level");
        let breakdown = cx.field(map, "breakdown");
        Some(Self {
            measure: measure?,
            level: level?,
            breakdown: breakdown?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HesitationRate {
    #[serde(flatten)]
    pub measure: Measure,
}

impl Schema for HesitationRate {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Percent))?;
        Some(Self { measure })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FluencyMetrics {
    pub speech_rate: SpeechRate,
    pub average_pause_duration: PauseDuration,
    pub fillers_per_100_words: FillerRate,
    pub hesitation_rate: HesitationRate,
}

impl Schema for FluencyMetrics {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let speech_rate = cx.field(map, "speech_rate");
        let average_pause_duration = cx.field(map, "average_pause_duration");
        let fillers_per_100_words = cx.field(map, "fillers_per_100_words");
        let hesitation_rate = cx.field(map, "hesitation_rate");
        Some(Self {
            speech_rate: speech_rate?,
            average_pause_duration: average_pause_duration?,
            fillers_per_100_words: fillers_per_100_words?,
            hesitation_rate: hesitation_rate?,
        })
    }
}

impl DimensionMetrics for FluencyMetrics {
    type Tag = FluencyTag;
    const DIMENSION: Dimension = Dimension::Fluency;
}

pub type FluencySegment = FeedbackSegment<FluencyTag>;
pub type FluencyReport = DimensionReport<FluencyMetrics>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;
    use crate::fixtures;
    use crate::validate::{ValidationErrors, ViolationKind};

    fn check(value: &Value) -> Result<FluencyReport, ValidationErrors> {
        let config = ValidatorConfig::default();
        let mut cx = Context::new(&config);
        let out = FluencyReport::validate(value, &mut cx);
        cx.finish(out)
    }

    #[test]
    fn fixture_report_is_valid() {
        let report = check(&fixtures::fluency()).expect("valid fluency report");
        assert_eq!(report.dimension, Dimension::Fluency);
        assert_eq!(report.metrics.speech_rate.interpretation, SpeechRateBand::Functional);
        assert_eq!(report.metrics.fillers_per_100_words.breakdown.len(), 2);
        assert_eq!(report.used_tags(), vec![FluencyTag::LongPause, FluencyTag::FillerCluster]);
    }

    #[test]
    fn grammar_tag_under_fluency_is_rejected() {
        let mut value = fixtures::fluency();
        value["segments"][0]["tags"] = serde_json::json!(["Long Pause", "Verb Tense"]);
        let err = check(&value).expect_err("unknown tag");
        let v = err.at_path("segments[0].tags[1]").expect("tag violation");
        assert_eq!(v.kind, ViolationKind::Constraint);
        assert_eq!(v.expected, "one of the 20 fluency tag values");
        assert_eq!(v.actual, "\"Verb Tense\"");
    }

    #[test]
    fn pause_unit_must_be_seconds() {
        let mut value = fixtures::fluency();
        value["metrics"]["average_pause_duration"]["user_score"]["unit"] = serde_json::json!("ms");
        let err = check(&value).expect_err("wrong unit");
        assert!(err
            .at_path("metrics.average_pause_duration.user_score.unit")
            .is_some());
    }

    #[test]
    fn wrong_type_tag_skips_the_rest() {
        let mut value = fixtures::fluency();
        value["type"] = serde_json::json!("grammar");
        value["segments"] = serde_json::json!("not a list");
        let err = check(&value).expect_err("wrong discriminator");
        assert_eq!(err.len(), 1);
        assert_eq!(err.violations()[0].kind, ViolationKind::Structural);
        assert_eq!(err.violations()[0].path, "type");
    }

    #[test]
    fn eleven_segments_is_too_many() {
        let mut value = fixtures::fluency();
        let first = value["segments"][0].clone();
        value["segments"] = serde_json::Value::Array(vec![first; 11]);
        let err = check(&value).expect_err("too many segments");
        let v = err.at_path("segments").expect("length violation");
        assert_eq!(v.expected, "at most 10 item(s)");
    }
}
