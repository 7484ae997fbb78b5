use crate::schema::analysis::Analysis;
use crate::schema::base::{BaseScore, Score};
use crate::schema::dimension::{
    ClarityReport, Dimension, FluencyReport, GrammarReport, PronunciationReport, VocabularyReport,
};
use crate::schema::summary::Summary;
use crate::schema::transcript::Transcript;
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::{Map, Value};

pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_FAILED: &str = "failed";

/// The summary plus one report per dimension.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CefrReports {
    pub summary: Summary,
    pub grammar: GrammarReport,
    pub vocabulary: VocabularyReport,
    pub fluency: FluencyReport,
    pub pronunciation: PronunciationReport,
    pub clarity: ClarityReport,
}

impl CefrReports {
    pub fn base_score(&self, dimension: Dimension) -> &BaseScore {
        match dimension {
            Dimension::Fluency => &self.fluency.score,
            Dimension::Grammar => &self.grammar.score,
            Dimension::Vocabulary => &self.vocabulary.score,
            Dimension::Pronunciation => &self.pronunciation.score,
            Dimension::Clarity => &self.clarity.score,
        }
    }

    /// Each dimension report's own headline score, in `Dimension::ALL` order.
    pub fn dimension_scores(&self) -> impl Iterator<Item = (Dimension, Score)> + '_ {
        Dimension::ALL
            .iter()
            .map(move |d| (*d, self.base_score(*d).score))
    }
}

impl Schema for CefrReports {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let summary = cx.field(map, "summary");
        let grammar = cx.field(map, "grammar");
        let vocabulary = cx.field(map, "vocabulary");
        let fluency = cx.field(map, "fluency");
        let pronunciation = cx.field(map, "pronunciation");
        let clarity = cx.field(map, "clarity");
        Some(Self {
            summary: summary?,
            grammar: grammar?,
            vocabulary: vocabulary?,
            fluency: fluency?,
            pronunciation: pronunciation?,
            clarity: clarity?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reports {
    pub cefr: CefrReports,
}

impl Schema for Reports {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let cefr = cx.field(map, "cefr")?;
        Some(Self { cefr })
    }
}

/// A complete evaluation: transcript, conversation analysis, CEFR reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct V2EvaluationData {
    pub transcript: Transcript,
    pub interactive_analysis: Analysis,
    pub reports: Reports,
}

impl Schema for V2EvaluationData {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let transcript = cx.field(map, "transcript");
        let interactive_analysis = cx.field(map, "interactive_analysis");
        let reports = cx.field(map, "reports");
        Some(Self {
            transcript: transcript?,
            interactive_analysis: interactive_analysis?,
            reports: reports?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompletedPayload {
    pub recording_id: String,
    pub correlation_id: String,
    pub data: V2EvaluationData,
    pub processing_time_ms: f64,
}

impl CompletedPayload {
    fn validate_fields(map: &Map<String, Value>, cx: &mut Context<'_>) -> Option<Self> {
        let recording_id = cx.field(map, "recording_id");
        let correlation_id = cx.field(map, "correlation_id");
        let exclusive = cx.forbid(map, "error", "on a completed payload");
        let data = cx.field(map, "data");
        let processing_time_ms = cx.field_with(map, "processing_time_ms", |v, cx| cx.non_negative(v));
        if !exclusive {
            return None;
        }
        Some(Self {
            recording_id: recording_id?,
            correlation_id: correlation_id?,
            data: data?,
            processing_time_ms: processing_time_ms?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FailedPayload {
    pub recording_id: String,
    pub correlation_id: String,
    pub error: String,
    pub processing_time_ms: f64,
}

impl FailedPayload {
    fn validate_fields(map: &Map<String, Value>, cx: &mut Context<'_>) -> Option<Self> {
        let recording_id = cx.field(map, "recording_id");
        let correlation_id = cx.field(map, "correlation_id");
        let exclusive = cx.forbid(map, "data", "on a failed payload");
        let error = cx.field(map, "error");
        let processing_time_ms = cx.field_with(map, "processing_time_ms", |v, cx| cx.non_negative(v));
        if !exclusive {
            return None;
        }
        Some(Self {
            recording_id: recording_id?,
            correlation_id: correlation_id?,
            error: error?,
            processing_time_ms: processing_time_ms?,
        })
    }
}

/// Webhook envelope. `status` picks the branch, and exactly one of `data`
/// or `error` goes with it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WebhookPayload {
    Completed(CompletedPayload),
    Failed(FailedPayload),
}

impl WebhookPayload {
    pub fn status(&self) -> &'static str {
        match self {
            Self::Completed(_) => STATUS_COMPLETED,
            Self::Failed(_) => STATUS_FAILED,
        }
    }

    pub fn recording_id(&self) -> &str {
        match self {
            Self::Completed(p) => &p.recording_id,
            Self::Failed(p) => &p.recording_id,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::Completed(p) => &p.correlation_id,
            Self::Failed(p) => &p.correlation_id,
        }
    }

    pub fn processing_time_ms(&self) -> f64 {
        match self {
            Self::Completed(p) => p.processing_time_ms,
            Self::Failed(p) => p.processing_time_ms,
        }
    }

    pub fn into_data(self) -> Result<V2EvaluationData, FailedPayload> {
        match self {
            Self::Completed(p) => Ok(p.data),
            Self::Failed(p) => Err(p),
        }
    }
}

impl Schema for WebhookPayload {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        match cx.discriminator(map, "status", &[STATUS_COMPLETED, STATUS_FAILED])? {
            STATUS_COMPLETED => CompletedPayload::validate_fields(map, cx).map(Self::Completed),
            _ => FailedPayload::validate_fields(map, cx).map(Self::Failed),
        }
    }
}
