//! Validation entry points.
//!
//! Validation never panics and never stops at the first problem: every
//! violation in the input is collected and returned together.

mod context;
mod violation;

pub use context::{render_path, Context, PathSegment};
pub use violation::{ValidationErrors, Violation, ViolationKind};

use crate::config::ValidatorConfig;
use crate::schema::dimension::{AnyDimensionReport, Dimension};
use crate::schema::transcript::TranscriptResponse;
use crate::schema::webhook::{FailedPayload, V2EvaluationData, WebhookPayload};
use serde_json::Value;

pub(crate) const LOG_TARGET: &str = "cefr_report::validate";

/// A type that can be checked against, and built from, a raw JSON value.
///
/// Implementations record violations on `cx` and return `None` when the
/// value (or anything below it) was rejected.
pub trait Schema: Sized {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("evaluation failed upstream: {}", .0.error)]
    Failed(FailedPayload),
}

impl ReportError {
    pub fn violations(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Failed(_) => None,
        }
    }
}

fn run<T: Schema>(value: &Value, config: &ValidatorConfig) -> Result<T, ValidationErrors> {
    let mut cx = Context::new(config);
    let out = T::validate(value, &mut cx);
    cx.finish(out)
}

pub fn validate_payload(value: &Value) -> Result<WebhookPayload, ValidationErrors> {
    validate_payload_with(value, &ValidatorConfig::default())
}

/// Validates a webhook envelope of either status.
pub fn validate_payload_with(
    value: &Value,
    config: &ValidatorConfig,
) -> Result<WebhookPayload, ValidationErrors> {
    tracing::debug!(target: LOG_TARGET, "validating webhook payload");
    let result = run::<WebhookPayload>(value, config);
    match &result {
        Ok(payload) => tracing::debug!(
            target: LOG_TARGET,
            status = payload.status(),
            recording_id = payload.recording_id(),
            "payload accepted"
        ),
        Err(errors) => tracing::debug!(
            target: LOG_TARGET,
            violations = errors.len(),
            structural = errors.has_structural(),
            "payload rejected"
        ),
    }
    result
}

/// Parses JSON text and validates it. Malformed JSON comes back as a single
/// structural violation at `$`, never as a different error type.
pub fn parse_payload(text: &str, config: &ValidatorConfig) -> Result<WebhookPayload, ValidationErrors> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => validate_payload_with(&value, config),
        Err(err) => {
            tracing::debug!(target: LOG_TARGET, error = %err, "payload is not JSON");
            Err(ValidationErrors::new(vec![Violation {
                path: render_path(&[]),
                kind: ViolationKind::Structural,
                expected: "a JSON document".to_owned(),
                actual: format!("syntax error at line {} column {}", err.line(), err.column()),
            }]))
        }
    }
}

pub fn validate_report(value: &Value) -> Result<V2EvaluationData, ReportError> {
    validate_report_with(value, &ValidatorConfig::default())
}

/// The report a renderer consumes: the evaluation data of a completed
/// payload. A well-formed `failed` payload is returned as
/// [`ReportError::Failed`].
pub fn validate_report_with(
    value: &Value,
    config: &ValidatorConfig,
) -> Result<V2EvaluationData, ReportError> {
    validate_payload_with(value, config)?
        .into_data()
        .map_err(ReportError::Failed)
}

pub fn validate_dimension(
    dimension: Dimension,
    value: &Value,
) -> Result<AnyDimensionReport, ValidationErrors> {
    validate_dimension_with(dimension, value, &ValidatorConfig::default())
}

/// Validates one dimension report on its own.
pub fn validate_dimension_with(
    dimension: Dimension,
    value: &Value,
    config: &ValidatorConfig,
) -> Result<AnyDimensionReport, ValidationErrors> {
    let mut cx = Context::new(config);
    let out = AnyDimensionReport::validate_as(dimension, value, &mut cx);
    tracing::debug!(target: LOG_TARGET, %dimension, ok = out.is_some(), "dimension validated");
    cx.finish(out)
}

/// Validates the analysis engine's raw `{ "transcript": .. }` response.
pub fn validate_transcript_response(
    value: &Value,
    config: &ValidatorConfig,
) -> Result<TranscriptResponse, ValidationErrors> {
    run(value, config)
}
