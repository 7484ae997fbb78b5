//! Cross-field checks that schema validation deliberately leaves out.
//!
//! A report that passes [`crate::validate`] is structurally sound, but its
//! parts can still disagree with each other. These checks never reject a
//! report; they return warnings for the host to log or display.

use crate::config::ValidatorConfig;
use crate::schema::analysis::Emotion;
use crate::schema::webhook::V2EvaluationData;
use crate::util::duration::TimeSpan;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

const LOG_TARGET: &str = "cefr_report::consistency";

/// Most strengths or limitations the summary verdict is meant to list.
pub const MAX_VERDICT_ITEMS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    ScoreMismatch,
    SummaryAverage,
    UnknownSpeaker,
    DuplicateSpeaker,
    UnmappedTalkTime,
    OutOfOrder,
    InvertedSpan,
    TooManyItems,
    UnlistedEmotion,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WarningKind::ScoreMismatch => "score mismatch",
            WarningKind::SummaryAverage => "summary average",
            WarningKind::UnknownSpeaker => "unknown speaker",
            WarningKind::DuplicateSpeaker => "duplicate speaker",
            WarningKind::UnmappedTalkTime => "unmapped talk time",
            WarningKind::OutOfOrder => "out of order",
            WarningKind::InvertedSpan => "inverted span",
            WarningKind::TooManyItems => "too many items",
            WarningKind::UnlistedEmotion => "unlisted emotion",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConsistencyWarning {
    /// Relative to the evaluation data, e.g. `reports.cefr.summary.score.score`.
    pub path: String,
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.path, self.kind, self.message)
    }
}

#[derive(Default)]
struct Findings {
    warnings: Vec<ConsistencyWarning>,
}

impl Findings {
    fn push(&mut self, path: String, kind: WarningKind, message: String) {
        tracing::warn!(target: LOG_TARGET, %path, %kind, "{message}");
        self.warnings.push(ConsistencyWarning {
            path,
            kind,
            message,
        });
    }
}

pub fn check_consistency(
    data: &V2EvaluationData,
    config: &ValidatorConfig,
) -> Vec<ConsistencyWarning> {
    let mut findings = Findings::default();
    check_scores(data, config, &mut findings);
    check_speakers(data, &mut findings);
    check_chronology(data, &mut findings);
    check_verdict_lengths(data, &mut findings);
    check_emotions(data, &mut findings);
    tracing::debug!(
        target: LOG_TARGET,
        warnings = findings.warnings.len(),
        "consistency pass finished"
    );
    findings.warnings
}

fn check_scores(data: &V2EvaluationData, config: &ValidatorConfig, findings: &mut Findings) {
    let cefr = &data.reports.cefr;
    let restated = &cefr.summary.dimension_scores;
    let tolerance = config.tolerance;

    for (dimension, actual) in cefr.dimension_scores() {
        let claimed = restated.get(dimension);
        if !tolerance.accepts(claimed.value(), actual.value()) {
            findings.push(
                format!("reports.cefr.summary.dimension_scores.{dimension}"),
                WarningKind::ScoreMismatch,
                format!(
                    "summary says {} but the {dimension} report scores {}",
                    claimed.value(),
                    actual.value()
                ),
            );
        }
    }

    let mean = restated.mean();
    let overall = cefr.summary.score.score.value();
    if !tolerance.accepts(overall, mean) {
        findings.push(
            "reports.cefr.summary.score.score".to_owned(),
            WarningKind::SummaryAverage,
            format!("overall score {overall} is not the mean of the dimension scores ({mean:.2})"),
        );
    }
}

fn check_speakers(data: &V2EvaluationData, findings: &mut Findings) {
    let transcript = &data.transcript;
    let mut known = BTreeSet::new();
    for (i, entry) in transcript.speaker_map.iter().enumerate() {
        if !known.insert(entry.speaker_id.as_str()) {
            findings.push(
                format!("transcript.speaker_map[{i}].speaker_id"),
                WarningKind::DuplicateSpeaker,
                format!("{} is mapped more than once", entry.speaker_id),
            );
        }
    }

    for (i, segment) in transcript.segments.iter().enumerate() {
        if !known.contains(segment.speaker.as_str()) {
            findings.push(
                format!("transcript.segments[{i}].speaker"),
                WarningKind::UnknownSpeaker,
                format!("{} has no speaker_map entry", segment.speaker),
            );
        }
    }

    for speaker in transcript.talk_time.speakers.keys() {
        if !known.contains(speaker.as_str()) {
            findings.push(
                format!("transcript.talk_time.speakers.{speaker}"),
                WarningKind::UnmappedTalkTime,
                format!("talk time recorded for unmapped speaker {speaker}"),
            );
        }
    }
}

fn check_chronology(data: &V2EvaluationData, findings: &mut Findings) {
    let segments = &data.transcript.segments;
    for (i, pair) in segments.windows(2).enumerate() {
        if pair[1].start_time < pair[0].start_time {
            findings.push(
                format!("transcript.segments[{}].start_time", i + 1),
                WarningKind::OutOfOrder,
                format!(
                    "starts at {} before the previous segment's {}",
                    pair[1].start_time, pair[0].start_time
                ),
            );
        }
    }

    inverted_spans("transcript.segments", segments, findings);
    inverted_spans(
        "interactive_analysis.topic_segments",
        &data.interactive_analysis.topic_segments,
        findings,
    );
}

fn inverted_spans<T: TimeSpan>(base: &str, spans: &[T], findings: &mut Findings) {
    for (i, span) in spans.iter().enumerate() {
        if span.end_time() < span.start_time() {
            findings.push(
                format!("{base}[{i}].end_time"),
                WarningKind::InvertedSpan,
                format!("ends at {} before it starts at {}", span.end_time(), span.start_time()),
            );
        }
    }
}

fn check_verdict_lengths(data: &V2EvaluationData, findings: &mut Findings) {
    let verdict = &data.reports.cefr.summary.score;
    for (field, items) in [
        ("strengths", &verdict.strengths),
        ("limitations", &verdict.limitations),
    ] {
        if items.len() > MAX_VERDICT_ITEMS {
            findings.push(
                format!("reports.cefr.summary.score.{field}"),
                WarningKind::TooManyItems,
                format!("{} {field} listed, expected at most {MAX_VERDICT_ITEMS}", items.len()),
            );
        }
    }
}

fn check_emotions(data: &V2EvaluationData, findings: &mut Findings) {
    for (i, event) in data.interactive_analysis.emotion_timeline.iter().enumerate() {
        if Emotion::from_label(&event.emotion).is_none() {
            findings.push(
                format!("interactive_analysis.emotion_timeline[{i}].emotion"),
                WarningKind::UnlistedEmotion,
                format!("{:?} is not in the emotion vocabulary", event.emotion),
            );
        }
    }
}
