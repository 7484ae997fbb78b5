use crate::schema::dimension::{Dimension, DimensionMetrics, DimensionReport};
use crate::schema::measure::{Correction, Measure, Unit};
use crate::schema::segment::{FeedbackSegment, SegmentTag};
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::Value;

closed_enum! {
    pub enum GrammarTag as "grammar tag" {
        VerbTense => "Verb Tense",
        SubjectVerbAgreement => "Subject-Verb Agreement",
        ArticleUsage => "Article Usage",
        PrepositionError => "Preposition Error",
        WordOrder => "Word Order",
        SingularPlural => "Singular/Plural",
        PronounUsage => "Pronoun Usage",
        ModalVerbError => "Modal Verb Error",
        ConditionalStructure => "Conditional Structure",
        RelativeClause => "Relative Clause",
        PassiveVoice => "Passive Voice",
        MixedErrors => "Mixed Errors",
    }
}

impl SegmentTag for GrammarTag {
    const DIMENSION: Dimension = Dimension::Grammar;

    fn labels() -> &'static [&'static str] {
        Self::LABELS
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

closed_enum! {
    pub enum AccuracyBand as "grammar accuracy interpretation" {
        HighlyInaccurate => "highly inaccurate",
        FrequentErrors => "frequent errors",
        NoticeableErrors => "noticeable errors",
        GenerallyAccurate => "generally accurate",
        AccurateWithMinorErrors => "accurate with minor errors",
        HighlyAccurate => "highly accurate",
    }
}

closed_enum! {
    pub enum ComplexityBand as "syntactic complexity interpretation" {
        VeryBasic => "very basic structures",
        Simple => "simple structures",
        Predictable => "predictable patterns",
        Varied => "varied structures",
        Complex => "complex structures",
        Sophisticated => "sophisticated structures",
    }
}

closed_enum! {
    pub enum GrammarErrorType as "grammar error type" {
        VerbTense => "verb tense",
        SubjectVerbAgreement => "subject-verb agreement",
        ArticleUsage => "article usage",
        PrepositionErrors => "preposition errors",
        WordOrder => "word order",
        PluralSingularForms => "plural/singular forms",
        PronounUsage => "pronoun usage",
        ModalVerbs => "modal verbs",
        ConditionalStructures => "conditional structures",
        RelativeClauses => "relative clauses",
        PassiveVoice => "passive voice",
        MixedErrors => "mixed errors",
    }
}

closed_enum! {
    pub enum ImpactLevel as "error impact level" {
        SeverelyImpairs => "severely impairs meaning",
        FrequentlyImpairs => "frequently impairs meaning",
        OccasionallyImpairs => "occasionally impairs meaning",
        RarelyImpairs => "rarely impairs meaning",
        DoesNotImpair => "does not impair meaning",
        Negligible => "negligible impact",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorRate {
    #[serde(flatten)]
    pub measure: Measure,
    pub interpretation: AccuracyBand,
}

impl Schema for ErrorRate {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Per100Words));
        let interpretation = cx.field(map, "interpretation");
        Some(Self {
            measure: measure?,
            interpretation: interpretation?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelfCorrectionRate {
    #[serde(flatten)]
    pub measure: Measure,
}

impl Schema for SelfCorrectionRate {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Percent))?;
        Some(Self { measure })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SyntacticComplexity {
    #[serde(flatten)]
    pub measure: Measure,
    pub interpretation: ComplexityBand,
}

impl Schema for SyntacticComplexity {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Score));
        let interpretation = cx.field(map, "interpretation");
        Some(Self {
            measure: measure?,
            interpretation: interpretation?,
        })
    }
}

/// An error example with the sentence it occurred in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContextualCorrection {
    #[serde(flatten)]
    pub correction: Correction,
    pub context: String,
}

impl Schema for ContextualCorrection {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let correction = Correction::validate_fields(map, cx);
        let context = cx.field(map, "context");
        Some(Self {
            correction: correction?,
            context: context?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorImpact {
    pub name: String,
    pub dominant_error_type: GrammarErrorType,
    pub impact_level: ImpactLevel,
    pub example_errors: Vec<ContextualCorrection>,
}

impl Schema for ErrorImpact {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let name = cx.field(map, "name");
        let dominant_error_type = cx.field(map, "dominant_error_type");
        let impact_level = cx.field(map, "impact_level");
        let example_errors = cx.field(map, "example_errors");
        Some(Self {
            name: name?,
            dominant_error_type: dominant_error_type?,
            impact_level: impact_level?,
            example_errors: example_errors?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GrammarMetrics {
    pub errors_per_100_words: ErrorRate,
    pub self_correction_rate: SelfCorrectionRate,
    pub syntactic_complexity: SyntacticComplexity,
    pub error_impact: ErrorImpact,
}

impl Schema for GrammarMetrics {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let errors_per_100_words = cx.field(map, "errors_per_100_words");
        let self_correction_rate = cx.field(map, "self_correction_rate");
        let syntactic_complexity = cx.field(map, "syntactic_complexity");
        let error_impact = cx.field(map, "error_impact");
        Some(Self {
            errors_per_100_words: errors_per_100_words?,
            self_correction_rate: self_correction_rate?,
            syntactic_complexity: syntactic_complexity?,
            error_impact: error_impact?,
        })
    }
}

impl DimensionMetrics for GrammarMetrics {
    type Tag = GrammarTag;
    const DIMENSION: Dimension = Dimension::Grammar;
}

pub type GrammarSegment = FeedbackSegment<GrammarTag>;
pub type GrammarReport = DimensionReport<GrammarMetrics>;
