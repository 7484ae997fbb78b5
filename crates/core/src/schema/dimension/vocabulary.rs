use crate::schema::dimension::{Dimension, DimensionMetrics, DimensionReport};
use crate::schema::measure::{Correction, Measure, Unit};
use crate::schema::segment::{FeedbackSegment, SegmentTag};
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::Value;

closed_enum! {
    pub enum VocabularyTag as "vocabulary tag" {
        InaccurateCollocation => "Inaccurate Collocation",
        WordChoiceError => "Word Choice Error",
        LexicalGap => "Lexical Gap (Circumlocution)",
        MisusedPhrasalVerb => "Misused Phrasal Verb",
        RegisterMismatch => "Formal/Informal Mismatch",
        VagueLanguage => "Overuse of Vague Language",
        SemanticMisuse => "Semantic Misuse",
        FalseFriend => "False Friend",
    }
}

impl SegmentTag for VocabularyTag {
    const DIMENSION: Dimension = Dimension::Vocabulary;

    fn labels() -> &'static [&'static str] {
        Self::LABELS
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

closed_enum! {
    pub enum DistributionBand as "lexical distribution interpretation" {
        VeryBasic => "very basic vocabulary",
        Elementary => "elementary vocabulary",
        AdequateGeneral => "adequate for general topics",
        GoodRangeComplex => "good range for complex topics",
        Sophisticated => "sophisticated vocabulary",
        HighlyAdvanced => "highly advanced vocabulary",
    }
}

closed_enum! {
    pub enum SophisticationBand as "lexical sophistication interpretation" {
        BasicNeeds => "restricted to basic needs",
        SimpleTransactions => "adequate for simple transactions",
        GeneralTopics => "sufficient for general topics",
        BroadAndFlexible => "broad and flexible for general topics",
        GoodRangeComplex => "good range for complex topics",
        ExtensiveSpecialized => "extensive and specialized",
    }
}

closed_enum! {
    pub enum PrecisionLevel as "lexical precision level" {
        FrequentBasicMisuse => "frequent basic misuse",
        ComplexTermMisuse => "noticeable misuse of complex terms",
        MinorLapses => "generally accurate with minor lapses",
        RareSlips => "accurate with rare slips",
        HighlyPrecise => "highly precise",
    }
}

closed_enum! {
    pub enum CefrLevel as "CEFR level" {
        A1 => "A1",
        A2 => "A2",
        B1 => "B1",
        B2 => "B2",
        C1 => "C1",
        C2 => "C2",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LexicalDiversity {
    #[serde(flatten)]
    pub measure: Measure,
    pub unique_words_count: f64,
    pub total_words_count: f64,
}

impl Schema for LexicalDiversity {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Ratio));
        let unique_words_count = cx.field(map, "unique_words_count");
        let total_words_count = cx.field(map, "total_words_count");
        Some(Self {
            measure: measure?,
            unique_words_count: unique_words_count?,
            total_words_count: total_words_count?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LevelShare {
    pub percentage: f64,
    pub words: Vec<String>,
}

impl Schema for LevelShare {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let percentage = cx.field(map, "percentage");
        let words = cx.field(map, "words");
        Some(Self {
            percentage: percentage?,
            words: words?,
        })
    }
}

/// Six-band vocabulary breakdown, A1 through C2.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct CefrBreakdown {
    pub a1: LevelShare,
    pub a2: LevelShare,
    pub b1: LevelShare,
    pub b2: LevelShare,
    pub c1: LevelShare,
    pub c2: LevelShare,
}

impl CefrBreakdown {
    pub fn level(&self, level: CefrLevel) -> &LevelShare {
        match level {
            CefrLevel::A1 => &self.a1,
            CefrLevel::A2 => &self.a2,
            CefrLevel::B1 => &self.b1,
            CefrLevel::B2 => &self.b2,
            CefrLevel::C1 => &self.c1,
            CefrLevel::C2 => &self.c2,
        }
    }

    /// Share of words at B2 or above.
    pub fn upper_share(&self) -> f64 {
        [CefrLevel::B2, CefrLevel::C1, CefrLevel::C2]
            .iter()
            .map(|l| self.level(*l).percentage)
            .sum()
    }
}

impl Schema for CefrBreakdown {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let [a1, a2, b1, b2, c1, c2] = [
            CefrLevel::A1,
            CefrLevel::A2,
            CefrLevel::B1,
            CefrLevel::B2,
            CefrLevel::C1,
            CefrLevel::C2,
        ]
        .map(|level| cx.field::<LevelShare>(map, level.as_str()));
        Some(Self {
            a1: a1?,
            a2: a2?,
            b1: b1?,
            b2: b2?,
            c1: c1?,
            c2: c2?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LexicalDistribution {
    pub name: String,
    pub average_lexical_level: f64,
    pub interpretation: DistributionBand,
    pub cefr_breakdown: CefrBreakdown,
}

impl Schema for LexicalDistribution {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let name = cx.field(map, "name");
        let average_lexical_level = cx.field(map, "average_lexical_level");
        let interpretation = cx.field(map, "interpretation");
        let cefr_breakdown = cx.field(map, "cefr_breakdown");
        Some(Self {
            name: name?,
            average_lexical_level: average_lexical_level?,
            interpretation: interpretation?,
            cefr_breakdown: cefr_breakdown?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LexicalSophistication {
    #[serde(flatten)]
    pub measure: Measure,
    pub interpretation: SophisticationBand,
}

impl Schema for LexicalSophistication {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Percent));
        let interpretation = cx.field(map, "interpretation");
        Some(Self {
            measure: measure?,
            interpretation: interpretation?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LexicalPrecision {
    #[serde(flatten)]
    pub measure: Measure,
    pub precision_level: PrecisionLevel,
    pub error_examples: Vec<Correction>,
}

impl Schema for LexicalPrecision {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Per100Words));
        let precision_level = cx.field(map, "precision_level");
        let error_examples = cx.field(map, "error_examples");
        Some(Self {
            measure: measure?,
            precision_level: precision_level?,
            error_examples: error_examples?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VocabularyMetrics {
    pub lexical_diversity: LexicalDiversity,
    pub lexical_distribution: LexicalDistribution,
    pub lexical_sophistication: LexicalSophistication,
    pub lexical_precision: LexicalPrecision,
}

impl Schema for VocabularyMetrics {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let lexical_diversity = cx.field(map, "lexical_diversity");
        let lexical_distribution = cx.field(map, "lexical_distribution");
        let lexical_sophistication = cx.field(map, "lexical_sophistication");
        let lexical_precision = cx.field(map, "lexical_precision");
        Some(Self {
            lexical_diversity: lexical_diversity?,
            lexical_distribution: lexical_distribution?,
            lexical_sophistication: lexical_sophistication?,
            lexical_precision: lexical_precision?,
        })
    }
}

impl DimensionMetrics for VocabularyMetrics {
    type Tag = VocabularyTag;
    const DIMENSION: Dimension = Dimension::Vocabulary;
}

pub type VocabularySegment = FeedbackSegment<VocabularyTag>;
pub type VocabularyReport = DimensionReport<VocabularyMetrics>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;
    use crate::fixtures;
    use crate::validate::ValidationErrors;
    use serde_json::json;

    fn check(value: &Value) -> Result<VocabularyReport, ValidationErrors> {
        let config = ValidatorConfig::default();
        let mut cx = Context::new(&config);
        let out = VocabularyReport::validate(value, &mut cx);
        cx.finish(out)
    }

    #[test]
    fn fixture_report_is_valid() {
        let report = check(&fixtures::vocabulary()).expect("valid vocabulary report");
        let breakdown = &report.metrics.lexical_distribution.cefr_breakdown;
        assert_eq!(breakdown.level(CefrLevel::A1).percentage, 40.0);
        assert_eq!(breakdown.upper_share(), 20.0);
    }

    #[test]
    fn verb_tense_is_not_a_vocabulary_tag() {
        let mut value = fixtures::vocabulary();
        value["segments"][0]["tags"] = json!(["Verb Tense"]);
        let err = check(&value).expect_err("grammar-only tag");
        let v = err.at_path("segments[0].tags[0]").expect("tag violation");
        assert_eq!(v.expected, "one of the 8 vocabulary tag values");
    }

    #[test]
    fn missing_cefr_band_is_named() {
        let mut value = fixtures::vocabulary();
        value["metrics"]["lexical_distribution"]["cefr_breakdown"]
            .as_object_mut()
            .expect("object")
            .remove("C1");
        let err = check(&value).expect_err("missing band");
        assert!(err
            .at_path("metrics.lexical_distribution.cefr_breakdown.C1")
            .is_some());
    }
}
