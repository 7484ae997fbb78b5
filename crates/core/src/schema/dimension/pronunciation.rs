use crate::schema::dimension::{Dimension, DimensionMetrics, DimensionReport};
use crate::schema::measure::{Measure, Unit};
use crate::schema::segment::{FeedbackSegment, SegmentTag};
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::Value;

closed_enum! {
    pub enum PronunciationTag as "pronunciation tag" {
        VowelError => "Segmental Error (Vowel)",
        ConsonantError => "Segmental Error (Consonant)",
        WordStress => "Word Stress Error",
        SentenceStress => "Sentence Stress Error",
        Intonation => "Intonation Error (Meaning)",
        Rhythm => "Rhythm/Syllable Timing",
        Linking => "Linking/Elision Issue",
    }
}

impl SegmentTag for PronunciationTag {
    const DIMENSION: Dimension = Dimension::Pronunciation;

    fn labels() -> &'static [&'static str] {
        Self::LABELS
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

closed_enum! {
    pub enum DeviationLevel as "intonation deviation level" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

closed_enum! {
    pub enum MeaningVariation as "intonation meaning variation" {
        Limited => "limited",
        Functional => "functional",
        Effective => "effective",
    }
}

closed_enum! {
    pub enum ListenerStrain as "listener strain" {
        None => "none",
        Minimal => "minimal",
        Noticeable => "noticeable",
        Significant => "significant",
        Severe => "severe",
    }
}

closed_enum! {
    pub enum Intelligibility as "intelligibility impact" {
        Fully => "fully intelligible",
        Clearly => "clearly intelligible",
        Generally => "generally intelligible",
        OftenUnintelligible => "often unintelligible",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhonemeAccuracy {
    /// IPA notation, e.g. `/θ/`.
    pub phoneme: String,
    pub accuracy: f64,
    pub examples: Vec<String>,
}

impl Schema for PhonemeAccuracy {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let phoneme = cx.field(map, "phoneme");
        let accuracy = cx.field(map, "accuracy");
        let examples = cx.field(map, "examples");
        Some(Self {
            phoneme: phoneme?,
            accuracy: accuracy?,
            examples: examples?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentalAccuracy {
    #[serde(flatten)]
    pub measure: Measure,
    pub error_rate: f64,
    pub problematic_phonemes: Vec<PhonemeAccuracy>,
}

impl SegmentalAccuracy {
    pub fn weakest_phoneme(&self) -> Option<&PhonemeAccuracy> {
        self.problematic_phonemes
            .iter()
            .min_by(|a, b| a.accuracy.total_cmp(&b.accuracy))
    }
}

impl Schema for SegmentalAccuracy {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Score));
        let error_rate = cx.field(map, "error_rate");
        let problematic_phonemes = cx.field(map, "problematic_phonemes");
        Some(Self {
            measure: measure?,
            error_rate: error_rate?,
            problematic_phonemes: problematic_phonemes?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordStressAccuracy {
    #[serde(flatten)]
    pub measure: Measure,
}

impl Schema for WordStressAccuracy {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Per100Words))?;
        Some(Self { measure })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IntonationControl {
    pub name: String,
    pub deviation_level: DeviationLevel,
    pub meaning_variation: MeaningVariation,
    pub sentence_stress_error_rate: f64,
}

impl Schema for IntonationControl {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let name = cx.field(map, "name");
        let deviation_level = cx.field(map, "deviation_level");
        let meaning_variation = cx.field(map, "meaning_variation");
        let sentence_stress_error_rate = cx.field(map, "sentence_stress_error_rate");
        Some(Self {
            name: name?,
            deviation_level: deviation_level?,
            meaning_variation: meaning_variation?,
            sentence_stress_error_rate: sentence_stress_error_rate?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IntelligibilityMetric {
    pub name: String,
    pub listener_strain: ListenerStrain,
    pub overall_impact: Intelligibility,
}

impl Schema for IntelligibilityMetric {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let name = cx.field(map, "name");
        let listener_strain = cx.field(map, "listener_strain");
        let overall_impact = cx.field(map, "overall_impact");
        Some(Self {
            name: name?,
            listener_strain: listener_strain?,
            overall_impact: overall_impact?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PronunciationMetrics {
    pub segmental_accuracy: SegmentalAccuracy,
    pub word_stress_accuracy: WordStressAccuracy,
    pub intonation_control: IntonationControl,
    pub intelligibility: IntelligibilityMetric,
}

impl Schema for PronunciationMetrics {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let segmental_accuracy = cx.field(map, "segmental_accuracy");
        let word_stress_accuracy = cx.field(map, "word_stress_accuracy");
        let intonation_control = cx.field(map, "intonation_control");
        let intelligibility = cx.field(map, "intelligibility");
        Some(Self {
            segmental_accuracy: segmental_accuracy?,
            word_stress_accuracy: word_stress_accuracy?,
            intonation_control: intonation_control?,
            intelligibility: intelligibility?,
        })
    }
}

impl DimensionMetrics for PronunciationMetrics {
    type Tag = PronunciationTag;
    const DIMENSION: Dimension = Dimension::Pronunciation;
}

pub type PronunciationSegment = FeedbackSegment<PronunciationTag>;
pub type PronunciationReport = DimensionReport<PronunciationMetrics>;
