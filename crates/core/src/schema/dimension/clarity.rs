use crate::schema::dimension::{Dimension, DimensionMetrics, DimensionReport};
use crate::schema::measure::{Measure, Unit};
use crate::schema::segment::{FeedbackSegment, SegmentTag};
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::Value;

closed_enum! {
    pub enum ClarityTag as "clarity tag" {
        MissingConnector => "Missing Connector",
        InappropriateConnector => "Inappropriate Connector",
        UnclearReference => "Unclear Reference",
        TopicDrift => "Topic Drift",
        AbruptTransition => "Abrupt Transition",
        LackOfStructure => "Lack of Structure",
        RepetitiveLinking => "Repetitive Linking",
        LogicalGap => "Logical Gap",
    }
}

impl SegmentTag for ClarityTag {
    const DIMENSION: Dimension = Dimension::Clarity;

    fn labels() -> &'static [&'static str] {
        Self::LABELS
    }

    fn label(&self) -> &'static str {
        self.as_str()
    }
}

closed_enum! {
    pub enum VarietyLevel as "cohesive device variety" {
        Limited => "limited",
        Functional => "functional",
        Varied => "varied",
        Sophisticated => "sophisticated",
    }
}

closed_enum! {
    pub enum StructuralClarity as "structural clarity" {
        Disjointed => "disjointed",
        LinearBasic => "linear/basic",
        WellStructured => "well-structured",
        Lucid => "lucid/articulate",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CohesiveDevices {
    #[serde(flatten)]
    pub measure: Measure,
    pub variety_level: VarietyLevel,
    pub misuse_rate: f64,
}

impl Schema for CohesiveDevices {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Per100Words));
        let variety_level = cx.field(map, "variety_level");
        let misuse_rate = cx.field(map, "misuse_rate");
        Some(Self {
            measure: measure?,
            variety_level: variety_level?,
            misuse_rate: misuse_rate?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiscourseOrganization {
    #[serde(flatten)]
    pub measure: Measure,
    pub structural_clarity: StructuralClarity,
}

impl Schema for DiscourseOrganization {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let measure = Measure::validate_fields(map, cx, Some(Unit::Count));
        let structural_clarity = cx.field(map, "structural_clarity");
        Some(Self {
            measure: measure?,
            structural_clarity: structural_clarity?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThematicContinuity {
    pub name: String,
    pub topic_drift_count: f64,
    pub recovery_rate: f64,
}

impl Schema for ThematicContinuity {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let name = cx.field(map, "name");
        let topic_drift_count = cx.field(map, "topic_drift_count");
        let recovery_rate = cx.field(map, "recovery_rate");
        Some(Self {
            name: name?,
            topic_drift_count: topic_drift_count?,
            recovery_rate: recovery_rate?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClarityMetrics {
    pub cohesive_devices: CohesiveDevices,
    pub discourse_organization: DiscourseOrganization,
    pub thematic_continuity: ThematicContinuity,
}

impl Schema for ClarityMetrics {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let cohesive_devices = cx.field(map, "cohesive_devices");
        let discourse_organization = cx.field(map, "discourse_organization");
        let thematic_continuity = cx.field(map, "thematic_continuity");
        Some(Self {
            cohesive_devices: cohesive_devices?,
            discourse_organization: discourse_organization?,
            thematic_continuity: thematic_continuity?,
        })
    }
}

impl DimensionMetrics for ClarityMetrics {
    type Tag = ClarityTag;
    const DIMENSION: Dimension = Dimension::Clarity;
}

pub type ClaritySegment = FeedbackSegment<ClarityTag>;
pub type ClarityReport = DimensionReport<ClarityMetrics>;
