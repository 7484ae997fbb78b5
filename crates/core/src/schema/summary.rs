use crate::schema::base::{BaseScore, Score};
use crate::schema::dimension::Dimension;
use crate::validate::{Context, Schema};
use serde::Serialize;
use serde_json::Value;

pub const ACTION_PLAN_MIN: usize = 3;
pub const ACTION_PLAN_MAX: usize = 5;

closed_enum! {
    pub enum SummaryType as "summary type" {
        Summary => "summary",
    }
}

/// Headline score per dimension, as restated by the summary.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DimensionScores {
    pub fluency: Score,
    pub grammar: Score,
    pub vocabulary: Score,
    pub pronunciation: Score,
    pub clarity: Score,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> Score {
        match dimension {
            Dimension::Fluency => self.fluency,
            Dimension::Grammar => self.grammar,
            Dimension::Vocabulary => self.vocabulary,
            Dimension::Pronunciation => self.pronunciation,
            Dimension::Clarity => self.clarity,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, Score)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }

    pub fn mean(&self) -> f64 {
        let total: f64 = self.iter().map(|(_, score)| score.value()).sum();
        total / Dimension::ALL.len() as f64
    }
}

impl Schema for DimensionScores {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let fluency = cx.field(map, "fluency");
        let grammar = cx.field(map, "grammar");
        let vocabulary = cx.field(map, "vocabulary");
        let pronunciation = cx.field(map, "pronunciation");
        let clarity = cx.field(map, "clarity");
        Some(Self {
            fluency: fluency?,
            grammar: grammar?,
            vocabulary: vocabulary?,
            pronunciation: pronunciation?,
            clarity: clarity?,
        })
    }
}

/// Holistic report across the five dimensions, with an action plan.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    #[serde(rename = "type")]
    pub summary_type: SummaryType,
    pub dimension_scores: DimensionScores,
    pub score: BaseScore,
    pub action_plan: Vec<String>,
}

impl Schema for Summary {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        cx.discriminator(map, "type", SummaryType::LABELS)?;
        let dimension_scores = cx.field(map, "dimension_scores");
        let score = cx.field(map, "score");
        let action_plan = cx.field_with(map, "action_plan", |v, cx| {
            cx.list_within(v, ACTION_PLAN_MIN..=ACTION_PLAN_MAX)
        });
        Some(Self {
            summary_type: SummaryType::Summary,
            dimension_scores: dimension_scores?,
            score: score?,
            action_plan: action_plan?,
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

    fn check(value: &Value) -> Result<Summary, ValidationErrors> {
        let config = ValidatorConfig::default();
        let mut cx = Context::new(&config);
        let out = Summary::validate(value, &mut cx);
        cx.finish(out)
    }

    #[test]
    fn fixture_summary_is_valid() {
        let summary = check(&fixtures::summary()).expect("valid summary");
        assert_eq!(summary.dimension_scores.get(Dimension::Grammar).value(), 72.0);
        assert_eq!(summary.dimension_scores.iter().count(), 5);
        assert!((summary.dimension_scores.mean() - summary.score.score.value()).abs() <= 1.0);
    }

    #[test]
    fn type_literal_is_checked_first() {
        let mut value = fixtures::summary();
        value["type"] = json!("overview");
        value["action_plan"] = json!([]);
        let err = check(&value).expect_err("wrong type");
        assert_eq!(err.len(), 1);
        let v = err.at_path("type").expect("type violation");
        assert_eq!(v.kind, ViolationKind::Structural);
        assert_eq!(v.expected, "literal \"summary\"");
    }

    #[test]
    fn action_plan_needs_three_to_five_items() {
        let mut value = fixtures::summary();
        value["action_plan"] = json!(["Read aloud daily", "Shadow podcasts"]);
        let err = check(&value).expect_err("too short");
        let v = err.at_path("action_plan").expect("length violation");
        assert_eq!(v.kind, ViolationKind::Constraint);
        assert_eq!(v.expected, "between 3 and 5 item(s)");
        assert_eq!(v.actual, "array of 2 item(s)");
    }

    #[test]
    fn dimension_scores_are_bounded() {
        let mut value = fixtures::summary();
        value["dimension_scores"]["clarity"] = json!(101);
        value["dimension_scores"]
            .as_object_mut()
            .expect("object")
            .remove("fluency");
        let err = check(&value).expect_err("bad scores");
        let paths: Vec<&str> = err.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["dimension_scores.fluency", "dimension_scores.clarity"]
        );
    }
}
