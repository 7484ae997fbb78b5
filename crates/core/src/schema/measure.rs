use crate::validate::{Context, Schema};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Unit attached to a measured value. Most measures pin one literal unit;
/// speech rate carries whatever unit the engine reports (usually "WPM").
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Seconds,
    Per100Words,
    Percent,
    Score,
    Ratio,
    Count,
    Other(String),
}

impl Unit {
    pub fn as_str(&self) -> &str {
        match self {
            Unit::Seconds => "seconds",
            Unit::Per100Words => "per 100 words",
            Unit::Percent => "%",
            Unit::Score => "score",
            Unit::Ratio => "ratio",
            Unit::Count => "count",
            Unit::Other(text) => text,
        }
    }

    pub fn from_text(text: &str) -> Self {
        match text {
            "seconds" => Unit::Seconds,
            "per 100 words" => Unit::Per100Words,
            "%" => Unit::Percent,
            "score" => Unit::Score,
            "ratio" => Unit::Ratio,
            "count" => Unit::Count,
            other => Unit::Other(other.to_owned()),
        }
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreValue {
    pub value: f64,
    pub unit: Unit,
}

impl ScoreValue {
    fn validate_unit(value: &Value, cx: &mut Context<'_>, expected: Option<&Unit>) -> Option<Self> {
        let map = cx.object(value)?;
        let number = cx.field(map, "value");
        let unit = cx.field_with(map, "unit", |raw, cx| {
            let text = cx.string(raw)?;
            match expected {
                Some(unit) if unit.as_str() != text => {
                    cx.constraint(format!("literal {:?}", unit.as_str()), raw);
                    None
                }
                _ => Some(Unit::from_text(text)),
            }
        });
        Some(Self {
            value: number?,
            unit: unit?,
        })
    }
}

/// The `{name, user_score, target_score}` core shared by most metrics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Measure {
    pub name: String,
    pub user_score: ScoreValue,
    pub target_score: ScoreValue,
}

impl Measure {
    /// Validates the shared fields of a measure object. With `unit` set, both
    /// scores must carry exactly that literal; without it they must agree.
    pub fn validate_fields(
        map: &Map<String, Value>,
        cx: &mut Context<'_>,
        unit: Option<Unit>,
    ) -> Option<Self> {
        let name = cx.field(map, "name");
        let user_score: Option<ScoreValue> =
            cx.field_with(map, "user_score", |v, cx| ScoreValue::validate_unit(v, cx, unit.as_ref()));
        let target_score: Option<ScoreValue> =
            cx.field_with(map, "target_score", |v, cx| ScoreValue::validate_unit(v, cx, unit.as_ref()));

        if let (Some(user), Some(target)) = (&user_score, &target_score) {
            if user.unit != target.unit {
                cx.at_key("target_score", |cx| {
                    cx.at_key("unit", |cx| {
                        cx.constraint_text(
                            format!("same unit as user_score ({:?})", user.unit.as_str()),
                            format!("{:?}", target.unit.as_str()),
                        )
                    })
                });
                return None;
            }
        }

        Some(Self {
            name: name?,
            user_score: user_score?,
            target_score: target_score?,
        })
    }

    /// Distance between the user's value and the target, in the measure's unit.
    pub fn gap(&self) -> f64 {
        self.user_score.value - self.target_score.value
    }
}

/// `{error_type, incorrect, correct}` example shared by grammar and vocabulary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Correction {
    pub error_type: String,
    pub incorrect: String,
    pub correct: String,
}

impl Correction {
    pub(crate) fn validate_fields(map: &Map<String, Value>, cx: &mut Context<'_>) -> Option<Self> {
        let error_type = cx.field(map, "error_type");
        let incorrect = cx.field(map, "incorrect");
        let correct = cx.field(map, "correct");
        Some(Self {
            error_type: error_type?,
            incorrect: incorrect?,
            correct: correct?,
        })
    }
}

impl Schema for Correction {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        Self::validate_fields(map, cx)
    }
}
