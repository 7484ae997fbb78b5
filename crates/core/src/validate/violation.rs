use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is missing or a `status`/`type` discriminator is unrecognized.
    Structural,
    /// A present field fails its range, enum, pattern or length check.
    Constraint,
    /// A field has the wrong JSON kind; its subtree is not inspected further.
    TypeMismatch,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViolationKind::Structural => "structural",
            ViolationKind::Constraint => "constraint",
            ViolationKind::TypeMismatch => "type mismatch",
        })
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: expected {}, got {}",
            self.path, self.kind, self.expected, self.actual
        )
    }
}

/// Every violation found in one validation run, in document order.
#[derive(thiserror::Error, Clone, Debug, Serialize, PartialEq, Eq)]
#[error("payload rejected with {} violation(s)", .violations.len())]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn at_path(&self, path: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.path == path)
    }

    pub fn has_structural(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.kind == ViolationKind::Structural)
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.violations
    }
}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

pub(crate) const MISSING: &str = "<missing>";

/// Short, bounded rendering of a raw value for error messages.
pub(crate) fn preview(value: &Value, max_chars: usize) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > max_chars {
                let head: String = s.chars().take(max_chars).collect();
                format!("{head:?}...")
            } else {
                format!("{s:?}")
            }
        }
        Value::Array(items) => format!("array of {} item(s)", items.len()),
        Value::Object(map) => format!("object with {} key(s)", map.len()),
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
