use crate::config::ValidatorConfig;
use crate::validate::violation::{kind_name, preview, ValidationErrors, Violation, ViolationKind, MISSING};
use crate::validate::Schema;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Renders `data.reports.cefr.grammar.segments[2].tags[0]`; the root is `$`.
pub fn render_path(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return "$".to_owned();
    }
    let mut out = String::new();
    for segment in path {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(i) => out.push_str(&format!("[{i}]")),
        }
    }
    out
}

/// Walks a JSON tree, tracking the current field path and collecting
/// violations instead of stopping at the first one.
///
/// Every `validate` helper returns `None` once it has recorded a violation
/// for its subtree, so a parent can evaluate all of its fields first and only
/// then combine them with `?`.
pub struct Context<'c> {
    config: &'c ValidatorConfig,
    path: Vec<PathSegment>,
    violations: Vec<Violation>,
}

impl<'c> Context<'c> {
    pub fn new(config: &'c ValidatorConfig) -> Self {
        Self {
            config,
            path: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        self.config
    }

    pub fn path(&self) -> String {
        render_path(&self.path)
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn at_key<T>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(PathSegment::Key(key.to_owned()));
        let out = f(self);
        self.path.pop();
        out
    }

    pub fn at_index<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(PathSegment::Index(index));
        let out = f(self);
        self.path.pop();
        out
    }

    fn record(&mut self, kind: ViolationKind, expected: String, actual: String) {
        let path = self.path();
        tracing::trace!(target: super::LOG_TARGET, %path, %kind, "violation");
        self.violations.push(Violation {
            path,
            kind,
            expected,
            actual,
        });
    }

    fn show(&self, value: &Value) -> String {
        preview(value, self.config.preview.chars())
    }

    pub fn structural(&mut self, expected: impl Into<String>, actual: &Value) {
        let actual = self.show(actual);
        self.record(ViolationKind::Structural, expected.into(), actual);
    }

    pub fn constraint(&mut self, expected: impl Into<String>, actual: &Value) {
        let actual = self.show(actual);
        self.record(ViolationKind::Constraint, expected.into(), actual);
    }

    /// Constraint violation whose offending value is not a raw JSON node.
    pub fn constraint_text(&mut self, expected: impl Into<String>, actual: impl Into<String>) {
        self.record(ViolationKind::Constraint, expected.into(), actual.into());
    }

    pub fn mismatch(&mut self, expected: &str, actual: &Value) {
        let shown = match actual {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                format!("{} {}", kind_name(actual), self.show(actual))
            }
            _ => self.show(actual),
        };
        self.record(ViolationKind::TypeMismatch, expected.to_owned(), shown);
    }

    pub fn missing(&mut self) {
        self.record(
            ViolationKind::Structural,
            "required field".to_owned(),
            MISSING.to_owned(),
        );
    }

    pub fn object<'v>(&mut self, value: &'v Value) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.mismatch("object", other);
                None
            }
        }
    }

    pub fn array<'v>(&mut self, value: &'v Value) -> Option<&'v [Value]> {
        match value {
            Value::Array(items) => Some(items.as_slice()),
            other => {
                self.mismatch("array", other);
                None
            }
        }
    }

    pub fn string<'v>(&mut self, value: &'v Value) -> Option<&'v str> {
        match value {
            Value::String(s) => Some(s.as_str()),
            other => {
                self.mismatch("string", other);
                None
            }
        }
    }

    pub fn number(&mut self, value: &Value) -> Option<f64> {
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                self.mismatch("number", value);
                None
            }
        }
    }

    pub fn boolean(&mut self, value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            other => {
                self.mismatch("boolean", other);
                None
            }
        }
    }

    pub fn non_negative(&mut self, value: &Value) -> Option<f64> {
        let n = self.number(value)?;
        if n < 0.0 {
            self.constraint("number >= 0", value);
            return None;
        }
        Some(n)
    }

    pub fn field<T: Schema>(&mut self, map: &Map<String, Value>, key: &str) -> Option<T> {
        self.field_with(map, key, T::validate)
    }

    pub fn field_with<T>(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
        f: impl FnOnce(&Value, &mut Self) -> Option<T>,
    ) -> Option<T> {
        self.at_key(key, |cx| match map.get(key) {
            Some(value) => f(value, cx),
            None => {
                cx.missing();
                None
            }
        })
    }

    /// `Some(None)` when the key is absent; a present `null` is still a mismatch.
    pub fn optional_field<T: Schema>(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
    ) -> Option<Option<T>> {
        match map.get(key) {
            None => Some(None),
            Some(value) => self.at_key(key, |cx| T::validate(value, cx)).map(Some),
        }
    }

    /// Reads a `status`/`type` tag. Anything but one of `accepted` is structural.
    pub fn discriminator<'v>(
        &mut self,
        map: &'v Map<String, Value>,
        key: &str,
        accepted: &[&str],
    ) -> Option<&'v str> {
        self.at_key(key, |cx| match map.get(key) {
            None => {
                cx.missing();
                None
            }
            Some(value) => match value.as_str() {
                Some(tag) if accepted.contains(&tag) => Some(tag),
                _ => {
                    cx.structural(describe_literals(accepted), value);
                    None
                }
            },
        })
    }

    /// Rejects a key that must not appear alongside the chosen union branch.
    pub fn forbid(&mut self, map: &Map<String, Value>, key: &str, reason: &str) -> bool {
        match map.get(key) {
            None => true,
            Some(value) => {
                self.at_key(key, |cx| {
                    cx.structural(format!("no `{key}` field {reason}"), value)
                });
                false
            }
        }
    }

    pub fn list<T: Schema>(&mut self, value: &Value) -> Option<Vec<T>> {
        let items = self.array(value)?;
        let mut out = Vec::with_capacity(items.len());
        let mut complete = true;
        for (i, item) in items.iter().enumerate() {
            match self.at_index(i, |cx| T::validate(item, cx)) {
                Some(v) => out.push(v),
                None => complete = false,
            }
        }
        complete.then_some(out)
    }

    pub fn list_within<T: Schema>(
        &mut self,
        value: &Value,
        bounds: RangeInclusive<usize>,
    ) -> Option<Vec<T>> {
        let items = self.list::<T>(value);
        if let Value::Array(raw) = value {
            if !bounds.contains(&raw.len()) {
                self.constraint(describe_bounds(&bounds), value);
                return None;
            }
        }
        items
    }

    pub(crate) fn finish<T>(mut self, outcome: Option<T>) -> Result<T, ValidationErrors> {
        match outcome {
            Some(value) if self.violations.is_empty() => Ok(value),
            _ => {
                if self.violations.is_empty() {
                    self.path.clear();
                    self.record(
                        ViolationKind::Structural,
                        "a value accepted by the schema".to_owned(),
                        MISSING.to_owned(),
                    );
                }
                Err(ValidationErrors::new(self.violations))
            }
        }
    }
}

fn describe_literals(accepted: &[&str]) -> String {
    let quoted: Vec<String> = accepted.iter().map(|s| format!("{s:?}")).collect();
    match quoted.as_slice() {
        [only] => format!("literal {only}"),
        _ => format!("one of {}", quoted.join(", ")),
    }
}

fn describe_bounds(bounds: &RangeInclusive<usize>) -> String {
    if *bounds.start() == 0 {
        format!("at most {} item(s)", bounds.end())
    } else {
        format!("between {} and {} item(s)", bounds.start(), bounds.end())
    }
}

impl Schema for String {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        cx.string(value).map(str::to_owned)
    }
}

impl Schema for f64 {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        cx.number(value)
    }
}

impl Schema for bool {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        cx.boolean(value)
    }
}

impl<T: Schema> Schema for Vec<T> {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        cx.list(value)
    }
}

impl<T: Schema> Schema for std::collections::BTreeMap<String, T> {
    fn validate(value: &Value, cx: &mut Context<'_>) -> Option<Self> {
        let map = cx.object(value)?;
        let mut out = std::collections::BTreeMap::new();
        let mut complete = true;
        for (key, item) in map {
            match cx.at_key(key, |cx| T::validate(item, cx)) {
                Some(v) => {
                    out.insert(key.clone(), v);
                }
                None => complete = false,
            }
        }
        complete.then_some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run<T>(value: &Value, f: impl FnOnce(&Value, &mut Context<'_>) -> Option<T>) -> Result<T, ValidationErrors> {
        let config = ValidatorConfig::default();
        let mut cx = Context::new(&config);
        let out = f(value, &mut cx);
        cx.finish(out)
    }

    #[test]
    fn path_rendering_mixes_keys_and_indexes() {
        let path = vec![
            PathSegment::Key("data".to_owned()),
            PathSegment::Key("segments".to_owned()),
            PathSegment::Index(2),
            PathSegment::Key("tags".to_owned()),
            PathSegment::Index(0),
        ];
        assert_eq!(render_path(&path), "data.segments[2].tags[0]");
        assert_eq!(render_path(&[]), "$");
    }

    #[test]
    fn list_collects_every_bad_element() {
        let err = run(&json!(["a", 1, "b", false]), |v, cx| cx.list::<String>(v))
            .expect_err("two bad elements");
        let paths: Vec<&str> = err.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["[1]", "[3]"]);
        assert!(err.iter().all(|v| v.kind == ViolationKind::TypeMismatch));
    }

    #[test]
    fn list_within_reports_length() {
        let err = run(&json!([]), |v, cx| cx.list_within::<String>(v, 1..=3))
            .expect_err("empty list");
        let v = &err.violations()[0];
        assert_eq!(v.kind, ViolationKind::Constraint);
        assert_eq!(v.expected, "between 1 and 3 item(s)");
        assert_eq!(v.path, "$");
    }

    #[test]
    fn missing_and_null_fields_are_distinguished() {
        let value = json!({"b": null});
        let err = run(&value, |v, cx| {
            let map = cx.object(v)?;
            let a: Option<String> = cx.field(map, "a");
            let b: Option<Option<String>> = cx.optional_field(map, "b");
            Some((a?, b?))
        })
        .expect_err("both fields bad");
        assert_eq!(err.len(), 2);
        assert_eq!(err.violations()[0].kind, ViolationKind::Structural);
        assert_eq!(err.violations()[0].actual, MISSING);
        assert_eq!(err.violations()[1].kind, ViolationKind::TypeMismatch);
        assert_eq!(err.violations()[1].path, "b");
    }

    #[test]
    fn number_mismatch_shows_kind_and_value() {
        let err = run(&json!("50"), |v, cx| cx.number(v)).expect_err("string");
        assert_eq!(err.violations()[0].actual, "string \"50\"");
    }

    #[test]
    fn unknown_discriminator_is_structural() {
        let value = json!({"status": "pending"});
        let err = run(&value, |v, cx| {
            let map = cx.object(v)?;
            cx.discriminator(map, "status", &["completed", "failed"])
                .map(str::to_owned)
        })
        .expect_err("pending is not a status");
        let v = &err.violations()[0];
        assert_eq!(v.kind, ViolationKind::Structural);
        assert_eq!(v.path, "status");
        assert_eq!(v.expected, "one of \"completed\", \"failed\"");
    }
}
