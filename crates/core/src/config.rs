use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_PREVIEW_CHARS: usize = 80;
pub const DEFAULT_SCORE_TOLERANCE: f64 = 1.0;
pub const ENV_PREVIEW_CHARS: &str = "CEFR_VALUE_PREVIEW_CHARS";
pub const ENV_SCORE_TOLERANCE: &str = "CEFR_SCORE_TOLERANCE";

/// Character budget for the raw-value preview attached to each violation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewLimit {
    chars: usize,
}

impl PreviewLimit {
    pub fn new(chars: usize) -> Result<Self, ConfigError> {
        if chars == 0 {
            return Err(ConfigError::ZeroPreview);
        }
        Ok(Self { chars })
    }

    pub fn chars(&self) -> usize {
        self.chars
    }
}

impl Default for PreviewLimit {
    fn default() -> Self {
        Self {
            chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

/// Allowed drift, in score points, between scores that should agree.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScoreTolerance {
    points: f64,
}

impl ScoreTolerance {
    pub fn new(points: f64) -> Result<Self, ConfigError> {
        if !points.is_finite() || points < 0.0 {
            return Err(ConfigError::InvalidTolerance(points));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    pub fn accepts(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.points
    }
}

impl Default for ScoreTolerance {
    fn default() -> Self {
        Self {
            points: DEFAULT_SCORE_TOLERANCE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidatorConfig {
    pub preview: PreviewLimit,
    pub tolerance: ScoreTolerance,
}

impl ValidatorConfig {
    /// Flags win over the environment, the environment wins over defaults.
    pub fn resolve(
        preview_chars: Option<usize>,
        score_tolerance: Option<f64>,
        env: &impl Env,
    ) -> Result<Self, ConfigError> {
        let chars = resolve_number(
            preview_chars,
            ENV_PREVIEW_CHARS,
            env,
            DEFAULT_PREVIEW_CHARS,
        )?;
        let points = resolve_number(
            score_tolerance,
            ENV_SCORE_TOLERANCE,
            env,
            DEFAULT_SCORE_TOLERANCE,
        )?;
        Ok(Self {
            preview: PreviewLimit::new(chars)?,
            tolerance: ScoreTolerance::new(points)?,
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("value preview must allow at least one character")]
    ZeroPreview,
    #[error("score tolerance must be a finite number >= 0, got {0}")]
    InvalidTolerance(f64),
    #[error("{key} must be a number, got {value:?}")]
    NotANumber { key: String, value: String },
}

pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

#[derive(Clone, Debug, Default)]
pub struct StdEnv;

impl Env for StdEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MapEnv {
    vars: std::collections::BTreeMap<String, String>,
}

impl MapEnv {
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn resolve_number<T: FromStr>(
    cli_value: Option<T>,
    env_key: &str,
    env: &impl Env,
    default: T,
) -> Result<T, ConfigError> {
    match cli_value {
        Some(v) => Ok(v),
        None => match env.var(env_key) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::NotANumber {
                key: env_key.to_owned(),
                value: raw,
            }),
            None => Ok(default),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_takes_precedence_over_env() {
        let env = MapEnv::default().with_var(ENV_PREVIEW_CHARS, "12");
        let cfg = ValidatorConfig::resolve(Some(40), None, &env).expect("valid config");
        assert_eq!(cfg.preview.chars(), 40);
    }

    #[test]
    fn env_used_when_cli_missing() {
        let env = MapEnv::default()
            .with_var(ENV_PREVIEW_CHARS, "12")
            .with_var(ENV_SCORE_TOLERANCE, " 2.5 ");
        let cfg = ValidatorConfig::resolve(None, None, &env).expect("valid config");
        assert_eq!(cfg.preview.chars(), 12);
        assert_eq!(cfg.tolerance.points(), 2.5);
    }

    #[test]
    fn defaults_used_when_both_missing() {
        let cfg = ValidatorConfig::resolve(None, None, &MapEnv::default()).expect("valid config");
        assert_eq!(cfg, ValidatorConfig::default());
    }

    #[test]
    fn garbage_env_value_is_rejected() {
        let env = MapEnv::default().with_var(ENV_SCORE_TOLERANCE, "lots");
        let err = ValidatorConfig::resolve(None, None, &env).expect_err("not a number");
        assert_eq!(
            err,
            ConfigError::NotANumber {
                key: ENV_SCORE_TOLERANCE.to_owned(),
                value: "lots".to_owned(),
            }
        );
    }

    #[test]
    fn zero_preview_and_negative_tolerance_rejected() {
        assert_eq!(PreviewLimit::new(0), Err(ConfigError::ZeroPreview));
        assert!(ScoreTolerance::new(-0.1).is_err());
        assert!(ScoreTolerance::new(f64::NAN).is_err());
    }

    #[test]
    fn tolerance_is_inclusive() {
        let t = ScoreTolerance::new(1.0).expect("valid");
        assert!(t.accepts(72.0, 73.0));
        assert!(!t.accepts(72.0, 73.5));
    }
}
