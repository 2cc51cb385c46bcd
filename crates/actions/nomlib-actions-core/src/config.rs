//! Configuration for the action player

use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::Result;
use crate::timing::TimingCurve;

/// What `run` does when a run with the same name is already in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// Release and erase older runs with the same name. Their callbacks do not fire.
    #[default]
    Replace,
    /// Keep both runs. Name-based control applies to every run carrying the name.
    Coexist,
}

/// Configuration for [`ActionPlayer`](crate::ActionPlayer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Duplicate-name handling for runs that do not override it
    pub name_policy: NamePolicy,
    /// Ceiling applied to every update delta, guarding against hitches after a stall
    pub max_delta_time: Option<f32>,
    /// Prefix for names given to unnamed runs, as `"{prefix}-{id}"`
    pub generated_name_prefix: String,
    /// Curve inherited by every root tree that has no explicit curve
    pub default_timing_curve: TimingCurve,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name_policy: NamePolicy::Replace,
            max_delta_time: None,
            generated_name_prefix: "action".to_string(),
            default_timing_curve: TimingCurve::Linear,
        }
    }
}

impl PlayerConfig {
    /// Replace duplicates and cap deltas at a quarter second
    pub fn strict() -> Self {
        Self {
            name_policy: NamePolicy::Replace,
            max_delta_time: Some(0.25),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_delta_time {
            if !max.is_finite() || max <= 0.0 {
                return Err(ActionError::InvalidConfig {
                    reason: format!("max_delta_time must be positive and finite, got {max}"),
                });
            }
        }

        if self.generated_name_prefix.trim().is_empty() {
            return Err(ActionError::InvalidConfig {
                reason: "generated_name_prefix must not be empty".to_string(),
            });
        }

        if matches!(self.default_timing_curve, TimingCurve::Custom(_)) {
            return Err(ActionError::InvalidConfig {
                reason: "default_timing_curve cannot be a custom curve".to_string(),
            });
        }

        Ok(())
    }

    #[inline]
    pub fn with_name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }

    #[inline]
    pub fn with_max_delta_time(mut self, max: Option<f32>) -> Self {
        self.max_delta_time = max;
        self
    }

    #[inline]
    pub fn with_generated_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.generated_name_prefix = prefix.into();
        self
    }

    #[inline]
    pub fn with_default_timing_curve(mut self, curve: TimingCurve) -> Self {
        self.default_timing_curve = curve;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PlayerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.name_policy, NamePolicy::Replace);
        assert_eq!(config.generated_name_prefix, "action");
    }

    #[test]
    fn strict_preset_caps_delta() {
        let config = PlayerConfig::strict();
        assert_eq!(config.max_delta_time, Some(0.25));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let config = PlayerConfig::default().with_max_delta_time(Some(0.0));
        assert!(matches!(
            config.validate(),
            Err(ActionError::InvalidConfig { .. })
        ));

        let config = PlayerConfig::default().with_generated_name_prefix("  ");
        assert!(config.validate().is_err());

        fn twice(t: f32) -> f32 {
            t * 2.0
        }
        let config = PlayerConfig::default().with_default_timing_curve(TimingCurve::Custom(twice));
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_json() {
        let config = PlayerConfig::from_json(r#"{ "name_policy": "coexist" }"#).unwrap();
        assert_eq!(config.name_policy, NamePolicy::Coexist);
        assert_eq!(config.max_delta_time, None);
        assert_eq!(config.default_timing_curve, TimingCurve::Linear);

        let err = PlayerConfig::from_json("{ nope").unwrap_err();
        assert_eq!(err.category(), "serialization");

        let err = PlayerConfig::from_json(r#"{ "max_delta_time": -1.0 }"#).unwrap_err();
        assert_eq!(err.category(), "config");
    }
}
