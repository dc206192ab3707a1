//! Concrete configuration for the scheduler and the selection engine

use super::{Config, ConfigError};
use serde::{Deserialize, Serialize};

/// Top-level configuration loaded by the browser binaries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Tick loop settings
    pub scheduler: SchedulerConfig,
    /// Detector and manager settings
    pub selection: SelectionConfig,
}

impl Config for BrowserConfig {}

impl BrowserConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler.validate()?;
        self.selection.validate()
    }
}

/// Fixed-step tick loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Length of one fixed simulation step in seconds
    pub fixed_timestep: f32,
    /// Upper bound on fixed steps run by a single tick
    pub max_fixed_steps_per_tick: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 0.02,
            max_fixed_steps_per_tick: 5,
        }
    }
}

impl SchedulerConfig {
    /// Reject non-positive step settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_timestep > 0.0) {
            return Err(ConfigError::Invalid {
                field: "scheduler.fixed_timestep",
                reason: format!("must be positive, got {}", self.fixed_timestep),
            });
        }
        if self.max_fixed_steps_per_tick == 0 {
            return Err(ConfigError::Invalid {
                field: "scheduler.max_fixed_steps_per_tick",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Settings shared by every controller's selectors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Cone-scoring pointing detector
    pub intenselect: IntenSelectConfig,
    /// Trigger-volume proximity detector
    pub proximity: ProximityConfig,
    /// Plain ray-cast pointing detector
    pub raycast: RaycastConfig,
    /// Cross-selector arbitration
    pub manager: ManagerConfig,
}

impl SelectionConfig {
    /// Validate every detector section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.intenselect.validate()?;
        self.proximity.validate()?;
        self.raycast.validate()?;
        self.manager.validate()
    }
}

/// IntenSelect parameters (de Haan et al. cone scoring)
///
/// `stickiness_rate + snappiness_rate` is expected to equal 1; this is a
/// convention and only produces a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntenSelectConfig {
    /// Exponent bending the cone, in (0, 1]
    pub corrective_k: f32,
    /// Half-angle of the selection cone in degrees
    pub cone_angle: f32,
    /// Score lost per tick while outside the cone
    pub stickiness_rate: f32,
    /// Score gained per tick, scaled by alignment, while inside the cone
    pub snappiness_rate: f32,
    /// Upper clamp; reaching it is treated as an anomaly
    pub score_max: f32,
    /// Lower clamp
    pub score_min: f32,
    /// Clear all scores when one reaches `score_max`
    pub reset_on_saturation: bool,
}

impl Default for IntenSelectConfig {
    fn default() -> Self {
        Self {
            corrective_k: 0.8,
            cone_angle: 15.0,
            stickiness_rate: 0.5,
            snappiness_rate: 0.5,
            score_max: 70.0,
            score_min: -10.0,
            reset_on_saturation: true,
        }
    }
}

impl IntenSelectConfig {
    /// Check ranges, warn on the rate convention
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.corrective_k > 0.0 && self.corrective_k <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "selection.intenselect.corrective_k",
                reason: format!("must be in (0, 1], got {}", self.corrective_k),
            });
        }
        if !(self.cone_angle > 0.0 && self.cone_angle < 90.0) {
            return Err(ConfigError::Invalid {
                field: "selection.intenselect.cone_angle",
                reason: format!("must be in (0, 90) degrees, got {}", self.cone_angle),
            });
        }
        if self.score_min > self.score_max {
            return Err(ConfigError::Invalid {
                field: "selection.intenselect.score_min",
                reason: format!(
                    "score_min {} is above score_max {}",
                    self.score_min, self.score_max
                ),
            });
        }
        if (self.stickiness_rate + self.snappiness_rate - 1.0).abs() > 1e-4 {
            log::warn!(
                "IntenSelect rates do not sum to 1 (stickiness {} + snappiness {})",
                self.stickiness_rate,
                self.snappiness_rate
            );
        }
        Ok(())
    }
}

/// Proximity trigger settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Radius of the trigger sphere around the controller, in metres
    pub trigger_radius: f32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self { trigger_radius: 0.15 }
    }
}

impl ProximityConfig {
    /// Radius must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger_radius > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Invalid {
                field: "selection.proximity.trigger_radius",
                reason: format!("must be positive, got {}", self.trigger_radius),
            })
        }
    }
}

/// Ray-cast detector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// Ignore hits further than this, in metres
    pub max_distance: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self { max_distance: 50.0 }
    }
}

impl RaycastConfig {
    /// Distance must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_distance > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Invalid {
                field: "selection.raycast.max_distance",
                reason: format!("must be positive, got {}", self.max_distance),
            })
        }
    }
}

/// Selection manager settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Seconds without any proposal before the current selection is
    /// released; 0 releases on the same tick
    pub deselect_debounce: f32,
}

impl ManagerConfig {
    /// Debounce cannot be negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deselect_debounce >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Invalid {
                field: "selection.manager.deselect_debounce",
                reason: format!("must not be negative, got {}", self.deselect_debounce),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        BrowserConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_corrective_k_out_of_range() {
        let mut config = IntenSelectConfig::default();
        config.corrective_k = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "selection.intenselect.corrective_k", .. })
        ));

        config.corrective_k = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_score_bounds() {
        let config = IntenSelectConfig {
            score_min: 10.0,
            score_max: 5.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rate_convention_is_not_enforced() {
        let config = IntenSelectConfig {
            stickiness_rate: 0.9,
            snappiness_rate: 0.9,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip_with_partial_file() {
        let parsed: BrowserConfig = toml::from_str(
            "[selection.intenselect]\ncone_angle = 20.0\n\n[scheduler]\nfixed_timestep = 0.01\n",
        )
        .unwrap();

        assert_eq!(parsed.selection.intenselect.cone_angle, 20.0);
        assert_eq!(parsed.selection.intenselect.score_max, 70.0);
        assert_eq!(parsed.scheduler.fixed_timestep, 0.01);

        let text = toml::to_string_pretty(&parsed).unwrap();
        let again: BrowserConfig = toml::from_str(&text).unwrap();
        assert_eq!(again, parsed);
    }

    #[test]
    fn test_ron_parse() {
        let parsed: BrowserConfig =
            ron::from_str("(selection: (proximity: (trigger_radius: 0.3)))").unwrap();
        assert_eq!(parsed.selection.proximity.trigger_radius, 0.3);
        assert_eq!(parsed.scheduler, SchedulerConfig::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = BrowserConfig::default().save_to_file("config.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
