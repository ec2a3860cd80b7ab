//! AI tuning configuration

use crate::error::{AiError, Result};
use crate::schedule::Cadence;
use crate::collaborator::Marker;
use serde::{Deserialize, Serialize};

/// Idle (wander + watch) tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleConfig {
    /// Radius of the player overlap query
    pub detect_range: f32,
    /// Wander destinations are sampled within this radius of the bot
    pub wander_radius: f32,
    /// Lower bound of the re-rolled wander wait (seconds)
    pub wander_interval_min: f32,
    /// Upper bound of the re-rolled wander wait (seconds)
    pub wander_interval_max: f32,
    /// Hand `detect_range` to the chase state as its range on detection
    pub propagate_detect_range: bool,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            detect_range: 7.0,
            wander_radius: 4.0,
            wander_interval_min: 1.0,
            wander_interval_max: 6.0,
            propagate_detect_range: true,
        }
    }
}

impl IdleConfig {
    pub fn wander_cadence(&self) -> Cadence {
        Cadence::Uniform {
            min: self.wander_interval_min,
            max: self.wander_interval_max,
        }
    }
}

/// Chase tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseConfig {
    /// Target escapes once farther than this
    pub chase_range: f32,
    /// Switch to close-follow once nearer than this
    pub close_range: f32,
    /// Smallest chase range the setter accepts
    pub min_chase_range: f32,
    /// Seconds between move commands toward the target
    pub retarget_interval: f32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            chase_range: 10.0,
            close_range: 2.0,
            min_chase_range: 1.0,
            retarget_interval: 1.5,
        }
    }
}

/// Close-follow tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloseFollowConfig {
    /// Proposed range before the buffer is added
    pub close_follow_range: f32,
    /// Upper bound of the effective close-follow range
    pub ceiling: f32,
}

impl Default for CloseFollowConfig {
    fn default() -> Self {
        Self {
            close_follow_range: 2.0,
            ceiling: 100.0,
        }
    }
}

/// Visual markers applied on state entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub idle: Marker,
    pub chase: Marker,
    pub close_combat: Marker,
    pub dead: Marker,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            idle: Marker::new("idle"),
            chase: Marker::new("chase"),
            close_combat: Marker::new("close_combat"),
            dead: Marker::new("dead"),
        }
    }
}

/// Complete AI configuration for one bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub idle: IdleConfig,
    pub chase: ChaseConfig,
    pub close_follow: CloseFollowConfig,
    pub markers: MarkerConfig,
    /// Added to a range when one state hands it to the next
    pub buffer: f32,
    /// Tag that marks an entity as a valid target
    pub player_tag: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            idle: IdleConfig::default(),
            chase: ChaseConfig::default(),
            close_follow: CloseFollowConfig::default(),
            markers: MarkerConfig::default(),
            buffer: 1.0,
            player_tag: "player".to_string(),
        }
    }
}

impl AiConfig {
    /// Set the hysteresis buffer
    pub fn with_buffer(mut self, buffer: f32) -> Self {
        self.buffer = buffer;
        self
    }

    /// Set the detection radius
    pub fn with_detect_range(mut self, range: f32) -> Self {
        self.idle.detect_range = range;
        self
    }

    /// Set chase and close ranges
    pub fn with_chase_ranges(mut self, chase_range: f32, close_range: f32) -> Self {
        self.chase.chase_range = chase_range;
        self.chase.close_range = close_range;
        self
    }

    /// Check the values that clamping cannot repair.
    ///
    /// Negative radii are accepted and clamped by the state setters; what is
    /// rejected here are NaN/infinite numbers and timer intervals that would
    /// never fire or fire every tick forever.
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("idle.detect_range", self.idle.detect_range),
            ("idle.wander_radius", self.idle.wander_radius),
            ("idle.wander_interval_min", self.idle.wander_interval_min),
            ("idle.wander_interval_max", self.idle.wander_interval_max),
            ("chase.chase_range", self.chase.chase_range),
            ("chase.close_range", self.chase.close_range),
            ("chase.min_chase_range", self.chase.min_chase_range),
            ("chase.retarget_interval", self.chase.retarget_interval),
            ("close_follow.close_follow_range", self.close_follow.close_follow_range),
            ("close_follow.ceiling", self.close_follow.ceiling),
            ("buffer", self.buffer),
        ];
        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(AiError::InvalidConfig(format!("{} must be finite, got {}", name, value)));
            }
        }

        if self.idle.wander_interval_min <= 0.0 {
            return Err(AiError::InvalidConfig(
                "idle.wander_interval_min must be positive".to_string(),
            ));
        }
        if self.idle.wander_interval_max < self.idle.wander_interval_min {
            return Err(AiError::InvalidConfig(format!(
                "idle wander interval is inverted: [{}, {}]",
                self.idle.wander_interval_min, self.idle.wander_interval_max
            )));
        }
        if self.chase.retarget_interval <= 0.0 {
            return Err(AiError::InvalidConfig(
                "chase.retarget_interval must be positive".to_string(),
            ));
        }
        if self.close_follow.ceiling < 0.0 {
            return Err(AiError::InvalidConfig(
                "close_follow.ceiling must not be negative".to_string(),
            ));
        }
        if self.player_tag.is_empty() {
            return Err(AiError::InvalidConfig("player_tag must not be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.idle.detect_range, 7.0);
        assert_eq!(config.idle.wander_radius, 4.0);
        assert_eq!(config.chase.retarget_interval, 1.5);
    }

    #[test]
    fn test_inverted_wander_interval_rejected() {
        let mut config = AiConfig::default();
        config.idle.wander_interval_min = 5.0;
        config.idle.wander_interval_max = 2.0;
        assert!(matches!(config.validate(), Err(AiError::InvalidConfig(_))));
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = AiConfig::default().with_detect_range(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_range_is_not_an_error() {
        let config = AiConfig::default().with_chase_ranges(-3.0, -1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_retarget_interval_rejected() {
        let mut config = AiConfig::default();
        config.chase.retarget_interval = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wander_cadence() {
        let config = IdleConfig::default();
        assert_eq!(config.wander_cadence(), Cadence::Uniform { min: 1.0, max: 6.0 });
    }
}
