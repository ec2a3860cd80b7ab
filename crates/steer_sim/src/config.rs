//! Simulation configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment overrides: `STEER_SIM_TICKS`, `STEER_SIM_SEED`
//! 2. File named by `STEER_SIM_CONFIG`
//! 3. `steer_sim.toml` in the working directory
//! 4. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! [sim]
//! ticks = 3600
//! dt = 0.0166667
//! seed = 7
//! bot_speed = 3.5
//!
//! [ai]
//! buffer = 1.0
//! idle = { detect_range = 7.0, wander_radius = 4.0 }
//! chase = { chase_range = 10.0, close_range = 2.0, retarget_interval = 1.5 }
//!
//! [player]
//! speed = 2.0
//! waypoints = [[12.0, 0.0, 0.0], [0.0, 0.0, 1.0], [-12.0, 0.0, 0.0]]
//!
//! [[bots]]
//! position = [0.0, 0.0, 0.0]
//! ```

use crate::error::{Result, SimError};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;
use steer_ai::AiConfig;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "STEER_SIM_CONFIG";
/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "steer_sim.toml";

/// Tick loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Number of fixed steps to run
    pub ticks: u64,
    /// Seconds per step
    pub dt: f32,
    /// Base seed for bot randomness; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Units per second a nav agent moves its bot
    pub bot_speed: f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            ticks: 60 * 60,
            dt: 1.0 / 60.0,
            seed: Some(1),
            bot_speed: 3.5,
        }
    }
}

/// Scripted player route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Spawn at the first waypoint when `true`
    pub enabled: bool,
    /// Units per second
    pub speed: f32,
    /// Looping route
    pub waypoints: Vec<Vec3>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 2.0,
            waypoints: vec![
                Vec3::new(14.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(-14.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, -1.0),
            ],
        }
    }
}

/// One bot to spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotSpawn {
    pub position: Vec3,
    /// Overrides the seed derived from `sim.seed`
    #[serde(default)]
    pub seed: Option<u64>,
}

impl BotSpawn {
    pub fn at(position: Vec3) -> Self {
        Self { position, seed: None }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub sim: SimSettings,
    pub ai: AiConfig,
    pub player: PlayerConfig,
    pub bots: Vec<BotSpawn>,
    /// Where this config was loaded from
    #[serde(skip)]
    pub config_path: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sim: SimSettings::default(),
            ai: AiConfig::default(),
            player: PlayerConfig::default(),
            bots: vec![
                BotSpawn::at(Vec3::new(-6.0, 0.0, 0.0)),
                BotSpawn::at(Vec3::new(0.0, 0.0, 0.0)),
                BotSpawn::at(Vec3::new(6.0, 0.0, 0.0)),
            ],
            config_path: None,
        }
    }
}

impl SimConfig {
    /// Load from all sources
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::load_from_file(&path)?,
            _ if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_PATH)?
            }
            _ => {
                log::info!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Ok(ticks) = std::env::var("STEER_SIM_TICKS") {
            match ticks.parse() {
                Ok(ticks) => config.sim.ticks = ticks,
                Err(_) => log::warn!("Ignoring STEER_SIM_TICKS={:?}", ticks),
            }
        }
        if let Ok(seed) = std::env::var("STEER_SIM_SEED") {
            match seed.parse() {
                Ok(seed) => config.sim.seed = Some(seed),
                Err(_) => log::warn!("Ignoring STEER_SIM_SEED={:?}", seed),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.display().to_string());
        log::info!("Loaded sim config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.sim.dt.is_finite() && self.sim.dt > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "sim.dt must be positive, got {}",
                self.sim.dt
            )));
        }
        if !(self.sim.bot_speed.is_finite() && self.sim.bot_speed >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "sim.bot_speed must not be negative, got {}",
                self.sim.bot_speed
            )));
        }
        if self.player.enabled && self.player.waypoints.is_empty() {
            return Err(SimError::InvalidConfig(
                "player is enabled but has no waypoints".to_string(),
            ));
        }
        self.ai.validate()?;
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        log::info!("Simulation configuration:");
        log::info!(
            "  Source: {}",
            self.config_path.as_deref().unwrap_or("defaults")
        );
        log::info!(
            "  Ticks: {} x {:.4}s, seed {:?}",
            self.sim.ticks,
            self.sim.dt,
            self.sim.seed
        );
        log::info!("  Bots: {} (speed {})", self.bots.len(), self.sim.bot_speed);
        log::info!(
            "  Ranges: detect {}, chase {}, close {}, buffer {}",
            self.ai.idle.detect_range,
            self.ai.chase.chase_range,
            self.ai.chase.close_range,
            self.ai.buffer
        );
        if self.player.enabled {
            log::info!(
                "  Player: {} waypoints at speed {}",
                self.player.waypoints.len(),
                self.player.speed
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bots.len(), 3);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = SimConfig::from_toml_str(
            r#"
            [sim]
            ticks = 10
            seed = 99

            [ai]
            buffer = 0.5
            idle = { detect_range = 9.0 }

            [[bots]]
            position = [1.0, 0.0, 2.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.sim.ticks, 10);
        assert_eq!(config.sim.seed, Some(99));
        assert_eq!(config.sim.dt, SimSettings::default().dt);
        assert_eq!(config.ai.buffer, 0.5);
        assert_eq!(config.ai.idle.detect_range, 9.0);
        assert_eq!(config.ai.idle.wander_radius, 4.0);
        assert_eq!(config.bots, vec![BotSpawn::at(Vec3::new(1.0, 0.0, 2.0))]);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SimConfig::from_toml_str("[sim]\nticks = \"many\""),
            Err(SimError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_dt_rejected() {
        let mut config = SimConfig::default();
        config.sim.dt = 0.0;
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_ai_errors_surface() {
        let mut config = SimConfig::default();
        config.ai.chase.retarget_interval = -1.0;
        assert!(matches!(config.validate(), Err(SimError::Ai(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SimConfig::load_from_file("/nonexistent/steer_sim.toml"),
            Err(SimError::Io { .. })
        ));
    }
}
