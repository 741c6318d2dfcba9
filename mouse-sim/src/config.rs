//! Configuration loading for the episode runner.

use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct SimConfig {
    /// Episodes to run per invocation
    #[serde(default = "default_episodes")]
    pub episodes: u32,

    /// Step budget per episode, as a multiple of the cell count
    #[serde(default = "default_budget_multiplier")]
    pub budget_multiplier: u32,

    /// Directory for persisted weights and map snapshots; the user's home
    /// directory when unset
    #[serde(default)]
    pub data_dir: Option<String>,

    #[serde(default)]
    pub rewards: RewardConfig,
}

/// Reward applied per observed step outcome
#[derive(Clone, Debug, Deserialize)]
pub struct RewardConfig {
    /// Successful forward move
    #[serde(default = "default_forward_reward")]
    pub forward: f32,

    /// Forward decided but blocked by ground truth
    #[serde(default = "default_collision_reward")]
    pub collision: f32,

    /// Left or right turn
    #[serde(default = "default_turn_reward")]
    pub turn: f32,

    /// Turning around
    #[serde(default = "default_back_reward")]
    pub back: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            forward: default_forward_reward(),
            collision: default_collision_reward(),
            turn: default_turn_reward(),
            back: default_back_reward(),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            episodes: default_episodes(),
            budget_multiplier: default_budget_multiplier(),
            data_dir: None,
            rewards: RewardConfig::default(),
        }
    }
}

// Default value functions
fn default_episodes() -> u32 {
    1
}
fn default_budget_multiplier() -> u32 {
    8
}
fn default_forward_reward() -> f32 {
    1.0
}
fn default_collision_reward() -> f32 {
    -5.0
}
fn default_turn_reward() -> f32 {
    -0.1
}
fn default_back_reward() -> f32 {
    -0.2
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {e}"))
    }
}
