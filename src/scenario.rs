use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::CombatProfile;
use crate::tile::SpawnProfile;

fn default_max_hp() -> i32 {
    100
}

fn default_attack() -> i32 {
    10
}

fn default_count_min() -> u32 {
    3
}

fn default_count_max() -> u32 {
    6
}

fn default_mob_chance() -> f64 {
    0.3
}

fn default_attack_bonus_max() -> i32 {
    4
}

fn default_counter_bonus_max() -> i32 {
    2
}

fn default_flee_chance() -> f64 {
    0.5
}

fn default_victory_scrip_max() -> u32 {
    5
}

fn default_vital_decay() -> i32 {
    2
}

fn default_gather_hunger_cost() -> u32 {
    2
}

fn default_search_hunger_cost() -> u32 {
    1
}

fn default_view_radius() -> i64 {
    3
}

fn default_zoom_radius() -> i64 {
    6
}

fn default_log_cap() -> usize {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    pub name: String,
    pub seed: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub tuning: Tuning,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_max_hp")]
    pub max_hp: i32,
    #[serde(default = "default_attack")]
    pub attack: i32,
    #[serde(default)]
    pub spawn_x: i64,
    #[serde(default)]
    pub spawn_y: i64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_hp: default_max_hp(),
            attack: default_attack(),
            spawn_x: 0,
            spawn_y: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tuning {
    #[serde(default = "default_count_min")]
    pub entity_count_min: u32,
    #[serde(default = "default_count_max")]
    pub entity_count_max: u32,
    #[serde(default = "default_mob_chance")]
    pub mob_chance: f64,
    #[serde(default = "default_attack_bonus_max")]
    pub attack_bonus_max: i32,
    #[serde(default = "default_counter_bonus_max")]
    pub counter_bonus_max: i32,
    #[serde(default = "default_flee_chance")]
    pub flee_chance: f64,
    #[serde(default = "default_victory_scrip_max")]
    pub victory_scrip_max: u32,
    #[serde(default = "default_vital_decay")]
    pub starvation_decay: i32,
    #[serde(default = "default_vital_decay")]
    pub dehydration_decay: i32,
    #[serde(default = "default_gather_hunger_cost")]
    pub gather_hunger_cost: u32,
    #[serde(default = "default_search_hunger_cost")]
    pub search_hunger_cost: u32,
    #[serde(default = "default_view_radius")]
    pub view_radius: i64,
    #[serde(default = "default_zoom_radius")]
    pub zoom_radius: i64,
    #[serde(default = "default_log_cap")]
    pub log_cap: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            entity_count_min: default_count_min(),
            entity_count_max: default_count_max(),
            mob_chance: default_mob_chance(),
            attack_bonus_max: default_attack_bonus_max(),
            counter_bonus_max: default_counter_bonus_max(),
            flee_chance: default_flee_chance(),
            victory_scrip_max: default_victory_scrip_max(),
            starvation_decay: default_vital_decay(),
            dehydration_decay: default_vital_decay(),
            gather_hunger_cost: default_gather_hunger_cost(),
            search_hunger_cost: default_search_hunger_cost(),
            view_radius: default_view_radius(),
            zoom_radius: default_zoom_radius(),
            log_cap: default_log_cap(),
        }
    }
}

impl Tuning {
    pub fn spawn_profile(&self) -> SpawnProfile {
        SpawnProfile {
            count_min: self.entity_count_min,
            count_max: self.entity_count_max,
            mob_chance: self.mob_chance,
        }
    }

    pub fn combat_profile(&self) -> CombatProfile {
        CombatProfile {
            attack_bonus_max: self.attack_bonus_max,
            counter_bonus_max: self.counter_bonus_max,
            flee_chance: self.flee_chance,
            victory_scrip_max: self.victory_scrip_max,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario must define a non-empty name")]
    MissingName,
    #[error("player max_hp must be positive, got {0}")]
    InvalidMaxHp(i32),
    #[error("player attack must be positive, got {0}")]
    InvalidAttack(i32),
    #[error("{field} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },
    #[error("entity count range {min}..={max} is empty or starts at zero")]
    BadCountRange { min: u32, max: u32 },
    #[error("zoomed radius {zoom} must exceed the base view radius {base}")]
    BadViewRadii { base: i64, zoom: i64 },
}

impl Scenario {
    /// The built-in scenario, used when no file is supplied.
    pub fn frontier() -> Self {
        Self {
            name: "frontier".to_string(),
            seed: 42,
            description: Some("Default drifting-survivor setup".to_string()),
            player: PlayerConfig::default(),
            tuning: Tuning::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.name.trim().is_empty() {
            return Err(ScenarioError::MissingName);
        }
        if self.player.max_hp <= 0 {
            return Err(ScenarioError::InvalidMaxHp(self.player.max_hp));
        }
        if self.player.attack <= 0 {
            return Err(ScenarioError::InvalidAttack(self.player.attack));
        }
        for (field, value) in [
            ("mob_chance", self.tuning.mob_chance),
            ("flee_chance", self.tuning.flee_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScenarioError::ProbabilityOutOfRange { field, value });
            }
        }
        if self.tuning.entity_count_min == 0
            || self.tuning.entity_count_min > self.tuning.entity_count_max
        {
            return Err(ScenarioError::BadCountRange {
                min: self.tuning.entity_count_min,
                max: self.tuning.entity_count_max,
            });
        }
        if self.tuning.view_radius < 1 || self.tuning.zoom_radius <= self.tuning.view_radius {
            return Err(ScenarioError::BadViewRadii {
                base: self.tuning.view_radius,
                zoom: self.tuning.zoom_radius,
            });
        }
        Ok(())
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        scenario
            .validate()
            .with_context(|| format!("Invalid scenario in {}", path.display()))?;
        Ok(scenario)
    }
}
