//! Simulation constants, with defaults matching the classic 120x120 board.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::species::SPECIES_PALETTE;

/// Starvation level at which a creature dies. Compared with `==`.
pub const STARVATION_LIMIT: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub species: SpeciesConfig,
    #[serde(default)]
    pub food: FoodConfig,
    #[serde(default)]
    pub rules: Rules,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_board_side")]
    pub width: i32,
    #[serde(default = "default_board_side")]
    pub height: i32,
}

fn default_board_side() -> i32 {
    120
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: default_board_side(),
            height: default_board_side(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    #[serde(default = "default_species_count")]
    pub count: usize,
    #[serde(default = "default_creatures_per_species")]
    pub creatures_per_species: usize,
}

fn default_species_count() -> usize {
    5
}

fn default_creatures_per_species() -> usize {
    20
}

impl Default for SpeciesConfig {
    fn default() -> Self {
        Self {
            count: default_species_count(),
            creatures_per_species: default_creatures_per_species(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodConfig {
    #[serde(default = "default_initial_food")]
    pub initial: usize,
    /// Each tick a new item grows unless a `1 in skip_one_in` draw comes up.
    #[serde(default = "default_skip_one_in")]
    pub skip_one_in: i32,
    #[serde(default = "default_max_spawn_attempts")]
    pub max_spawn_attempts: u32,
}

fn default_initial_food() -> usize {
    200
}

fn default_skip_one_in() -> i32 {
    100
}

fn default_max_spawn_attempts() -> u32 {
    10_000
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            initial: default_initial_food(),
            skip_one_in: default_skip_one_in(),
            max_spawn_attempts: default_max_spawn_attempts(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default = "default_reproduction_cost")]
    pub reproduction_cost: f64,
    #[serde(default = "default_max_age")]
    pub max_age: u32,
    #[serde(default = "default_foraging_threshold")]
    pub foraging_threshold: f64,
    #[serde(default = "default_reproduction_min_age")]
    pub reproduction_min_age: u32,
    #[serde(default = "default_metabolism_divisor")]
    pub metabolism_divisor: f64,
}

fn default_reproduction_cost() -> f64 {
    0.3
}

fn default_max_age() -> u32 {
    1000
}

fn default_foraging_threshold() -> f64 {
    0.3
}

fn default_reproduction_min_age() -> u32 {
    100
}

fn default_metabolism_divisor() -> f64 {
    300.0
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            reproduction_cost: default_reproduction_cost(),
            max_age: default_max_age(),
            foraging_threshold: default_foraging_threshold(),
            reproduction_min_age: default_reproduction_min_age(),
            metabolism_divisor: default_metabolism_divisor(),
        }
    }
}

impl Rules {
    /// Starvation a newborn starts with: the cost both parents paid.
    pub fn newborn_starvation(&self) -> f64 {
        2.0 * self.reproduction_cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_report_every")]
    pub report_every_ticks: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_report_every() -> u64 {
    100
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            report_every_ticks: default_report_every(),
        }
    }
}

impl SimConfig {
    /// Load configuration from YAML file
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SimConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.board.width < 1 || self.board.height < 1 {
            return Err(SimError::InvalidConfig(format!(
                "board must be at least 1x1, got {}x{}",
                self.board.width, self.board.height
            )));
        }

        if self.species.count > SPECIES_PALETTE.len() {
            return Err(SimError::PaletteExhausted {
                requested: self.species.count,
                available: SPECIES_PALETTE.len(),
            });
        }

        if self.food.skip_one_in < 1 {
            return Err(SimError::InvalidConfig(
                "food.skip_one_in must be at least 1".into(),
            ));
        }

        let rules = &self.rules;
        if rules.metabolism_divisor.is_nan() || rules.metabolism_divisor <= 0.0 {
            return Err(SimError::InvalidConfig(
                "rules.metabolism_divisor must be positive".into(),
            ));
        }
        if !(0.0..STARVATION_LIMIT).contains(&rules.reproduction_cost) {
            return Err(SimError::InvalidConfig(format!(
                "rules.reproduction_cost must lie in [0, 1), got {}",
                rules.reproduction_cost
            )));
        }
        if !(0.0..STARVATION_LIMIT).contains(&rules.foraging_threshold) {
            return Err(SimError::InvalidConfig(format!(
                "rules.foraging_threshold must lie in [0, 1), got {}",
                rules.foraging_threshold
            )));
        }

        Ok(())
    }
}
