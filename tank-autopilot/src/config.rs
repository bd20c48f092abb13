use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use arena_core::constants::{
    CROWDED_BATTERY_COUNT, HYST_ENERGY_FRACTION, MAX_FIRE_DISTANCE, MIN_ENERGY_FRACTION,
    MIN_HEALTH_FRACTION,
};
use arena_core::{ArenaLimits, PolicyConfig};
use serde::{Deserialize, Serialize};

pub const PRESET_NAMES: [&str; 3] = ["standard", "brawler", "survivor"];

/// Tuning for the behavior chain. Arena maxima are not part of it; they
/// arrive with the join response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub id: String,
    pub description: String,

    // Firing
    pub max_fire_distance: usize,

    // Engagement gates (fractions of the arena maxima)
    pub min_energy_fraction: f64,
    pub hyst_energy_fraction: f64,
    pub min_health_fraction: f64,

    // Battery targeting
    #[serde(default = "default_crowded_battery_count")]
    pub crowded_battery_count: usize,
}

fn default_crowded_battery_count() -> usize {
    CROWDED_BATTERY_COUNT
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            id: "standard".to_string(),
            description: "Balanced hunter that recharges to 80% before re-engaging.".to_string(),
            max_fire_distance: MAX_FIRE_DISTANCE,
            min_energy_fraction: MIN_ENERGY_FRACTION,
            hyst_energy_fraction: HYST_ENERGY_FRACTION,
            min_health_fraction: MIN_HEALTH_FRACTION,
            crowded_battery_count: CROWDED_BATTERY_COUNT,
        }
    }
}

impl AgentConfig {
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::default()),
            "brawler" => Some(Self {
                id: "brawler".to_string(),
                description: "Engages early and shoots from further out.".to_string(),
                max_fire_distance: 14,
                min_energy_fraction: 0.15,
                hyst_energy_fraction: 0.5,
                min_health_fraction: 0.1,
                ..Self::default()
            }),
            "survivor" => Some(Self {
                id: "survivor".to_string(),
                description: "Keeps its distance until well charged and healthy.".to_string(),
                max_fire_distance: 8,
                min_energy_fraction: 0.4,
                hyst_energy_fraction: 0.95,
                min_health_fraction: 0.5,
                ..Self::default()
            }),
            _ => None,
        }
    }

    pub fn clamp(&mut self) {
        self.max_fire_distance = self.max_fire_distance.clamp(1, 64);
        self.min_energy_fraction = self.min_energy_fraction.clamp(0.0, 1.0);
        self.hyst_energy_fraction = self
            .hyst_energy_fraction
            .clamp(self.min_energy_fraction, 1.0);
        self.min_health_fraction = self.min_health_fraction.clamp(0.0, 1.0);
    }

    pub fn policy_config(&self, limits: ArenaLimits) -> PolicyConfig {
        PolicyConfig {
            max_fire_distance: self.max_fire_distance,
            min_energy_fraction: self.min_energy_fraction,
            hyst_energy_fraction: self.hyst_energy_fraction,
            min_health_fraction: self.min_health_fraction,
            crowded_battery_count: self.crowded_battery_count,
            ..PolicyConfig::new(limits)
        }
    }
}

/// Config file wins over preset; neither means the default.
pub fn load_config(path: Option<&Path>, preset: Option<&str>) -> Result<AgentConfig> {
    let mut cfg = if let Some(path) = path {
        let data = fs::read(path)
            .with_context(|| format!("failed reading config {}", path.display()))?;
        serde_json::from_slice::<AgentConfig>(&data)
            .with_context(|| format!("invalid config {}", path.display()))?
    } else if let Some(name) = preset {
        AgentConfig::preset(name).ok_or_else(|| {
            anyhow!(
                "unknown preset '{}' (try: {})",
                name,
                PRESET_NAMES.join(", ")
            )
        })?
    } else {
        AgentConfig::default()
    };
    cfg.clamp();
    Ok(cfg)
}
