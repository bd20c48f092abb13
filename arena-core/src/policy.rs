//! Fixed-priority behavior chain: fire, hunt, collect, cower, idle.
//!
//! Each branch either produces an action or falls through to the next one.
//! Movement branches re-plan from scratch every tick and only take the first
//! step of the plan, since the arena changes between ticks.

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::action::Action;
use crate::constants::{
    CROWDED_BATTERY_COUNT, HYST_ENERGY_FRACTION, MAX_FIRE_DISTANCE, MIN_ENERGY_FRACTION,
    MIN_HEALTH_FRACTION,
};
use crate::error::ConfigError;
use crate::geometry::{distance, translate, Orientation, Pose, Position};
use crate::grid::Grid;
use crate::observation::ArenaLimits;
use crate::pathfind::{path_length, plan};
use crate::sight::{enemy_in_crosshairs, render, scan};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Fire,
    Hunt,
    Collect,
    Cower,
    Idle,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Fire => "fire",
            Mode::Hunt => "hunt",
            Mode::Collect => "collect",
            Mode::Cower => "cower",
            Mode::Idle => "idle",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: i32,
    pub energy: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub mode: Mode,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub limits: ArenaLimits,
    pub max_fire_distance: usize,
    pub min_energy_fraction: f64,
    /// Energy gate for hunting when the previous tick was spent collecting.
    pub hyst_energy_fraction: f64,
    pub min_health_fraction: f64,
    /// With more batteries than this, targets are ranked by distance instead
    /// of by path length.
    pub crowded_battery_count: usize,
}

impl PolicyConfig {
    pub fn new(limits: ArenaLimits) -> Self {
        Self {
            limits,
            max_fire_distance: MAX_FIRE_DISTANCE,
            min_energy_fraction: MIN_ENERGY_FRACTION,
            hyst_energy_fraction: HYST_ENERGY_FRACTION,
            min_health_fraction: MIN_HEALTH_FRACTION,
            crowded_battery_count: CROWDED_BATTERY_COUNT,
        }
    }
}

/// What a branch sees for one tick.
struct Situation<'a> {
    grid: &'a Grid,
    pose: Pose,
    vitals: Vitals,
    previous: Option<Mode>,
}

type Branch = fn(&Policy, &Situation<'_>) -> Option<Action>;

const CHAIN: [(Mode, Branch); 4] = [
    (Mode::Fire, Policy::fire),
    (Mode::Hunt, Policy::hunt),
    (Mode::Collect, Policy::collect),
    (Mode::Cower, Policy::cower),
];

#[derive(Clone, Debug)]
pub struct Policy {
    cfg: PolicyConfig,
}

impl Policy {
    pub fn new(cfg: PolicyConfig) -> Result<Self, ConfigError> {
        if cfg.limits.max_health <= 0 {
            return Err(ConfigError::NonPositiveLimit {
                name: "max_health",
                value: cfg.limits.max_health,
            });
        }
        if cfg.limits.max_energy <= 0 {
            return Err(ConfigError::NonPositiveLimit {
                name: "max_energy",
                value: cfg.limits.max_energy,
            });
        }
        Ok(Self { cfg })
    }

    /// Run the chain once. `previous` is the mode chosen on the last tick.
    pub fn decide(
        &self,
        grid: &Grid,
        facing: Orientation,
        vitals: Vitals,
        previous: Option<Mode>,
    ) -> Decision {
        let situation = Situation {
            grid,
            pose: Pose::new(grid.me(), facing),
            vitals,
            previous,
        };
        for (mode, branch) in CHAIN {
            if let Some(action) = branch(self, &situation) {
                return Decision { action, mode };
            }
        }
        Decision {
            action: Action::Noop,
            mode: Mode::Idle,
        }
    }

    fn energy_fraction(&self, vitals: Vitals) -> f64 {
        vitals.energy as f64 / self.cfg.limits.max_energy as f64
    }

    fn health_fraction(&self, vitals: Vitals) -> f64 {
        vitals.health as f64 / self.cfg.limits.max_health as f64
    }

    fn fire(&self, s: &Situation<'_>) -> Option<Action> {
        if s.vitals.energy <= 0 {
            return None;
        }
        let sight = scan(
            s.grid,
            s.pose.position,
            s.pose.orientation,
            self.cfg.max_fire_distance,
        );
        debug!(crosshairs = %render(&sight), "look ahead");
        enemy_in_crosshairs(&sight).then_some(Action::Fire)
    }

    fn hunt(&self, s: &Situation<'_>) -> Option<Action> {
        let energy_gate = if s.previous == Some(Mode::Collect) {
            self.cfg.hyst_energy_fraction
        } else {
            self.cfg.min_energy_fraction
        };
        if self.energy_fraction(s.vitals) >= energy_gate
            && self.health_fraction(s.vitals) >= self.cfg.min_health_fraction
        {
            move_toward(s, s.grid.enemy())
        } else {
            None
        }
    }

    fn collect(&self, s: &Situation<'_>) -> Option<Action> {
        let batteries = s.grid.batteries();
        if batteries.is_empty() {
            return None;
        }
        let target = if batteries.len() > self.cfg.crowded_battery_count {
            let dims = s.grid.dimensions();
            batteries
                .iter()
                .copied()
                .min_by_key(|b| distance(dims, s.pose.position, *b))
        } else {
            batteries
                .iter()
                .filter_map(|b| path_length(s.grid, s.pose, *b).map(|len| (*b, len)))
                .min_by_key(|(_, len)| *len)
                .map(|(b, _)| b)
        }?;
        debug!(%target, candidates = batteries.len(), "battery target");
        move_toward(s, target)
    }

    fn cower(&self, s: &Situation<'_>) -> Option<Action> {
        // Proxy for "far away": the cell diametrically opposite the enemy.
        let dims = s.grid.dimensions();
        let refuge = translate(dims, s.grid.enemy(), (dims.rows / 2, dims.cols / 2));
        move_toward(s, refuge)
    }
}

fn move_toward(s: &Situation<'_>, target: Position) -> Option<Action> {
    match plan(s.grid, s.pose, target) {
        Ok(actions) => actions.first().copied(),
        Err(err) => {
            warn!(%err, "A* failed to find path");
            None
        }
    }
}
