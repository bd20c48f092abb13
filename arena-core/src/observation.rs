use serde::{Deserialize, Serialize};

use crate::constants::STATUS_RUNNING;
use crate::geometry::Orientation;
use crate::policy::Vitals;

/// One status payload from the arena. Terminal payloads may carry only
/// `status`, so everything else defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub status: String,
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub energy: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub grid: String,
}

impl Observation {
    pub fn is_running(&self) -> bool {
        self.status == STATUS_RUNNING
    }

    pub fn vitals(&self) -> Vitals {
        Vitals {
            health: self.health,
            energy: self.energy,
        }
    }
}

/// Per-game maxima announced once when joining.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaLimits {
    pub max_health: i32,
    pub max_energy: i32,
}
