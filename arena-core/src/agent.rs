use tracing::info;

use crate::error::ObservationError;
use crate::geometry::Dimensions;
use crate::grid::Grid;
use crate::observation::Observation;
use crate::policy::{Decision, Mode, Policy};

/// Per-game decision state: the policy, the grid shape fixed by the first
/// observation, and the mode picked on the previous tick.
#[derive(Clone, Debug)]
pub struct Agent {
    policy: Policy,
    dimensions: Option<Dimensions>,
    previous: Option<Mode>,
}

impl Agent {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            dimensions: None,
            previous: None,
        }
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    pub fn previous_mode(&self) -> Option<Mode> {
        self.previous
    }

    /// Decide one action. A rejected observation leaves the state untouched.
    pub fn tick(&mut self, obs: &Observation) -> Result<Decision, ObservationError> {
        if !obs.is_running() {
            return Err(ObservationError::GameOver {
                status: obs.status.clone(),
            });
        }
        let facing = obs
            .orientation
            .ok_or(ObservationError::MissingOrientation)?;
        let grid = Grid::parse(&obs.grid)?;
        let found = grid.dimensions();
        match self.dimensions {
            Some(expected) if expected != found => {
                return Err(ObservationError::DimensionsChanged { expected, found });
            }
            Some(_) => {}
            None => self.dimensions = Some(found),
        }

        info!(
            position = %grid.me(),
            orientation = %facing,
            enemy = %grid.enemy(),
            energy = obs.energy,
            health = obs.health,
            "observation"
        );

        let decision = self.policy.decide(&grid, facing, obs.vitals(), self.previous);
        self.previous = Some(decision.mode);
        Ok(decision)
    }
}
