use anyhow::{Context, Result};
use arena_core::{Action, Agent, Decision, Mode, Observation};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::Session;
use crate::recording::Recorder;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCounts {
    pub fire: u32,
    pub hunt: u32,
    pub collect: u32,
    pub cower: u32,
    pub idle: u32,
}

impl ModeCounts {
    pub fn record(&mut self, mode: Mode) {
        let slot = match mode {
            Mode::Fire => &mut self.fire,
            Mode::Hunt => &mut self.hunt,
            Mode::Collect => &mut self.collect,
            Mode::Cower => &mut self.cower,
            Mode::Idle => &mut self.idle,
        };
        *slot += 1;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounts {
    pub fire: u32,
    #[serde(rename = "move")]
    pub moves: u32,
    pub left: u32,
    pub right: u32,
    pub noop: u32,
}

impl ActionCounts {
    pub fn record(&mut self, action: Action) {
        let slot = match action {
            Action::Fire => &mut self.fire,
            Action::Move => &mut self.moves,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Noop => &mut self.noop,
        };
        *slot += 1;
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunMetrics {
    pub agent_id: String,
    pub ticks: u32,
    pub final_status: String,
    pub modes: ModeCounts,
    pub actions: ActionCounts,
}

impl RunMetrics {
    fn record(&mut self, decision: Decision) {
        self.ticks += 1;
        self.modes.record(decision.mode);
        self.actions.record(decision.action);
    }
}

/// Drive one game from `first` until the arena reports a terminal status.
///
/// A malformed observation ends the run with an error; no action is guessed
/// on its behalf.
pub fn play<S: Session>(
    agent: &mut Agent,
    agent_id: &str,
    session: &mut S,
    first: Observation,
    mut recorder: Option<&mut Recorder>,
) -> Result<RunMetrics> {
    let mut metrics = RunMetrics {
        agent_id: agent_id.to_string(),
        ..RunMetrics::default()
    };
    let mut obs = first;

    while obs.is_running() {
        let index = metrics.ticks;
        let decision = agent
            .tick(&obs)
            .with_context(|| format!("rejected observation at tick {index}"))?;
        info!("{} => {}", decision.mode, decision.action);
        metrics.record(decision);

        if let Some(rec) = recorder.as_deref_mut() {
            rec.tick(index, &obs, decision)?;
        }
        obs = session
            .submit(decision.action)
            .with_context(|| format!("submitting {} at tick {index}", decision.action))?;
    }

    info!(status = %obs.status, ticks = metrics.ticks, "game over");
    if let Some(rec) = recorder {
        rec.finish(&obs.status)?;
    }
    metrics.final_status = obs.status;
    Ok(metrics)
}
