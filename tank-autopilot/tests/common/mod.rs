#![allow(dead_code)]

use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use arena_core::{Action, Agent, ArenaLimits, Observation, Orientation, Policy};
use tank_autopilot::client::Session;
use tank_autopilot::config::AgentConfig;

pub const LIMITS: ArenaLimits = ArenaLimits {
    max_health: 10,
    max_energy: 10,
};

/// Hands out canned observations and remembers what was submitted.
pub struct ScriptedSession {
    replies: VecDeque<Observation>,
    pub submitted: Vec<Action>,
}

impl ScriptedSession {
    pub fn new(replies: impl IntoIterator<Item = Observation>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            submitted: Vec::new(),
        }
    }
}

impl Session for ScriptedSession {
    fn submit(&mut self, action: Action) -> Result<Observation> {
        self.submitted.push(action);
        self.replies
            .pop_front()
            .ok_or_else(|| anyhow!("script ran out after {action}"))
    }
}

pub fn running(grid: &str, orientation: Orientation, energy: i32) -> Observation {
    Observation {
        status: "running".to_string(),
        health: LIMITS.max_health,
        energy,
        orientation: Some(orientation),
        grid: grid.to_string(),
    }
}

pub fn finished(status: &str) -> Observation {
    Observation {
        status: status.to_string(),
        health: 0,
        energy: 0,
        orientation: None,
        grid: String::new(),
    }
}

pub fn agent(cfg: &AgentConfig) -> Agent {
    Agent::new(Policy::new(cfg.policy_config(LIMITS)).expect("limits are positive"))
}

// Enemy two cells east; facing north the shortest approach wraps west.
pub const DUEL: &str = "X_O\n___\n___";
