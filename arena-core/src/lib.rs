//! Arena core - spatial reasoning for a tank agent on a wrapped grid.
//!
//! Everything in this crate is synchronous and free of I/O. One observation
//! goes in, one action comes out; the session plumbing lives in the
//! `tank-autopilot` crate.

pub mod action;
pub mod agent;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod observation;
pub mod pathfind;
pub mod policy;
pub mod sight;

pub use action::Action;
pub use agent::Agent;
pub use error::{ConfigError, ObservationError, PathError};
pub use geometry::{Dimensions, Orientation, Pose, Position, Turn};
pub use grid::{Cell, Grid};
pub use observation::{ArenaLimits, Observation};
pub use pathfind::{path_length, plan};
pub use policy::{Decision, Mode, Policy, PolicyConfig, Vitals};
