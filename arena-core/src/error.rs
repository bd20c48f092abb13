use core::fmt;

use crate::geometry::{Dimensions, Position};

/// An observation the agent refuses to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObservationError {
    EmptyGrid,
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    UnknownSymbol {
        row: usize,
        col: usize,
        symbol: char,
    },
    MissingSelf,
    MissingEnemy,
    DuplicateSelf {
        first: Position,
        second: Position,
    },
    DuplicateEnemy {
        first: Position,
        second: Position,
    },
    MissingOrientation,
    DimensionsChanged {
        expected: Dimensions,
        found: Dimensions,
    },
    GameOver {
        status: String,
    },
}

impl fmt::Display for ObservationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid has no cells"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "grid row {row} has {found} cells, expected {expected}"),
            Self::UnknownSymbol { row, col, symbol } => {
                write!(f, "unknown grid symbol {symbol:?} at ({row}, {col})")
            }
            Self::MissingSelf => write!(f, "grid has no self marker"),
            Self::MissingEnemy => write!(f, "grid has no enemy marker"),
            Self::DuplicateSelf { first, second } => {
                write!(f, "grid has two self markers: {first} and {second}")
            }
            Self::DuplicateEnemy { first, second } => {
                write!(f, "grid has two enemy markers: {first} and {second}")
            }
            Self::MissingOrientation => write!(f, "running observation has no orientation"),
            Self::DimensionsChanged { expected, found } => {
                write!(f, "grid dimensions changed from {expected} to {found}")
            }
            Self::GameOver { status } => write!(f, "game is not running: {status}"),
        }
    }
}

impl std::error::Error for ObservationError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    NonPositiveLimit { name: &'static str, value: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// The search queue ran dry before any node reached the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    Exhausted {
        start: Position,
        goal: Position,
        expanded: usize,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted {
                start,
                goal,
                expanded,
            } => write!(
                f,
                "no path from {start} to {goal} after expanding {expanded} poses"
            ),
        }
    }
}

impl std::error::Error for PathError {}
