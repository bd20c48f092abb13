//! Toroidal grid math.
//!
//! Both axes wrap: stepping off the last row re-enters on the first. Every
//! `Position` produced here is already reduced into `[0, rows) x [0, cols)`,
//! so derived equality on positions is wrapped equality.

use core::fmt;

use serde::{Deserialize, Serialize};

// ── Dimensions and positions ────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: i32,
    pub cols: i32,
}

impl Dimensions {
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    #[inline]
    pub fn wrap_position(self, position: Position) -> Position {
        Position {
            row: wrap(position.row, self.rows),
            col: wrap(position.col, self.cols),
        }
    }

    pub fn cell_count(self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ── Orientation ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    North,
    West,
    South,
    East,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
}

impl Orientation {
    /// Counter-clockwise order. A left turn advances one slot.
    pub const CCW: [Orientation; 4] = [
        Orientation::North,
        Orientation::West,
        Orientation::South,
        Orientation::East,
    ];

    #[inline]
    fn ccw_index(self) -> usize {
        match self {
            Orientation::North => 0,
            Orientation::West => 1,
            Orientation::South => 2,
            Orientation::East => 3,
        }
    }

    /// `(row, col)` step of one forward move.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Orientation::North => (-1, 0),
            Orientation::South => (1, 0),
            Orientation::West => (0, -1),
            Orientation::East => (0, 1),
        }
    }

    /// Axis a forward move changes: 0 for rows, 1 for columns.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Orientation::North | Orientation::South => 0,
            Orientation::West | Orientation::East => 1,
        }
    }

    #[inline]
    pub fn turned(self, turn: Turn) -> Orientation {
        let step = match turn {
            Turn::Left => 1,
            Turn::Right => 3,
        };
        Self::CCW[(self.ccw_index() + step) % 4]
    }

    #[inline]
    pub fn opposite(self) -> Orientation {
        Self::CCW[(self.ccw_index() + 2) % 4]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::North => "north",
            Orientation::West => "west",
            Orientation::South => "south",
            Orientation::East => "east",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search-state identity: where we stand and which way we face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pose {
    pub position: Position,
    pub orientation: Orientation,
}

impl Pose {
    pub const fn new(position: Position, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

// ── Toroidal math ───────────────────────────────────────────────────

/// Reduce `value` into `[0, modulus)`.
#[inline]
pub fn wrap(value: i32, modulus: i32) -> i32 {
    debug_assert!(modulus > 0, "wrap modulus must be positive");
    let mut v = value;
    while v >= modulus {
        v -= modulus;
    }
    while v < 0 {
        v += modulus;
    }
    v
}

#[inline]
pub fn translate(dims: Dimensions, position: Position, delta: (i32, i32)) -> Position {
    Position {
        row: wrap(position.row + delta.0, dims.rows),
        col: wrap(position.col + delta.1, dims.cols),
    }
}

/// Shorter of the direct and wrap-around gaps on one axis.
#[inline]
pub fn axis_distance(a: i32, b: i32, size: i32) -> i32 {
    let direct = (b - a).abs();
    direct.min(size - direct)
}

/// Toroidal Manhattan distance. Lower bound on forward moves between cells.
#[inline]
pub fn distance(dims: Dimensions, p: Position, q: Position) -> i32 {
    axis_distance(p.row, q.row, dims.rows) + axis_distance(p.col, q.col, dims.cols)
}

#[inline]
pub fn orientation_delta(orientation: Orientation) -> (i32, i32) {
    orientation.delta()
}

#[inline]
pub fn orientation_axis(orientation: Orientation) -> usize {
    orientation.axis()
}

#[inline]
pub fn turn_effect(orientation: Orientation, turn: Turn) -> Orientation {
    orientation.turned(turn)
}
