//! Grid symbols and policy defaults shared with the arena protocol.

// Grid symbols
pub const SYMBOL_EMPTY: char = '_';
pub const SYMBOL_WALL: char = 'W';
pub const SYMBOL_LASER: char = 'L';
pub const SYMBOL_BATTERY: char = 'B';
pub const SYMBOL_SELF: char = 'X';
pub const SYMBOL_ENEMY: char = 'O';

/// Status string the arena reports while a game is in progress.
pub const STATUS_RUNNING: &str = "running";

// Policy defaults
pub const MAX_FIRE_DISTANCE: usize = 10; // further away the enemy has time to dodge
pub const MIN_ENERGY_FRACTION: f64 = 0.25; // stop hunting below this
pub const HYST_ENERGY_FRACTION: f64 = 0.80; // resume hunting after collecting only above this
pub const MIN_HEALTH_FRACTION: f64 = 0.25; // avoid the enemy below this
pub const CROWDED_BATTERY_COUNT: usize = 3; // above this, rank batteries by geometry only
