use core::str::FromStr;

use crate::constants::{
    SYMBOL_BATTERY, SYMBOL_EMPTY, SYMBOL_ENEMY, SYMBOL_LASER, SYMBOL_SELF, SYMBOL_WALL,
};
use crate::error::ObservationError;
use crate::geometry::{Dimensions, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Wall,
    Laser,
    Battery,
    Me,
    Enemy,
}

impl Cell {
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            SYMBOL_EMPTY => Some(Cell::Empty),
            SYMBOL_WALL => Some(Cell::Wall),
            SYMBOL_LASER => Some(Cell::Laser),
            SYMBOL_BATTERY => Some(Cell::Battery),
            SYMBOL_SELF => Some(Cell::Me),
            SYMBOL_ENEMY => Some(Cell::Enemy),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => SYMBOL_EMPTY,
            Cell::Wall => SYMBOL_WALL,
            Cell::Laser => SYMBOL_LASER,
            Cell::Battery => SYMBOL_BATTERY,
            Cell::Me => SYMBOL_SELF,
            Cell::Enemy => SYMBOL_ENEMY,
        }
    }

    /// Lasers block movement but not sight.
    #[inline]
    pub fn is_passable(self) -> bool {
        matches!(self, Cell::Empty | Cell::Battery)
    }

    #[inline]
    pub fn blocks_sight(self) -> bool {
        self == Cell::Wall
    }
}

/// One tick's snapshot of the arena. Rebuilt from scratch every observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<Cell>,
    me: Position,
    enemy: Position,
    lasers: Vec<Position>,
    batteries: Vec<Position>,
}

impl Grid {
    pub fn parse(text: &str) -> Result<Grid, ObservationError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        let cols = lines.first().map(|line| line.chars().count()).unwrap_or(0);
        if cols == 0 {
            return Err(ObservationError::EmptyGrid);
        }
        let dims = Dimensions::new(lines.len() as i32, cols as i32);

        let mut cells = Vec::with_capacity(dims.cell_count());
        let mut me: Option<Position> = None;
        let mut enemy: Option<Position> = None;
        let mut lasers = Vec::new();
        let mut batteries = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(ObservationError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or(ObservationError::UnknownSymbol { row, col, symbol })?;
                let here = Position::new(row as i32, col as i32);
                match cell {
                    Cell::Me => {
                        if let Some(first) = me {
                            return Err(ObservationError::DuplicateSelf {
                                first,
                                second: here,
                            });
                        }
                        me = Some(here);
                    }
                    Cell::Enemy => {
                        if let Some(first) = enemy {
                            return Err(ObservationError::DuplicateEnemy {
                                first,
                                second: here,
                            });
                        }
                        enemy = Some(here);
                    }
                    Cell::Laser => lasers.push(here),
                    Cell::Battery => batteries.push(here),
                    Cell::Empty | Cell::Wall => {}
                }
                cells.push(cell);
            }
        }

        Ok(Grid {
            dims,
            cells,
            me: me.ok_or(ObservationError::MissingSelf)?,
            enemy: enemy.ok_or(ObservationError::MissingEnemy)?,
            lasers,
            batteries,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub fn cell_at(&self, position: Position) -> Cell {
        let p = self.dims.wrap_position(position);
        self.cells[p.row as usize * self.dims.cols as usize + p.col as usize]
    }

    #[inline]
    pub fn is_passable(&self, position: Position) -> bool {
        self.cell_at(position).is_passable()
    }

    pub fn me(&self) -> Position {
        self.me
    }

    pub fn enemy(&self) -> Position {
        self.enemy
    }

    pub fn lasers(&self) -> &[Position] {
        &self.lasers
    }

    /// Battery positions in row-major scan order.
    pub fn batteries(&self) -> &[Position] {
        &self.batteries
    }
}

impl FromStr for Grid {
    type Err = ObservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::parse(s)
    }
}
