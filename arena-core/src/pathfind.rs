//! A* over poses.
//!
//! Every action costs 1. Turning changes only the orientation; moving forward
//! is legal into passable cells and always into the goal cell itself. The
//! heuristic is the toroidal Manhattan distance to the goal, which ignores
//! turning and so never overestimates.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::action::Action;
use crate::error::PathError;
use crate::geometry::{distance, translate, Pose, Position, Turn};
use crate::grid::Grid;

struct Node {
    pose: Pose,
    history: Vec<Action>,
    f: usize,
    seq: u64,
}

// Min-heap on f; equal f pops in insertion order.
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for Node {}

struct Frontier<'a> {
    grid: &'a Grid,
    goal: Position,
    heap: BinaryHeap<Node>,
    next_seq: u64,
}

impl Frontier<'_> {
    fn push(&mut self, pose: Pose, history: Vec<Action>) {
        let h = distance(self.grid.dimensions(), pose.position, self.goal) as usize;
        let f = history.len() + h;
        self.heap.push(Node {
            pose,
            history,
            f,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }
}

fn extended(history: &[Action], action: Action) -> Vec<Action> {
    let mut next = Vec::with_capacity(history.len() + 1);
    next.extend_from_slice(history);
    next.push(action);
    next
}

/// Shortest action sequence from `start` until standing on `goal`.
///
/// Returns `[Noop]` when already there. Orientation at the goal is irrelevant.
pub fn plan(grid: &Grid, start: Pose, goal: Position) -> Result<Vec<Action>, PathError> {
    let dims = grid.dimensions();
    let start = Pose::new(dims.wrap_position(start.position), start.orientation);
    let goal = dims.wrap_position(goal);
    if start.position == goal {
        return Ok(vec![Action::Noop]);
    }

    let mut visited: HashSet<Pose> = HashSet::new();
    let mut frontier = Frontier {
        grid,
        goal,
        heap: BinaryHeap::new(),
        next_seq: 0,
    };
    frontier.push(start, Vec::new());

    while let Some(node) = frontier.heap.pop() {
        if node.pose.position == goal {
            return Ok(node.history);
        }
        // A pose can sit in the heap twice if it was pushed from two parents
        // before either copy was popped.
        if !visited.insert(node.pose) {
            continue;
        }

        for (turn, action) in [(Turn::Left, Action::Left), (Turn::Right, Action::Right)] {
            let next = Pose::new(node.pose.position, node.pose.orientation.turned(turn));
            if !visited.contains(&next) {
                frontier.push(next, extended(&node.history, action));
            }
        }

        let ahead = translate(dims, node.pose.position, node.pose.orientation.delta());
        if ahead == goal {
            return Ok(extended(&node.history, Action::Move));
        }
        let next = Pose::new(ahead, node.pose.orientation);
        if grid.is_passable(ahead) && !visited.contains(&next) {
            frontier.push(next, extended(&node.history, Action::Move));
        }
    }

    Err(PathError::Exhausted {
        start: start.position,
        goal,
        expanded: visited.len(),
    })
}

/// Number of actions `plan` would return, or `None` when unreachable.
pub fn path_length(grid: &Grid, start: Pose, goal: Position) -> Option<usize> {
    plan(grid, start, goal).ok().map(|actions| actions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Orientation;

    #[test]
    fn already_at_goal_is_noop() {
        let grid = Grid::parse("X__\n___\n__O").unwrap();
        let start = Pose::new(grid.me(), Orientation::South);
        assert_eq!(plan(&grid, start, grid.me()), Ok(vec![Action::Noop]));
        assert_eq!(
            plan(&grid, start, Position::new(3, -3)),
            Ok(vec![Action::Noop])
        );
    }

    #[test]
    fn straight_ahead_is_all_moves() {
        let grid = Grid::parse("X___O").unwrap();
        let start = Pose::new(grid.me(), Orientation::East);
        assert_eq!(
            plan(&grid, start, Position::new(0, 3)),
            Ok(vec![Action::Move, Action::Move, Action::Move])
        );
    }

    #[test]
    fn wraps_instead_of_walking_the_long_way() {
        let grid = Grid::parse("X_____O").unwrap();
        let start = Pose::new(grid.me(), Orientation::West);
        assert_eq!(plan(&grid, start, Position::new(0, 6)), Ok(vec![Action::Move]));
    }

    #[test]
    fn goal_cell_is_enterable_even_when_impassable() {
        let grid = Grid::parse("XW_\n___\n__O").unwrap();
        let start = Pose::new(grid.me(), Orientation::East);
        assert_eq!(plan(&grid, start, Position::new(0, 1)), Ok(vec![Action::Move]));
    }

    #[test]
    fn laser_blocks_movement() {
        let open = Grid::parse("X___W\nWWWWW\nWWWWO").unwrap();
        let start = Pose::new(open.me(), Orientation::East);
        assert_eq!(
            plan(&open, start, Position::new(0, 3)),
            Ok(vec![Action::Move, Action::Move, Action::Move])
        );

        let sealed = Grid::parse("X_L_W\nWWWWW\nWWWWO").unwrap();
        assert!(plan(&sealed, start, Position::new(0, 3)).is_err());
    }

    #[test]
    fn wrapped_route_beats_turning_twice_and_walking() {
        let grid = Grid::parse("X_L_\nWWWW\nWWWO\nWWWW").unwrap();
        let start = Pose::new(grid.me(), Orientation::East);
        assert_eq!(
            plan(&grid, start, Position::new(0, 3)),
            Ok(vec![Action::Left, Action::Left, Action::Move])
        );
    }

    #[test]
    fn enclosed_goal_exhausts_the_queue() {
        let grid = Grid::parse("X____\n__W__\n_W_W_\n__W__\n____O").unwrap();
        let start = Pose::new(grid.me(), Orientation::East);
        let result = plan(&grid, start, Position::new(2, 2));
        assert!(matches!(
            result,
            Err(PathError::Exhausted {
                goal: Position { row: 2, col: 2 },
                ..
            })
        ));
        assert_eq!(path_length(&grid, start, Position::new(2, 2)), None);
    }

    #[test]
    fn turning_around_costs_two() {
        let grid = Grid::parse("_X__O").unwrap();
        let start = Pose::new(grid.me(), Orientation::East);
        let actions = plan(&grid, start, Position::new(0, 0)).unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions.last(), Some(&Action::Move));
    }
}
