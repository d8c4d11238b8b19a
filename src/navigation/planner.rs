// src/navigation/planner.rs
// Breadth-first search over the floor grid.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::{Cell, Coord, FloorPlan};

/// Ordered cells from the start (inclusive) to the goal (inclusive).
/// Empty when no goal was reachable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Coord>,
}

impl Path {
    /// Every cell including the start
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Cells the robot moves onto, i.e. everything after the start
    pub fn steps(&self) -> &[Coord] {
        self.cells.get(1..).unwrap_or(&[])
    }

    /// Number of moves
    pub fn hops(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Final cell
    pub fn goal(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    /// True when the search found nothing
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Finds the nearest cell satisfying `is_goal`, by hop count.
///
/// Neighbours are expanded right, down, left, up; blocked cells and cells off
/// the grid are never entered. The search stops as soon as a dequeued cell
/// matches, so equal-length candidates are resolved by that expansion order.
/// The start cell itself is tested first.
pub fn find_path<F>(floor_plan: &FloorPlan, start: Coord, is_goal: F) -> Path
where
    F: Fn(&Cell) -> bool,
{
    if floor_plan.cell(start).is_none() {
        return Path::default();
    }

    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    let mut enqueued: HashSet<Coord> = HashSet::from([start]);
    let mut queue: VecDeque<Coord> = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let Some(cell) = floor_plan.cell(current) else {
            continue;
        };
        if is_goal(cell) {
            return reconstruct(&came_from, start, current);
        }

        for next in current.neighbors() {
            if floor_plan.is_blocked(next) || !enqueued.insert(next) {
                continue;
            }
            came_from.insert(next, current);
            queue.push_back(next);
        }
    }

    Path::default()
}

fn reconstruct(came_from: &HashMap<Coord, Coord>, start: Coord, goal: Coord) -> Path {
    let mut cells = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&previous) => {
                cells.push(previous);
                current = previous;
            }
            None => break,
        }
    }
    cells.reverse();
    Path { cells }
}
