//! Energy-bounded probe reachability over the rotating board.
//!
//! `MoveGraph` is built fresh for one rotation state: which absolute cells
//! exist, and therefore which moves are legal, changes whenever a platform
//! turns. Every move costs one energy, so a breadth-first search yields
//! the cheapest cost and one cheapest path to every cell.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::board::{Disk, Position};
use crate::catalog::Catalog;
use crate::resolver::is_open;
use crate::rotation::RotationState;

/// Cost and one cheapest path to a reachable cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachabilityEntry {
    pub movements: u32,
    /// Cells visited after the start, ending at the keyed cell.
    pub path: Vec<Position>,
}

/// Reachable cells keyed by position, excluding the start cell.
pub type ReachabilityMap = BTreeMap<Position, ReachabilityEntry>;

/// Movement graph of the open cells under one rotation state.
#[derive(Debug, Clone)]
pub struct MoveGraph {
    /// cell → open neighbors, in expansion order
    adj: HashMap<Position, Vec<Position>>,
}

impl MoveGraph {
    /// Build the graph for the board as it currently sits.
    pub fn from_board(catalog: &Catalog, rotation: &RotationState) -> Self {
        let open: HashSet<Position> = Position::all()
            .filter(|&p| is_open(catalog, p, rotation))
            .collect();

        let mut adj = HashMap::with_capacity(open.len());
        for &cell in &open {
            let neighbors: Vec<Position> = candidate_moves(cell)
                .into_iter()
                .filter(|n| open.contains(n))
                .collect();
            adj.insert(cell, neighbors);
        }
        Self { adj }
    }

    /// Open neighbors of `cell`; empty for a void cell.
    pub fn neighbors(&self, cell: Position) -> &[Position] {
        self.adj.get(&cell).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Whether `cell` is open under this rotation.
    pub fn has_cell(&self, cell: Position) -> bool {
        self.adj.contains_key(&cell)
    }

    pub fn cell_count(&self) -> usize {
        self.adj.len()
    }

    pub fn are_adjacent(&self, a: Position, b: Position) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Every cell reachable from `start` within `budget` moves.
    ///
    /// A void start cell has no neighbors and yields an empty map.
    pub fn reachable(&self, start: Position, budget: u32) -> ReachabilityMap {
        let mut result = ReachabilityMap::new();
        if budget == 0 {
            return result;
        }
        if !self.has_cell(start) {
            log::warn!("reachability query from void cell {}", start);
            return result;
        }

        let mut visited = HashSet::new();
        let mut queue: VecDeque<(Position, Vec<Position>)> = VecDeque::new();
        visited.insert(start);
        queue.push_back((start, vec![]));

        while let Some((current, path)) = queue.pop_front() {
            if path.len() as u32 >= budget {
                continue;
            }
            for &next in self.neighbors(current) {
                if visited.insert(next) {
                    let mut next_path = path.clone();
                    next_path.push(next);
                    result.insert(
                        next,
                        ReachabilityEntry {
                            movements: next_path.len() as u32,
                            path: next_path.clone(),
                        },
                    );
                    queue.push_back((next, next_path));
                }
            }
        }

        log::debug!(
            "{} cell(s) reachable from {} with budget {}",
            result.len(),
            start,
            budget
        );
        result
    }

    /// Cheapest path from `from` to `to`, excluding `from`.
    ///
    /// Returns an empty path when both are the same open cell and `None`
    /// when `to` cannot be reached.
    pub fn find_path(&self, from: Position, to: Position) -> Option<Vec<Position>> {
        if !self.has_cell(from) || !self.has_cell(to) {
            return None;
        }
        if from == to {
            return Some(vec![]);
        }
        let budget = self.cell_count() as u32;
        self.reachable(from, budget).remove(&to).map(|e| e.path)
    }
}

/// Candidate moves from `cell` in expansion order: clockwise along the
/// disk, counter-clockwise along the disk, inward, outward.
fn candidate_moves(cell: Position) -> Vec<Position> {
    let mut moves = vec![
        Position::new(cell.disk, cell.sector.next()),
        Position::new(cell.disk, cell.sector.prev()),
    ];
    let radial = [cell.disk.inner(), cell.disk.outer()];
    moves.extend(
        radial
            .into_iter()
            .flatten()
            .map(|disk: Disk| Position::new(disk, cell.sector)),
    );
    moves
}

/// Convenience wrapper building a [`MoveGraph`] and running one search.
pub fn reachable_cells(
    catalog: &Catalog,
    rotation: &RotationState,
    start: Position,
    budget: u32,
) -> ReachabilityMap {
    MoveGraph::from_board(catalog, rotation).reachable(start, budget)
}
