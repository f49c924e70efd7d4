//! `SolarBoard`: the board state one game owns.
//!
//! Bundles the catalog, the platform rotation and the probe registry and
//! exposes the entry points the presentation layer calls. Each method
//! reads the rotation as it is at call time, so a rotate followed by a
//! query on the same `SolarBoard` always sees a consistent board.

use crate::board::{Level, Position};
use crate::catalog::Catalog;
use crate::error::BoardError;
use crate::probes::{PlayerId, ProbeId, ProbeRegistry};
use crate::reachability::{MoveGraph, ReachabilityMap};
use crate::resolver::{self, ResolvedCell};
use crate::rotation::{Direction, RotationState};

#[derive(Debug, Clone)]
pub struct SolarBoard {
    catalog: Catalog,
    rotation: RotationState,
    probes: ProbeRegistry,
}

impl Default for SolarBoard {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}

impl SolarBoard {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_state(catalog, RotationState::new(), ProbeRegistry::new())
    }

    /// Resume from previously saved rotation and probes.
    pub fn with_state(catalog: Catalog, rotation: RotationState, probes: ProbeRegistry) -> Self {
        Self {
            catalog,
            rotation,
            probes,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn probes(&self) -> &ProbeRegistry {
        &self.probes
    }

    pub fn rotate(&mut self, level: Level, steps: i32) {
        self.rotation.rotate(level, steps);
    }

    pub fn rotate_dir(&mut self, level: Level, direction: Direction) {
        self.rotation.rotate_dir(level, direction);
    }

    pub fn reset(&mut self, level: Level) {
        self.rotation.reset(level);
    }

    /// Current absolute position of a catalog object.
    pub fn locate_object(&self, id: &str) -> Option<Position> {
        resolver::locate(&self.catalog, id, &self.rotation)
    }

    /// What is visible at `position`; `None` for a void cell.
    pub fn cell_at(&self, position: Position) -> Option<ResolvedCell<'_>> {
        resolver::cell_at(&self.catalog, position, &self.rotation)
    }

    /// Movement graph for the current rotation.
    pub fn move_graph(&self) -> MoveGraph {
        MoveGraph::from_board(&self.catalog, &self.rotation)
    }

    pub fn reachable_cells(&self, start: Position, budget: u32) -> ReachabilityMap {
        self.move_graph().reachable(start, budget)
    }

    pub fn reachable_from_probe(
        &self,
        probe: ProbeId,
        budget: u32,
    ) -> Result<ReachabilityMap, BoardError> {
        let start = self.probe_position(probe)?;
        Ok(self.reachable_cells(start, budget))
    }

    /// One-off adjacency check against the current rotation.
    ///
    /// Builds a whole [`MoveGraph`] per call. To check many steps, such as
    /// replaying a path, take [`Self::move_graph`] once and ask it instead.
    pub fn are_adjacent(&self, a: Position, b: Position) -> bool {
        self.move_graph().are_adjacent(a, b)
    }

    pub fn deploy_probe(
        &mut self,
        owner: PlayerId,
        position: Position,
    ) -> Result<ProbeId, BoardError> {
        self.probes.deploy(owner, position)
    }

    /// Commit a destination the caller already validated against a search.
    pub fn move_probe(&mut self, probe: ProbeId, destination: Position) -> Result<(), BoardError> {
        self.probes.move_probe(probe, destination)
    }

    /// Move a probe if `destination` is reachable with `energy`.
    ///
    /// Returns the number of movements spent.
    pub fn travel(
        &mut self,
        probe: ProbeId,
        destination: Position,
        energy: u32,
    ) -> Result<u32, BoardError> {
        let from = self.probe_position(probe)?;
        let movements = self
            .reachable_cells(from, energy)
            .get(&destination)
            .map(|entry| entry.movements)
            .ok_or(BoardError::Unreachable {
                from,
                to: destination,
                energy,
            })?;
        self.probes.move_probe(probe, destination)?;
        Ok(movements)
    }

    fn probe_position(&self, probe: ProbeId) -> Result<Position, BoardError> {
        self.probes
            .get(probe)
            .map(|p| p.position)
            .ok_or(BoardError::UnknownProbe(probe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(key: &str) -> Position {
        key.parse().unwrap()
    }

    #[test]
    fn travel_spends_path_length() {
        let mut board = SolarBoard::default();
        let probe = board.deploy_probe(1, p("E1")).unwrap();
        let spent = board.travel(probe, p("C1"), 3).unwrap();
        assert_eq!(spent, 2);
        assert_eq!(board.probes().get(probe).unwrap().position, p("C1"));
    }

    #[test]
    fn travel_rejects_out_of_range() {
        let mut board = SolarBoard::default();
        let probe = board.deploy_probe(1, p("E1")).unwrap();
        let err = board.travel(probe, p("A1"), 2).unwrap_err();
        assert!(matches!(err, BoardError::Unreachable { energy: 2, .. }));
        assert_eq!(board.probes().get(probe).unwrap().position, p("E1"));
    }

    #[test]
    fn travel_rejects_void_destination() {
        let mut board = SolarBoard::default();
        let probe = board.deploy_probe(1, p("D7")).unwrap();
        assert!(board.travel(probe, p("C7"), 5).is_err());
    }

    #[test]
    fn unknown_probe() {
        let board = SolarBoard::default();
        assert_eq!(
            board.reachable_from_probe(9, 2),
            Err(BoardError::UnknownProbe(9))
        );
    }

    #[test]
    fn rotation_is_seen_by_following_queries() {
        let mut board = SolarBoard::default();
        assert!(board.cell_at(p("C7")).is_none());
        board.rotate_dir(Level::ONE, Direction::Clockwise);
        assert!(board.cell_at(p("C7")).is_some());
        assert!(board.cell_at(p("C8")).is_none());
        assert_eq!(board.locate_object("mars"), Some(p("C6")));
        board.reset(Level::ONE);
        assert_eq!(board.locate_object("mars"), Some(p("C5")));
    }

    #[test]
    fn probe_left_on_a_void_cell_cannot_move() {
        let mut board = SolarBoard::default();
        let probe = board.deploy_probe(2, p("C8")).unwrap();
        board.rotate(Level::ONE, 1);
        assert!(board.reachable_from_probe(probe, 3).unwrap().is_empty());
    }

    #[test]
    fn adjacency_matches_a_shared_graph() {
        let mut board = SolarBoard::default();
        board.rotate(Level::TWO, 1);
        let graph = board.move_graph();
        let path = &board.reachable_cells(p("E3"), 4)[&p("A3")].path;
        let mut from = p("E3");
        for &step in path {
            assert!(board.are_adjacent(from, step));
            assert_eq!(board.are_adjacent(from, step), graph.are_adjacent(from, step));
            from = step;
        }
        assert!(!board.are_adjacent(p("C6"), p("C7")));
        assert!(!graph.are_adjacent(p("C6"), p("C7")));
    }
}
