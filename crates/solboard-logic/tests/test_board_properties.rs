//! Property tests for rotation, position mapping and reachability.
//!
//! Runs against the standard board with arbitrary platform rotations.

use proptest::prelude::*;

use solboard_logic::board::{Disk, Level, Position, Sector};
use solboard_logic::catalog::Catalog;
use solboard_logic::reachability::MoveGraph;
use solboard_logic::resolver::{absolute_to_relative, is_open, relative_to_absolute};
use solboard_logic::rotation::RotationState;

// ── Strategies ─────────────────────────────────────────────────────────

fn sector() -> impl Strategy<Value = Sector> {
    (1u8..=8).prop_map(|n| Sector::new(n).unwrap())
}

fn position() -> impl Strategy<Value = Position> {
    (0usize..5, sector()).prop_map(|(d, s)| Position::new(Disk::ALL[d], s))
}

fn rotating_level() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ROTATING.to_vec())
}

fn rotation() -> impl Strategy<Value = RotationState> {
    prop::collection::vec((rotating_level(), -8i32..=8), 0..6).prop_map(|turns| {
        let mut r = RotationState::new();
        for (level, steps) in turns {
            r.rotate(level, steps);
        }
        r
    })
}

fn totals(r: &RotationState) -> [i32; 4] {
    [
        r.total_rotation(Level::FIXED),
        r.total_rotation(Level::ONE),
        r.total_rotation(Level::TWO),
        r.total_rotation(Level::THREE),
    ]
}

proptest! {
    // ── Rotation ───────────────────────────────────────────────────────

    #[test]
    fn rotate_then_unrotate_restores_totals(
        start in rotation(),
        level in rotating_level(),
        n in -20i32..=20,
    ) {
        let mut r = start;
        r.rotate(level, n);
        r.rotate(level, -n);
        prop_assert_eq!(totals(&r), totals(&start));
    }

    #[test]
    fn level_one_rotation_compounds(start in rotation(), n in -8i32..=8) {
        let mut r = start;
        r.rotate(Level::ONE, n);
        for level in Level::ROTATING {
            let delta = (r.total_rotation(level) - start.total_rotation(level)).rem_euclid(360);
            prop_assert_eq!(delta, (n * 45).rem_euclid(360));
        }
    }

    #[test]
    fn level_three_rotation_is_local(start in rotation(), n in -8i32..=8) {
        let mut r = start;
        r.rotate(Level::THREE, n);
        prop_assert_eq!(r.total_rotation(Level::ONE), start.total_rotation(Level::ONE));
        prop_assert_eq!(r.total_rotation(Level::TWO), start.total_rotation(Level::TWO));
    }

    // ── Resolver ───────────────────────────────────────────────────────

    #[test]
    fn resolver_inverse_law(s in sector(), steps in -40i32..=40) {
        let degrees = steps * 45;
        let abs = relative_to_absolute(s, degrees).unwrap();
        prop_assert_eq!(absolute_to_relative(abs, degrees).unwrap(), s);
    }

    #[test]
    fn misaligned_degrees_are_rejected(s in sector(), degrees in -1000i32..=1000) {
        prop_assume!(degrees % 45 != 0);
        prop_assert!(relative_to_absolute(s, degrees).is_err());
    }

    // ── Reachability ───────────────────────────────────────────────────

    #[test]
    fn zero_budget_is_always_empty(r in rotation(), start in position()) {
        let graph = MoveGraph::from_board(&Catalog::standard(), &r);
        prop_assert!(graph.reachable(start, 0).is_empty());
    }

    #[test]
    fn larger_budget_reaches_a_superset(
        r in rotation(),
        start in position(),
        budget in 0u32..8,
    ) {
        let graph = MoveGraph::from_board(&Catalog::standard(), &r);
        let small = graph.reachable(start, budget);
        let large = graph.reachable(start, budget + 1);
        for (cell, entry) in &small {
            prop_assert_eq!(large.get(cell).map(|e| e.movements), Some(entry.movements));
        }
    }

    #[test]
    fn void_cells_never_appear(r in rotation(), start in position(), budget in 1u32..10) {
        let catalog = Catalog::standard();
        let map = MoveGraph::from_board(&catalog, &r).reachable(start, budget);
        for (cell, entry) in &map {
            prop_assert!(is_open(&catalog, *cell, &r));
            for hop in &entry.path {
                prop_assert!(is_open(&catalog, *hop, &r));
            }
        }
    }

    #[test]
    fn paths_replay_to_their_cell(r in rotation(), start in position(), budget in 1u32..10) {
        let graph = MoveGraph::from_board(&Catalog::standard(), &r);
        let map = graph.reachable(start, budget);
        prop_assert!(!map.contains_key(&start));
        for (cell, entry) in &map {
            prop_assert!(entry.movements >= 1 && entry.movements <= budget);
            prop_assert_eq!(entry.path.len() as u32, entry.movements);
            prop_assert_eq!(entry.path.last(), Some(cell));
            let mut here = start;
            for &hop in &entry.path {
                prop_assert!(graph.are_adjacent(here, hop), "{} -> {}", here, hop);
                here = hop;
            }
        }
    }
}
