//! Solar Board Headless Harness
//!
//! Sweeps platform rotations over a board and checks the position and
//! reachability invariants. Runs entirely in-process, no rendering.
//!
//! Usage:
//!   cargo run -p solboard-simtest
//!   cargo run -p solboard-simtest -- --verbose
//!   cargo run -p solboard-simtest -- --board my_board.json
//!   cargo run -p solboard-simtest -- --dump-board > standard.json

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use solboard_logic::board::{Disk, Level, Position, Sector};
use solboard_logic::catalog::{BoardDefinition, Catalog};
use solboard_logic::reachability::MoveGraph;
use solboard_logic::resolver::{self, absolute_to_relative, relative_to_absolute};
use solboard_logic::rotation::RotationState;

const SWEEP_SEED: u64 = 0x5e71;
const SWEEP_ROUNDS: usize = 200;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");

    if args.iter().any(|a| a == "--dump-board") {
        match serde_json::to_string_pretty(&Catalog::standard().to_definition()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("failed to serialize board: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let board_path = args
        .iter()
        .position(|a| a == "--board")
        .and_then(|i| args.get(i + 1));
    let catalog = match board_path {
        Some(path) => match load_board(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("cannot load board {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Catalog::standard(),
    };

    println!("=== Solar Board Harness ===\n");
    log::info!("board has {} catalog entries", catalog.len());

    let mut results = Vec::new();

    // 1. Catalog shape
    results.extend(validate_catalog(&catalog, verbose));

    // 2. Rotation compounding
    results.extend(validate_rotation(verbose));

    // 3. Resolver arithmetic
    results.extend(validate_resolver(&catalog, verbose));

    // 4. Reachability under random rotations
    results.extend(validate_reachability(&catalog, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_board(path: &str) -> Result<Catalog, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let definition: BoardDefinition = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    Catalog::from_definition(definition).map_err(|e| e.to_string())
}

fn random_rotation(rng: &mut StdRng) -> RotationState {
    let mut r = RotationState::new();
    for level in Level::ROTATING {
        r.rotate(level, rng.gen_range(-8..=8));
    }
    r
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(catalog: &Catalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Catalog ---");
    let mut results = Vec::new();

    let named = catalog.named_objects().count();
    results.push(TestResult {
        name: "catalog_has_objects".into(),
        passed: named > 0,
        detail: format!("{} named objects, {} entries", named, catalog.len()),
    });

    let platform_on_fixed_disk: Vec<_> = catalog
        .iter()
        .filter(|o| !o.level.is_fixed() && o.position.disk.is_fixed())
        .collect();
    results.push(TestResult {
        name: "catalog_fixed_disks_fixed".into(),
        passed: platform_on_fixed_disk.is_empty(),
        detail: format!(
            "{} platform entries on disks D/E",
            platform_on_fixed_disk.len()
        ),
    });

    for disk in Disk::ALL {
        let levels: Vec<String> = catalog
            .levels_covering(disk)
            .map(|l| format!("{}({} cells)", l, catalog.cell_count(l, disk)))
            .collect();
        if verbose {
            println!("  disk {}: {}", disk, levels.join(" over "));
        }
    }

    results
}

// ── 2. Rotation ─────────────────────────────────────────────────────────

fn validate_rotation(_verbose: bool) -> Vec<TestResult> {
    println!("--- Rotation ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(SWEEP_SEED);

    let mut round_trip_failures = 0;
    let mut compound_failures = 0;
    for _ in 0..SWEEP_ROUNDS {
        let start = random_rotation(&mut rng);
        let n = rng.gen_range(-12..=12);

        for level in Level::ROTATING {
            let mut r = start;
            r.rotate(level, n);
            r.rotate(level, -n);
            if Level::TOP_DOWN
                .iter()
                .any(|&l| r.total_rotation(l) != start.total_rotation(l))
            {
                round_trip_failures += 1;
            }
        }

        let mut r = start;
        r.rotate(Level::ONE, n);
        let expected = (n * 45).rem_euclid(360);
        let carried = Level::ROTATING.iter().all(|&l| {
            (r.total_rotation(l) - start.total_rotation(l)).rem_euclid(360) == expected
        });
        if !carried {
            compound_failures += 1;
        }
    }

    results.push(TestResult {
        name: "rotation_round_trip".into(),
        passed: round_trip_failures == 0,
        detail: format!("{} failures in {} rounds", round_trip_failures, SWEEP_ROUNDS),
    });
    results.push(TestResult {
        name: "rotation_level_one_carries".into(),
        passed: compound_failures == 0,
        detail: format!("{} failures in {} rounds", compound_failures, SWEEP_ROUNDS),
    });

    let mut r = RotationState::new();
    r.rotate(Level::ONE, 1);
    r.reset(Level::ONE);
    results.push(TestResult {
        name: "rotation_reset_keeps_carry".into(),
        passed: r.total_rotation(Level::ONE) == 0 && r.total_rotation(Level::THREE) == 45,
        detail: format!(
            "after reset: L1={} L3={}",
            r.total_rotation(Level::ONE),
            r.total_rotation(Level::THREE)
        ),
    });

    results
}

// ── 3. Resolver ─────────────────────────────────────────────────────────

fn validate_resolver(catalog: &Catalog, _verbose: bool) -> Vec<TestResult> {
    println!("--- Resolver ---");
    let mut results = Vec::new();

    let mut inverse_failures = 0;
    for steps in -16..=16 {
        let degrees = steps * 45;
        for sector in Sector::all() {
            let back = relative_to_absolute(sector, degrees)
                .and_then(|abs| absolute_to_relative(abs, degrees));
            if back != Ok(sector) {
                inverse_failures += 1;
            }
        }
    }
    results.push(TestResult {
        name: "resolver_inverse_law".into(),
        passed: inverse_failures == 0,
        detail: format!("{} failures over 33 rotations", inverse_failures),
    });

    results.push(TestResult {
        name: "resolver_rejects_misaligned".into(),
        passed: relative_to_absolute(Sector::ONE, 30).is_err(),
        detail: "30 degrees is a contract error".into(),
    });

    let mut rng = StdRng::seed_from_u64(SWEEP_SEED ^ 1);
    let mut locate_failures = 0;
    for _ in 0..SWEEP_ROUNDS {
        let rotation = random_rotation(&mut rng);
        for obj in catalog.named_objects() {
            let expected = relative_to_absolute(
                obj.position.sector,
                rotation.total_rotation(obj.level),
            )
            .map(|s| Position::new(obj.position.disk, s));
            if resolver::locate(catalog, &obj.id, &rotation) != expected.ok() {
                locate_failures += 1;
            }
        }
    }
    results.push(TestResult {
        name: "resolver_locate_matches_rotation".into(),
        passed: locate_failures == 0,
        detail: format!("{} mismatches", locate_failures),
    });

    results
}

// ── 4. Reachability ─────────────────────────────────────────────────────

fn validate_reachability(catalog: &Catalog, verbose: bool) -> Vec<TestResult> {
    println!("--- Reachability ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(SWEEP_SEED ^ 2);

    let mut zero_budget_failures = 0;
    let mut monotonic_failures = 0;
    let mut void_failures = 0;
    let mut path_failures = 0;
    let mut queries = 0;

    for _ in 0..SWEEP_ROUNDS {
        let rotation = random_rotation(&mut rng);
        let graph = MoveGraph::from_board(catalog, &rotation);
        let start = Position::new(
            Disk::ALL[rng.gen_range(0..Disk::ALL.len())],
            Sector::all()
                .nth(rng.gen_range(0..8))
                .unwrap_or(Sector::ONE),
        );
        let budget = rng.gen_range(1..=6);
        queries += 1;

        if !graph.reachable(start, 0).is_empty() {
            zero_budget_failures += 1;
        }

        let small = graph.reachable(start, budget);
        let large = graph.reachable(start, budget + 1);
        if small.keys().any(|k| !large.contains_key(k)) {
            monotonic_failures += 1;
        }

        for (cell, entry) in &small {
            if !resolver::is_open(catalog, *cell, &rotation)
                || entry
                    .path
                    .iter()
                    .any(|hop| !resolver::is_open(catalog, *hop, &rotation))
            {
                void_failures += 1;
            }

            let mut here = start;
            let mut ok = entry.path.len() as u32 == entry.movements;
            for &hop in &entry.path {
                ok &= graph.are_adjacent(here, hop);
                here = hop;
            }
            if !ok || here != *cell {
                path_failures += 1;
            }
        }

        if verbose && queries <= 3 {
            println!(
                "  {} budget {} → {} cells ({} open on board)",
                start,
                budget,
                small.len(),
                graph.cell_count()
            );
        }
    }

    results.push(TestResult {
        name: "reach_zero_budget".into(),
        passed: zero_budget_failures == 0,
        detail: format!("{} non-empty results", zero_budget_failures),
    });
    results.push(TestResult {
        name: "reach_monotonic".into(),
        passed: monotonic_failures == 0,
        detail: format!("{} of {} queries shrank", monotonic_failures, queries),
    });
    results.push(TestResult {
        name: "reach_no_void_cells".into(),
        passed: void_failures == 0,
        detail: format!("{} entries touch a void cell", void_failures),
    });
    results.push(TestResult {
        name: "reach_paths_replay".into(),
        passed: path_failures == 0,
        detail: format!("{} paths failed to replay", path_failures),
    });

    results
}
