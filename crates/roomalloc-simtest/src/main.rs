//! roomalloc Headless Allocation Harness
//!
//! Validates pure allocation logic and scenario data without any front-end.
//! Runs entirely in-process: no storage, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p roomalloc-simtest
//!   cargo run -p roomalloc-simtest -- --sweep 2000 --seed 7 -v
//!   cargo run -p roomalloc-simtest -- --scenarios my_hotel.json

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use roomalloc_logic::editing::{self, EditError, EditField};
use roomalloc_logic::model::{
    is_unassigned, placed_guests, total_price, Guest, GuestAllocation, Occupancy, Room,
    RoomAllocation,
};
use roomalloc_logic::optimizer;
use roomalloc_logic::pricing::room_price;
use roomalloc_logic::validation::validate_input;

// ── Scenario file (same JSON the booking front-end sends) ───────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

#[derive(Debug, Parser)]
#[clap(about = "Headless harness for the roomalloc allocation logic")]
struct Opts {
    /// JSON scenario file. Defaults to the bundled data/scenarios.json.
    #[clap(long)]
    scenarios: Option<PathBuf>,

    /// Number of random instances in the invariant sweep.
    #[clap(long, default_value = "500")]
    sweep: usize,

    /// Seed for the invariant sweep.
    #[clap(long, default_value = "42")]
    seed: u64,

    /// Enable verbose output. Specify multiple times for more detail.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    guest: Guest,
    rooms: Vec<Room>,
    #[serde(default)]
    expected: Option<GuestAllocation>,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose)?;
    let verbose = opts.verbose > 0;

    println!("=== roomalloc Allocation Harness ===\n");

    let scenarios = load_scenarios(opts.scenarios.as_deref())?;
    let mut results = Vec::new();

    // 1. Single-room pricing
    results.extend(validate_pricing(verbose));

    // 2. Scenario file
    results.extend(validate_scenarios(&scenarios, verbose));

    // 3. Random invariant sweep
    results.extend(validate_random_sweep(opts.sweep, opts.seed, verbose));

    // 4. Manual edit rules
    results.extend(validate_editing(verbose));

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
    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let llv = match verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

fn load_scenarios(path: Option<&Path>) -> Result<Vec<Scenario>> {
    let (source, json) = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
            (path.display().to_string(), json)
        }
        None => ("bundled scenarios".to_string(), SCENARIOS_JSON.to_string()),
    };
    let scenarios: Vec<Scenario> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse {}", source))?;
    info!("loaded {} scenarios from {}", scenarios.len(), source);
    Ok(scenarios)
}

/// Structural problems with `allocation`, empty if none.
fn invariant_violations(
    guest: Guest,
    rooms: &[Room],
    allocation: &[RoomAllocation],
) -> Vec<String> {
    let mut problems = Vec::new();
    if allocation.len() != rooms.len() {
        problems.push(format!(
            "{} entries for {} rooms",
            allocation.len(),
            rooms.len()
        ));
        return problems;
    }
    if !is_unassigned(allocation) && placed_guests(allocation) != guest {
        let placed = placed_guests(allocation);
        problems.push(format!(
            "placed {}A/{}C of {}A/{}C",
            placed.adult, placed.child, guest.adult, guest.child
        ));
    }
    for (i, (room, slot)) in rooms.iter().zip(allocation).enumerate() {
        if slot.head_count() > room.capacity {
            problems.push(format!("room {} over capacity", i));
        }
        if slot.price != room_price(room, slot.occupancy()) {
            problems.push(format!("room {} mispriced ({})", i, slot.price));
        }
        if slot.child > 0 && slot.adult == 0 {
            problems.push(format!("room {} has children without an adult", i));
        }
    }
    problems
}

// ── 1. Pricing ──────────────────────────────────────────────────────────

fn validate_pricing(verbose: bool) -> Vec<TestResult> {
    println!("--- Room Pricing ---");
    let mut results = Vec::new();

    let cases = [
        ("full_formula", Room::new(1200.0, 200.0, 300.0, 10), 2400.0),
        ("flat_room_only", Room::new(1000.0, 0.0, 0.0, 10), 1000.0),
        ("child_price_only", Room::new(0.0, 0.0, 500.0, 10), 1000.0),
        ("adult_price_only", Room::new(0.0, 60.0, 0.0, 10), 180.0),
    ];
    for (name, room, expected) in cases {
        let price = room_price(&room, Occupancy::new(3, 2));
        if verbose {
            println!(
                "  {}: room {} + {}/adult + {}/child, 3A/2C → {}",
                name, room.room_price, room.adult_price, room.child_price, price
            );
        }
        results.push(TestResult {
            name: format!("pricing_{}", name),
            passed: price == expected,
            detail: format!("3A/2C → {} (expected {})", price, expected),
        });
    }

    let empty = room_price(&Room::new(1000.0, 200.0, 100.0, 4), Occupancy::new(0, 0));
    results.push(TestResult {
        name: "pricing_empty_room_free".into(),
        passed: empty == 0.0,
        detail: format!("empty room → {}", empty),
    });

    results
}

// ── 2. Scenarios ────────────────────────────────────────────────────────

fn validate_scenarios(scenarios: &[Scenario], verbose: bool) -> Vec<TestResult> {
    println!("--- Scenarios ---");
    let mut results = Vec::new();

    for scenario in scenarios {
        let errors = validate_input(scenario.guest, &scenario.rooms);
        if !errors.is_empty() {
            results.push(TestResult {
                name: format!("scenario_{}_input", scenario.name),
                passed: false,
                detail: errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            });
            continue;
        }

        let allocation = optimizer::allocate(scenario.guest, &scenario.rooms);
        let problems = invariant_violations(scenario.guest, &scenario.rooms, &allocation);
        results.push(TestResult {
            name: format!("scenario_{}_invariants", scenario.name),
            passed: problems.is_empty(),
            detail: if problems.is_empty() {
                format!("total {}", total_price(&allocation))
            } else {
                problems.join("; ")
            },
        });

        if let Some(expected) = &scenario.expected {
            results.push(TestResult {
                name: format!("scenario_{}_expected", scenario.name),
                passed: &allocation == expected,
                detail: format!("{:?}", allocation),
            });
        }

        if verbose {
            println!("  {}:", scenario.name);
            for (i, slot) in allocation.iter().enumerate() {
                println!(
                    "    room {}: {}A {}C → {}",
                    i, slot.adult, slot.child, slot.price
                );
            }
            if is_unassigned(&allocation) {
                println!("    (no allocation: guests left unassigned)");
            }
        }
    }

    results
}

// ── 3. Random sweep ─────────────────────────────────────────────────────

fn random_instance(rng: &mut StdRng) -> (Guest, Vec<Room>) {
    const ROOM_PRICES: [f64; 4] = [0.0, 100.0, 500.0, 1000.0];
    const ADULT_PRICES: [f64; 4] = [0.0, 100.0, 200.0, 500.0];
    const CHILD_PRICES: [f64; 4] = [0.0, 50.0, 100.0, 300.0];

    let room_count = rng.gen_range(1..=4);
    let rooms = (0..room_count)
        .map(|_| {
            Room::new(
                ROOM_PRICES[rng.gen_range(0..ROOM_PRICES.len())],
                ADULT_PRICES[rng.gen_range(0..ADULT_PRICES.len())],
                CHILD_PRICES[rng.gen_range(0..CHILD_PRICES.len())],
                rng.gen_range(0..=4),
            )
        })
        .collect();
    let guest = Guest::new(rng.gen_range(0..=4), rng.gen_range(0..=4));
    (guest, rooms)
}

/// Exhaustive cheapest total, `None` if no arrangement fits.
fn brute_force_min(guest: Guest, rooms: &[Room]) -> Option<f64> {
    let Some((room, rest)) = rooms.split_first() else {
        return (guest.total() == 0).then_some(0.0);
    };

    let mut best: Option<f64> = None;
    for adult in 0..=guest.adult.min(room.capacity) {
        let max_child = if adult == 0 {
            0
        } else {
            guest.child.min(room.capacity - adult)
        };
        for child in 0..=max_child {
            let remaining = Guest::new(guest.adult - adult, guest.child - child);
            if let Some(rest_price) = brute_force_min(remaining, rest) {
                let price = room_price(room, Occupancy::new(adult, child)) + rest_price;
                best = Some(best.map_or(price, |b| b.min(price)));
            }
        }
    }
    best
}

fn validate_random_sweep(count: usize, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Random Sweep ({} instances, seed {}) ---", count, seed);
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut violations = 0;
    let mut nondeterministic = 0;
    let mut below_optimum = 0;
    let mut false_feasible = 0;
    let mut above_optimum = 0;
    let mut missed_feasible = 0;
    let mut shrink_checks = 0;
    let mut shrink_cheaper = 0;

    for i in 0..count {
        let (guest, rooms) = random_instance(&mut rng);
        let allocation = optimizer::allocate(guest, &rooms);

        let problems = invariant_violations(guest, &rooms, &allocation);
        if !problems.is_empty() {
            violations += 1;
            warn!("instance {}: {}", i, problems.join("; "));
        }
        if optimizer::allocate(guest, &rooms) != allocation {
            nondeterministic += 1;
        }

        let placed_anyone = !is_unassigned(&allocation);
        let total = total_price(&allocation);
        match brute_force_min(guest, &rooms) {
            Some(best) if placed_anyone => {
                if total < best {
                    below_optimum += 1;
                } else if total > best {
                    above_optimum += 1;
                    debug!("instance {}: heuristic {} vs optimum {}", i, total, best);
                }
            }
            Some(_) if guest.total() > 0 => missed_feasible += 1,
            Some(_) => {}
            None if placed_anyone => false_feasible += 1,
            None => {}
        }

        // Squeeze each occupied room below its load and rerun.
        for (r, slot) in allocation.iter().enumerate() {
            if slot.head_count() == 0 {
                continue;
            }
            let mut shrunk = rooms.clone();
            shrunk[r].capacity = slot.head_count() - 1;
            let rerun = optimizer::allocate(guest, &shrunk);
            shrink_checks += 1;
            if !is_unassigned(&rerun) && total_price(&rerun) < total {
                shrink_cheaper += 1;
                debug!(
                    "instance {}: shrinking room {} lowered total {} → {}",
                    i,
                    r,
                    total,
                    total_price(&rerun)
                );
            }
        }
    }

    results.push(TestResult {
        name: "sweep_invariants".into(),
        passed: violations == 0,
        detail: format!("{} of {} instances broke an invariant", violations, count),
    });
    results.push(TestResult {
        name: "sweep_deterministic".into(),
        passed: nondeterministic == 0,
        detail: format!("{} of {} instances differed on rerun", nondeterministic, count),
    });
    results.push(TestResult {
        name: "sweep_never_beats_optimum".into(),
        passed: below_optimum == 0,
        detail: format!("{} instances cheaper than exhaustive search", below_optimum),
    });
    results.push(TestResult {
        name: "sweep_no_false_feasible".into(),
        passed: false_feasible == 0,
        detail: format!("{} infeasible instances got an allocation", false_feasible),
    });

    info!(
        "heuristic gap: {} of {} above optimum, {} feasible left unassigned",
        above_optimum, count, missed_feasible
    );
    info!(
        "capacity shrink: {} of {} reruns came out cheaper",
        shrink_cheaper, shrink_checks
    );

    if verbose {
        println!("  Sweep breakdown:");
        println!("    above optimum:          {}", above_optimum);
        println!("    feasible but unplaced:  {}", missed_feasible);
        println!("    cheaper after shrink:   {}/{}", shrink_cheaper, shrink_checks);
    }

    results
}

// ── 4. Manual edits ─────────────────────────────────────────────────────

fn validate_editing(verbose: bool) -> Vec<TestResult> {
    println!("--- Manual Edits ---");
    let mut results = Vec::new();

    let guest = Guest::new(3, 5);
    let rooms = vec![
        Room::new(0.0, 1000.0, 300.0, 5),
        Room::new(150.0, 500.0, 20.0, 5),
        Room::new(1000.0, 100.0, 10.0, 6),
    ];
    let mut allocation = optimizer::allocate(guest, &rooms);
    let untouched = allocation[2];

    let moved = editing::apply_edit(guest, &rooms, &mut allocation, 1, EditField::Child, 0);
    results.push(TestResult {
        name: "edit_reprices_room".into(),
        passed: moved.is_ok() && allocation[1] == RoomAllocation::new(1, 0, 650.0),
        detail: format!("room 1 → {:?}", allocation[1]),
    });
    results.push(TestResult {
        name: "edit_leaves_other_rooms".into(),
        passed: allocation[2] == untouched,
        detail: format!("room 2 → {:?}", allocation[2]),
    });

    let left = editing::unassigned(guest, &allocation);
    results.push(TestResult {
        name: "edit_tracks_unassigned".into(),
        passed: left == Guest::new(0, 1),
        detail: format!("{} adults, {} children unassigned", left.adult, left.child),
    });

    let lone_child = editing::apply_edit(guest, &rooms, &mut allocation, 0, EditField::Child, 1);
    results.push(TestResult {
        name: "edit_rejects_lone_child".into(),
        passed: matches!(lone_child, Err(EditError::Disabled { .. })),
        detail: format!("{:?}", lone_child),
    });

    let overfull = editing::apply_edit(guest, &rooms, &mut allocation, 2, EditField::Child, 5);
    results.push(TestResult {
        name: "edit_rejects_over_capacity".into(),
        passed: matches!(overfull, Err(EditError::OutOfLimits { .. })),
        detail: format!("{:?}", overfull),
    });

    if verbose {
        println!("  Edit limits after moving one child out of room 1:");
        for (i, slot) in allocation.iter().enumerate() {
            let adult = editing::edit_limits(guest, &rooms, &allocation, i, EditField::Adult);
            let child = editing::edit_limits(guest, &rooms, &allocation, i, EditField::Child);
            if let (Ok(adult), Ok(child)) = (adult, child) {
                println!(
                    "    room {}: {}A {}C, adults {}..={}, children {}",
                    i,
                    slot.adult,
                    slot.child,
                    adult.min,
                    adult.max,
                    if child.enabled {
                        format!("{}..={}", child.min, child.max)
                    } else {
                        "locked (no adult)".to_string()
                    }
                );
            }
        }
    }

    results
}
