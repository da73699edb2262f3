//! Supernova example
//!
//! Builds the default system, explodes the central star and follows the
//! debris for a while.
//!
//! Run with: RUST_LOG=gravsim=info cargo run --package gravsim --example supernova_demo

use gravsim::config::SimulationConfig;
use gravsim::{BodyKind, Simulation};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Supernova Demo\n");
    println!("{}", "=".repeat(60));

    let config = SimulationConfig {
        seed: Some(2024),
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).expect("default config is valid");

    sim.run(200);
    println!("Bodies before explosion: {}", sim.state.body_count());

    let ids = sim.explode_heaviest_star();
    if ids.is_empty() {
        println!("No star heavy enough to explode");
        return;
    }

    if let Some(remnant) = ids.last().and_then(|id| sim.state.get_body(*id)) {
        let kind = match remnant.kind {
            BodyKind::BlackHole => "black hole",
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
        };
        println!(
            "Explosion: {} fragments, remnant is a {} of mass {:.1}",
            ids.len() - 1,
            kind,
            remnant.mass
        );
    }

    let e0 = sim.total_energy();
    for _ in 0..5 {
        let merges = sim.run(400).len();
        println!(
            "  t={:.2}: {} bodies, {} merges",
            sim.state.time,
            sim.state.body_count(),
            merges
        );
    }
    println!("Energy change since explosion: {:.2e}", sim.total_energy() - e0);
}
