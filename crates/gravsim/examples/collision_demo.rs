//! Collision detection and resolution example
//!
//! Several planets on crossing orbits around the central star, plus a black
//! hole wandering through. Bodies merge as they overlap and every merge is
//! reported as a flash.
//!
//! Run with: RUST_LOG=gravsim=debug cargo run --package gravsim --example collision_demo

use gravsim::config::SimulationConfig;
use gravsim::scenario::{central_star, circular_velocity};
use gravsim::{Body, BodyKind, Simulation, SystemState, Tag};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Collision Demo: Crossing Orbits\n");
    println!("{}", "=".repeat(60));

    let star = central_star();
    let mut system = SystemState::new();
    system.insert(star);

    let tags = [Tag::Cyan, Tag::Pink, Tag::LightBlue, Tag::Orange, Tag::White, Tag::Green];
    for (i, tag) in tags.into_iter().enumerate() {
        let a = 1.2 + (i as f64) * 0.05;
        let angle = (i as f64) * std::f64::consts::PI / 3.0;
        let (sin, cos) = angle.sin_cos();

        // Over-speed each orbit a little so the paths cross
        let v = circular_velocity(star.mass, a) * (1.0 + 0.05 * i as f64);

        system.insert(
            Body::planet(1.0, 0.05, [a * cos, a * sin], [-v * sin, v * cos]).with_tag(tag),
        );
        println!("  Planet {}: a={:.2}, tag={:?}", i, a, tag);
    }

    system.insert(Body::black_hole(20.0, 0.08, [-4.0, 0.5], [6.0, 0.0]));

    let mut sim = Simulation::with_state(SimulationConfig::default(), system)
        .expect("default config is valid");

    let initial_mass = sim.state.total_mass();
    println!("\nInitial bodies: {}", sim.state.body_count());

    let mut merges = 0;
    for _ in 0..5_000 {
        let report = sim.tick();
        for flash in report.flashes {
            merges += 1;
            println!(
                "  t={:.3}: merge into body {} (flash -> {:?}), {} bodies left",
                report.time,
                flash.body.0,
                flash.final_tag,
                sim.state.body_count()
            );
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Merges: {}", merges);
    println!("Final bodies: {}", sim.state.body_count());
    println!(
        "Mass error: {:.2e}",
        ((sim.state.total_mass() - initial_mass) / initial_mass).abs()
    );
    for body in &sim.state.bodies {
        println!(
            "  {:>3} {:<10} m={:>8.3} r={:.3} tag={:?}",
            body.id.0,
            format!("{:?}", body.kind),
            body.mass,
            body.radius,
            body.tag
        );
    }
    let holes = sim
        .state
        .bodies
        .iter()
        .filter(|b| b.kind == BodyKind::BlackHole)
        .count();
    println!("Black holes remaining: {}", holes);
}
