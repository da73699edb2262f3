//! Simple orbital integration example
//!
//! A light planet on a circular orbit around the stock central star,
//! showing how well velocity Verlet conserves energy and angular momentum.
//!
//! Run with: cargo run --package gravsim --example simple_orbit

use gravsim::Body;
use gravsim::forces::{DirectGravity, ForceModel};
use gravsim::integrator::{Integrator, VelocityVerlet};
use gravsim::scenario::{central_star, circular_velocity};
use gravsim::state::SystemState;

fn total_energy(system: &SystemState, force: &DirectGravity) -> f64 {
    system.kinetic_energy() + force.potential_energy(&system.positions(), &system.masses())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Velocity Verlet: Single Planet Orbit\n");
    println!("{}", "=".repeat(60));

    let star = central_star();
    let r = 2.0;
    let v_circular = circular_velocity(star.mass, r);

    let mut system = SystemState::new();
    system.insert(star);
    system.insert(Body::planet(1e-6, 0.05, [r, 0.0], [0.0, v_circular]));

    println!("\nInitial conditions:");
    println!("  Star mass: {:.1}", star.mass);
    println!("  Orbital radius: {:.3}", r);
    println!("  Circular velocity: {:.3}", v_circular);

    let integrator = VelocityVerlet;
    let force = DirectGravity::new();

    let initial_energy = total_energy(&system, &force);
    let initial_l = system.total_angular_momentum();

    let orbital_period = 2.0 * std::f64::consts::PI * r / v_circular;
    let steps_per_orbit = (orbital_period / 1e-3).ceil() as usize;
    let dt = orbital_period / steps_per_orbit as f64;
    let n_orbits = 10;

    println!("\nIntegration parameters:");
    println!("  Timestep: {:.6} ({} steps/orbit)", dt, steps_per_orbit);
    println!("  Orbits: {}", n_orbits);

    for orbit in 1..=n_orbits {
        integrator.integrate(&mut system, dt, steps_per_orbit, &force);

        let planet = &system.bodies[1];
        let r_current = planet.distance_to(&system.bodies[0]);
        let energy = total_energy(&system, &force);
        let energy_error = ((energy - initial_energy) / initial_energy).abs();
        let l_error = ((system.total_angular_momentum() - initial_l) / initial_l).abs();

        println!(
            "Orbit {}: r={:.6}, ΔE={:.2e}, ΔL={:.2e}, Δr={:.2e}",
            orbit,
            r_current,
            energy_error,
            l_error,
            ((r_current - r) / r).abs()
        );
    }

    let planet = &system.bodies[1];
    println!("\n{}", "=".repeat(60));
    println!("Final position: ({:.6}, {:.6})", planet.position.x, planet.position.y);
    println!("Time: {:.3} ({:.1} orbits)", system.time, system.time / orbital_period);
}
