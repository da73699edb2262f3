//! Time integration for N-body systems
//!
//! The integrator is velocity Verlet (the kick-drift-kick form of leapfrog),
//! which keeps energy bounded and conserves angular momentum over long runs.
//! Every step reads one snapshot and writes a fresh one, so no body's update
//! can see another body's already-advanced state.

use crate::body::Body;
use crate::forces::{DirectGravity, ForceModel};
use crate::state::SystemState;
use nalgebra::{Point2, Vector2};
use tracing::trace;

/// A time integrator for N-body systems
pub trait Integrator: Send + Sync {
    /// Advance a body snapshot by one timestep
    ///
    /// # Arguments
    ///
    /// * `bodies` - Current snapshot (left untouched)
    /// * `dt` - Timestep
    /// * `force` - Force model to compute accelerations
    ///
    /// # Returns
    ///
    /// The advanced snapshot, same order and ids as the input
    fn advance(&self, bodies: &[Body], dt: f64, force: &dyn ForceModel) -> Vec<Body>;

    /// Advance the system state by one timestep
    fn step(&self, state: &mut SystemState, dt: f64, force: &dyn ForceModel) {
        state.bodies = self.advance(&state.bodies, dt, force);
        state.time += dt;
    }

    /// Advance the system by multiple timesteps
    ///
    /// # Returns
    ///
    /// Final time after integration
    fn integrate(
        &self,
        state: &mut SystemState,
        dt: f64,
        n_steps: usize,
        force: &dyn ForceModel,
    ) -> f64 {
        for _ in 0..n_steps {
            self.step(state, dt, force);
        }
        state.time
    }
}

/// Velocity-Verlet integrator (2nd order, symplectic)
///
/// 1. a(t) from current positions
/// 2. Kick: v(t + dt/2) = v(t) + a(t) * dt/2
/// 3. Drift: x(t + dt) = x(t) + v(t + dt/2) * dt
/// 4. a(t + dt) from the drifted positions
/// 5. Kick: v(t + dt) = v(t + dt/2) + a(t + dt) * dt/2
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::forces::DirectGravity;
/// use gravsim::integrator::{Integrator, VelocityVerlet};
/// use gravsim::state::SystemState;
///
/// let mut system = SystemState::from_bodies([
///     Body::star(50.0, 0.2, [0.0, 0.0], [0.0, 0.0]),
///     Body::planet(1.0, 0.05, [1.0, 0.0], [0.0, 22.0]),
/// ]);
///
/// VelocityVerlet.step(&mut system, 1e-3, &DirectGravity::new());
/// assert!(system.time > 0.0);
/// assert!(system.bodies[1].position.y > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityVerlet;

impl VelocityVerlet {
    /// Half-step kick over a whole velocity buffer
    fn kick(
        velocities: &[Vector2<f64>],
        accelerations: &[Vector2<f64>],
        dt_half: f64,
    ) -> Vec<Vector2<f64>> {
        velocities
            .iter()
            .zip(accelerations.iter())
            .map(|(v, a)| v + a * dt_half)
            .collect()
    }
}

impl Integrator for VelocityVerlet {
    fn advance(&self, bodies: &[Body], dt: f64, force: &dyn ForceModel) -> Vec<Body> {
        if bodies.is_empty() {
            return Vec::new();
        }

        let masses: Vec<f64> = bodies.iter().map(|b| b.mass).collect();
        let positions: Vec<Point2<f64>> = bodies.iter().map(|b| b.position).collect();
        let velocities: Vec<Vector2<f64>> = bodies.iter().map(|b| b.velocity).collect();
        let dt_half = 0.5 * dt;

        let accel = force.accelerations(&positions, &masses);
        let v_half = Self::kick(&velocities, &accel, dt_half);

        let drifted: Vec<Point2<f64>> = positions
            .iter()
            .zip(v_half.iter())
            .map(|(p, v)| p + v * dt)
            .collect();

        let accel_new = force.accelerations(&drifted, &masses);
        let v_new = Self::kick(&v_half, &accel_new, dt_half);

        trace!(bodies = bodies.len(), dt, "velocity verlet step");

        bodies
            .iter()
            .zip(drifted)
            .zip(v_new)
            .map(|((body, position), velocity)| Body {
                position,
                velocity,
                ..*body
            })
            .collect()
    }
}

/// One velocity-Verlet step under default gravity
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::integrator::step;
///
/// assert!(step(&[], 0.01).is_empty());
///
/// // A lone body coasts in a straight line
/// let moved = step(&[Body::planet(1.0, 0.05, [0.0, 0.0], [2.0, 0.0])], 0.5);
/// assert_eq!(moved[0].position.x, 1.0);
/// ```
pub fn step(bodies: &[Body], dt: f64) -> Vec<Body> {
    VelocityVerlet.advance(bodies, dt, &DirectGravity::new())
}
