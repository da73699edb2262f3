//! Force models for N-body simulations
//!
//! This module provides the `ForceModel` trait and the direct softened
//! gravity used by the integrator.

use nalgebra::{Point2, Vector2};

pub mod gravity;


pub use gravity::{DirectGravity, accelerations};

/// Gravitational constant in simulation units
///
/// A stylized value, not calibrated to any physical unit system.
pub const G: f64 = 9.8;

/// Default softening length ε (world units)
pub const SOFTENING: f64 = 1e-3;

/// A source of acceleration on bodies in an N-body system
///
/// Force models work on plain position/mass snapshots so that the
/// integrator can evaluate them on predicted positions without building
/// intermediate bodies.
///
/// # Examples
///
/// ```
/// use gravsim::forces::{DirectGravity, ForceModel};
/// use nalgebra::Point2;
///
/// let positions = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
/// let masses = [10.0, 1.0];
///
/// let accel = DirectGravity::new().accelerations(&positions, &masses);
/// assert!(accel[1].x < 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Compute the acceleration of every body
    ///
    /// # Arguments
    ///
    /// * `positions` - Body positions
    /// * `masses` - Body masses, same length and order as `positions`
    ///
    /// # Returns
    ///
    /// One acceleration per body, in input order
    fn accelerations(&self, positions: &[Point2<f64>], masses: &[f64]) -> Vec<Vector2<f64>>;

    /// Compute total potential energy (optional)
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _positions: &[Point2<f64>], _masses: &[f64]) -> f64 {
        0.0
    }
}
