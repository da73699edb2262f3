//! Direct N-body gravity (O(N²) implementation)

use crate::forces::{ForceModel, G, SOFTENING};
use nalgebra::{Point2, Vector2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Direct O(N²) softened gravitational acceleration
///
/// ```text
/// a_i = G · Σ_{j≠i} m_j (p_j − p_i) / (|p_j − p_i|² + ε²)^{3/2}
/// ```
///
/// The self-term is skipped by index, so a body never pulls on itself even
/// if another body shares its exact position.
///
/// # Examples
///
/// ```
/// use gravsim::forces::{DirectGravity, ForceModel, G};
/// use nalgebra::Point2;
///
/// let gravity = DirectGravity::new();
/// let accel = gravity.accelerations(
///     &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
///     &[1.0, 1.0],
/// );
///
/// // Body 0 is pulled toward body 1 (positive x)
/// assert!(accel[0].x > 0.0);
/// assert!((accel[0].x - G).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    /// Gravitational constant
    pub g: f64,
    /// Softening length to prevent singularities (world units)
    pub softening: f64,
}

impl DirectGravity {
    /// Creates a direct gravity force with `G` and `SOFTENING`
    pub fn new() -> Self {
        Self {
            g: G,
            softening: SOFTENING,
        }
    }

    /// Creates a direct gravity force with the given softening length
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::forces::DirectGravity;
    ///
    /// let unsoftened = DirectGravity::with_softening(0.0);
    /// assert_eq!(unsoftened.softening, 0.0);
    /// ```
    pub fn with_softening(softening: f64) -> Self {
        Self {
            softening,
            ..Self::new()
        }
    }

    /// Returns a copy using a different gravitational constant
    pub fn with_constant(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    /// Acceleration on body `idx` from every other body
    fn acceleration_on(
        &self,
        idx: usize,
        positions: &[Point2<f64>],
        masses: &[f64],
    ) -> Vector2<f64> {
        let eps2 = self.softening * self.softening;
        let here = positions[idx];

        positions
            .iter()
            .zip(masses.iter())
            .enumerate()
            .filter(|(j, _)| *j != idx)
            .map(|(_, (other, &mass))| {
                let dr = other - here;
                let r2 = dr.magnitude_squared() + eps2;
                dr * (self.g * mass / (r2 * r2.sqrt()))
            })
            .fold(Vector2::zeros(), |acc, a| acc + a)
    }
}

impl Default for DirectGravity {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for DirectGravity {
    fn accelerations(&self, positions: &[Point2<f64>], masses: &[f64]) -> Vec<Vector2<f64>> {
        debug_assert_eq!(positions.len(), masses.len());

        #[cfg(feature = "parallel")]
        {
            (0..positions.len())
                .into_par_iter()
                .map(|i| self.acceleration_on(i, positions, masses))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            (0..positions.len())
                .map(|i| self.acceleration_on(i, positions, masses))
                .collect()
        }
    }

    fn potential_energy(&self, positions: &[Point2<f64>], masses: &[f64]) -> f64 {
        let eps2 = self.softening * self.softening;

        // Each pair counted once
        positions
            .iter()
            .zip(masses.iter())
            .enumerate()
            .flat_map(|(i, (pa, &ma))| {
                positions[i + 1..]
                    .iter()
                    .zip(masses[i + 1..].iter())
                    .map(move |(pb, &mb)| {
                        let r = ((pa - pb).magnitude_squared() + eps2).sqrt();
                        -self.g * ma * mb / r
                    })
            })
            .sum()
    }
}

/// Softened accelerations using `G` and `SOFTENING`
///
/// Zero bodies give an empty vector; a single body gives one zero vector.
///
/// # Examples
///
/// ```
/// use gravsim::forces::accelerations;
/// use nalgebra::{Point2, Vector2};
///
/// assert!(accelerations(&[], &[]).is_empty());
/// assert_eq!(accelerations(&[Point2::new(3.0, 4.0)], &[5.0]), vec![Vector2::zeros()]);
/// ```
pub fn accelerations(positions: &[Point2<f64>], masses: &[f64]) -> Vec<Vector2<f64>> {
    DirectGravity::new().accelerations(positions, masses)
}
