//! Supernova fragmentation
//!
//! Turns one massive body into a spray of small planet fragments plus a
//! single compact remnant. The caller decides which body explodes and when;
//! the engine only checks the mass threshold.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::body::{Body, BodyId, BodyKind, Tag};
use crate::error::{Error, Result};
use crate::state::SystemState;
use nalgebra::Vector2;

/// Minimum mass for a body to explode
pub const SUPERNOVA_MASS_THRESHOLD: f64 = 20.0;

/// Palette fragments draw their tag from
pub const FRAGMENT_TAGS: [Tag; 4] = [Tag::Orange, Tag::Red, Tag::Yellow, Tag::White];

/// Tunables for an explosion
///
/// Ranges are half-open `[min, max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupernovaConfig {
    pub mass_threshold: f64,
    pub min_fragments: usize,
    pub max_fragments: usize,
    pub fragment_mass_min: f64,
    pub fragment_mass_max: f64,
    /// Half-width of the per-axis velocity perturbation
    pub velocity_spread: f64,
    /// Half-width of the per-axis position offset
    pub position_spread: f64,
    pub fragment_radius_floor: f64,
    /// Fragment radius is `sqrt(mass) * fragment_radius_scale`, floored
    pub fragment_radius_scale: f64,
    pub black_hole_probability: f64,
    pub black_hole_mass_fraction: f64,
    pub black_hole_radius_fraction: f64,
    pub black_hole_radius_floor: f64,
    pub star_mass_fraction: f64,
    pub star_radius_fraction: f64,
    pub star_radius_floor: f64,
}

impl Default for SupernovaConfig {
    fn default() -> Self {
        Self {
            mass_threshold: SUPERNOVA_MASS_THRESHOLD,
            min_fragments: 6,
            max_fragments: 12,
            fragment_mass_min: 0.05,
            fragment_mass_max: 1.5,
            velocity_spread: 2.0,
            position_spread: 0.5,
            fragment_radius_floor: 0.02,
            fragment_radius_scale: 0.03,
            black_hole_probability: 0.75,
            black_hole_mass_fraction: 0.4,
            black_hole_radius_fraction: 0.6,
            black_hole_radius_floor: 0.05,
            star_mass_fraction: 0.2,
            star_radius_fraction: 0.5,
            star_radius_floor: 0.04,
        }
    }
}

impl SupernovaConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_fragments >= self.max_fragments {
            return Err(Error::InvalidParam(format!(
                "fragment count range [{}, {}) is empty",
                self.min_fragments, self.max_fragments
            )));
        }
        if !(self.fragment_mass_min > 0.0
            && self.fragment_mass_min < self.fragment_mass_max
            && self.fragment_mass_max.is_finite())
        {
            return Err(Error::InvalidParam(format!(
                "fragment mass range [{}, {}) is invalid",
                self.fragment_mass_min, self.fragment_mass_max
            )));
        }
        // Sampling spans [-spread, spread), so its width must stay finite
        let spread_ok = |s: f64| s > 0.0 && (2.0 * s).is_finite();
        if !(spread_ok(self.velocity_spread) && spread_ok(self.position_spread)) {
            return Err(Error::InvalidParam(format!(
                "spreads must be > 0 and finite, got velocity {} and position {}",
                self.velocity_spread, self.position_spread
            )));
        }
        if !(0.0..=1.0).contains(&self.black_hole_probability) {
            return Err(Error::InvalidParam(format!(
                "black_hole_probability must be within [0, 1], got {}",
                self.black_hole_probability
            )));
        }
        let positive = [
            self.mass_threshold,
            self.fragment_radius_floor,
            self.fragment_radius_scale,
            self.black_hole_mass_fraction,
            self.black_hole_radius_fraction,
            self.black_hole_radius_floor,
            self.star_mass_fraction,
            self.star_radius_fraction,
            self.star_radius_floor,
        ];
        if !positive.iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(Error::InvalidParam(
                "supernova masses, fractions and radii must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Supernova engine
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::state::SystemState;
/// use gravsim::supernova::Supernova;
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
///
/// let mut rng = ChaChaRng::seed_from_u64(42);
/// let mut system = SystemState::new();
/// let id = system.insert(Body::star(25.0, 0.2, [0.0, 0.0], [0.0, 0.0]));
/// let target = *system.get_body(id).unwrap();
///
/// let debris = Supernova::default().explode(&mut system, &target, &mut rng);
///
/// assert!((7..=12).contains(&debris.len()));
/// assert!(system.get_body(id).is_none());
///
/// system.extend(debris);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Supernova {
    pub config: SupernovaConfig,
}

impl Supernova {
    pub fn new(config: SupernovaConfig) -> Self {
        Self { config }
    }

    /// Explode `target`, removing it from `state`
    ///
    /// Below the mass threshold nothing happens and an empty vector comes
    /// back. Otherwise the target is removed (a target that is already gone
    /// is not an error) and the fragments plus remnant are returned, last
    /// element the remnant. They carry ids reserved in `state` but are not
    /// inserted; pass them to `SystemState::extend`, which keeps the ids and
    /// clears the reservations. Debris that is discarded instead should have
    /// its ids handed to `SystemState::release`.
    ///
    /// # Arguments
    ///
    /// * `state` - System the target lives in
    /// * `target` - Snapshot of the body to explode
    /// * `rng` - Source of randomness
    pub fn explode<R: Rng>(
        &self,
        state: &mut SystemState,
        target: &Body,
        rng: &mut R,
    ) -> Vec<Body> {
        let cfg = &self.config;
        if target.mass < cfg.mass_threshold {
            debug!(
                target = target.id.0,
                mass = target.mass,
                threshold = cfg.mass_threshold,
                "supernova skipped below threshold"
            );
            return Vec::new();
        }

        if state.remove_body(target.id).is_none() {
            debug!(target = target.id.0, "supernova target already removed");
        }

        let n_fragments = rng.random_range(cfg.min_fragments..cfg.max_fragments);
        let mut debris: Vec<Body> = (0..n_fragments)
            .map(|_| self.fragment(target, state.allocate_id(), rng))
            .collect();

        let remnant = self.remnant(target, state.allocate_id(), rng);
        info!(
            target = target.id.0,
            mass = target.mass,
            fragments = n_fragments,
            remnant = ?remnant.kind,
            remnant_mass = remnant.mass,
            "supernova"
        );
        debris.push(remnant);

        debris
    }

    fn fragment<R: Rng>(&self, target: &Body, id: BodyId, rng: &mut R) -> Body {
        let cfg = &self.config;
        let mass = rng.random_range(cfg.fragment_mass_min..cfg.fragment_mass_max);

        let dv = cfg.velocity_spread;
        let kick = Vector2::new(rng.random_range(-dv..dv), rng.random_range(-dv..dv));

        let dp = cfg.position_spread;
        let offset = Vector2::new(rng.random_range(-dp..dp), rng.random_range(-dp..dp));

        let tag = FRAGMENT_TAGS[rng.random_range(0..FRAGMENT_TAGS.len())];

        Body {
            id,
            kind: BodyKind::Planet,
            tag,
            mass,
            radius: (mass.sqrt() * cfg.fragment_radius_scale).max(cfg.fragment_radius_floor),
            position: target.position + offset,
            velocity: target.velocity + kick,
        }
    }

    fn remnant<R: Rng>(&self, target: &Body, id: BodyId, rng: &mut R) -> Body {
        let cfg = &self.config;
        let (kind, tag, mass, radius) = if rng.random_bool(cfg.black_hole_probability) {
            (
                BodyKind::BlackHole,
                Tag::DarkGray,
                target.mass * cfg.black_hole_mass_fraction,
                (target.radius * cfg.black_hole_radius_fraction).max(cfg.black_hole_radius_floor),
            )
        } else {
            (
                BodyKind::Star,
                Tag::Blue,
                target.mass * cfg.star_mass_fraction,
                (target.radius * cfg.star_radius_fraction).max(cfg.star_radius_floor),
            )
        };

        Body {
            id,
            kind,
            tag,
            mass,
            radius,
            position: target.position,
            velocity: target.velocity,
        }
    }
}

/// Explode `target` with the default tunables
///
/// See [`Supernova::explode`].
pub fn trigger_supernova<R: Rng>(
    state: &mut SystemState,
    target: &Body,
    rng: &mut R,
) -> Vec<Body> {
    Supernova::default().explode(state, target, rng)
}
