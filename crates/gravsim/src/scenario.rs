//! Preset bodies and starting systems
//!
//! Presets build bodies but never insert them, except `default_system`, which
//! returns a whole fresh system. Callers add presets with
//! `SystemState::insert` or `SystemState::extend`.
//!
//! # Presets
//! - Central star: Star, M = 50, r = 0.2, yellow, at rest at the origin
//! - Default system: central star plus four unit planets on circular orbits
//! - Binary: two M = 8 stars, 1.6 apart, on a shared circular orbit
//! - Black hole: M = 200, r = 0.08, at rest at the origin

use std::f64::consts::TAU;

use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::body::{Body, BodyKind, Tag};
use crate::forces::G;
use crate::state::SystemState;

pub const CENTRAL_STAR_MASS: f64 = 50.0;
pub const CENTRAL_STAR_RADIUS: f64 = 0.2;

pub const PLANET_MASS: f64 = 1.0;
pub const PLANET_RADIUS: f64 = 0.05;

/// Orbit radii and tags of the default system's planets
pub const DEFAULT_ORBITS: [(f64, Tag); 4] = [
    (1.0, Tag::Cyan),
    (1.6, Tag::Pink),
    (2.4, Tag::LightBlue),
    (3.2, Tag::Orange),
];

/// Tags a random orbiting planet draws from
pub const RANDOM_PLANET_TAGS: [Tag; 6] = [
    Tag::Cyan,
    Tag::Pink,
    Tag::LightBlue,
    Tag::Orange,
    Tag::White,
    Tag::Green,
];

const BINARY_STAR_MASS: f64 = 8.0;
const BINARY_STAR_RADIUS: f64 = 0.07;
const BINARY_SEPARATION: f64 = 1.6;

const BLACK_HOLE_MASS: f64 = 200.0;
const BLACK_HOLE_RADIUS: f64 = 0.08;

/// Speed of a circular orbit of radius `r` around `central_mass`
///
/// `v = sqrt(G·M / r)`, ignoring the orbiting body's own mass.
///
/// # Examples
///
/// ```
/// use gravsim::forces::G;
/// use gravsim::scenario::circular_velocity;
///
/// assert!((circular_velocity(50.0, 2.0) - (G * 25.0).sqrt()).abs() < 1e-12);
/// ```
pub fn circular_velocity(central_mass: f64, r: f64) -> f64 {
    (G * central_mass / r).sqrt()
}

/// Planet on a counter-clockwise circular orbit around `central`
///
/// # Arguments
/// * `central` - Body being orbited; only its position and mass are used
/// * `r` - Orbit radius
/// * `theta` - Starting angle in radians
/// * `tag` - Display tag for the planet
pub fn orbiting_planet(central: &Body, r: f64, theta: f64, tag: Tag) -> Body {
    let (sin, cos) = theta.sin_cos();
    let v = circular_velocity(central.mass, r);

    Body::planet(
        PLANET_MASS,
        PLANET_RADIUS,
        [central.position.x + r * cos, central.position.y + r * sin],
        [-v * sin, v * cos],
    )
    .with_tag(tag)
}

pub fn central_star() -> Body {
    Body::star(CENTRAL_STAR_MASS, CENTRAL_STAR_RADIUS, [0.0, 0.0], [0.0, 0.0])
}

/// Central star with the four default planets at random starting angles
pub fn default_system(rng: &mut ChaChaRng) -> SystemState {
    let mut system = SystemState::new();
    let star = central_star();
    system.insert(star);

    for (r, tag) in DEFAULT_ORBITS {
        let theta = rng.random_range(0.0..TAU);
        system.insert(orbiting_planet(&star, r, theta, tag));
    }

    system
}

/// Equal-mass binary centred on the origin
///
/// Both stars share the angular velocity `ω = sqrt(G·2m / sep³)` and move at
/// `ω·sep/2` in opposite directions, so the pair has zero net momentum.
pub fn binary_system() -> [Body; 2] {
    let half = BINARY_SEPARATION * 0.5;
    let omega = (G * 2.0 * BINARY_STAR_MASS / BINARY_SEPARATION.powi(3)).sqrt();
    let v = omega * half;

    [
        Body::star(BINARY_STAR_MASS, BINARY_STAR_RADIUS, [-half, 0.0], [0.0, v])
            .with_tag(Tag::Pink),
        Body::star(BINARY_STAR_MASS, BINARY_STAR_RADIUS, [half, 0.0], [0.0, -v])
            .with_tag(Tag::LightBlue),
    ]
}

pub fn black_hole() -> Body {
    Body::black_hole(BLACK_HOLE_MASS, BLACK_HOLE_RADIUS, [0.0, 0.0], [0.0, 0.0])
}

/// First yellow star in the system, the one random planets orbit
pub fn find_central_star(state: &SystemState) -> Option<&Body> {
    state
        .bodies
        .iter()
        .find(|b| b.kind == BodyKind::Star && b.tag == Tag::Yellow)
}

/// A random new planet for `state`
///
/// With a yellow central star present the planet gets a circular orbit at
/// `r ∈ [1.5, 4)` around it. Without one it is a cyan planet placed in
/// `[-3, 3)²` with velocity in `[-1, 1)²`.
pub fn random_planet(state: &SystemState, rng: &mut ChaChaRng) -> Body {
    match find_central_star(state) {
        Some(central) => {
            let r = rng.random_range(1.5..4.0);
            let theta = rng.random_range(0.0..TAU);
            let tag = RANDOM_PLANET_TAGS[rng.random_range(0..RANDOM_PLANET_TAGS.len())];
            orbiting_planet(central, r, theta, tag)
        }
        None => Body::planet(
            PLANET_MASS,
            PLANET_RADIUS,
            [rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0)],
            [rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)],
        ),
    }
}

/// Removes every yellow star from the system
///
/// # Returns
/// Number of bodies removed
pub fn remove_central_stars(state: &mut SystemState) -> usize {
    let before = state.body_count();
    state
        .bodies
        .retain(|b| !(b.kind == BodyKind::Star && b.tag == Tag::Yellow));
    before - state.body_count()
}
