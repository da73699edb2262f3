use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::body::{BodyKind, Tag};
use crate::forces::G;
use crate::scenario::*;
use crate::state::SystemState;

#[test]
fn test_central_star() {
    let star = central_star();

    assert_eq!(star.kind, BodyKind::Star);
    assert_eq!(star.tag, Tag::Yellow);
    assert_eq!(star.mass, 50.0);
    assert_eq!(star.radius, 0.2);
    assert_eq!(star.position.coords.magnitude(), 0.0);
    assert_eq!(star.velocity.magnitude(), 0.0);
}

#[test]
fn test_default_system_layout() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let system = default_system(&mut rng);

    assert_eq!(system.body_count(), 5);
    assert_eq!(system.bodies[0].kind, BodyKind::Star);

    for (planet, (r, tag)) in system.bodies[1..].iter().zip(DEFAULT_ORBITS) {
        assert_eq!(planet.kind, BodyKind::Planet);
        assert_eq!(planet.tag, tag);
        assert_eq!(planet.mass, PLANET_MASS);
        assert_relative_eq!(planet.position.coords.magnitude(), r, max_relative = 1e-12);
        assert_relative_eq!(
            planet.velocity.magnitude(),
            circular_velocity(CENTRAL_STAR_MASS, r),
            max_relative = 1e-12
        );
        // Velocity is perpendicular to the radius vector
        assert_abs_diff_eq!(planet.position.coords.dot(&planet.velocity), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_default_system_has_no_initial_contacts() {
    let mut rng = ChaChaRng::seed_from_u64(7);
    let mut system = default_system(&mut rng);

    assert!(system.resolve_collisions().is_empty());
}

#[test]
fn test_orbiting_planet_is_counter_clockwise() {
    let star = central_star();
    let planet = orbiting_planet(&star, 2.0, 0.0, Tag::Green);

    assert_abs_diff_eq!(planet.position.x, 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(planet.position.y, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(planet.velocity.x, 0.0, epsilon = 1e-12);
    assert!(planet.velocity.y > 0.0);
    assert!(planet.specific_angular_momentum() > 0.0);
}

#[test]
fn test_binary_system_is_balanced() {
    let [a, b] = binary_system();

    assert_eq!((a.kind, b.kind), (BodyKind::Star, BodyKind::Star));
    assert_eq!((a.tag, b.tag), (Tag::Pink, Tag::LightBlue));
    assert_relative_eq!(a.distance_to(&b), 1.6, max_relative = 1e-12);

    let momentum = a.momentum() + b.momentum();
    assert_abs_diff_eq!(momentum.magnitude(), 0.0, epsilon = 1e-12);

    let omega = (G * 16.0 / 1.6_f64.powi(3)).sqrt();
    assert_relative_eq!(a.velocity.y, omega * 0.8, max_relative = 1e-12);
}

#[test]
fn test_black_hole_preset() {
    let hole = black_hole();

    assert!(hole.is_black_hole());
    assert_eq!(hole.tag, Tag::Black);
    assert_eq!(hole.mass, 200.0);
    assert_eq!(hole.radius, 0.08);
}

#[test]
fn test_random_planet_orbits_central_star() {
    let mut rng = ChaChaRng::seed_from_u64(3);
    let mut system = SystemState::new();
    system.insert(central_star());

    for _ in 0..50 {
        let planet = random_planet(&system, &mut rng);
        let r = planet.position.coords.magnitude();

        assert!((1.5..4.0).contains(&r));
        assert!(RANDOM_PLANET_TAGS.contains(&planet.tag));
        assert_relative_eq!(
            planet.velocity.magnitude(),
            circular_velocity(CENTRAL_STAR_MASS, r),
            max_relative = 1e-9
        );
    }
}

#[test]
fn test_random_planet_without_central_star() {
    let mut rng = ChaChaRng::seed_from_u64(3);
    let mut system = SystemState::new();
    system.insert(black_hole());

    for _ in 0..50 {
        let planet = random_planet(&system, &mut rng);

        assert_eq!(planet.tag, Tag::Cyan);
        assert!(planet.position.x >= -3.0 && planet.position.x < 3.0);
        assert!(planet.position.y >= -3.0 && planet.position.y < 3.0);
        assert!(planet.velocity.x >= -1.0 && planet.velocity.x < 1.0);
        assert!(planet.velocity.y >= -1.0 && planet.velocity.y < 1.0);
    }
}

#[test]
fn test_non_yellow_star_is_not_central() {
    let mut system = SystemState::new();
    system.extend(binary_system());

    assert!(find_central_star(&system).is_none());
}

#[test]
fn test_remove_central_stars() {
    let mut rng = ChaChaRng::seed_from_u64(1);
    let mut system = default_system(&mut rng);
    system.extend(binary_system());

    assert_eq!(remove_central_stars(&mut system), 1);
    assert_eq!(system.body_count(), 6);
    assert!(find_central_star(&system).is_none());
    assert_eq!(remove_central_stars(&mut system), 0);
}
