use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::Vector2;
use proptest::prelude::*;

use crate::body::{Body, BodyId, BodyKind, Tag};
use crate::collisions::resolution::*;
use crate::state::SystemState;

#[test]
fn test_merge_bodies_mass_and_momentum_conservation() {
    let a = Body::planet(1.0, 0.01, [1.0, 0.0], [0.0, 5.0]);
    let b = Body::planet(2.0, 0.01, [1.1, 0.0], [0.0, 3.0]);

    let p_initial = a.momentum() + b.momentum();
    let merged = merge_bodies(&a, &b, BodyId(2));

    assert_eq!(merged.mass, 3.0);
    assert_abs_diff_eq!(merged.momentum().x, p_initial.x, epsilon = 1e-12);
    assert_abs_diff_eq!(merged.momentum().y, p_initial.y, epsilon = 1e-12);
    assert_eq!(merged.id, BodyId(2));
}

#[test]
fn test_merge_bodies_center_of_mass() {
    let a = Body::planet(1.0, 0.01, [1.0, 0.0], [0.0, 5.0]);
    let b = Body::planet(1.0, 0.01, [2.0, 0.0], [0.0, 3.0]);

    let merged = merge_bodies(&a, &b, BodyId(0));

    assert_abs_diff_eq!(merged.position.x, 1.5, epsilon = 1e-12);
    assert_abs_diff_eq!(merged.position.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_merge_bodies_radius() {
    let a = Body::planet(1.0, 0.03, [0.0, 0.0], [0.0, 0.0]);
    let b = Body::planet(1.0, 0.04, [0.0, 0.0], [0.0, 0.0]);

    let merged = merge_bodies(&a, &b, BodyId(0));

    assert_relative_eq!(merged.radius, 0.05, max_relative = 1e-12);
}

#[test]
fn test_heavier_body_sets_kind_and_tag() {
    let planet = Body::planet(5.0, 0.05, [0.0, 0.0], [0.0, 0.0]).with_tag(Tag::Green);
    let star = Body::star(30.0, 0.2, [0.1, 0.0], [0.0, 0.0]).with_tag(Tag::Pink);

    let merged = merge_bodies(&planet, &star, BodyId(0));
    assert_eq!(merged.kind, BodyKind::Star);
    assert_eq!(merged.tag, Tag::Pink);

    let reversed = merge_bodies(&star, &planet, BodyId(0));
    assert_eq!(reversed.kind, BodyKind::Star);
    assert_eq!(reversed.tag, Tag::Pink);
}

#[test]
fn test_equal_mass_tie_goes_to_first_argument() {
    let planet = Body::planet(2.0, 0.05, [0.0, 0.0], [0.0, 0.0]).with_tag(Tag::Orange);
    let star = Body::star(2.0, 0.05, [0.0, 0.0], [0.0, 0.0]).with_tag(Tag::White);

    let ab = merge_bodies(&planet, &star, BodyId(0));
    assert_eq!((ab.kind, ab.tag), (BodyKind::Planet, Tag::Orange));

    let ba = merge_bodies(&star, &planet, BodyId(0));
    assert_eq!((ba.kind, ba.tag), (BodyKind::Star, Tag::White));
}

#[test]
fn test_black_hole_dominates_heavier_star() {
    let hole = Body::black_hole(1.0, 0.05, [0.0, 0.0], [0.0, 0.0]);
    let star = Body::star(100.0, 0.3, [0.1, 0.0], [0.0, 0.0]).with_tag(Tag::Yellow);

    let merged = merge_bodies(&star, &hole, BodyId(0));
    assert_eq!(merged.kind, BodyKind::BlackHole);
    assert_eq!(merged.tag, Tag::Black);
    assert_eq!(merged.mass, 101.0);
}

#[test]
fn test_flash_reports_heavier_pre_merge_tag_even_for_black_hole() {
    let star = Body::star(100.0, 0.3, [0.0, 0.0], [0.0, 0.0]).with_tag(Tag::Yellow);
    let hole = Body::black_hole(1.0, 0.05, [0.1, 0.0], [0.0, 0.0]);
    let system = SystemState::from_bodies([star, hole]);

    let outcome = resolve_collisions(&system.bodies);

    assert_eq!(outcome.bodies.len(), 1);
    assert_eq!(outcome.bodies[0].kind, BodyKind::BlackHole);
    assert_eq!(
        outcome.flashes,
        vec![FlashEvent {
            body: BodyId(0),
            final_tag: Tag::Yellow,
        }]
    );
}

#[test]
fn test_example_scenario() {
    let system = SystemState::from_bodies([
        Body::planet(1.0, 0.05, [0.0, 0.0], [0.0, 0.0]),
        Body::planet(1.0, 0.05, [0.05, 0.0], [0.0, 0.0]),
    ]);

    let outcome = resolve_collisions(&system.bodies);

    assert_eq!(outcome.bodies.len(), 1);
    let merged = outcome.bodies[0];
    assert_eq!(merged.mass, 2.0);
    assert_abs_diff_eq!(merged.position.x, 0.025, epsilon = 1e-12);
    assert_abs_diff_eq!(merged.position.y, 0.0, epsilon = 1e-12);
    assert_eq!(merged.velocity, Vector2::zeros());
    assert_abs_diff_eq!(merged.radius, 0.0707, epsilon = 1e-4);
    assert_relative_eq!(merged.radius, (2.0 * 0.05_f64.powi(2)).sqrt(), max_relative = 1e-12);
}

#[test]
fn test_no_collisions_returns_input_unchanged() {
    let system = SystemState::from_bodies([
        Body::planet(1.0, 0.05, [0.0, 0.0], [1.0, 0.0]),
        Body::planet(1.0, 0.05, [1.0, 0.0], [0.0, 1.0]),
    ]);

    let outcome = resolve_collisions(&system.bodies);

    assert_eq!(outcome.bodies, system.bodies);
    assert!(outcome.flashes.is_empty());
    assert!(outcome.pending_contacts().is_empty());
}

#[test]
fn test_degenerate_inputs() {
    assert!(resolve_collisions(&[]).bodies.is_empty());

    let single = [Body::planet(1.0, 0.05, [0.0, 0.0], [0.0, 0.0])];
    let outcome = resolve_collisions(&single);
    assert_eq!(outcome.bodies.len(), 1);
    assert!(outcome.flashes.is_empty());
}

#[test]
fn test_merged_body_takes_lower_slot_and_order_is_kept() {
    let system = SystemState::from_bodies([
        Body::planet(1.0, 0.05, [5.0, 0.0], [0.0, 0.0]),
        Body::planet(1.0, 0.05, [0.0, 0.0], [0.0, 0.0]),
        Body::planet(1.0, 0.05, [-5.0, 0.0], [0.0, 0.0]),
        Body::planet(1.0, 0.05, [0.02, 0.0], [0.0, 0.0]),
        Body::planet(1.0, 0.05, [9.0, 0.0], [0.0, 0.0]),
    ]);

    let outcome = resolve_collisions(&system.bodies);
    let ids: Vec<u32> = outcome.bodies.iter().map(|b| b.id.0).collect();

    assert_eq!(ids, vec![0, 1, 2, 4]);
    assert_eq!(outcome.bodies[1].mass, 2.0);
}

#[test]
fn test_triple_contact_needs_two_passes() {
    let mut system = SystemState::from_bodies([
        Body::planet(1.0, 0.05, [0.0, 0.0], [0.0, 0.0]),
        Body::planet(1.0, 0.05, [0.03, 0.0], [0.0, 0.0]),
        Body::planet(1.0, 0.05, [-0.03, 0.0], [0.0, 0.0]),
    ]);

    let outcome = resolve_collisions(&system.bodies);
    assert_eq!(outcome.pending_contacts(), vec![(0, 1)]);

    let first = system.resolve_collisions();
    assert_eq!(first.len(), 1);
    assert_eq!(system.body_count(), 2);

    let second = system.resolve_collisions();
    assert_eq!(second.len(), 1);
    assert_eq!(system.body_count(), 1);
    assert_eq!(system.total_mass(), 3.0);
}

#[test]
fn test_pass_conserves_total_mass_and_momentum() {
    let system = SystemState::from_bodies([
        Body::planet(1.0, 0.05, [0.0, 0.0], [1.0, 0.0]),
        Body::planet(2.0, 0.05, [0.05, 0.0], [-1.0, 2.0]),
        Body::star(20.0, 0.2, [3.0, 0.0], [0.0, 0.5]),
        Body::planet(0.5, 0.05, [3.1, 0.0], [0.0, -3.0]),
    ]);

    let outcome = resolve_collisions(&system.bodies);
    let after = SystemState::from_bodies(outcome.bodies);

    assert_eq!(after.body_count(), 2);
    assert_relative_eq!(after.total_mass(), system.total_mass(), max_relative = 1e-12);
    let dp = after.total_momentum() - system.total_momentum();
    assert!(dp.magnitude() < 1e-12);
}

fn arb_body() -> impl Strategy<Value = Body> {
    (
        0.01..100.0_f64,
        0.01..1.0_f64,
        (-10.0..10.0_f64, -10.0..10.0_f64),
        (-5.0..5.0_f64, -5.0..5.0_f64),
        0..3u8,
    )
        .prop_map(|(mass, radius, (px, py), (vx, vy), kind)| {
            let kind = match kind {
                0 => BodyKind::Planet,
                1 => BodyKind::Star,
                _ => BodyKind::BlackHole,
            };
            Body::new(kind, mass, radius, [px, py], [vx, vy])
        })
}

proptest! {
    #[test]
    fn merge_is_commutative(a in arb_body(), b in arb_body()) {
        let ab = merge_bodies(&a, &b, BodyId(0));
        let ba = merge_bodies(&b, &a, BodyId(0));

        prop_assert_eq!(ab.mass, ba.mass);
        prop_assert_eq!(ab.position, ba.position);
        prop_assert_eq!(ab.velocity, ba.velocity);
        prop_assert_eq!(ab.radius, ba.radius);
    }

    #[test]
    fn merge_conserves_mass_and_momentum(a in arb_body(), b in arb_body()) {
        let merged = merge_bodies(&a, &b, BodyId(0));
        let p_before = a.momentum() + b.momentum();

        prop_assert!((merged.mass - (a.mass + b.mass)).abs() < 1e-12);
        let tolerance = 1e-9 * (1.0 + p_before.magnitude());
        prop_assert!((merged.momentum() - p_before).magnitude() < tolerance);
    }

    #[test]
    fn black_hole_always_absorbs_planet(
        planet_mass in 0.01..1.0e6_f64,
        hole_mass in 0.01..1.0e6_f64,
    ) {
        let planet = Body::planet(planet_mass, 0.05, [0.0, 0.0], [0.0, 0.0]);
        let hole = Body::black_hole(hole_mass, 0.05, [0.01, 0.0], [0.0, 0.0]);

        prop_assert_eq!(merge_bodies(&planet, &hole, BodyId(0)).kind, BodyKind::BlackHole);
        prop_assert_eq!(merge_bodies(&hole, &planet, BodyId(0)).kind, BodyKind::BlackHole);
    }
}
