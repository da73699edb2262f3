//! Collision resolution through momentum-conserving mergers
//!
//! When bodies collide, they merge into a single body that conserves:
//! - Total mass
//! - Total momentum (and centre of mass)
//! - Area (r² adds, as for flat disks of equal density)

use crate::body::{Body, BodyId, BodyKind, Tag};
use crate::collisions::detection::{detect_contacts, overlapping_pairs};
use nalgebra::Point2;
use serde::Serialize;
use tracing::{Level, debug, enabled, trace};

/// Rendering hint emitted for each merge
///
/// Tells the presentation layer which body just formed and what colour it
/// should fade to. Carries no physical meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlashEvent {
    /// The merged body
    pub body: BodyId,
    /// Tag of the heavier pre-merge body
    pub final_tag: Tag,
}

/// Result of one collision pass
#[derive(Debug, Clone, Default)]
pub struct CollisionOutcome {
    /// Surviving and merged bodies, in pass order
    pub bodies: Vec<Body>,
    /// One flash per merge
    pub flashes: Vec<FlashEvent>,
}

impl CollisionOutcome {
    /// Overlaps left in `bodies` for the next pass to merge
    pub fn pending_contacts(&self) -> Vec<(usize, usize)> {
        overlapping_pairs(&self.bodies)
    }
}

/// The body whose kind and tag a merge inherits; ties go to `a`
fn dominant<'a>(a: &'a Body, b: &'a Body) -> &'a Body {
    if a.mass >= b.mass { a } else { b }
}

/// Merge two bodies, conserving mass and momentum
///
/// - Mass: m_new = m_a + m_b
/// - Position and velocity: mass-weighted means
/// - Radius: sqrt(r_a² + r_b²)
/// - Kind: `BlackHole` if either input is one, otherwise the heavier
///   body's kind (ties to `a`)
/// - Tag: the heavier body's tag (ties to `a`), or `Tag::Black` when a
///   black hole absorbed the other body
///
/// Mass, position, velocity and radius do not depend on argument order.
///
/// # Examples
///
/// ```
/// use gravsim::body::{Body, BodyId, BodyKind};
/// use gravsim::collisions::merge_bodies;
///
/// let a = Body::planet(1.0, 0.05, [0.0, 0.0], [0.0, 5.0]);
/// let b = Body::planet(3.0, 0.05, [1.0, 0.0], [0.0, 1.0]);
///
/// let merged = merge_bodies(&a, &b, BodyId(0));
///
/// assert_eq!(merged.mass, 4.0);
/// assert!((merged.position.x - 0.75).abs() < 1e-12);
/// assert!((merged.velocity.y - 2.0).abs() < 1e-12);
/// assert_eq!(merged.kind, BodyKind::Planet);
/// ```
pub fn merge_bodies(a: &Body, b: &Body, id: BodyId) -> Body {
    let total_mass = a.mass + b.mass;

    // Center of mass position
    let pos_coords = (a.position.coords * a.mass + b.position.coords * b.mass) / total_mass;
    let position = Point2::from(pos_coords);

    // Momentum-conserving velocity
    let velocity = (a.momentum() + b.momentum()) / total_mass;

    let radius = (a.radius.powi(2) + b.radius.powi(2)).sqrt();

    let heavier = dominant(a, b);
    let (kind, tag) = if a.is_black_hole() || b.is_black_hole() {
        (BodyKind::BlackHole, Tag::Black)
    } else {
        (heavier.kind, heavier.tag)
    };

    Body {
        id,
        kind,
        tag,
        mass: total_mass,
        radius,
        position,
        velocity,
    }
}

/// Run one collision pass over a body snapshot
///
/// Pairs are chosen by `detect_contacts` (greedy, lowest index first). The
/// merged body keeps the id of the lower-indexed partner and takes its slot
/// in the output; the other partner is dropped. Bodies that touched nothing
/// are carried over unchanged and in order.
///
/// # Examples
///
/// ```
/// use gravsim::body::{Body, BodyId};
/// use gravsim::collisions::resolve_collisions;
/// use gravsim::state::SystemState;
///
/// let system = SystemState::from_bodies([
///     Body::planet(1.0, 0.05, [0.0, 0.0], [0.0, 0.0]),
///     Body::planet(1.0, 0.05, [0.05, 0.0], [0.0, 0.0]),
/// ]);
///
/// let outcome = resolve_collisions(&system.bodies);
///
/// assert_eq!(outcome.bodies.len(), 1);
/// assert_eq!(outcome.bodies[0].mass, 2.0);
/// assert_eq!(outcome.flashes[0].body, BodyId(0));
/// ```
pub fn resolve_collisions(bodies: &[Body]) -> CollisionOutcome {
    let contacts = detect_contacts(bodies);
    if contacts.is_empty() {
        return CollisionOutcome {
            bodies: bodies.to_vec(),
            flashes: Vec::new(),
        };
    }

    // partner[i] = Some(j) for the lower index of each pair, absorbed[j] for the other
    let mut partner: Vec<Option<usize>> = vec![None; bodies.len()];
    let mut absorbed = vec![false; bodies.len()];
    for contact in &contacts {
        partner[contact.first] = Some(contact.second);
        absorbed[contact.second] = true;
    }

    let mut outcome = CollisionOutcome {
        bodies: Vec::with_capacity(bodies.len() - contacts.len()),
        flashes: Vec::with_capacity(contacts.len()),
    };

    for (i, body) in bodies.iter().enumerate() {
        if absorbed[i] {
            continue;
        }
        match partner[i] {
            Some(j) => {
                let other = &bodies[j];
                let merged = merge_bodies(body, other, body.id);
                let final_tag = dominant(body, other).tag;

                debug!(
                    survivor = body.id.0,
                    absorbed = other.id.0,
                    mass = merged.mass,
                    kind = ?merged.kind,
                    "bodies merged"
                );

                outcome.flashes.push(FlashEvent {
                    body: merged.id,
                    final_tag,
                });
                outcome.bodies.push(merged);
            }
            None => outcome.bodies.push(*body),
        }
    }

    if enabled!(Level::TRACE) {
        trace!(
            merges = contacts.len(),
            remaining = outcome.bodies.len(),
            pending = outcome.pending_contacts().len(),
            "collision pass complete"
        );
    }

    outcome
}
