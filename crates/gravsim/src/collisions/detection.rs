//! Contact detection between overlapping bodies
//!
//! Detection is purely geometric: two bodies touch when the distance
//! between their centres is strictly less than the sum of their radii.

use crate::body::Body;

/// A pair of bodies selected to merge this pass
///
/// Indices refer to the slice handed to `detect_contacts`; `first` is
/// always the lower index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the lower-indexed body
    pub first: usize,
    /// Index of its partner
    pub second: usize,
    /// Centre-to-centre distance
    pub separation: f64,
    /// Sum of radii that was undercut
    pub contact_radius: f64,
}

/// Check if a pair of bodies overlaps
fn check_pair(bodies: &[Body], i: usize, j: usize) -> Option<Contact> {
    let (a, b) = (&bodies[i], &bodies[j]);
    let separation = a.distance_to(b);
    let contact_radius = a.radius + b.radius;

    (separation < contact_radius).then_some(Contact {
        first: i,
        second: j,
        separation,
        contact_radius,
    })
}

/// Greedy, index-ordered contact pairing
///
/// Walks bodies by ascending index. Each body not yet paired takes the
/// first later, unpaired body it overlaps, and both are then out of play
/// for the rest of the pass. A body touching several neighbours therefore
/// pairs only with the lowest-indexed one; the leftover contacts are picked
/// up on the next pass.
///
/// # Examples
///
/// ```
/// use gravsim::body::Body;
/// use gravsim::collisions::detect_contacts;
///
/// let bodies = [
///     Body::planet(1.0, 0.05, [0.0, 0.0], [0.0, 0.0]),
///     Body::planet(1.0, 0.05, [0.05, 0.0], [0.0, 0.0]),
///     Body::planet(1.0, 0.05, [0.09, 0.0], [0.0, 0.0]),
/// ];
///
/// // Body 1 touches both neighbours but only pairs with body 0
/// let contacts = detect_contacts(&bodies);
/// assert_eq!(contacts.len(), 1);
/// assert_eq!((contacts[0].first, contacts[0].second), (0, 1));
/// ```
pub fn detect_contacts(bodies: &[Body]) -> Vec<Contact> {
    let n = bodies.len();
    let mut consumed = vec![false; n];
    let mut contacts = Vec::new();

    for i in 0..n {
        if consumed[i] {
            continue;
        }
        let partner = ((i + 1)..n)
            .filter(|&j| !consumed[j])
            .find_map(|j| check_pair(bodies, i, j));

        if let Some(contact) = partner {
            consumed[i] = true;
            consumed[contact.second] = true;
            contacts.push(contact);
        }
    }

    contacts
}

/// Every overlapping pair, regardless of pairing order
///
/// Merging goes through `detect_contacts`; this lists the overlaps a pass
/// leaves behind.
pub fn overlapping_pairs(bodies: &[Body]) -> Vec<(usize, usize)> {
    let n = bodies.len();

    (0..n)
        .flat_map(|i| ((i + 1)..n).filter_map(move |j| check_pair(bodies, i, j)))
        .map(|c| (c.first, c.second))
        .collect()
}
