//! Collision detection and resolution for N-body systems
//!
//! Detection finds overlapping disks with a greedy, index-ordered pairing;
//! resolution merges each pair into one momentum-conserving body.

pub mod detection;
pub mod resolution;

#[cfg(test)]
mod resolution_test;

pub use detection::{Contact, detect_contacts, overlapping_pairs};
pub use resolution::{CollisionOutcome, FlashEvent, merge_bodies, resolve_collisions};
