//! Toy 2-D gravitational N-body core
//!
//! Bodies attract each other through softened Newtonian gravity, advance
//! with velocity Verlet, merge when they overlap and, above a mass
//! threshold, can be blown apart into fragments and a compact remnant.
//! Rendering and input are left to the caller.

pub mod body;
pub mod collisions;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod scenario;
pub mod simulation;
pub mod state;
pub mod supernova;

#[cfg(test)]
mod error_test;
#[cfg(test)]
mod scenario_test;

pub use body::{Body, BodyId, BodyKind, Tag};
pub use error::{Error, Result};
pub use forces::{G, SOFTENING};
pub use simulation::{Simulation, TickReport};
pub use state::SystemState;
pub use supernova::SUPERNOVA_MASS_THRESHOLD;
