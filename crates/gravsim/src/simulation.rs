//! Tick driver
//!
//! Bundles a system with its force model, integrator, supernova engine and
//! RNG, and advances it one tick at a time: a velocity-Verlet step followed
//! by a single collision pass. Drawing and the pre-explosion flash belong
//! to the caller.

use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::body::BodyId;
use crate::collisions::FlashEvent;
use crate::config::{SimulationConfig, validate_speed};
use crate::error::Result;
use crate::forces::{DirectGravity, ForceModel};
use crate::integrator::{Integrator, VelocityVerlet};
use crate::scenario;
use crate::state::SystemState;
use crate::supernova::Supernova;

/// Seed used when the configuration does not name one
pub const DEFAULT_SEED: u64 = 0;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// Simulation time after the tick
    pub time: f64,
    /// Merges from this tick's collision pass
    pub flashes: Vec<FlashEvent>,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    pub state: SystemState,
    config: SimulationConfig,
    integrator: VelocityVerlet,
    force: DirectGravity,
    supernova: Supernova,
    rng: ChaChaRng,
    paused: bool,
}

impl Simulation {
    /// Creates a driver over the default system
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::config::SimulationConfig;
    /// use gravsim::simulation::Simulation;
    ///
    /// let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
    /// assert_eq!(sim.state.body_count(), 5);
    ///
    /// let report = sim.tick();
    /// assert!(report.time > 0.0);
    /// ```
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut sim = Self::with_state(config, SystemState::new())?;
        sim.reset();
        Ok(sim)
    }

    /// Creates a driver over a prepared system
    pub fn with_state(config: SimulationConfig, state: SystemState) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        debug!(seed, dt = config.time_step.dt(), "simulation created");

        Ok(Self {
            state,
            integrator: VelocityVerlet,
            force: config.gravity.force_model(),
            supernova: Supernova::new(config.supernova.clone()),
            rng: ChaChaRng::seed_from_u64(seed),
            paused: false,
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the system with a fresh default system
    pub fn reset(&mut self) {
        self.state = scenario::default_system(&mut self.rng);
        info!(bodies = self.state.body_count(), "simulation reset");
    }

    /// Advances one step and resolves one collision pass
    ///
    /// A paused driver returns an empty report at the current time.
    pub fn tick(&mut self) -> TickReport {
        if self.paused || self.state.is_empty() {
            return TickReport {
                time: self.state.time,
                flashes: Vec::new(),
            };
        }

        self.integrator
            .step(&mut self.state, self.config.time_step.dt(), &self.force);
        let flashes = self.state.resolve_collisions();
        if !flashes.is_empty() {
            debug!(
                time = self.state.time,
                merges = flashes.len(),
                bodies = self.state.body_count(),
                "collisions resolved"
            );
        }

        TickReport {
            time: self.state.time,
            flashes,
        }
    }

    /// Runs `n` ticks and collects every flash
    pub fn run(&mut self, n: usize) -> Vec<FlashEvent> {
        (0..n).flat_map(|_| self.tick().flashes).collect()
    }

    /// Explodes the body with `target` id and inserts the debris
    ///
    /// # Returns
    ///
    /// Ids of the inserted bodies, remnant last. Empty when the body is gone
    /// or below the mass threshold.
    pub fn explode(&mut self, target: BodyId) -> Vec<BodyId> {
        let Some(body) = self.state.get_body(target).copied() else {
            debug!(target = target.0, "supernova target not found");
            return Vec::new();
        };

        let debris = self.supernova.explode(&mut self.state, &body, &mut self.rng);
        let ids = debris.iter().map(|b| b.id).collect();
        self.state.extend(debris);
        ids
    }

    /// Explodes the heaviest star, if there is one
    pub fn explode_heaviest_star(&mut self) -> Vec<BodyId> {
        match self.state.heaviest_star().map(|b| b.id) {
            Some(id) => self.explode(id),
            None => Vec::new(),
        }
    }

    /// Changes the speed multiplier; out-of-range values are rejected
    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        validate_speed(speed)?;
        self.config.time_step.speed = speed;
        Ok(())
    }

    pub fn dt(&self) -> f64 {
        self.config.time_step.dt()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn add_random_planet(&mut self) -> BodyId {
        let planet = scenario::random_planet(&self.state, &mut self.rng);
        self.state.insert(planet)
    }

    pub fn add_binary_system(&mut self) -> [BodyId; 2] {
        scenario::binary_system().map(|star| self.state.insert(star))
    }

    pub fn add_black_hole(&mut self) -> BodyId {
        self.state.insert(scenario::black_hole())
    }

    pub fn potential_energy(&self) -> f64 {
        self.force
            .potential_energy(&self.state.positions(), &self.state.masses())
    }

    /// Kinetic plus potential energy
    pub fn total_energy(&self) -> f64 {
        self.state.kinetic_energy() + self.potential_energy()
    }
}
