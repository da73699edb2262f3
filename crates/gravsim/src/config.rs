//! Simulation configuration
//!
//! Every field has a default reproducing the stock simulator, so a partial
//! (or empty) JSON document is a valid configuration:
//!
//! ```json
//! {
//!   "time_step": { "base_dt": 0.001, "speed": 2.5 },
//!   "gravity": { "g": 9.8, "softening": 0.001 },
//!   "supernova": { "mass_threshold": 20.0, "black_hole_probability": 0.75 },
//!   "seed": 42
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::forces::{DirectGravity, G, SOFTENING};
use crate::supernova::SupernovaConfig;

/// Slowest allowed speed multiplier
pub const MIN_SPEED: f64 = 0.1;
/// Fastest allowed speed multiplier
pub const MAX_SPEED: f64 = 5.0;
/// Default base step
pub const BASE_DT: f64 = 1e-3;

/// Base step and user speed multiplier
///
/// The integrator only ever sees the product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeStep {
    pub base_dt: f64,
    pub speed: f64,
}

impl Default for TimeStep {
    fn default() -> Self {
        Self {
            base_dt: BASE_DT,
            speed: 1.0,
        }
    }
}

impl TimeStep {
    /// Effective step handed to the integrator
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::config::TimeStep;
    ///
    /// let step = TimeStep { base_dt: 1e-3, speed: 2.0 };
    /// assert_eq!(step.dt(), 2e-3);
    /// ```
    pub fn dt(&self) -> f64 {
        self.base_dt * self.speed
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_dt.is_finite() && self.base_dt > 0.0) {
            return Err(Error::InvalidParam(format!(
                "base_dt must be > 0, got {}",
                self.base_dt
            )));
        }
        validate_speed(self.speed)
    }
}

/// Checks a speed multiplier against `[MIN_SPEED, MAX_SPEED]`
pub fn validate_speed(speed: f64) -> Result<()> {
    if (MIN_SPEED..=MAX_SPEED).contains(&speed) {
        Ok(())
    } else {
        Err(Error::InvalidParam(format!(
            "speed must be within [{MIN_SPEED}, {MAX_SPEED}], got {speed}"
        )))
    }
}

/// Gravity parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub g: f64,
    pub softening: f64,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            g: G,
            softening: SOFTENING,
        }
    }
}

impl GravityConfig {
    pub fn force_model(&self) -> DirectGravity {
        DirectGravity::with_softening(self.softening).with_constant(self.g)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.g.is_finite() && self.g > 0.0) {
            return Err(Error::InvalidParam(format!("g must be > 0, got {}", self.g)));
        }
        if !(self.softening.is_finite() && self.softening >= 0.0) {
            return Err(Error::InvalidParam(format!(
                "softening must be >= 0, got {}",
                self.softening
            )));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub time_step: TimeStep,
    pub gravity: GravityConfig,
    pub supernova: SupernovaConfig,
    /// RNG seed; `None` picks a fixed default so runs stay reproducible
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Parses and validates a JSON configuration
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::config::SimulationConfig;
    ///
    /// let config = SimulationConfig::from_json(r#"{ "time_step": { "speed": 2.0 } }"#).unwrap();
    /// assert_eq!(config.time_step.dt(), 2e-3);
    ///
    /// assert!(SimulationConfig::from_json(r#"{ "time_step": { "speed": 50.0 } }"#).is_err());
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.time_step.validate()?;
        self.gravity.validate()?;
        self.supernova.validate()
    }
}
