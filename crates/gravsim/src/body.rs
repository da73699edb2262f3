use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub u32);

/// Physical class of a body
///
/// The kind only changes through a merge (which may escalate to
/// `BlackHole`) or a supernova (which yields `Planet` fragments and a
/// `Star` or `BlackHole` remnant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Planet,
    Star,
    BlackHole,
}

/// Opaque display token carried by every body
///
/// Physics code copies tags around but never branches on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Cyan,
    Pink,
    LightBlue,
    Orange,
    White,
    Green,
    Yellow,
    Magenta,
    Black,
    Red,
    DarkGray,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub tag: Tag,
    pub mass: f64,              // simulation mass units
    pub radius: f64,            // world units (collision geometry only)
    pub position: Point2<f64>,  // world units
    pub velocity: Vector2<f64>, // world units per time unit
}

impl Body {
    /// Creates a body without validating mass or radius
    ///
    /// The id defaults to `BodyId(0)`; `SystemState::insert` assigns a real one.
    pub fn new(
        kind: BodyKind,
        mass: f64,
        radius: f64,
        position: [f64; 2],
        velocity: [f64; 2],
    ) -> Self {
        let tag = match kind {
            BodyKind::Planet => Tag::Cyan,
            BodyKind::Star => Tag::Yellow,
            BodyKind::BlackHole => Tag::Black,
        };

        Body {
            id: BodyId(0),
            kind,
            tag,
            mass,
            radius,
            position: Point2::new(position[0], position[1]),
            velocity: Vector2::new(velocity[0], velocity[1]),
        }
    }

    /// Creates a body, rejecting non-positive or non-finite mass and radius
    ///
    /// The physics core itself trusts its input; this is the checked entry
    /// point for bodies built from user-supplied values.
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::body::{Body, BodyKind};
    ///
    /// assert!(Body::try_new(BodyKind::Planet, 1.0, 0.05, [0.0, 0.0], [0.0, 0.0]).is_ok());
    /// assert!(Body::try_new(BodyKind::Planet, 0.0, 0.05, [0.0, 0.0], [0.0, 0.0]).is_err());
    /// ```
    pub fn try_new(
        kind: BodyKind,
        mass: f64,
        radius: f64,
        position: [f64; 2],
        velocity: [f64; 2],
    ) -> Result<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(Error::InvalidParam(format!("mass must be > 0, got {mass}")));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::InvalidParam(format!(
                "radius must be > 0, got {radius}"
            )));
        }
        if !position.iter().chain(velocity.iter()).all(|c| c.is_finite()) {
            return Err(Error::InvalidParam(
                "position and velocity must be finite".to_string(),
            ));
        }
        Ok(Self::new(kind, mass, radius, position, velocity))
    }

    pub fn planet(mass: f64, radius: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self::new(BodyKind::Planet, mass, radius, position, velocity)
    }

    pub fn star(mass: f64, radius: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self::new(BodyKind::Star, mass, radius, position, velocity)
    }

    pub fn black_hole(mass: f64, radius: f64, position: [f64; 2], velocity: [f64; 2]) -> Self {
        Self::new(BodyKind::BlackHole, mass, radius, position, velocity)
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_id(mut self, id: BodyId) -> Self {
        self.id = id;
        self
    }

    pub fn is_black_hole(&self) -> bool {
        self.kind == BodyKind::BlackHole
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// True when the two disks strictly overlap (touching does not count)
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }

    /// Angular momentum scalar about the origin (r × v, not multiplied by mass)
    pub fn specific_angular_momentum(&self) -> f64 {
        self.position.x * self.velocity.y - self.position.y * self.velocity.x
    }
}
