use crate::body::{Body, BodyId, BodyKind};
use crate::collisions::{FlashEvent, resolve_collisions};
use nalgebra::{Point2, Vector2};
use std::collections::HashSet;

/// Complete state of an N-body system at a given time
///
/// Owns the ordered body set and hands out stable `BodyId`s. Ids are never
/// reused, so a handle to a body that was merged away or exploded simply
/// stops resolving.
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    /// Current simulation time
    pub time: f64,
    /// Live bodies; order decides collision tie-breaks
    pub bodies: Vec<Body>,
    /// Next available body ID
    next_id: u32,
    /// Ids handed out by `allocate_id` that no body carries yet
    reserved: HashSet<BodyId>,
}

impl SystemState {
    /// Creates an empty system at t = 0
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::state::SystemState;
    ///
    /// let system = SystemState::new();
    /// assert_eq!(system.body_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a system from prepared bodies, assigning fresh ids in order
    pub fn from_bodies(bodies: impl IntoIterator<Item = Body>) -> Self {
        let mut state = Self::new();
        state.extend(bodies);
        state
    }

    fn next_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Reserves a fresh id without inserting a body
    ///
    /// A body carrying a reserved id keeps it when passed to `extend`, which
    /// also clears the reservation. Reservations for bodies that are never
    /// extended in stay until `release` drops them.
    pub fn allocate_id(&mut self) -> BodyId {
        let id = self.next_id();
        self.reserved.insert(id);
        id
    }

    /// Drops reservations for ids whose bodies will never be added
    ///
    /// The ids stay retired; nothing is reissued.
    pub fn release(&mut self, ids: impl IntoIterator<Item = BodyId>) {
        for id in ids {
            self.reserved.remove(&id);
        }
    }

    /// Number of ids reserved but not yet carried by a live body
    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }

    /// Inserts a body, overwriting its id with a fresh one
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::body::Body;
    /// use gravsim::state::SystemState;
    ///
    /// let mut system = SystemState::new();
    /// let a = system.insert(Body::planet(1.0, 0.05, [1.0, 0.0], [0.0, 3.0]));
    /// let b = system.insert(Body::planet(1.0, 0.05, [2.0, 0.0], [0.0, 2.0]));
    ///
    /// assert_ne!(a, b);
    /// assert_eq!(system.body_count(), 2);
    /// ```
    pub fn insert(&mut self, body: Body) -> BodyId {
        let id = self.next_id();
        self.bodies.push(body.with_id(id));
        id
    }

    /// Appends bodies, keeping ids reserved through `allocate_id`
    ///
    /// Supernova output arrives with reserved ids already; any other body
    /// gets a fresh id as with `insert`.
    pub fn extend(&mut self, bodies: impl IntoIterator<Item = Body>) {
        for body in bodies {
            if self.reserved.remove(&body.id) {
                self.bodies.push(body);
            } else {
                self.insert(body);
            }
        }
    }

    /// Adds a body with the default tag for its kind and returns its ID
    ///
    /// # Arguments
    ///
    /// * `kind` - Physical class
    /// * `mass` - Body mass
    /// * `radius` - Collision radius (world units)
    /// * `position` - Position (world units)
    /// * `velocity` - Velocity (world units per time unit)
    pub fn add_body(
        &mut self,
        kind: BodyKind,
        mass: f64,
        radius: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    ) -> BodyId {
        self.insert(Body::new(
            kind,
            mass,
            radius,
            [position.x, position.y],
            [velocity.x, velocity.y],
        ))
    }

    /// Removes a body from the system
    ///
    /// # Returns
    ///
    /// The removed Body if found, None otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use gravsim::body::Body;
    /// use gravsim::state::SystemState;
    ///
    /// let mut system = SystemState::new();
    /// let id = system.insert(Body::star(30.0, 0.1, [0.0, 0.0], [0.0, 0.0]));
    ///
    /// assert!(system.remove_body(id).is_some());
    /// assert!(system.remove_body(id).is_none());
    /// ```
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Returns the number of bodies in the system
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Runs one collision pass in place and returns the flash hints
    pub fn resolve_collisions(&mut self) -> Vec<FlashEvent> {
        let outcome = resolve_collisions(&self.bodies);
        self.bodies = outcome.bodies;
        outcome.flashes
    }

    /// The heaviest live `Star`, if any
    ///
    /// This is the usual supernova target; the supernova engine itself never
    /// scans for candidates.
    pub fn heaviest_star(&self) -> Option<&Body> {
        self.bodies
            .iter()
            .filter(|b| b.kind == BodyKind::Star)
            .fold(None, |best: Option<&Body>, b| match best {
                Some(current) if current.mass >= b.mass => Some(current),
                _ => Some(b),
            })
    }

    pub fn positions(&self) -> Vec<Point2<f64>> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    pub fn masses(&self) -> Vec<f64> {
        self.bodies.iter().map(|b| b.mass).collect()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Returns the total momentum of all bodies
    ///
    /// Constant for an isolated system up to integration error.
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    /// Returns the total angular momentum about the origin
    pub fn total_angular_momentum(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.specific_angular_momentum() * b.mass)
            .sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Mass-weighted mean position, or None for an empty system
    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        let total = self.total_mass();
        if self.bodies.is_empty() || total <= 0.0 {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .map(|b| b.position.coords * b.mass)
            .fold(Vector2::zeros(), |acc, p| acc + p);
        Some(Point2::from(weighted / total))
    }
}
