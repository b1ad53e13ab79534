use crate::math::Vec2;

/// Mass per unit radius cubed (density analog; keeps masses in a range
/// where the scaled gravitational constant produces visible motion).
pub const MASS_DENSITY: f32 = 1.0e7;

/// Grid cell sentinel for "not a member of any bucket".
pub const CELL_UNASSIGNED: i32 = -1;

/// Circular rigid body - linear and angular state plus derived scalars
pub struct Body {
    // === Physics State ===
    /// World position (center)
    pub pos: Vec2,
    /// Velocity vector (units per second)
    pub vel: Vec2,
    /// Accumulated acceleration for this tick (cleared on integration)
    pub acc: Vec2,
    /// Rotation angle (radians)
    pub angle: f32,
    /// Angular velocity (radians per second)
    pub angular_vel: f32,

    // === Mass / inertia ===
    pub radius: f32,
    pub mass: f32,
    /// 1/mass, or 0 for a static (infinite-mass) body
    pub inv_mass: f32,
    pub inertia: f32,
    pub inv_inertia: f32,

    // === Material properties ===
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
    /// Dynamic (kinetic) friction coefficient
    pub friction: f32,
    /// Static friction coefficient, always >= dynamic
    pub static_friction: f32,

    // === Bookkeeping ===
    /// Cached kinetic energy (0.5 * m * v^2), refreshed on integration
    pub kinetic_energy: f32,
    /// Touched by a contact this tick (for host/visual use)
    pub colliding: bool,
    pub sleeping: bool,
    /// Simulated seconds spent below the sleep velocity threshold
    pub sleep_timer: f32,
    /// Cached grid cell index, CELL_UNASSIGNED if not in any bucket
    pub cell: i32,
}

impl Body {
    /// Create a body at rest. Mass scales with radius^3; inertia uses the
    /// solid-sphere moment I = 0.4 * m * r^2 (disc would be 0.5 * m * r^2).
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        let mass = radius * radius * radius * MASS_DENSITY;
        let inertia = 0.4 * mass * radius * radius;
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::zero(),
            acc: Vec2::zero(),
            angle: 0.0,
            angular_vel: 0.0,
            radius,
            mass,
            inv_mass: 1.0 / mass,
            inertia,
            inv_inertia: 1.0 / inertia,
            restitution: 0.5,
            friction: 0.2,
            static_friction: 0.3,
            kinetic_energy: 0.0,
            colliding: false,
            sleeping: false,
            sleep_timer: 0.0,
            cell: CELL_UNASSIGNED,
        }
    }

    /// Replace the body's mass, keeping inverse mass and inertia consistent.
    pub fn set_mass(&mut self, mass: f32) {
        debug_assert!(mass > 0.0, "set_mass requires a positive mass");
        self.mass = mass;
        self.inv_mass = 1.0 / mass;
        self.inertia = 0.4 * mass * self.radius * self.radius;
        self.inv_inertia = 1.0 / self.inertia;
    }

    /// Turn the body into an immovable obstacle (infinite mass).
    pub fn make_static(&mut self) {
        self.inv_mass = 0.0;
        self.inv_inertia = 0.0;
        self.vel = Vec2::zero();
        self.angular_vel = 0.0;
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.inv_mass == 0.0
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Refresh and return the cached kinetic energy.
    pub fn update_kinetic_energy(&mut self) -> f32 {
        self.kinetic_energy = 0.5 * self.mass * self.vel.length_squared();
        self.kinetic_energy
    }

    /// Clear the sleeping state; contacts and strong forces call this.
    #[inline]
    pub fn wake(&mut self) {
        self.sleeping = false;
        self.sleep_timer = 0.0;
    }
}
