use log::{debug, trace};

use crate::collision::{collide, resolve_contact, BodyHandle, UniformGrid};
use crate::constraints::{Joint, JointHandle};
use crate::dynamics::RigidBody;
use crate::error::PhysicsError;
use crate::math::Vec3;

/// Configuration for the physics world
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Gravity vector applied to every dynamic body
    pub gravity: Vec3,
    /// Fixed timestep used by every simulation step
    pub fixed_dt: f32,
    /// Cell size of the uniform broad-phase grid
    pub cell_size: f32,
    /// Maximum fixed steps a single `advance` call may run
    pub max_substeps: usize,
    /// Longest frame time a single `advance` call will accept
    pub max_frame_time: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.8, 0.0),
            fixed_dt: 1.0 / 60.0,
            cell_size: 2.0,
            max_substeps: 8,
            max_frame_time: 0.25,
        }
    }
}

/// The physics world: owns all bodies and joints and advances the
/// simulation in fixed steps.
pub struct World {
    config: WorldConfig,
    /// All rigid bodies; freed slots carry an invalid handle
    bodies: Vec<RigidBody>,
    /// Free body indices for reuse
    free_bodies: Vec<usize>,
    joints: Vec<Joint>,
    broad_phase: UniformGrid,
    /// Unsimulated time carried between `advance` calls
    accumulator: f32,
    /// Total simulated time
    time: f32,
}

impl World {
    /// Creates a new physics world.
    ///
    /// Fails if the fixed timestep or the grid cell size is not a
    /// positive finite number.
    pub fn new(config: WorldConfig) -> Result<Self, PhysicsError> {
        if !(config.fixed_dt > 0.0 && config.fixed_dt.is_finite()) {
            return Err(PhysicsError::InvalidTimestep(config.fixed_dt));
        }
        let broad_phase = UniformGrid::new(config.cell_size)?;
        Ok(Self {
            config,
            bodies: Vec::new(),
            free_bodies: Vec::new(),
            joints: Vec::new(),
            broad_phase,
            accumulator: 0.0,
            time: 0.0,
        })
    }

    /// Adds a body to the world and returns its handle
    pub fn add_body(&mut self, mut body: RigidBody) -> BodyHandle {
        let handle = if let Some(index) = self.free_bodies.pop() {
            BodyHandle::new(index as u32)
        } else {
            let index = self.bodies.len();
            self.bodies.push(RigidBody::default());
            BodyHandle::new(index as u32)
        };

        body.handle = handle;
        self.bodies[handle.index()] = body;
        handle
    }

    /// Removes a body and every joint that references it.
    ///
    /// The slot is recycled by a later `add_body`; the old handle stops
    /// resolving immediately.
    pub fn remove_body(&mut self, handle: BodyHandle) {
        let index = handle.index();
        let Some(body) = self.bodies.get_mut(index) else {
            return;
        };
        if body.handle != handle {
            return;
        }

        *body = RigidBody::default();
        self.free_bodies.push(index);
        self.joints.retain(|joint| {
            let (a, b) = joint.body_handles();
            a != handle && b != Some(handle)
        });
    }

    /// Gets a reference to a live body
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies
            .get(handle.index())
            .filter(|body| body.handle == handle)
    }

    /// Gets a mutable reference to a live body
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies
            .get_mut(handle.index())
            .filter(|body| body.handle == handle)
    }

    /// Iterates over all live bodies
    pub fn bodies(&self) -> impl Iterator<Item = &RigidBody> {
        self.bodies.iter().filter(|body| body.handle.is_valid())
    }

    /// Adds a joint, validating that every referenced body is live
    pub fn add_joint(&mut self, joint: Joint) -> Result<JointHandle, PhysicsError> {
        let (a, b) = joint.body_handles();
        if self.body(a).is_none() {
            return Err(PhysicsError::InvalidBodyHandle(a));
        }
        if let Some(b) = b {
            if self.body(b).is_none() {
                return Err(PhysicsError::InvalidBodyHandle(b));
            }
        }

        let handle = JointHandle::new(self.joints.len() as u32);
        self.joints.push(joint);
        Ok(handle)
    }

    /// Removes every body and joint and resets the clock
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.free_bodies.clear();
        self.joints.clear();
        self.accumulator = 0.0;
        self.time = 0.0;
    }

    /// Applies a mass-proportional force to every dynamic body.
    ///
    /// The force is an acceleration in disguise: each body receives
    /// `force * mass`, so all dynamic bodies accelerate equally.
    pub fn apply_global_force(&mut self, force: Vec3) {
        for body in &mut self.bodies {
            if body.handle.is_valid() && !body.is_static() {
                body.apply_force(force * body.mass);
            }
        }
    }

    /// Runs exactly one fixed step.
    ///
    /// Order: gravity, integration, broad phase, narrow phase with
    /// contact resolution, then one joint pass.
    pub fn step(&mut self) {
        let dt = self.config.fixed_dt;
        let gravity = self.config.gravity;

        self.apply_global_force(gravity);

        for body in &mut self.bodies {
            if body.handle.is_valid() {
                body.integrate(dt);
            }
        }

        self.broad_phase
            .update(self.bodies.iter().filter(|body| body.handle.is_valid()));
        let pairs = self.broad_phase.potential_pairs();
        trace!("broad phase: {} candidate pairs", pairs.len());

        let mut resolved = 0usize;
        for pair in pairs {
            let (ia, ib) = (pair.body_a.index(), pair.body_b.index());
            if ib >= self.bodies.len() || ia >= ib {
                continue;
            }
            if self.bodies[ia].is_static() && self.bodies[ib].is_static() {
                continue;
            }

            let (left, right) = self.bodies.split_at_mut(ib);
            let (a, b) = (&mut left[ia], &mut right[0]);
            if let Some(contact) = collide(a, b) {
                resolve_contact(a, b, &contact);
                resolved += 1;
            }
        }

        // Joints are taken out of the world for the duration of the pass
        // so they can borrow the body slice
        let mut joints = std::mem::take(&mut self.joints);
        for joint in &mut joints {
            joint.pre_solve(&self.bodies, dt);
            joint.solve(&mut self.bodies, dt);
            joint.post_solve();
        }
        self.joints = joints;

        self.time += dt;
        trace!("step done: t={:.4}, {} contacts resolved", self.time, resolved);
    }

    /// Feeds elapsed wall-clock time into the fixed-step loop.
    ///
    /// The elapsed time is clamped to `max_frame_time`, accumulated, and
    /// consumed in fixed steps up to `max_substeps` per call. Leftover
    /// time beyond one step is dropped so a stall cannot build up a
    /// backlog of catch-up steps.
    pub fn advance(&mut self, elapsed: f32) {
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, self.config.max_frame_time)
        } else {
            0.0
        };
        self.accumulator += elapsed;

        let dt = self.config.fixed_dt;
        let mut steps = 0;
        while self.accumulator >= dt && steps < self.config.max_substeps {
            self.step();
            self.accumulator -= dt;
            steps += 1;
        }

        if self.accumulator > dt {
            debug!(
                "dropping {:.4}s of unsimulated time after {} substeps",
                self.accumulator - dt,
                steps
            );
            self.accumulator = dt;
        }
    }

    /// Total simulated time
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Number of live bodies
    pub fn num_bodies(&self) -> usize {
        self.bodies.len() - self.free_bodies.len()
    }

    /// Number of joints
    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    /// Current gravity vector
    pub fn gravity(&self) -> Vec3 {
        self.config.gravity
    }

    /// Replaces the gravity vector
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
    }

    /// The world configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}
