use rapier2d::prelude::*;

use super::body::presets;

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Default downward gravity in pixels/s² (y grows downward)
pub const DEFAULT_GRAVITY: Real = 1000.0;

/// Rapier tolerances are tuned for meters; this many pixels make one meter
pub const PIXELS_PER_METER: Real = 100.0;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector, pointing down the screen by default
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, DEFAULT_GRAVITY])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;
        integration_parameters.length_unit = PIXELS_PER_METER;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        let handle = self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set);
        // Keep queries valid before the first step
        self.query_pipeline
            .update(&self.rigid_body_set, &self.collider_set);
        handle
    }

    /// Add a fixed box platform centered at (`x`, `y`)
    pub fn add_platform(&mut self, x: Real, y: Real, width: Real, height: Real) -> RigidBodyHandle {
        let handle = self.add_rigid_body(presets::platform_body(x, y));
        self.add_collider(presets::platform_collider(width, height), handle);
        handle
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
        self.query_pipeline
            .update(&self.rigid_body_set, &self.collider_set);
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        ray_origin: Vector<Real>,
        ray_dir: Vector<Real>,
        max_toi: Real,
        solid: bool,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, Real)> {
        let ray = Ray::new(point![ray_origin.x, ray_origin.y], ray_dir);
        self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            solid,
            filter,
        )
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_points_down_screen() {
        let world = PhysicsWorld::new();
        assert_eq!(world.gravity(), vector![0.0, DEFAULT_GRAVITY]);
        assert_eq!(world.timestep(), 1.0 / 60.0);
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_rigid_body(presets::player_body(0.0, 0.0));
        world.add_collider(presets::player_collider(60.0, 100.0), handle);

        for _ in 0..30 {
            world.step();
        }

        let body = world.get_rigid_body(handle).unwrap();
        assert!(body.translation().y > 0.0);
        assert!(body.linvel().y > 0.0);
    }

    #[test]
    fn test_raycast_hits_platform() {
        let mut world = PhysicsWorld::new();
        world.add_platform(0.0, 500.0, 400.0, 20.0);

        // Platform top sits at y = 490
        let hit = world.raycast(
            vector![0.0, 480.0],
            vector![0.0, 1.0],
            20.0,
            true,
            QueryFilter::default(),
        );
        let (_, toi) = hit.expect("ray should reach the platform");
        assert!((toi - 10.0).abs() < 1e-3);

        let miss = world.raycast(
            vector![0.0, 400.0],
            vector![0.0, 1.0],
            20.0,
            true,
            QueryFilter::default(),
        );
        assert!(miss.is_none());
    }

    #[test]
    fn test_queries_see_new_colliders_before_first_step() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::player_body(0.0, 0.0));
        world.add_collider(presets::player_collider(60.0, 100.0), body);

        let hit = world.raycast(
            vector![0.0, -200.0],
            vector![0.0, 1.0],
            400.0,
            true,
            QueryFilter::default(),
        );
        assert!(hit.is_some());

        // Removal is visible immediately as well
        world.remove_rigid_body(body);
        let hit = world.raycast(
            vector![0.0, -200.0],
            vector![0.0, 1.0],
            400.0,
            true,
            QueryFilter::default(),
        );
        assert!(hit.is_none());
    }
}
