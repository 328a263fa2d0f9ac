use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn new(body_type: RigidBodyType) -> Self {
        let dynamic = body_type == RigidBodyType::Dynamic;
        Self {
            body_type,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale: if dynamic { 1.0 } else { 0.0 },
            can_sleep: dynamic,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self::new(RigidBodyType::Dynamic)
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self::new(RigidBodyType::Fixed)
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the initial linear velocity
    pub fn linvel(mut self, x: Real, y: Real) -> Self {
        self.linvel = vector![x, y];
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (characters stay upright)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body. No damping: horizontal speed is owned by the
    /// movement controller and must not bleed off behind its back.
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .linear_damping(0.0)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Default,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// Create a vertical capsule collider (good for characters)
    pub fn capsule(half_height: Real, radius: Real) -> Self {
        Self::with_shape(SharedShape::capsule_y(half_height, radius))
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .build()
    }
}

/// Common rigid body configurations for game objects
pub mod presets {
    use super::*;

    /// Create a player character body (dynamic, rotation locked)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .gravity_scale(1.0)
            .can_sleep(false) // Players should never sleep
            .build()
    }

    /// Create a player character collider (capsule spanning `width` x `height`)
    pub fn player_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_height = ((height / 2.0) - radius).max(0.0);

        ColliderBuilder2D::capsule(half_height, radius)
            .collision_groups(CollisionGroups::Player)
            .friction(0.0) // Walls must not grab the player
            .restitution(0.0)
            .density(1.0)
            .build()
    }

    /// Create a platform body (fixed/static) centered at `x`, `y`
    pub fn platform_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create a platform collider (box shape)
    pub fn platform_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Platform)
            .friction(0.0)
            .restitution(0.0)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic()
            .position(10.0, 20.0)
            .linvel(5.0, 0.0)
            .build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
        assert_eq!(body.linear_damping(), 0.0);
    }

    #[test]
    fn test_collider_builder_box() {
        let collider = ColliderBuilder2D::box_shape(1.0, 2.0).friction(0.3).build();
        assert_eq!(collider.friction(), 0.3);
    }

    #[test]
    fn test_player_preset() {
        let body = presets::player_body(0.0, 0.0);
        let collider = presets::player_collider(60.0, 100.0);

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!(body.is_rotation_locked());
        assert_eq!(collider.friction(), 0.0);

        let capsule = collider.shape().as_capsule().unwrap();
        assert_eq!(capsule.radius, 30.0);
        assert_eq!(capsule.half_height(), 20.0);
    }

    #[test]
    fn test_platform_preset() {
        let body = presets::platform_body(0.0, 500.0);
        assert_eq!(body.body_type(), RigidBodyType::Fixed);
    }
}
