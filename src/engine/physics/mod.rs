// Physics system using rapier2d
//
// World units are pixels and y grows downward, matching the sprite space the
// player controller works in.

pub mod body;
mod collision;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder2D};
pub use collision::CollisionGroups;
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle, DEFAULT_GRAVITY, PIXELS_PER_METER};

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{QueryFilter, Real, Vector};
