// Normalized per-tick records the controller consumes

use glam::Vec2;

use super::state::Direction;

/// Raw input flags for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Jump
    pub space: bool,
    /// Walk modifier
    pub shift: bool,
    /// Seconds since the previous tick
    pub delta: f32,
}

impl PlayerInput {
    /// Empty input for a tick of `delta` seconds
    pub fn idle(delta: f32) -> Self {
        Self {
            delta,
            ..Default::default()
        }
    }

    /// Held horizontal direction. Left wins when both are down.
    pub fn direction(&self) -> Option<Direction> {
        if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }

    pub fn has_horizontal(&self) -> bool {
        self.left || self.right
    }
}

/// Physics snapshot taken once at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsSample {
    pub position: Vec2,
    pub velocity: Vec2,
    pub on_floor: bool,
}

impl PhysicsSample {
    pub fn new(position: Vec2, velocity: Vec2, on_floor: bool) -> Self {
        Self {
            position,
            velocity,
            on_floor,
        }
    }

    /// At rest on the floor
    pub fn grounded(position: Vec2) -> Self {
        Self::new(position, Vec2::ZERO, true)
    }
}
