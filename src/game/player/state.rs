// Player state aggregate
//
// One `PlayerState` exists per spawned player. It mirrors the physics body once
// per tick and is otherwise only mutated by the controller.

use glam::Vec2;

use super::catalog::AnimationId;

/// Horizontal orientation of the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// -1.0 for left, 1.0 for right
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Direction of travel for a horizontal velocity, `None` when standing still
    pub fn from_velocity(vx: f32) -> Option<Self> {
        if vx > 0.0 {
            Some(Self::Right)
        } else if vx < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Name used by engine-side consumers
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Aerial sub-state. Exactly one stage is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JumpStage {
    /// On the ground, free to walk, run or jump
    #[default]
    Grounded,
    /// Jump started; launch velocity may still be waiting for its trigger frame
    Jumping,
    /// Moving downward after a jump or after walking off a ledge
    Falling,
    /// Touched down, playing a landing animation
    Landing,
}

impl JumpStage {
    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Grounded)
    }

    /// Jumping or falling
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }
}

/// Jump flavour, decides launch velocity and animation family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JumpType {
    #[default]
    Neutral,
    Forward,
    Run,
}

/// Landing severity, decides landing animation and recovery speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingType {
    Heavy,
    Light,
    Stationary,
}

/// Ground locomotion sub-state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementState {
    /// Walk modifier held
    pub is_walking: bool,
    /// A horizontal direction is held
    pub is_accelerating: bool,
    /// Pending 180° turn; facing flips when the switch animation completes
    pub switch_target_direction: Option<Direction>,
    /// Speed recorded when directional input was released
    pub stopping_initial_speed: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpState {
    pub stage: JumpStage,
    /// Space was up at some point since the last jump started
    pub has_released_space: bool,
    pub jump_type: Option<JumpType>,
    pub landing_type: Option<LandingType>,
    /// Launch velocity has been pushed to the body
    pub velocity_applied: bool,
    /// Largest downward velocity seen during the current jump
    pub max_fall_velocity: f32,
}

impl Default for JumpState {
    fn default() -> Self {
        Self {
            stage: JumpStage::Grounded,
            has_released_space: true,
            jump_type: None,
            landing_type: None,
            velocity_applied: false,
            max_fall_velocity: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsState {
    pub on_floor: bool,
}

/// Root aggregate for one player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Direction,
    pub animation: AnimationId,
    /// Seconds the current animation has been selected
    pub animation_time: f32,
    pub movement: MovementState,
    pub jump: JumpState,
    pub physics: PhysicsState,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl PlayerState {
    /// Spawn state: grounded, idle, facing right
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Direction::Right,
            animation: AnimationId::Idle,
            animation_time: 0.0,
            movement: MovementState::default(),
            jump: JumpState::default(),
            physics: PhysicsState::default(),
        }
    }

    pub fn stage(&self) -> JumpStage {
        self.jump.stage
    }

    pub fn is_grounded(&self) -> bool {
        self.jump.stage == JumpStage::Grounded
    }

    pub fn is_jumping(&self) -> bool {
        self.jump.stage == JumpStage::Jumping
    }

    pub fn is_falling(&self) -> bool {
        self.jump.stage == JumpStage::Falling
    }

    pub fn is_landing(&self) -> bool {
        self.jump.stage == JumpStage::Landing
    }

    /// Off the ground under the body's own momentum. Anticipation frames
    /// before the launch velocity lands still count as on the ground.
    pub fn is_in_flight(&self) -> bool {
        self.is_falling() || (self.is_jumping() && self.jump.velocity_applied)
    }

    /// Switch to a new animation, restarting its clock if it changed
    pub fn set_animation(&mut self, animation: AnimationId) -> bool {
        if self.animation == animation {
            return false;
        }
        self.animation = animation;
        self.animation_time = 0.0;
        true
    }

    /// Drop a pending turn, committing the facing it was heading for
    pub fn commit_direction_switch(&mut self) {
        if let Some(target) = self.movement.switch_target_direction.take() {
            self.facing = target;
        }
    }
}
