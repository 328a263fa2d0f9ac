// Player tuning - jump, ground movement and body dimensions
// All distances are pixels, all times seconds, y grows downward

use glam::Vec2;

/// Launch and landing tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpConfig {
    /// World gravity the launch numbers were tuned against (pixels/s²)
    pub gravity: f32,
    /// Vertical launch velocity for every jump type (negative is up)
    pub jump_velocity: f32,
    /// Launch velocity of a forward jump, x is scaled by facing
    pub forward_jump_velocity: Vec2,
    /// Launch velocity of a run jump, x is scaled by facing
    pub run_jump_velocity: Vec2,
    /// Horizontal speed above which a jump counts as a run jump
    pub run_jump_threshold: f32,
    /// Fall speed above which a run jump lands heavy
    pub heavy_landing_threshold: f32,
    /// Fall speed above which a forward jump lands heavy
    pub max_heavy_landing_threshold: f32,
    /// Horizontal impulse added on a heavy landing
    pub heavy_landing_impact_velocity: f32,
    /// Downward speed that turns a jump (or a ledge walk-off) into a fall
    pub fall_velocity_threshold: f32,
}

pub const DEFAULT_JUMP: JumpConfig = JumpConfig {
    gravity: 1000.0,
    jump_velocity: -600.0,
    forward_jump_velocity: Vec2::new(400.0, -600.0),
    run_jump_velocity: Vec2::new(500.0, -600.0),
    run_jump_threshold: 300.0,
    heavy_landing_threshold: 500.0,
    max_heavy_landing_threshold: 900.0,
    heavy_landing_impact_velocity: 150.0,
    fall_velocity_threshold: 100.0,
};

impl Default for JumpConfig {
    fn default() -> Self {
        DEFAULT_JUMP
    }
}

/// Ground movement tuning. Rates are pixels/s² and feed the velocity easing,
/// speeds are pixels/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// Running top speed
    pub max_speed: f32,
    /// Walking top speed
    pub max_walk_speed: f32,
    pub run_acceleration: f32,
    pub walk_acceleration: f32,
    /// Used after the initial run-start frames, during turns and landing recovery
    pub run_start_acceleration: f32,
    /// Used during the first frames of the run-start animation
    pub run_start_initial_acceleration: f32,
    /// Number of run-start frames that use the initial acceleration
    pub initial_frames_threshold: u32,
    /// Deceleration while idle or landing with no input
    pub idle_deceleration: f32,
    pub run_stop_deceleration: f32,
    pub walk_stop_deceleration: f32,
    /// Speed above which reversing input plays a turn animation
    pub direction_switch_threshold: f32,
    pub direction_switch_acceleration: f32,
    /// Target speed while recovering from a heavy landing
    pub rolling_speed: f32,
    /// Target speed before launch of a non-run jump and during a stationary landing
    pub stationary_jump_speed: f32,
    /// Share of top speed kept while recovering from a light landing
    pub light_landing_speed_scale: f32,
    /// Rate multiplier while in flight
    pub air_control: f32,
    /// Speeds below this snap to zero once the target is zero
    pub stop_snap_speed: f32,
}

pub const DEFAULT_MOVEMENT: MovementConfig = MovementConfig {
    max_speed: 500.0,
    max_walk_speed: 250.0,
    run_acceleration: 1500.0,
    walk_acceleration: 750.0,
    run_start_acceleration: 2000.0,
    run_start_initial_acceleration: 100.0,
    initial_frames_threshold: 7,
    idle_deceleration: 3000.0,
    run_stop_deceleration: 2000.0,
    walk_stop_deceleration: 1000.0,
    direction_switch_threshold: 400.0,
    direction_switch_acceleration: 2000.0,
    rolling_speed: 300.0,
    stationary_jump_speed: 100.0,
    light_landing_speed_scale: 0.85,
    air_control: 0.8,
    stop_snap_speed: 1.0,
};

impl Default for MovementConfig {
    fn default() -> Self {
        DEFAULT_MOVEMENT
    }
}

impl MovementConfig {
    /// Top speed for the current walk modifier
    pub fn max_speed_for(&self, walking: bool) -> f32 {
        if walking {
            self.max_walk_speed
        } else {
            self.max_speed
        }
    }
}

/// Physics body dimensions (for the collider)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyConfig {
    pub width: f32,
    pub height: f32,
    /// How far below the feet the floor probe reaches
    pub floor_probe_distance: f32,
}

pub const DEFAULT_BODY: BodyConfig = BodyConfig {
    width: 60.0,
    height: 100.0,
    floor_probe_distance: 4.0,
};

impl Default for BodyConfig {
    fn default() -> Self {
        DEFAULT_BODY
    }
}

impl BodyConfig {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Everything the controller is tuned by
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControllerConfig {
    pub jump: JumpConfig,
    pub movement: MovementConfig,
    pub body: BodyConfig,
}

impl ControllerConfig {
    /// Stock tuning
    pub fn standard() -> Self {
        Self::default()
    }
}
