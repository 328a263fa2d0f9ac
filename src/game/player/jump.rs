// Jump sub-machine: grounded -> jumping -> falling -> landing -> grounded
//
// Stage changes happen in `update` (once per tick) and in the two animation
// lifecycle hooks `finish_launch` and `finish_landing`.

use glam::Vec2;

use super::catalog::AnimationCatalog;
use super::config::JumpConfig;
use super::input::PlayerInput;
use super::state::{Direction, JumpStage, JumpType, LandingType, PlayerState};
use crate::core::math::sign_or;

/// Stage change produced by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpTransition {
    Started(JumpType),
    Fell,
    Landed(LandingType),
}

/// Advance the jump stage for one tick.
///
/// Rules are checked in precedence order: land, start, fall. At most one
/// transition fires per tick.
pub fn update(
    state: &mut PlayerState,
    input: &PlayerInput,
    catalog: &AnimationCatalog,
    config: &JumpConfig,
) -> Option<JumpTransition> {
    if state.is_in_flight() {
        state.jump.max_fall_velocity = state.jump.max_fall_velocity.max(state.velocity.y);
    }

    if should_land(state) {
        let landing = land(state, input, config);
        return Some(JumpTransition::Landed(landing));
    }

    if input.space && state.jump.has_released_space && state.is_grounded() && state.physics.on_floor {
        let jump_type = start_jump(state, input, catalog, config);
        return Some(JumpTransition::Started(jump_type));
    }

    if should_fall(state, config) {
        if state.is_grounded() {
            // Walked off a ledge
            state.jump.jump_type = Some(JumpType::Neutral);
            state.jump.velocity_applied = true;
            state.jump.max_fall_velocity = state.velocity.y.max(0.0);
            state.movement.switch_target_direction = None;
        }
        state.jump.stage = JumpStage::Falling;
        log::debug!("Falling ({:?})", state.jump.jump_type);
        return Some(JumpTransition::Fell);
    }

    state.jump.has_released_space = !input.space;
    None
}

fn should_land(state: &PlayerState) -> bool {
    state.is_in_flight() && state.physics.on_floor && state.velocity.y >= 0.0
}

fn should_fall(state: &PlayerState, config: &JumpConfig) -> bool {
    let falling_fast = state.velocity.y > config.fall_velocity_threshold;
    match state.jump.stage {
        JumpStage::Jumping => state.jump.velocity_applied && falling_fast,
        JumpStage::Grounded => !state.physics.on_floor && falling_fast,
        _ => false,
    }
}

/// Jump type for the current speed and input
pub fn classify_jump(velocity_x: f32, input: &PlayerInput, config: &JumpConfig) -> JumpType {
    if velocity_x.abs() > config.run_jump_threshold {
        JumpType::Run
    } else if input.has_horizontal() {
        JumpType::Forward
    } else {
        JumpType::Neutral
    }
}

fn start_jump(
    state: &mut PlayerState,
    input: &PlayerInput,
    catalog: &AnimationCatalog,
    config: &JumpConfig,
) -> JumpType {
    let jump_type = classify_jump(state.velocity.x, input, config);

    state.facing = state
        .movement
        .switch_target_direction
        .take()
        .or_else(|| input.direction())
        .unwrap_or(state.facing);
    state.movement.stopping_initial_speed = None;

    state.jump.stage = JumpStage::Jumping;
    state.jump.jump_type = Some(jump_type);
    state.jump.landing_type = None;
    state.jump.has_released_space = false;
    state.jump.max_fall_velocity = 0.0;
    state.jump.velocity_applied = false;

    let deferred = catalog
        .jump_start_animation(jump_type)
        .and_then(|start| catalog.physics_trigger(start))
        .is_some();
    if !deferred {
        state.velocity = launch_velocity(jump_type, state.facing, state.velocity, config);
        state.jump.velocity_applied = true;
    }

    log::debug!(
        "Jump started: {:?} facing {} (launch {})",
        jump_type,
        state.facing.as_str(),
        if deferred { "deferred" } else { "immediate" }
    );
    jump_type
}

/// Launch velocity for a jump type. Neutral jumps keep their horizontal
/// momentum, forward and run jumps launch along `facing`.
pub fn launch_velocity(
    jump_type: JumpType,
    facing: Direction,
    current: Vec2,
    config: &JumpConfig,
) -> Vec2 {
    match jump_type {
        JumpType::Neutral => Vec2::new(current.x, config.jump_velocity),
        JumpType::Forward => Vec2::new(
            config.forward_jump_velocity.x * facing.sign(),
            config.forward_jump_velocity.y,
        ),
        JumpType::Run => Vec2::new(
            config.run_jump_velocity.x * facing.sign(),
            config.run_jump_velocity.y,
        ),
    }
}

/// Landing severity for a finished jump. Holding down always lands heavy.
pub fn classify_landing(
    jump_type: JumpType,
    max_fall_velocity: f32,
    input: &PlayerInput,
    config: &JumpConfig,
) -> LandingType {
    if input.down {
        return LandingType::Heavy;
    }
    match jump_type {
        JumpType::Run => {
            if max_fall_velocity > config.heavy_landing_threshold {
                LandingType::Heavy
            } else {
                LandingType::Light
            }
        }
        JumpType::Forward => {
            if max_fall_velocity > config.max_heavy_landing_threshold {
                LandingType::Heavy
            } else if input.has_horizontal() {
                LandingType::Light
            } else {
                LandingType::Stationary
            }
        }
        JumpType::Neutral => LandingType::Stationary,
    }
}

fn land(state: &mut PlayerState, input: &PlayerInput, config: &JumpConfig) -> LandingType {
    let jump_type = state.jump.jump_type.unwrap_or_default();
    let landing = classify_landing(jump_type, state.jump.max_fall_velocity, input, config);

    if landing == LandingType::Heavy {
        let sign = sign_or(state.velocity.x, state.facing.sign());
        state.velocity.x += config.heavy_landing_impact_velocity * sign;
    }

    state.jump.stage = JumpStage::Landing;
    state.jump.landing_type = Some(landing);
    state.movement.stopping_initial_speed = None;

    log::debug!(
        "Landed {:?} from {:?} jump (max fall {:.0})",
        landing,
        jump_type,
        state.jump.max_fall_velocity
    );
    landing
}

/// Push a launch still waiting for its trigger frame
pub fn apply_launch(state: &mut PlayerState, config: &JumpConfig) -> Option<Vec2> {
    if !state.is_jumping() || state.jump.velocity_applied {
        return None;
    }
    let jump_type = state.jump.jump_type.unwrap_or_default();
    state.velocity = launch_velocity(jump_type, state.facing, state.velocity, config);
    state.jump.velocity_applied = true;
    Some(state.velocity)
}

/// The jump start animation ran to its end: the body is airborne from here on
pub fn finish_launch(state: &mut PlayerState, config: &JumpConfig) {
    if !state.is_jumping() {
        return;
    }
    apply_launch(state, config);
    state.jump.stage = JumpStage::Falling;
}

/// The landing animation chain ended: back on the ground with a clean slate
pub fn finish_landing(state: &mut PlayerState) {
    state.jump.stage = JumpStage::Grounded;
    state.jump.jump_type = None;
    state.jump.landing_type = None;
    state.jump.velocity_applied = false;
    state.jump.max_fall_velocity = 0.0;
    state.movement.stopping_initial_speed = None;
}
