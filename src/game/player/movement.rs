// Ground movement - horizontal velocity easing and direction handling

use super::catalog::{AnimationCatalog, AnimationCategory, AnimationId};
use super::config::MovementConfig;
use super::input::PlayerInput;
use super::state::{Direction, JumpType, LandingType, PlayerState};
use crate::core::math::approach;

/// Advance horizontal movement for one tick.
///
/// Velocity eases toward a target with `t = delta * rate / max_speed`, so the
/// same input produces the same curve at any frame rate.
pub fn update(
    state: &mut PlayerState,
    input: &PlayerInput,
    catalog: &AnimationCatalog,
    config: &MovementConfig,
) {
    let direction = input.direction();
    let accelerating = direction.is_some();

    track_stop_memo(state, accelerating);
    state.movement.is_walking = input.shift;
    state.movement.is_accelerating = accelerating;

    update_direction(state, direction, config);

    // Airborne momentum is left to physics unless the player steers
    if state.is_in_flight() && !accelerating {
        return;
    }

    let max_speed = config.max_speed_for(state.movement.is_walking);
    let target = target_velocity(state, direction, max_speed, config);

    let mut rate = acceleration_rate(state, catalog, config);
    if state.is_in_flight() {
        rate *= config.air_control;
    }

    let mut vx = approach(state.velocity.x, target, input.delta * rate / max_speed);
    if target == 0.0 && vx.abs() < config.stop_snap_speed {
        vx = 0.0;
    }
    state.velocity.x = vx;
}

/// Remember the speed at which directional input was let go
fn track_stop_memo(state: &mut PlayerState, accelerating: bool) {
    let was_accelerating = state.movement.is_accelerating;
    if was_accelerating && !accelerating && state.is_grounded() {
        state.movement.stopping_initial_speed = Some(state.velocity.x.abs());
    } else if !was_accelerating && accelerating {
        state.movement.stopping_initial_speed = None;
    }
}

fn update_direction(
    state: &mut PlayerState,
    direction: Option<Direction>,
    config: &MovementConfig,
) {
    let Some(direction) = direction else {
        // Letting go abandons a turn in progress
        state.movement.switch_target_direction = None;
        return;
    };

    match state.movement.switch_target_direction {
        Some(target) if target == direction => {}
        Some(_) => {
            state.movement.switch_target_direction = None;
            state.facing = direction;
        }
        None => {
            let turning_at_speed = state.is_grounded()
                && !state.movement.is_walking
                && direction != state.facing
                && state.velocity.x.abs() > config.direction_switch_threshold;
            if turning_at_speed {
                log::debug!("Direction switch to {}", direction.as_str());
                state.movement.switch_target_direction = Some(direction);
            } else {
                state.facing = direction;
            }
        }
    }
}

fn target_velocity(
    state: &PlayerState,
    direction: Option<Direction>,
    max_speed: f32,
    config: &MovementConfig,
) -> f32 {
    let Some(direction) = direction else {
        return 0.0;
    };

    let landing = if state.is_landing() {
        state.jump.landing_type
    } else {
        None
    };
    let anticipating_jump = state.is_jumping()
        && !state.jump.velocity_applied
        && state.jump.jump_type != Some(JumpType::Run);

    let speed = match landing {
        Some(LandingType::Heavy) => config.rolling_speed,
        Some(LandingType::Stationary) => config.stationary_jump_speed,
        Some(LandingType::Light) => max_speed * config.light_landing_speed_scale,
        None if anticipating_jump => config.stationary_jump_speed,
        None => max_speed,
    };
    speed * direction.sign()
}

fn acceleration_rate(
    state: &PlayerState,
    catalog: &AnimationCatalog,
    config: &MovementConfig,
) -> f32 {
    let movement = &state.movement;

    if !movement.is_accelerating {
        return if state.is_landing() || catalog.has_category(state.animation, AnimationCategory::Idle)
        {
            config.idle_deceleration
        } else if movement.is_walking {
            config.walk_stop_deceleration
        } else {
            config.run_stop_deceleration
        };
    }

    if movement.is_walking {
        config.walk_acceleration
    } else if movement.switch_target_direction.is_some() {
        config.direction_switch_acceleration
    } else if state.animation == AnimationId::RunStart {
        let frame = catalog.frame_at(AnimationId::RunStart, state.animation_time);
        if frame < config.initial_frames_threshold {
            config.run_start_initial_acceleration
        } else {
            config.run_start_acceleration
        }
    } else if is_landing_continue(state.animation, catalog) {
        config.run_start_acceleration
    } else {
        config.run_acceleration
    }
}

/// Landing follow-up that carries on running
fn is_landing_continue(id: AnimationId, catalog: &AnimationCatalog) -> bool {
    catalog.has_category(id, AnimationCategory::Landing)
        && catalog.has_category(id, AnimationCategory::Transitioning)
        && !catalog.has_category(id, AnimationCategory::Stopping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::state::JumpStage;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn held(direction: Direction) -> PlayerInput {
        PlayerInput {
            left: direction == Direction::Left,
            right: direction == Direction::Right,
            ..PlayerInput::idle(DT)
        }
    }

    fn running_state(vx: f32) -> PlayerState {
        let mut state = PlayerState::default();
        state.physics.on_floor = true;
        state.velocity.x = vx;
        state.animation = AnimationId::RunLoop;
        state.movement.is_accelerating = true;
        state
    }

    #[test]
    fn test_run_acceleration_curve() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = running_state(100.0);

        update(&mut state, &held(Direction::Right), &catalog, &config);
        // t = DT * 1500 / 500
        let t = DT * 1500.0 / 500.0;
        assert_relative_eq!(state.velocity.x, 100.0 + (500.0 - 100.0) * t, epsilon = 1e-3);
    }

    #[test]
    fn test_run_start_initial_frames_are_slow() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = running_state(0.0);
        state.animation = AnimationId::RunStart;

        update(&mut state, &held(Direction::Right), &catalog, &config);
        assert_relative_eq!(state.velocity.x, 500.0 * DT * 100.0 / 500.0, epsilon = 1e-3);

        // Past the initial frames the full start rate kicks in
        state.velocity.x = 0.0;
        state.animation_time = 8.5 / 30.0;
        update(&mut state, &held(Direction::Right), &catalog, &config);
        assert_relative_eq!(state.velocity.x, 500.0 * DT * 2000.0 / 500.0, epsilon = 1e-3);
    }

    #[test]
    fn test_release_records_stop_memo() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = running_state(-450.0);

        update(&mut state, &PlayerInput::idle(DT), &catalog, &config);
        assert_eq!(state.movement.stopping_initial_speed, Some(450.0));
        assert!(!state.movement.is_accelerating);
        assert!(state.velocity.x > -450.0);

        // Pressing again forgets it
        update(&mut state, &held(Direction::Left), &catalog, &config);
        assert_eq!(state.movement.stopping_initial_speed, None);
    }

    #[test]
    fn test_stop_snaps_to_zero() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = PlayerState::default();
        state.velocity.x = 0.5;

        update(&mut state, &PlayerInput::idle(0.0001), &catalog, &config);
        assert_eq!(state.velocity.x, 0.0);
    }

    #[test]
    fn test_reversal_at_speed_starts_switch() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = running_state(500.0);

        update(&mut state, &held(Direction::Left), &catalog, &config);
        assert_eq!(state.movement.switch_target_direction, Some(Direction::Left));
        assert_eq!(state.facing, Direction::Right);
        let t = DT * 2000.0 / 500.0;
        assert_relative_eq!(state.velocity.x, 500.0 + (-500.0 - 500.0) * t, epsilon = 1e-3);
    }

    #[test]
    fn test_slow_reversal_turns_instantly() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = running_state(200.0);

        update(&mut state, &held(Direction::Left), &catalog, &config);
        assert_eq!(state.movement.switch_target_direction, None);
        assert_eq!(state.facing, Direction::Left);
    }

    #[test]
    fn test_abandoned_switch() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = running_state(450.0);
        state.movement.switch_target_direction = Some(Direction::Left);

        update(&mut state, &held(Direction::Right), &catalog, &config);
        assert_eq!(state.movement.switch_target_direction, None);
        assert_eq!(state.facing, Direction::Right);

        state.movement.switch_target_direction = Some(Direction::Left);
        update(&mut state, &PlayerInput::idle(DT), &catalog, &config);
        assert_eq!(state.movement.switch_target_direction, None);
    }

    #[test]
    fn test_airborne_without_input_keeps_momentum() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = PlayerState::default();
        state.jump.stage = JumpStage::Falling;
        state.velocity.x = 320.0;

        update(&mut state, &PlayerInput::idle(DT), &catalog, &config);
        assert_eq!(state.velocity.x, 320.0);
    }

    #[test]
    fn test_air_control_scales_rate() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = PlayerState::default();
        state.jump.stage = JumpStage::Falling;
        state.animation = AnimationId::JumpForwardFall;
        state.velocity.x = 0.0;

        update(&mut state, &held(Direction::Left), &catalog, &config);
        assert_eq!(state.facing, Direction::Left);
        let t = DT * 1500.0 * 0.8 / 500.0;
        assert_relative_eq!(state.velocity.x, -500.0 * t, epsilon = 1e-3);
    }

    #[test]
    fn test_landing_targets() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();

        let mut state = running_state(0.0);
        state.jump.stage = JumpStage::Landing;
        state.jump.landing_type = Some(LandingType::Heavy);
        state.animation = AnimationId::RunJumpLandHeavy;
        // A huge step lands exactly on the target
        let long_tick = PlayerInput {
            delta: 10.0,
            ..held(Direction::Right)
        };
        update(&mut state, &long_tick, &catalog, &config);
        assert_relative_eq!(state.velocity.x, 300.0);

        state.jump.landing_type = Some(LandingType::Light);
        update(&mut state, &long_tick, &catalog, &config);
        assert_relative_eq!(state.velocity.x, 425.0);

        state.jump.landing_type = Some(LandingType::Stationary);
        update(&mut state, &long_tick, &catalog, &config);
        assert_relative_eq!(state.velocity.x, 100.0);
    }

    #[test]
    fn test_anticipation_speed_cap() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = running_state(0.0);
        state.jump.stage = JumpStage::Jumping;
        state.jump.jump_type = Some(JumpType::Forward);
        state.animation = AnimationId::JumpForwardStart;

        let long_tick = PlayerInput {
            delta: 10.0,
            ..held(Direction::Right)
        };
        update(&mut state, &long_tick, &catalog, &config);
        assert_relative_eq!(state.velocity.x, 100.0);
    }

    #[test]
    fn test_idle_deceleration() {
        let catalog = AnimationCatalog::standard();
        let config = MovementConfig::default();
        let mut state = PlayerState::default();
        state.velocity.x = 200.0;

        update(&mut state, &PlayerInput::idle(DT), &catalog, &config);
        let t = DT * 3000.0 / 500.0;
        assert_relative_eq!(state.velocity.x, 200.0 * (1.0 - t), epsilon = 1e-3);
    }
}
