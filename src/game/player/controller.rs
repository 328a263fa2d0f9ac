// Player controller - owns the state and runs one tick at a time
//
// Tick order: physics sync -> jump stage -> horizontal movement -> animation.
// Playback lifecycle events are fed back through `on_animation_complete` and
// `on_animation_frame_event` as soon as they fire.

use glam::Vec2;

use super::catalog::{AnimationCatalog, AnimationCategory, AnimationId};
use super::config::ControllerConfig;
use super::input::{PhysicsSample, PlayerInput};
use super::state::{Direction, PlayerState};
use super::{jump, movement, selector};

/// What the engine side should apply after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerOutput {
    pub velocity: Vec2,
    pub facing: Direction,
    pub animation: AnimationId,
}

/// Payload of a named frame event raised by animation playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEvent {
    pub animation: AnimationId,
    pub frame_index: u32,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    state: PlayerState,
    catalog: AnimationCatalog,
    config: ControllerConfig,
}

impl PlayerController {
    pub fn new(position: Vec2, catalog: AnimationCatalog, config: ControllerConfig) -> Self {
        Self {
            state: PlayerState::new(position),
            catalog,
            config,
        }
    }

    /// Standard catalog and tuning
    pub fn with_defaults(position: Vec2) -> Self {
        Self::new(position, AnimationCatalog::standard(), ControllerConfig::standard())
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    pub fn catalog(&self) -> &AnimationCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn output(&self) -> ControllerOutput {
        ControllerOutput {
            velocity: self.state.velocity,
            facing: self.state.facing,
            animation: self.state.animation,
        }
    }

    /// Run one simulation step
    pub fn tick(&mut self, input: &PlayerInput, sample: &PhysicsSample) -> ControllerOutput {
        self.state.position = sample.position;
        self.state.velocity = sample.velocity;
        self.state.physics.on_floor = sample.on_floor;

        if input.delta.is_nan() || input.delta <= 0.0 {
            return self.output();
        }
        self.state.animation_time += input.delta;

        let transition = jump::update(&mut self.state, input, &self.catalog, &self.config.jump);
        movement::update(&mut self.state, input, &self.catalog, &self.config.movement);

        if let Some(next) = selector::select(&self.state, &self.catalog, transition.is_some()) {
            log::trace!("Animation {} -> {}", self.state.animation, next);
            self.state.set_animation(next);
        }

        self.output()
    }

    /// Playback finished `animation`. Returns the successor that was switched to.
    pub fn on_animation_complete(&mut self, animation: AnimationId) -> Option<AnimationId> {
        if animation != self.state.animation {
            log::trace!("Ignoring completion of inactive animation {}", animation);
            return None;
        }

        let next = self
            .catalog
            .next_animation(animation, self.state.movement.is_accelerating);

        if self.catalog.has_category(animation, AnimationCategory::Jumping) && self.state.is_jumping() {
            jump::finish_launch(&mut self.state, &self.config.jump);
        }
        if self.catalog.has_category(animation, AnimationCategory::Landing) {
            jump::finish_landing(&mut self.state);
        }
        if self.catalog.has_category(animation, AnimationCategory::Stopping) {
            self.state.movement.stopping_initial_speed = None;
        }
        if animation == AnimationId::RunSwitch {
            self.state.commit_direction_switch();
        }

        if let Some(next) = next {
            log::trace!("Animation {} complete -> {}", animation, next);
            self.state.set_animation(next);
        }
        next
    }

    /// Named frame event from playback. Releases the armed jump launch when
    /// both the animation and the frame match its trigger; anything else is
    /// stale and ignored. Returns the applied launch velocity.
    pub fn on_animation_frame_event(&mut self, name: &str, event: &FrameEvent) -> Option<Vec2> {
        if !self.state.is_jumping() || self.state.jump.velocity_applied {
            return None;
        }
        if event.animation != self.state.animation {
            return None;
        }

        let jump_type = self.state.jump.jump_type.unwrap_or_default();
        let armed = self.catalog.jump_start_animation(jump_type)?;
        if armed != event.animation {
            return None;
        }
        let trigger = self.catalog.physics_trigger(armed)?;
        if trigger.event != name || trigger.frame != event.frame_index {
            return None;
        }

        let launch = jump::apply_launch(&mut self.state, &self.config.jump)?;
        log::debug!("Jump launch at {} frame {}: {:?}", armed, event.frame_index, launch);
        Some(launch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::catalog::JUMP_PHYSICS_EVENT;
    use crate::game::player::state::{JumpStage, JumpType, LandingType};
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn controller() -> PlayerController {
        PlayerController::with_defaults(Vec2::new(100.0, 300.0))
    }

    fn on_floor(velocity: Vec2) -> PhysicsSample {
        PhysicsSample::new(Vec2::new(100.0, 300.0), velocity, true)
    }

    fn airborne(velocity: Vec2) -> PhysicsSample {
        PhysicsSample::new(Vec2::new(100.0, 200.0), velocity, false)
    }

    fn input() -> PlayerInput {
        PlayerInput::idle(DT)
    }

    fn launch_event(animation: AnimationId, frame_index: u32) -> FrameEvent {
        FrameEvent {
            animation,
            frame_index,
        }
    }

    #[test]
    fn test_neutral_jump_from_idle() {
        let mut controller = controller();
        let press = PlayerInput {
            space: true,
            ..input()
        };

        let output = controller.tick(&press, &on_floor(Vec2::ZERO));
        assert_eq!(controller.state().jump.jump_type, Some(JumpType::Neutral));
        assert_eq!(output.animation, AnimationId::JumpNeutralStart);
        assert!(!controller.state().jump.velocity_applied);

        let launch = controller.on_animation_frame_event(
            JUMP_PHYSICS_EVENT,
            &launch_event(AnimationId::JumpNeutralStart, 12),
        );
        assert_eq!(launch, Some(Vec2::new(0.0, -600.0)));
        assert!(controller.state().jump.velocity_applied);
    }

    #[test]
    fn test_run_jump_launch() {
        let mut controller = controller();
        {
            let state = controller.state_mut();
            state.animation = AnimationId::RunLoop;
            state.movement.is_accelerating = true;
        }
        let press = PlayerInput {
            right: true,
            space: true,
            ..input()
        };

        let output = controller.tick(&press, &on_floor(Vec2::new(320.0, 0.0)));
        assert_eq!(controller.state().jump.jump_type, Some(JumpType::Run));
        assert_eq!(output.animation, AnimationId::RunJumpStart);

        let launch = controller
            .on_animation_frame_event(JUMP_PHYSICS_EVENT, &launch_event(AnimationId::RunJumpStart, 8))
            .unwrap();
        assert_relative_eq!(launch.x, 500.0);
        assert_relative_eq!(launch.y, -600.0);
    }

    #[test]
    fn test_heavy_landing() {
        let mut controller = controller();
        {
            let state = controller.state_mut();
            state.animation = AnimationId::JumpForwardFall;
            state.jump.stage = JumpStage::Falling;
            state.jump.jump_type = Some(JumpType::Forward);
            state.jump.velocity_applied = true;
            state.jump.max_fall_velocity = 950.0;
        }

        let output = controller.tick(&input(), &on_floor(Vec2::new(200.0, 400.0)));
        assert_eq!(controller.state().jump.landing_type, Some(LandingType::Heavy));
        assert_eq!(output.animation, AnimationId::RunJumpLandHeavy);
        // 150 impact, then one tick of landing deceleration
        assert_relative_eq!(output.velocity.x, 350.0 * (1.0 - DT * 3000.0 / 500.0), epsilon = 1e-3);
    }

    #[test]
    fn test_direction_switch_commits_on_completion() {
        let mut controller = controller();
        {
            let state = controller.state_mut();
            state.animation = AnimationId::RunLoop;
            state.movement.is_accelerating = true;
        }
        let left = PlayerInput {
            left: true,
            ..input()
        };

        let output = controller.tick(&left, &on_floor(Vec2::new(500.0, 0.0)));
        assert_eq!(output.animation, AnimationId::RunSwitch);
        assert_eq!(output.facing, Direction::Right);
        assert_eq!(
            controller.state().movement.switch_target_direction,
            Some(Direction::Left)
        );

        let output = controller.tick(&left, &on_floor(Vec2::new(300.0, 0.0)));
        assert_eq!(output.facing, Direction::Right);

        let next = controller.on_animation_complete(AnimationId::RunSwitch);
        assert_eq!(next, Some(AnimationId::RunLoop));
        assert_eq!(controller.state().facing, Direction::Left);
        assert_eq!(controller.state().movement.switch_target_direction, None);
    }

    #[test]
    fn test_release_picks_slow_stop() {
        let mut controller = controller();
        {
            let state = controller.state_mut();
            state.animation = AnimationId::RunLoop;
            state.movement.is_accelerating = true;
        }

        let output = controller.tick(&input(), &on_floor(Vec2::new(450.0, 0.0)));
        assert_eq!(output.animation, AnimationId::RunStopSlow);

        let next = controller.on_animation_complete(AnimationId::RunStopSlow);
        assert_eq!(next, Some(AnimationId::Idle));
        assert_eq!(controller.state().movement.stopping_initial_speed, None);
    }

    #[test]
    fn test_jump_starts_on_press_tick_only() {
        let mut controller = controller();
        let press = PlayerInput {
            space: true,
            ..input()
        };
        let sequence = [input(), input(), press, input(), input()];

        let stages: Vec<JumpStage> = sequence
            .iter()
            .map(|tick_input| {
                controller.tick(tick_input, &on_floor(Vec2::ZERO));
                controller.state().stage()
            })
            .collect();

        assert_eq!(
            stages,
            vec![
                JumpStage::Grounded,
                JumpStage::Grounded,
                JumpStage::Jumping,
                JumpStage::Jumping,
                JumpStage::Jumping
            ]
        );
    }

    #[test]
    fn test_full_jump_cycle_resets() {
        let mut controller = controller();
        let press = PlayerInput {
            space: true,
            ..input()
        };

        controller.tick(&press, &on_floor(Vec2::ZERO));
        controller.on_animation_frame_event(
            JUMP_PHYSICS_EVENT,
            &launch_event(AnimationId::JumpNeutralStart, 12),
        );

        controller.tick(&input(), &airborne(Vec2::new(0.0, -300.0)));
        assert!(controller.state().is_jumping());

        let output = controller.tick(&input(), &airborne(Vec2::new(0.0, 250.0)));
        assert!(controller.state().is_falling());
        assert_eq!(output.animation, AnimationId::JumpNeutralFall);

        controller.tick(&input(), &airborne(Vec2::new(0.0, 600.0)));
        assert_relative_eq!(controller.state().jump.max_fall_velocity, 600.0);

        let output = controller.tick(&input(), &on_floor(Vec2::new(0.0, 0.0)));
        assert!(controller.state().is_landing());
        assert_eq!(output.animation, AnimationId::JumpNeutralLand);

        let next = controller.on_animation_complete(AnimationId::JumpNeutralLand);
        assert_eq!(next, Some(AnimationId::Idle));
        let state = controller.state();
        assert!(state.is_grounded());
        assert_eq!(state.jump.max_fall_velocity, 0.0);
        assert_eq!(state.jump.jump_type, None);
        assert!(!state.jump.velocity_applied);
    }

    #[test]
    fn test_jump_start_completion_without_trigger() {
        let mut controller = controller();
        let press = PlayerInput {
            space: true,
            right: true,
            ..input()
        };
        controller.tick(&press, &on_floor(Vec2::ZERO));
        assert_eq!(controller.state().animation, AnimationId::JumpForwardStart);

        let next = controller.on_animation_complete(AnimationId::JumpForwardStart);
        assert_eq!(next, Some(AnimationId::JumpForwardFall));
        assert!(controller.state().is_falling());
        assert!(controller.state().jump.velocity_applied);
        assert_relative_eq!(controller.state().velocity.x, 400.0);
    }

    #[test]
    fn test_stale_frame_events_are_ignored() {
        let mut controller = controller();
        let press = PlayerInput {
            space: true,
            ..input()
        };
        controller.tick(&press, &on_floor(Vec2::ZERO));

        // Wrong frame, wrong animation, wrong event name
        assert_eq!(
            controller.on_animation_frame_event(
                JUMP_PHYSICS_EVENT,
                &launch_event(AnimationId::JumpNeutralStart, 11)
            ),
            None
        );
        assert_eq!(
            controller.on_animation_frame_event(
                JUMP_PHYSICS_EVENT,
                &launch_event(AnimationId::RunJumpStart, 8)
            ),
            None
        );
        assert_eq!(
            controller.on_animation_frame_event(
                "footstep",
                &launch_event(AnimationId::JumpNeutralStart, 12)
            ),
            None
        );
        assert!(!controller.state().jump.velocity_applied);

        // Fires once
        assert!(controller
            .on_animation_frame_event(JUMP_PHYSICS_EVENT, &launch_event(AnimationId::JumpNeutralStart, 12))
            .is_some());
        assert!(controller
            .on_animation_frame_event(JUMP_PHYSICS_EVENT, &launch_event(AnimationId::JumpNeutralStart, 12))
            .is_none());
    }

    #[test]
    fn test_completion_of_inactive_animation_is_ignored() {
        let mut controller = controller();
        assert_eq!(controller.on_animation_complete(AnimationId::RunStop), None);
        assert_eq!(controller.state().animation, AnimationId::Idle);
    }

    #[test]
    fn test_zero_delta_only_syncs_physics() {
        let mut controller = controller();
        let press = PlayerInput {
            space: true,
            delta: 0.0,
            ..Default::default()
        };
        let output = controller.tick(&press, &on_floor(Vec2::new(5.0, 0.0)));
        assert!(controller.state().is_grounded());
        assert_eq!(output.velocity, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_run_landing_continues_into_run() {
        let mut controller = controller();
        {
            let state = controller.state_mut();
            state.animation = AnimationId::RunJumpFall;
            state.jump.stage = JumpStage::Falling;
            state.jump.jump_type = Some(JumpType::Run);
            state.jump.velocity_applied = true;
            state.jump.max_fall_velocity = 300.0;
            state.movement.is_accelerating = true;
        }
        let right = PlayerInput {
            right: true,
            ..input()
        };

        let output = controller.tick(&right, &on_floor(Vec2::new(450.0, 200.0)));
        assert_eq!(output.animation, AnimationId::RunJumpLandLight);

        let next = controller.on_animation_complete(AnimationId::RunJumpLandLight);
        assert_eq!(next, Some(AnimationId::RunJumpLandLightContinue));
        assert!(controller.state().is_grounded());

        // Held input cannot cut the follow-up short
        let output = controller.tick(&right, &on_floor(Vec2::new(450.0, 0.0)));
        assert_eq!(output.animation, AnimationId::RunJumpLandLightContinue);

        assert_eq!(
            controller.on_animation_complete(AnimationId::RunJumpLandLightContinue),
            Some(AnimationId::RunLoop)
        );
    }
}
