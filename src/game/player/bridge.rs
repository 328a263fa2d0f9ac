// Player entity - glues the controller to the physics world and sprite playback

use glam::Vec2;
use thiserror::Error;

use crate::engine::animation::{AnimationClip, AnimationPlayer, PlaybackEvent};
use crate::engine::input::{Action, ActionState};
use crate::engine::physics::{
    body::presets, ColliderHandle, CollisionGroups, PhysicsWorld, QueryFilter, RigidBodyHandle, Vector,
};

use super::catalog::{AnimationCatalog, AnimationId};
use super::config::{BodyConfig, ControllerConfig};
use super::controller::{ControllerOutput, FrameEvent, PlayerController};
use super::input::{PhysicsSample, PlayerInput};
use super::state::Direction;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("player body {0:?} is missing from the physics world")]
    MissingBody(RigidBodyHandle),
}

/// Build the playback side of every catalog animation
pub fn build_animation_player(catalog: &AnimationCatalog) -> AnimationPlayer<AnimationId> {
    let mut player = AnimationPlayer::new();
    for entry in catalog.iter() {
        let clip = AnimationClip::new(entry.frames.frame_count(), entry.frame_rate, entry.looping)
            .with_first_frame(entry.frames.start);
        player.add_clip(entry.id, clip);

        if let Some(trigger) = entry.physics_trigger {
            player.register_frame_event(entry.id, trigger.frame, trigger.event);
        }
    }
    player
}

/// Translate bound actions into the controller's input flags
pub fn map_actions_to_input(actions: &ActionState, delta: f32) -> PlayerInput {
    PlayerInput {
        left: actions.is_pressed(Action::MoveLeft),
        right: actions.is_pressed(Action::MoveRight),
        up: actions.is_pressed(Action::LookUp),
        down: actions.is_pressed(Action::Crouch),
        space: actions.is_pressed(Action::Jump),
        shift: actions.is_pressed(Action::Walk),
        delta,
    }
}

/// The player character living in a physics world
#[derive(Debug)]
pub struct Player {
    /// Handle to the player's rigid body in the physics world
    pub body_handle: RigidBodyHandle,
    /// Handle to the player's collider
    pub collider_handle: ColliderHandle,
    controller: PlayerController,
    animation: AnimationPlayer<AnimationId>,
    body: BodyConfig,
}

impl Player {
    /// Create the player and add its body to the physics world
    pub fn spawn(
        physics: &mut PhysicsWorld,
        position: Vec2,
        catalog: AnimationCatalog,
        config: ControllerConfig,
    ) -> Self {
        let body_handle = physics.add_rigid_body(presets::player_body(position.x, position.y));
        let collider = presets::player_collider(config.body.width, config.body.height);
        let collider_handle = physics.add_collider(collider, body_handle);

        let mut animation = build_animation_player(&catalog);
        let controller = PlayerController::new(position, catalog, config);
        animation.play(controller.state().animation);

        log::info!("Player spawned at ({:.1}, {:.1})", position.x, position.y);

        Self {
            body_handle,
            collider_handle,
            controller,
            animation,
            body: config.body,
        }
    }

    /// Spawn with the standard catalog and tuning
    pub fn spawn_default(physics: &mut PhysicsWorld, position: Vec2) -> Self {
        Self::spawn(
            physics,
            position,
            AnimationCatalog::standard(),
            ControllerConfig::standard(),
        )
    }

    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }

    pub fn animation(&self) -> &AnimationPlayer<AnimationId> {
        &self.animation
    }

    /// Read position, velocity and floor contact from the physics world
    pub fn sample_physics(&self, physics: &PhysicsWorld) -> Result<PhysicsSample, BridgeError> {
        let body = physics
            .get_rigid_body(self.body_handle)
            .ok_or(BridgeError::MissingBody(self.body_handle))?;

        let translation = *body.translation();
        let linvel = *body.linvel();

        // Cast a ray down the screen from just inside the feet
        let feet = translation.y + self.body.height / 2.0;
        let ray_origin = Vector::new(translation.x, feet - 0.1);
        let on_floor = physics
            .raycast(
                ray_origin,
                Vector::new(0.0, 1.0),
                self.body.floor_probe_distance + 0.1,
                true,
                QueryFilter::default()
                    .exclude_rigid_body(self.body_handle)
                    .groups(CollisionGroups::Player.query_groups()),
            )
            .is_some();

        Ok(PhysicsSample::new(
            Vec2::new(translation.x, translation.y),
            Vec2::new(linvel.x, linvel.y),
            on_floor,
        ))
    }

    /// Run one fixed step of the player. The caller steps the physics world afterwards.
    pub fn update(
        &mut self,
        physics: &mut PhysicsWorld,
        actions: &ActionState,
        dt: f32,
    ) -> Result<ControllerOutput, BridgeError> {
        let sample = self.sample_physics(physics)?;
        let input = map_actions_to_input(actions, dt);

        let output = self.controller.tick(&input, &sample);
        self.apply_velocity(physics, output.velocity)?;

        self.animation.play(output.animation);
        for event in self.animation.update(dt) {
            self.dispatch(event);
        }

        // Completion handlers may have turned the player around
        let output = self.controller.output();
        self.animation
            .set_flip_horizontal(output.facing == Direction::Left);
        self.apply_velocity(physics, output.velocity)?;
        Ok(output)
    }

    fn dispatch(&mut self, event: PlaybackEvent<AnimationId>) {
        match event {
            PlaybackEvent::Frame { name, clip, frame } => {
                let frame_event = FrameEvent {
                    animation: clip,
                    frame_index: frame,
                };
                self.controller.on_animation_frame_event(&name, &frame_event);
            }
            PlaybackEvent::Completed(clip) => {
                if let Some(next) = self.controller.on_animation_complete(clip) {
                    self.animation.play(next);
                }
            }
        }
    }

    fn apply_velocity(&self, physics: &mut PhysicsWorld, velocity: Vec2) -> Result<(), BridgeError> {
        let body = physics
            .get_rigid_body_mut(self.body_handle)
            .ok_or(BridgeError::MissingBody(self.body_handle))?;
        body.set_linvel(Vector::new(velocity.x, velocity.y), true);
        Ok(())
    }
}
