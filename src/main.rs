use anyhow::Result;
use glam::Vec2;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

use player_locomotion::engine::game_loop::GameLoop;
use player_locomotion::engine::input::{Action, InputManager};
use player_locomotion::engine::physics::{PhysicsWorld, Vector};
use player_locomotion::game::player::{
    AnimationCatalog, AnimationId, ControllerConfig, JumpStage, Player,
};

/// Ground platform top edge in pixels
const FLOOR_Y: f32 = 600.0;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting player locomotion sandbox...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Player Locomotion")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let config = ControllerConfig::standard();
    let catalog = AnimationCatalog::standard();
    if !catalog.is_valid() {
        log::warn!("Animation catalog loaded with {} problems", catalog.validation_errors().len());
    }

    let mut physics = PhysicsWorld::with_gravity(Vector::new(0.0, config.jump.gravity));
    physics.add_platform(640.0, FLOOR_Y + 20.0, 4000.0, 40.0);
    let mut player = Player::spawn(
        &mut physics,
        Vec2::new(640.0, FLOOR_Y - 200.0),
        catalog,
        config,
    );

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    let mut last_animation: Option<AnimationId> = None;
    let mut last_stage: Option<JumpStage> = None;

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                if input.state().just_pressed(Action::Menu) {
                    game_loop.toggle_pause();
                }

                let dt = game_loop.fixed_timestep();
                for _ in 0..game_loop.begin_frame() {
                    if let Err(e) = player.update(&mut physics, input.state(), dt) {
                        error!("Player update failed: {}", e);
                        elwt.exit();
                        return;
                    }
                    physics.step();

                    let state = player.controller().state();
                    if last_animation != Some(state.animation) {
                        info!("Animation: {}", state.animation);
                        last_animation = Some(state.animation);
                    }
                    if last_stage != Some(state.stage()) {
                        info!("Jump stage: {:?}", state.stage());
                        last_stage = Some(state.stage());
                    }
                }

                input.update();
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
