// Input manager - turns window keyboard events into action state

use super::action::InputSource;
use super::config::InputConfig;
use super::state::ActionState;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Keyboard input for the local player
#[derive(Debug)]
pub struct InputManager {
    config: InputConfig,
    state: ActionState,
}

impl InputManager {
    /// Input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::with_defaults())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            state: ActionState::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // Key repeats carry no new information for held actions
            if event.repeat {
                return;
            }
            self.handle_source(
                InputSource::key(key_code),
                event.state == ElementState::Pressed,
            );
        }
    }

    /// Apply a press or release of `source`
    pub fn handle_source(&mut self, source: InputSource, pressed: bool) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };
        if pressed {
            self.state.press(action);
        } else {
            self.state.release(action);
        }
    }

    /// Start a new frame. Call once per frame after the input was consumed.
    pub fn update(&mut self) {
        self.state.update();
    }

    pub fn state(&self) -> &ActionState {
        &self.state
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_source_maps_to_action() {
        let mut manager = InputManager::new();
        manager.handle_source(InputSource::key(KeyCode::KeyD), true);
        assert!(manager.state().is_pressed(Action::MoveRight));

        manager.update();
        manager.handle_source(InputSource::key(KeyCode::KeyD), false);
        assert!(manager.state().just_released(Action::MoveRight));
    }

    #[test]
    fn test_unbound_source_ignored() {
        let mut manager = InputManager::new();
        manager.handle_source(InputSource::key(KeyCode::KeyQ), true);
        assert_eq!(manager.state().get_direction(), (0.0, 0.0));
    }

    #[test]
    fn test_remap_through_config() {
        let mut manager = InputManager::new();
        manager
            .config_mut()
            .bind(InputSource::key(KeyCode::KeyK), Action::Jump);

        manager.handle_source(InputSource::key(KeyCode::KeyK), true);
        assert!(manager.state().just_pressed(Action::Jump));

        manager.reset();
        assert!(!manager.state().is_pressed(Action::Jump));
    }
}
