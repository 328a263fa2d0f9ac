// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    LookUp,
    Crouch,
    Jump,
    /// Held to walk instead of run
    Walk,

    // Meta actions
    Menu,
}

/// Represents an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings: arrows or WASD to move, space to jump, shift to walk
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowUp), Action::LookUp),
        (InputSource::key(KeyCode::ArrowDown), Action::Crouch),
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::KeyW), Action::LookUp),
        (InputSource::key(KeyCode::KeyS), Action::Crouch),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::ShiftLeft), Action::Walk),
        (InputSource::key(KeyCode::ShiftRight), Action::Walk),
    ]
}

/// Bindings that stay active whatever the gameplay bindings are
pub fn global_bindings() -> Vec<(InputSource, Action)> {
    vec![(InputSource::key(KeyCode::Escape), Action::Menu)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_input_source_keyboard_creation() {
        let source = InputSource::key(KeyCode::Space);
        assert_eq!(source, InputSource::Keyboard(KeyCode::Space));
    }

    #[test]
    fn test_default_bindings_cover_movement() {
        let actions: HashSet<Action> = default_bindings()
            .into_iter()
            .map(|(_, action)| action)
            .collect();
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::LookUp,
            Action::Crouch,
            Action::Jump,
            Action::Walk,
        ] {
            assert!(actions.contains(&action), "{:?} is unbound", action);
        }
    }

    #[test]
    fn test_no_duplicate_sources() {
        let mut seen = HashSet::new();
        for (source, _) in default_bindings().into_iter().chain(global_bindings()) {
            assert!(seen.insert(source), "Duplicate input source {:?}", source);
        }
    }
}
