// Action state tracking (pressed / just pressed / just released)

use super::action::Action;
use std::collections::HashSet;

/// Which actions are down, and which changed since the last frame
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    /// Actions that are currently pressed this frame
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,

    /// Actions that were pressed in the previous frame
    previous_pressed: HashSet<Action>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Pressed for more than one frame
    pub fn is_held(&self, action: Action) -> bool {
        self.pressed.contains(&action) && self.previous_pressed.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Start a new frame. Call once per frame after the frame's input was consumed.
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed = self.pressed.clone();
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_pressed.clear();
    }

    /// Directional input as (horizontal, vertical), each -1.0, 0.0 or 1.0.
    /// Vertical follows screen space: down is positive.
    pub fn get_direction(&self) -> (f32, f32) {
        let mut horizontal = 0.0;
        let mut vertical = 0.0;

        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        if self.is_pressed(Action::LookUp) {
            vertical -= 1.0;
        }
        if self.is_pressed(Action::Crouch) {
            vertical += 1.0;
        }

        (horizontal, vertical)
    }
}
