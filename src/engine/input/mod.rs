// Input handling system
//
// Keyboard events from the window become actions through a remappable
// binding table. Game code only ever sees `ActionState`.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Binding table and remapping
// - `state`: Pressed / just pressed / just released tracking
// - `manager`: Feeds window events through the bindings into the state
//
// ## Usage Example
//
// ```rust
// use player_locomotion::engine::input::{Action, InputManager};
//
// let mut input = InputManager::new();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
//
// // Once per frame, after the simulation consumed the state
// if input.state().just_pressed(Action::Jump) { /* ... */ }
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod state;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
pub use state::ActionState;
