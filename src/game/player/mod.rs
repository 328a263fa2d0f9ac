// Player locomotion
//
// - `state`: Everything the controller tracks between ticks
// - `config`: Movement, jump and body tuning
// - `input`: Per-tick input flags and physics snapshot
// - `catalog`: Static metadata for every player animation
// - `jump`: Jump stage machine (grounded -> jumping -> falling -> landing)
// - `movement`: Horizontal speed and facing
// - `selector`: Picks the animation for the current state
// - `controller`: Runs one tick and consumes playback events
// - `bridge`: Physics world and sprite playback integration

pub mod bridge;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod input;
pub mod jump;
pub mod movement;
pub mod selector;
pub mod state;

// Re-export commonly used types
pub use bridge::{map_actions_to_input, BridgeError, Player};
pub use catalog::{AnimationCatalog, AnimationCategory, AnimationEntry, AnimationId};
pub use config::{BodyConfig, ControllerConfig, JumpConfig, MovementConfig};
pub use controller::{ControllerOutput, FrameEvent, PlayerController};
pub use input::{PhysicsSample, PlayerInput};
pub use state::{Direction, JumpStage, JumpType, LandingType, PlayerState};
