// Engine modules: physics, input, animation playback, frame timing

pub mod animation;
pub mod game_loop;
pub mod input;
pub mod physics;
