// 2D platformer player locomotion: jump stages, horizontal movement and
// animation selection driven by a rapier2d physics body.

pub mod core;
pub mod engine;
pub mod game;
