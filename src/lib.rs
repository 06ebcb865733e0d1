// Hollow Corridor: an endless-hallway horror walk.
//
// `game` is the simulation core and can run without a window.
// `engine` is the winit/wgpu/rodio host the binary drives it with.

pub mod engine;
pub mod game;
