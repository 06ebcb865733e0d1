// Engine module - the host the simulation runs inside
// Window/GPU setup lives in main.rs; everything reusable lives here.

pub mod assets;
pub mod audio;
pub mod camera;
pub mod components;
pub mod debug_overlay;
pub mod frame;
pub mod input;
pub mod scene;

// Re-export commonly used items
pub use components::*;
