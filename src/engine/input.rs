// Input state tracking for keyboard and mouse
// Abstracts winit events into a queryable per-frame snapshot

use std::collections::HashSet;
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub const MOVEMENT_KEYS: [KeyCode; 4] = [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD];

#[derive(Default)]
pub struct InputState {
    // Keyboard
    keys_held: HashSet<KeyCode>,
    // Pressed since the last end_frame(); used for toggles
    keys_pressed: HashSet<KeyCode>,

    // Raw mouse motion accumulated this frame, reset in end_frame()
    pub mouse_delta: (f32, f32),

    pub window_size: (u32, u32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a winit WindowEvent into the input state.
    /// Call this once per event before the game's own event handling.
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if !event.repeat {
                                self.keys_pressed.insert(key);
                            }
                            self.keys_held.insert(key);
                        }
                        ElementState::Released => { self.keys_held.remove(&key); }
                    }
                }
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered while unfocused.
                self.keys_held.clear();
            }
            WindowEvent::Resized(size) => {
                self.window_size = (size.width, size.height);
            }
            _ => {}
        }
    }

    /// Mouse look uses raw device motion so it keeps working with the
    /// cursor grabbed.
    pub fn process_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_delta.0 += delta.0 as f32;
            self.mouse_delta.1 += delta.1 as f32;
        }
    }

    /// Call once per frame after update() and render() have consumed input.
    /// Resets per-frame accumulators.
    pub fn end_frame(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.keys_pressed.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn movement_held(&self) -> bool {
        MOVEMENT_KEYS.iter().any(|k| self.is_key_held(*k))
    }

    #[cfg(test)]
    pub(crate) fn hold(&mut self, key: KeyCode) {
        self.keys_held.insert(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_held_tracks_wasd_only() {
        let mut input = InputState::new();
        assert!(!input.movement_held());
        input.hold(KeyCode::Space);
        assert!(!input.movement_held());
        input.hold(KeyCode::KeyA);
        assert!(input.movement_held());
    }

    #[test]
    fn mouse_motion_accumulates_until_end_of_frame() {
        let mut input = InputState::new();
        input.process_device_event(&DeviceEvent::MouseMotion { delta: (3.0, -1.0) });
        input.process_device_event(&DeviceEvent::MouseMotion { delta: (2.0, 4.0) });
        assert_eq!(input.mouse_delta, (5.0, 3.0));
        input.end_frame();
        assert_eq!(input.mouse_delta, (0.0, 0.0));
    }
}
