// Per-frame bundle of engine state handed to `Simulation::tick`.

use glam::Vec3;

use super::audio::AudioBank;
use super::camera::FirstPersonController;
use super::input::InputState;
use super::scene::Scene;
use crate::game::{Cue, EngineContext, Material, RenderHandle, RenderableDesc};

pub struct FrameContext<'a> {
    pub scene: &'a mut Scene,
    pub player: &'a mut FirstPersonController,
    pub input: &'a InputState,
    pub audio: &'a mut AudioBank,
}

impl EngineContext for FrameContext<'_> {
    fn spawn_renderable(&mut self, desc: RenderableDesc) -> RenderHandle {
        self.scene.spawn(desc)
    }

    fn set_position(&mut self, handle: RenderHandle, position: Vec3) {
        self.scene.set_position(handle, position);
    }

    fn set_visible(&mut self, handle: RenderHandle, visible: bool) {
        self.scene.set_visible(handle, visible);
    }

    fn set_material(&mut self, handle: RenderHandle, material: Material) {
        self.scene.set_material(handle, material);
    }

    fn play_cue(&mut self, cue: Cue) {
        self.audio.play(cue);
    }

    fn stop_cue(&mut self, cue: Cue) {
        self.audio.stop(cue);
    }

    fn is_cue_playing(&self, cue: Cue) -> bool {
        self.audio.is_playing(cue)
    }

    fn player_position(&self) -> Vec3 {
        self.player.position
    }

    fn set_player_position(&mut self, position: Vec3) {
        self.player.set_position(position);
    }

    fn movement_held(&self) -> bool {
        self.input.movement_held()
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        self.scene.overlay_visible = visible;
    }
}
