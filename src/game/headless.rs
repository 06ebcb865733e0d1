// In-memory engine. Records every side effect the simulation asks for so
// a run can be driven and inspected without a window or audio device.

use std::collections::{HashMap, HashSet};

use glam::Vec3;

use super::config::RESPAWN_POINT;
use super::context::{Cue, EngineContext, Material, RenderHandle, RenderableDesc};

#[derive(Debug, Clone)]
pub struct HeadlessRenderable {
    pub desc: RenderableDesc,
    pub position: Vec3,
    pub visible: bool,
    pub material: Material,
}

#[derive(Debug, Default)]
pub struct HeadlessEngine {
    renderables: Vec<HeadlessRenderable>,
    material_changes: usize,
    cue_counts: HashMap<Cue, u32>,
    playing: HashSet<Cue>,
    player: Vec3,
    movement_held: bool,
    overlay_visible: bool,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self {
            player: RESPAWN_POINT,
            ..Self::default()
        }
    }

    pub fn set_movement_held(&mut self, held: bool) {
        self.movement_held = held;
    }

    /// Pretend a cue ran to completion.
    pub fn finish_cue(&mut self, cue: Cue) {
        self.playing.remove(&cue);
    }

    pub fn renderable_count(&self) -> usize {
        self.renderables.len()
    }

    pub fn renderable(&self, handle: RenderHandle) -> &HeadlessRenderable {
        &self.renderables[handle.0 as usize]
    }

    pub fn position_of(&self, handle: RenderHandle) -> Vec3 {
        self.renderable(handle).position
    }

    pub fn is_visible(&self, handle: RenderHandle) -> bool {
        self.renderable(handle).visible
    }

    pub fn material_of(&self, handle: RenderHandle) -> Material {
        self.renderable(handle).material
    }

    pub fn material_changes(&self) -> usize {
        self.material_changes
    }

    pub fn cues_played(&self, cue: Cue) -> u32 {
        self.cue_counts.get(&cue).copied().unwrap_or(0)
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    fn slot(&mut self, handle: RenderHandle) -> Option<&mut HeadlessRenderable> {
        self.renderables.get_mut(handle.0 as usize)
    }
}

impl EngineContext for HeadlessEngine {
    fn spawn_renderable(&mut self, desc: RenderableDesc) -> RenderHandle {
        let handle = RenderHandle(self.renderables.len() as u32);
        self.renderables.push(HeadlessRenderable {
            desc,
            position: desc.position,
            visible: desc.visible,
            material: desc.material,
        });
        handle
    }

    fn set_position(&mut self, handle: RenderHandle, position: Vec3) {
        if let Some(r) = self.slot(handle) {
            r.position = position;
        }
    }

    fn set_visible(&mut self, handle: RenderHandle, visible: bool) {
        if let Some(r) = self.slot(handle) {
            r.visible = visible;
        }
    }

    fn set_material(&mut self, handle: RenderHandle, material: Material) {
        if let Some(r) = self.slot(handle) {
            r.material = material;
            self.material_changes += 1;
        }
    }

    fn play_cue(&mut self, cue: Cue) {
        *self.cue_counts.entry(cue).or_insert(0) += 1;
        self.playing.insert(cue);
    }

    fn stop_cue(&mut self, cue: Cue) {
        self.playing.remove(&cue);
    }

    fn is_cue_playing(&self, cue: Cue) -> bool {
        self.playing.contains(&cue)
    }

    fn player_position(&self) -> Vec3 {
        self.player
    }

    fn set_player_position(&mut self, position: Vec3) {
        self.player = position;
    }

    fn movement_held(&self) -> bool {
        self.movement_held
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        self.overlay_visible = visible;
    }
}
