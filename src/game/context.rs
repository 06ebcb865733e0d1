// Capability table the simulation core calls into.
// The core never owns engine objects; it holds opaque handles and asks the
// engine to mutate them through this trait.

use glam::Vec3;

/// Opaque handle to a renderable the engine spawned for us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u32);

/// Geometry of a renderable. Everything in the corridor is a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Cube,
    /// Stand-in for the NPC model; the engine decides how to draw it.
    Figure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Concrete,
    Wall,
    WallGlitch,
    Shadow,
}

/// Everything the engine needs to create one scene entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderableDesc {
    pub shape: Shape,
    pub position: Vec3,
    pub scale: Vec3,
    pub material: Material,
    /// Attach an axis-aligned box collider matching `scale`.
    pub collider: bool,
    pub visible: bool,
}

impl RenderableDesc {
    pub fn cube(position: Vec3, scale: Vec3, material: Material) -> Self {
        Self {
            shape: Shape::Cube,
            position,
            scale,
            material,
            collider: true,
            visible: true,
        }
    }
}

/// Named audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    NpcAppear,
    Footstep,
    Jumpscare,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::NpcAppear, Cue::Footstep, Cue::Jumpscare];

    /// Asset file name, relative to the assets directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Cue::NpcAppear => "scare_sound.mp3",
            Cue::Footstep => "footstep.mp3",
            Cue::Jumpscare => "jumpscare.mp3",
        }
    }
}

/// Engine operations consumed by [`crate::game::Simulation`].
///
/// Implemented by the windowed engine (`engine::frame::FrameContext`) and by
/// [`crate::game::HeadlessEngine`] for tests. All calls are synchronous and
/// infallible from the core's point of view.
pub trait EngineContext {
    fn spawn_renderable(&mut self, desc: RenderableDesc) -> RenderHandle;
    fn set_position(&mut self, handle: RenderHandle, position: Vec3);
    fn set_visible(&mut self, handle: RenderHandle, visible: bool);
    fn set_material(&mut self, handle: RenderHandle, material: Material);

    fn play_cue(&mut self, cue: Cue);
    fn stop_cue(&mut self, cue: Cue);
    fn is_cue_playing(&self, cue: Cue) -> bool;

    fn player_position(&self) -> Vec3;
    fn set_player_position(&mut self, position: Vec3);

    /// True while any of the movement keys (W/A/S/D) is held.
    fn movement_held(&self) -> bool;

    fn set_overlay_visible(&mut self, visible: bool);
}
