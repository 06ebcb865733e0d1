// Corridor recycling: a fixed ring of segments that leapfrog ahead of the
// player so the hallway never ends.

use glam::Vec3;
use rand::Rng;

use super::config::CorridorConfig;
use super::context::{EngineContext, Material, RenderHandle, RenderableDesc};

const CORRIDOR_WIDTH: f32 = 10.0;
const CORRIDOR_HEIGHT: f32 = 10.0;
const SLAB_THICKNESS: f32 = 1.0;

/// Which texture the walls of a segment currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallTexture {
    Normal,
    Glitch,
}

impl WallTexture {
    pub fn material(self) -> Material {
        match self {
            WallTexture::Normal => Material::Wall,
            WallTexture::Glitch => Material::WallGlitch,
        }
    }
}

/// Engine handles for the four boxes making up one segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentHandles {
    pub floor: RenderHandle,
    pub ceiling: RenderHandle,
    pub left_wall: RenderHandle,
    pub right_wall: RenderHandle,
}

impl SegmentHandles {
    fn all(&self) -> [RenderHandle; 4] {
        [self.floor, self.ceiling, self.left_wall, self.right_wall]
    }
}

#[derive(Debug, Clone)]
pub struct CorridorSegment {
    pub longitudinal_offset: f32,
    pub wall_texture: WallTexture,
    pub handles: SegmentHandles,
}

impl CorridorSegment {
    fn spawn(offset: f32, length: f32, engine: &mut impl EngineContext) -> Self {
        let slab = Vec3::new(CORRIDOR_WIDTH, SLAB_THICKNESS, length);
        let wall = Vec3::new(SLAB_THICKNESS, CORRIDOR_HEIGHT, length);
        let half_w = CORRIDOR_WIDTH / 2.0;
        let half_h = CORRIDOR_HEIGHT / 2.0;

        let handles = SegmentHandles {
            floor: engine.spawn_renderable(RenderableDesc::cube(
                Vec3::new(0.0, 0.0, offset),
                slab,
                Material::Concrete,
            )),
            ceiling: engine.spawn_renderable(RenderableDesc::cube(
                Vec3::new(0.0, CORRIDOR_HEIGHT, offset),
                slab,
                Material::Concrete,
            )),
            left_wall: engine.spawn_renderable(RenderableDesc::cube(
                Vec3::new(-half_w, half_h, offset),
                wall,
                Material::Wall,
            )),
            right_wall: engine.spawn_renderable(RenderableDesc::cube(
                Vec3::new(half_w, half_h, offset),
                wall,
                Material::Wall,
            )),
        };

        Self {
            longitudinal_offset: offset,
            wall_texture: WallTexture::Normal,
            handles,
        }
    }

    // Each box keeps its own x/y; only z follows the segment.
    fn sync_offset(&self, engine: &mut impl EngineContext) {
        let z = self.longitudinal_offset;
        let half_w = CORRIDOR_WIDTH / 2.0;
        let half_h = CORRIDOR_HEIGHT / 2.0;
        engine.set_position(self.handles.floor, Vec3::new(0.0, 0.0, z));
        engine.set_position(self.handles.ceiling, Vec3::new(0.0, CORRIDOR_HEIGHT, z));
        engine.set_position(self.handles.left_wall, Vec3::new(-half_w, half_h, z));
        engine.set_position(self.handles.right_wall, Vec3::new(half_w, half_h, z));
    }

    pub fn handles(&self) -> [RenderHandle; 4] {
        self.handles.all()
    }
}

pub struct CorridorRecycler {
    segments: Vec<CorridorSegment>,
    recycle_threshold: f32,
    loop_length: f32,
    flicker_chance: f64,
}

impl CorridorRecycler {
    /// Spawn the ring centred on z = 0: offsets `i * spacing` for
    /// `i in -(n/2)..n - n/2`, so five segments sit at -40..=40.
    pub fn new(config: &CorridorConfig, engine: &mut impl EngineContext) -> Self {
        let count = config.segment_count as i32;
        let first = -(count / 2);
        let segments = (first..first + count)
            .map(|i| CorridorSegment::spawn(i as f32 * config.segment_spacing, config.segment_spacing, engine))
            .collect();

        Self {
            segments,
            recycle_threshold: config.recycle_threshold,
            loop_length: config.loop_length,
            flicker_chance: config.flicker_chance,
        }
    }

    /// Leapfrog every segment that fell more than the threshold behind the
    /// player. Returns how many segments moved.
    pub fn advance(&mut self, player_z: f32, engine: &mut impl EngineContext) -> usize {
        let mut recycled = 0;
        for segment in &mut self.segments {
            if player_z - segment.longitudinal_offset > self.recycle_threshold {
                segment.longitudinal_offset += self.loop_length;
                segment.sync_offset(engine);
                log::debug!("segment recycled to z={}", segment.longitudinal_offset);
                recycled += 1;
            }
        }
        recycled
    }

    /// Independent per-segment wall flicker. Draws one uniform per segment,
    /// and a second one to pick the texture only when the first fires.
    pub fn flicker<R: Rng + ?Sized>(&mut self, rng: &mut R, engine: &mut impl EngineContext) {
        for segment in &mut self.segments {
            if rng.gen_bool(self.flicker_chance) {
                let texture = if rng.gen_bool(0.5) { WallTexture::Glitch } else { WallTexture::Normal };
                segment.wall_texture = texture;
                engine.set_material(segment.handles.left_wall, texture.material());
                engine.set_material(segment.handles.right_wall, texture.material());
            }
        }
    }

    pub fn segments(&self) -> &[CorridorSegment] {
        &self.segments
    }

    pub fn offsets(&self) -> Vec<f32> {
        self.segments.iter().map(|s| s.longitudinal_offset).collect()
    }

    #[cfg(test)]
    pub(crate) fn set_offset(&mut self, index: usize, offset: f32) {
        self.segments[index].longitudinal_offset = offset;
    }
}
