// Scene graph backed by a bevy_ecs World.
// Handles handed to the simulation index into `entities` in spawn order.

use bevy_ecs::prelude::*;
use glam::Vec3;

use super::components::*;
use crate::game::{Material, RenderHandle, RenderableDesc, Shape};

/// Proportions of the NPC stand-in box, multiplied by the entity scale.
const FIGURE_SIZE: Vec3 = Vec3::new(0.5, 1.6, 0.35);
/// Top surface of the corridor floor; figures stand on it.
const FLOOR_TOP: f32 = 0.5;

/// Per-instance data ready for the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub position: [f32; 3],
    pub _padding0: f32,
    pub scale: [f32; 3],
    pub _padding1: f32,
    pub color: [f32; 4],
}

pub struct Scene {
    pub world: World,
    entities: Vec<Entity>,
    pub overlay_visible: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            entities: Vec::new(),
            overlay_visible: false,
        }
    }

    pub fn spawn(&mut self, desc: RenderableDesc) -> RenderHandle {
        let mut entity = self.world.spawn((
            Transform::new(desc.position, desc.scale),
            Color::for_material(desc.material),
            Renderable {
                shape: desc.shape,
                material: desc.material,
            },
            Visible(desc.visible),
        ));
        if desc.collider {
            entity.insert(BoxCollider);
        }
        let handle = RenderHandle(self.entities.len() as u32);
        self.entities.push(entity.id());
        handle
    }

    fn entity(&self, handle: RenderHandle) -> Option<Entity> {
        self.entities.get(handle.0 as usize).copied()
    }

    pub fn set_position(&mut self, handle: RenderHandle, position: Vec3) {
        if let Some(mut transform) = self.entity(handle).and_then(|e| self.world.get_mut::<Transform>(e)) {
            transform.position = position;
        }
    }

    pub fn set_visible(&mut self, handle: RenderHandle, visible: bool) {
        if let Some(mut v) = self.entity(handle).and_then(|e| self.world.get_mut::<Visible>(e)) {
            v.0 = visible;
        }
    }

    pub fn set_material(&mut self, handle: RenderHandle, material: Material) {
        let Some(entity) = self.entity(handle) else { return };
        if let Some(mut renderable) = self.world.get_mut::<Renderable>(entity) {
            renderable.material = material;
        }
        if let Some(mut color) = self.world.get_mut::<Color>(entity) {
            *color = Color::for_material(material);
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// World-space box an entity occupies, accounting for its shape.
    fn bounds(transform: &Transform, shape: Shape) -> Aabb {
        match shape {
            Shape::Cube => Aabb::from_center_size(transform.position, transform.scale),
            Shape::Figure => {
                let size = FIGURE_SIZE * transform.scale;
                let center = Vec3::new(
                    transform.position.x,
                    transform.position.y.max(FLOOR_TOP) + size.y * 0.5,
                    transform.position.z,
                );
                Aabb::from_center_size(center, size)
            }
        }
    }

    /// Collect instance data for every visible entity.
    pub fn instances(&mut self) -> Vec<InstanceData> {
        let mut instances = Vec::new();
        let mut query = self.world.query::<(&Transform, &Color, &Renderable, &Visible)>();
        for (transform, color, renderable, visible) in query.iter(&self.world) {
            if !visible.0 {
                continue;
            }
            let bounds = Self::bounds(transform, renderable.shape);
            let center = (bounds.min + bounds.max) * 0.5;
            instances.push(InstanceData {
                position: center.to_array(),
                _padding0: 0.0,
                scale: (bounds.max - bounds.min).to_array(),
                _padding1: 0.0,
                color: [color.r, color.g, color.b, 1.0],
            });
        }
        instances
    }

    /// Boxes the player collides with. Hidden entities do not block.
    pub fn colliders(&mut self) -> Vec<Aabb> {
        let mut query = self
            .world
            .query_filtered::<(&Transform, &Renderable, &Visible), With<BoxCollider>>();
        query
            .iter(&self.world)
            .filter(|(_, _, visible)| visible.0)
            .map(|(transform, renderable, _)| Self::bounds(transform, renderable.shape))
            .collect()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
