// Core ECS components for the scene graph.
// The simulation never sees these; it talks to the scene through handles.

use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::game::{Material, Shape};

/// Position and size of an entity in 3D space
#[derive(Component, Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }
}

/// RGB color for rendering
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Flat color standing in for each texture.
    pub fn for_material(material: Material) -> Self {
        match material {
            Material::Concrete => Self::rgb(0.32, 0.32, 0.30),
            Material::Wall => Self::rgb(0.45, 0.40, 0.30),
            Material::WallGlitch => Self::rgb(0.55, 0.06, 0.05),
            Material::Shadow => Self::rgb(0.02, 0.02, 0.03),
        }
    }
}

/// What to draw and with which material.
#[derive(Component, Debug, Clone, Copy)]
pub struct Renderable {
    pub shape: Shape,
    pub material: Material,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Visible(pub bool);

/// Axis-aligned box collider sized by the entity's `Transform::scale`.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BoxCollider;

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// True if the XZ footprint contains `p` grown by `radius`.
    pub fn contains_xz(&self, p: Vec3, radius: f32) -> bool {
        p.x > self.min.x - radius
            && p.x < self.max.x + radius
            && p.z > self.min.z - radius
            && p.z < self.max.z + radius
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmplt(other.max).all() && self.max.cmpgt(other.min).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_overlap_is_strict() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let touching = Aabb::from_center_size(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);
        let overlapping = Aabb::from_center_size(Vec3::new(0.9, 0.0, 0.0), Vec3::ONE);
        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
    }

    #[test]
    fn glitch_wall_reads_as_red() {
        let glitch = Color::for_material(Material::WallGlitch);
        assert!(glitch.r > glitch.g && glitch.r > glitch.b);
    }
}
