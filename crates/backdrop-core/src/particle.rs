use glam::Vec2;
use rand::Rng;

use crate::color::Rgb;
use crate::config::{FieldConfig, PointerConfig};
use crate::math::sample_range;
use crate::surface::Extent;

/// A single drifting point. Everything but position and velocity is fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub opacity: f32,
}

impl Particle {
    /// Random particle anywhere inside `extent`, styled from `config`.
    pub fn random<R: Rng>(rng: &mut R, config: &FieldConfig, extent: Extent) -> Self {
        let position = Vec2::new(
            rng.gen_range(0.0..=extent.width),
            rng.gen_range(0.0..=extent.height),
        );
        let color = config.palette[rng.gen_range(0..config.palette.len())];
        Self {
            position,
            velocity: random_velocity(rng, config.speed),
            radius: sample_range(rng, config.min_radius, config.max_radius),
            color,
            opacity: sample_range(rng, config.min_opacity, config.max_opacity),
        }
    }

    /// Transient particle dropped at the pointer.
    pub fn at_pointer<R: Rng>(
        rng: &mut R,
        position: Vec2,
        speed: f32,
        pointer: &PointerConfig,
    ) -> Self {
        Self {
            position,
            velocity: random_velocity(rng, speed),
            radius: pointer.radius,
            color: pointer.color,
            opacity: pointer.opacity,
        }
    }

    /// Advance one frame, reflecting off the edges of `extent`.
    #[inline]
    pub fn step(&mut self, extent: Extent) {
        let (x, vx) = crate::math::reflect_axis(self.position.x, self.velocity.x, extent.width);
        let (y, vy) = crate::math::reflect_axis(self.position.y, self.velocity.y, extent.height);
        self.position = Vec2::new(x, y);
        self.velocity = Vec2::new(vx, vy);
    }

    pub fn vertex(&self) -> ParticleVertex {
        ParticleVertex {
            position: self.position.to_array(),
            radius: self.radius,
            opacity: self.opacity,
            color: self.color.to_rgba_f32(self.opacity),
        }
    }
}

fn random_velocity<R: Rng>(rng: &mut R, speed: f32) -> Vec2 {
    Vec2::new(
        sample_range(rng, -speed, speed),
        sample_range(rng, -speed, speed),
    )
}

/// Packed particle for host-side readers: 32 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 2], //  8 bytes
    pub radius: f32,        //  4 bytes
    pub opacity: f32,       //  4 bytes
    pub color: [f32; 4],    // 16 bytes
}
