use std::f32::consts::TAU;

use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ClearMode, FieldConfig, ResizePolicy};
use crate::connections::{ConnectionPass, Link};
use crate::error::ConfigError;
use crate::math::pulse_radius;
use crate::particle::{Particle, ParticleVertex};
use crate::surface::{Extent, Surface};

/// Counters accumulated over the life of a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames that reached the surface.
    pub frames_drawn: u64,
    /// Frames skipped because the surface had no drawing context.
    pub frames_skipped: u64,
    /// Live particles after the last drawn frame.
    pub particles: u32,
    /// Links drawn in the last drawn frame.
    pub connections: u32,
}

/// The particle set plus everything needed to advance and draw it one frame at a time.
pub struct ParticleField {
    config: FieldConfig,
    extent: Extent,
    particles: Vec<Particle>,
    rng: StdRng,
    /// Pulse phase, radians, kept in `[0, TAU)`.
    phase: f32,
    connections: ConnectionPass,
    links: Vec<Link>,
    stats: FrameStats,
}

impl ParticleField {
    /// Validate `config` and seed `config.particle_count` particles inside `extent`.
    pub fn new(config: FieldConfig, extent: Extent, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut field = Self {
            connections: ConnectionPass::new(&config),
            particles: Vec::with_capacity(config.max_particles()),
            config,
            extent,
            rng,
            phase: 0.0,
            links: Vec::new(),
            stats: FrameStats::default(),
        };
        field.seed_particles();
        Ok(field)
    }

    /// Deterministic field for tests and reproducible captures.
    pub fn seeded(config: FieldConfig, extent: Extent, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, extent, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: FieldConfig, extent: Extent) -> Result<Self, ConfigError> {
        Self::new(config, extent, StdRng::from_entropy())
    }

    fn seed_particles(&mut self) {
        self.particles.clear();
        for _ in 0..self.config.particle_count {
            let p = Particle::random(&mut self.rng, &self.config, self.extent);
            self.particles.push(p);
        }
        debug!(
            "seeded {} particles in {}x{}",
            self.particles.len(),
            self.extent.width,
            self.extent.height
        );
    }

    /// Track a new surface size. Existing particles follow `config.resize_policy`.
    pub fn resize(&mut self, extent: Extent) {
        if extent == self.extent {
            return;
        }
        self.extent = extent;
        match self.config.resize_policy {
            ResizePolicy::DriftBack => {
                for p in &mut self.particles {
                    if p.position.x > extent.width {
                        p.velocity.x = -p.velocity.x.abs();
                    }
                    if p.position.y > extent.height {
                        p.velocity.y = -p.velocity.y.abs();
                    }
                }
            }
            ResizePolicy::Clamp => {
                for p in &mut self.particles {
                    p.position = extent.clamp(p.position);
                }
            }
            ResizePolicy::Reseed => self.seed_particles(),
        }
        debug!(
            "resized field to {}x{} ({:?})",
            extent.width, extent.height, self.config.resize_policy
        );
    }

    /// Advance every particle one frame without drawing.
    pub fn step(&mut self) {
        let extent = self.extent;
        for p in &mut self.particles {
            p.step(extent);
        }
    }

    /// Run one full frame against `surface`: clear, move and draw particles, draw links.
    ///
    /// Returns `false`, touching nothing, when the surface has no drawing context.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !surface.has_context() {
            self.stats.frames_skipped += 1;
            return false;
        }

        self.trim_excess();

        let extent = self.extent;
        match self.config.clear_mode {
            ClearMode::Full => surface.clear(extent),
            ClearMode::Trail { color, alpha } => surface.fill_overlay(extent, color, alpha),
        }

        let pulse = self.config.pulse;
        for (i, p) in self.particles.iter_mut().enumerate() {
            p.step(extent);
            let radius = match pulse {
                Some(pulse) => {
                    pulse_radius(p.radius, pulse.amplitude, self.phase + i as f32 * pulse.spread)
                }
                None => p.radius,
            };
            surface.fill_circle(p.position, radius, p.color, p.opacity);
        }

        self.connections.collect(&self.particles, &mut self.links);
        let (width, color) = (self.config.line_width, self.config.link_color);
        for link in &self.links {
            surface.stroke_line(
                self.particles[link.a].position,
                self.particles[link.b].position,
                width,
                color,
                link.alpha,
            );
        }

        if let Some(pulse) = pulse {
            self.phase = (self.phase + pulse.speed).rem_euclid(TAU);
        }

        self.stats.frames_drawn += 1;
        self.stats.particles = self.particles.len() as u32;
        self.stats.connections = self.links.len() as u32;
        true
    }

    /// Drop a transient particle at the pointer. Returns `false` when pointer
    /// interaction is disabled for this field or `(x, y)` is off the surface.
    pub fn inject_pointer(&mut self, x: f32, y: f32) -> bool {
        let Some(pointer) = self.config.pointer else {
            return false;
        };
        let position = Vec2::new(x, y);
        if !self.extent.contains(position) {
            return false;
        }
        let p = Particle::at_pointer(&mut self.rng, position, self.config.speed, &pointer);
        self.particles.push(p);
        self.trim_excess();
        true
    }

    /// Remove the oldest particles until the set is back within `particle_count + slack`.
    fn trim_excess(&mut self) -> usize {
        let limit = self.config.max_particles();
        let excess = self.particles.len().saturating_sub(limit);
        if excess > 0 {
            self.particles.drain(..excess);
        }
        excess
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Links drawn in the last frame.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Pack every live particle for host-side readers.
    pub fn write_vertices(&self, out: &mut Vec<ParticleVertex>) {
        out.clear();
        out.extend(self.particles.iter().map(Particle::vertex));
    }
}
