mod common;

use std::collections::HashSet;

use backdrop_core::config::ConnectionStrategy;
use backdrop_core::connections::{ConnectionPass, Link};
use backdrop_core::math::connection_alpha;
use backdrop_core::{Extent, FieldConfig, Particle, ParticleField, Rgb};
use common::RecordingSurface;
use glam::Vec2;

fn still(x: f32, y: f32) -> Particle {
    Particle {
        position: Vec2::new(x, y),
        velocity: Vec2::ZERO,
        radius: 1.0,
        color: Rgb::WHITE,
        opacity: 1.0,
    }
}

fn pairs(links: &[Link]) -> Vec<(usize, usize)> {
    let mut v: Vec<_> = links.iter().map(|l| (l.a, l.b)).collect();
    v.sort_unstable();
    v
}

#[test]
fn test_alpha_falls_off_linearly() {
    assert!((connection_alpha(0.0, 120.0, 0.2) - 0.2).abs() < 1e-6);
    assert!((connection_alpha(60.0, 120.0, 0.2) - 0.1).abs() < 1e-6);
    assert_eq!(connection_alpha(120.0, 120.0, 0.2), 0.0);
    assert_eq!(connection_alpha(500.0, 120.0, 0.2), 0.0);
}

#[test]
fn test_close_pair_linked_once() {
    let config = FieldConfig::default();
    let mut pass = ConnectionPass::new(&config);
    let particles = vec![still(10.0, 10.0), still(70.0, 10.0), still(700.0, 500.0)];
    let mut links = Vec::new();

    pass.collect(&particles, &mut links);

    assert_eq!(pairs(&links), vec![(0, 1)]);
    assert!((links[0].alpha - 0.5 * config.connection_dampening).abs() < 1e-6);
}

#[test]
fn test_coincident_particles_linked_at_full_dampened_alpha() {
    let config = FieldConfig::default();
    let mut pass = ConnectionPass::new(&config);
    let mut links = Vec::new();
    pass.collect(&[still(5.0, 5.0), still(5.0, 5.0)], &mut links);

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].alpha, config.connection_dampening);
}

#[test]
fn test_every_pair_drawn_exactly_once_per_frame() {
    let mut field = ParticleField::seeded(FieldConfig::default(), Extent::new(800.0, 600.0), 21).unwrap();
    let mut surface = RecordingSurface::default();

    for _ in 0..20 {
        surface.reset();
        field.frame(&mut surface);

        let threshold = field.config().connection_distance;
        let ps = field.particles();
        let mut expected = 0;
        for a in 0..ps.len() {
            for b in a + 1..ps.len() {
                if ps[a].position.distance(ps[b].position) < threshold {
                    expected += 1;
                }
            }
        }

        assert_eq!(surface.lines.len(), expected);
        assert_eq!(field.stats().connections as usize, expected);

        let mut seen = HashSet::new();
        for link in field.links() {
            assert!(link.a < link.b, "link must be ordered: {:?}", link);
            assert!(seen.insert((link.a, link.b)), "duplicate link {:?}", link);
        }
    }
}

#[test]
fn test_lines_are_subtle_relative_to_particles() {
    let mut field = ParticleField::seeded(FieldConfig::default(), Extent::new(400.0, 300.0), 4).unwrap();
    let mut surface = RecordingSurface::default();
    field.frame(&mut surface);

    let dampening = field.config().connection_dampening;
    assert!(!surface.lines.is_empty());
    for (_, _, alpha) in &surface.lines {
        assert!(*alpha > 0.0 && *alpha <= dampening);
    }
}

#[test]
fn test_grid_strategy_matches_all_pairs() {
    for seed in 0..10 {
        let base = FieldConfig {
            particle_count: 200,
            ..FieldConfig::default()
        };
        let grid_config = FieldConfig {
            connection_strategy: ConnectionStrategy::Grid,
            ..base.clone()
        };
        let mut reference = ParticleField::seeded(base, Extent::new(1024.0, 768.0), seed).unwrap();
        let mut gridded = ParticleField::seeded(grid_config, Extent::new(1024.0, 768.0), seed).unwrap();
        let mut surface = RecordingSurface::default();

        for _ in 0..5 {
            reference.frame(&mut surface);
            gridded.frame(&mut surface);
            assert_eq!(reference.particles(), gridded.particles());
            assert_eq!(pairs(reference.links()), pairs(gridded.links()), "seed {seed}");
        }
    }
}

#[test]
fn test_grid_strategy_handles_particles_outside_surface() {
    let config = FieldConfig {
        connection_strategy: ConnectionStrategy::Grid,
        ..FieldConfig::default()
    };
    let mut pass = ConnectionPass::new(&config);
    let particles = vec![still(-50.0, -50.0), still(-10.0, -50.0), still(5000.0, 5000.0)];
    let mut links = Vec::new();
    pass.collect(&particles, &mut links);
    assert_eq!(pairs(&links), vec![(0, 1)]);
}
