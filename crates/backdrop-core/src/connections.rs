use crate::config::{ConnectionStrategy, FieldConfig};
use crate::grid::SpatialHashGrid;
use crate::math::connection_alpha;
use crate::particle::Particle;

/// Table size for the link grid. A full-HD viewport at 120 px cells is ~150 cells.
const GRID_TABLE_SIZE: usize = 4096;

/// One line of the connection pass, always with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
}

/// Finds every unordered pair closer than the connection distance.
pub struct ConnectionPass {
    threshold: f32,
    dampening: f32,
    grid: Option<SpatialHashGrid>,
}

impl ConnectionPass {
    pub fn new(config: &FieldConfig) -> Self {
        let grid = match config.connection_strategy {
            ConnectionStrategy::AllPairs => None,
            ConnectionStrategy::Grid => Some(SpatialHashGrid::new(
                config.connection_distance,
                GRID_TABLE_SIZE,
            )),
        };
        Self {
            threshold: config.connection_distance,
            dampening: config.connection_dampening,
            grid,
        }
    }

    /// Replace `out` with the links for the current particle positions.
    pub fn collect(&mut self, particles: &[Particle], out: &mut Vec<Link>) {
        out.clear();
        match self.grid.as_mut() {
            None => collect_all_pairs(particles, self.threshold, self.dampening, out),
            Some(grid) => {
                grid.build(particles.iter().map(|p| p.position));
                let (threshold, dampening) = (self.threshold, self.dampening);
                for (a, pa) in particles.iter().enumerate() {
                    grid.query_neighbors(pa.position, |b| {
                        let b = b as usize;
                        if b <= a {
                            return;
                        }
                        let dist = pa.position.distance(particles[b].position);
                        if dist < threshold {
                            out.push(Link {
                                a,
                                b,
                                alpha: connection_alpha(dist, threshold, dampening),
                            });
                        }
                    });
                }
            }
        }
    }
}

fn collect_all_pairs(particles: &[Particle], threshold: f32, dampening: f32, out: &mut Vec<Link>) {
    for (a, pa) in particles.iter().enumerate() {
        for (offset, pb) in particles[a + 1..].iter().enumerate() {
            let dist = pa.position.distance(pb.position);
            if dist < threshold {
                out.push(Link {
                    a,
                    b: a + 1 + offset,
                    alpha: connection_alpha(dist, threshold, dampening),
                });
            }
        }
    }
}
