//! Ambient particle-field backdrop: drifting points joined by faint lines.
//!
//! The engine is platform free. A page mounts it through [`host::Backdrop`],
//! supplying a [`surface::Surface`] to draw on and a [`host::Host`] that
//! measures the region, delivers events and schedules frames.
//!
//! The connection pass checks every pair of particles each frame, which is
//! O(N²): around 5,000–7,000 distance checks at the usual 100–120 particles.
//! [`config::ConnectionStrategy::Grid`] buckets particles first for denser fields.

pub mod color;
pub mod config;
pub mod connections;
pub mod error;
pub mod field;
pub mod grid;
pub mod host;
pub mod math;
pub mod particle;
pub mod surface;

pub use color::Rgb;
pub use config::{FieldConfig, FieldPreset};
pub use error::{ColorError, ConfigError};
pub use field::{FrameStats, ParticleField};
pub use host::{Backdrop, FrameHandle, Host, HostEvent, ListenerId};
pub use particle::{Particle, ParticleVertex};
pub use surface::{Extent, Surface};
