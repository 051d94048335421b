use crate::color::Rgb;
use crate::error::ConfigError;

/// How the surface is wiped at the start of each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearMode {
    /// Clear every pixel.
    Full,
    /// Paint a translucent overlay so the previous frame fades into a short trail.
    Trail { color: Rgb, alpha: f32 },
}

/// Which algorithm finds particle pairs closer than the connection distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConnectionStrategy {
    /// Check every unordered pair. O(N²), fine at a few hundred particles.
    #[default]
    AllPairs,
    /// Bucket particles into a spatial hash with cell size = connection distance.
    Grid,
}

/// What happens to existing particles when the surface is resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResizePolicy {
    /// Leave particles where they are. Particles left outside a shrunk surface
    /// have their velocity pointed back inward and drift home over a few frames.
    #[default]
    DriftBack,
    /// Clamp every particle into the new bounds immediately.
    Clamp,
    /// Discard and reseed the whole particle set for the new bounds.
    Reseed,
}

/// Sinusoidal radius pulse applied at draw time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseConfig {
    /// Fraction of the stored radius added or removed at the peak.
    pub amplitude: f32,
    /// Phase advance per frame, in radians.
    pub speed: f32,
    /// Per-index phase offset so particles don't all breathe in lockstep.
    pub spread: f32,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            amplitude: 0.3,
            speed: 0.05,
            spread: 0.1,
        }
    }
}

/// Transient particles spawned under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerConfig {
    pub radius: f32,
    pub opacity: f32,
    pub color: Rgb,
    /// How far above `particle_count` the set may grow before the oldest are trimmed.
    pub slack: usize,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            opacity: 0.3,
            color: Rgb::from_u32(0x22d3ee),
            slack: 20,
        }
    }
}

/// Full configuration of one particle field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub palette: Vec<Rgb>,
    /// Each velocity axis is drawn from `[-speed, speed]` pixels per frame.
    pub speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    /// Pairs closer than this (pixels) are linked.
    pub connection_distance: f32,
    /// Scales link alpha down relative to the particles themselves.
    pub connection_dampening: f32,
    pub line_width: f32,
    pub link_color: Rgb,
    pub clear_mode: ClearMode,
    pub pulse: Option<PulseConfig>,
    pub pointer: Option<PointerConfig>,
    pub connection_strategy: ConnectionStrategy,
    pub resize_policy: ResizePolicy,
}

/// Brand palette shared by the presets: blues, cyan, violet and white.
pub const DEFAULT_PALETTE: [Rgb; 4] = [
    Rgb::from_u32(0x3b82f6),
    Rgb::from_u32(0x06b6d4),
    Rgb::from_u32(0x8b5cf6),
    Rgb::from_u32(0xffffff),
];

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            palette: DEFAULT_PALETTE.to_vec(),
            speed: 0.5,
            min_radius: 1.0,
            max_radius: 3.0,
            min_opacity: 0.2,
            max_opacity: 0.7,
            connection_distance: 120.0,
            connection_dampening: 0.2,
            line_width: 0.5,
            link_color: Rgb::from_u32(0x3b82f6),
            clear_mode: ClearMode::Full,
            pulse: None,
            pointer: None,
            connection_strategy: ConnectionStrategy::AllPairs,
            resize_policy: ResizePolicy::DriftBack,
        }
    }
}

impl FieldConfig {
    /// Upper bound on the live particle count, including pointer slack.
    pub fn max_particles(&self) -> usize {
        self.particle_count + self.pointer.map_or(0, |p| p.slack)
    }

    /// Check every numeric field before particles are seeded from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        for (name, value) in [
            ("speed", self.speed),
            ("min_radius", self.min_radius),
            ("max_radius", self.max_radius),
            ("min_opacity", self.min_opacity),
            ("max_opacity", self.max_opacity),
            ("connection_distance", self.connection_distance),
            ("connection_dampening", self.connection_dampening),
            ("line_width", self.line_width),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if self.speed < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "speed",
                range: "[0, inf)",
                value: self.speed,
            });
        }
        if self.min_radius < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "min_radius",
                range: "[0, inf)",
                value: self.min_radius,
            });
        }
        if self.min_radius > self.max_radius {
            return Err(ConfigError::InvertedRange {
                name: "radius",
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        check_opacity("min_opacity", self.min_opacity)?;
        check_opacity("max_opacity", self.max_opacity)?;
        if self.min_opacity > self.max_opacity {
            return Err(ConfigError::InvertedRange {
                name: "opacity",
                min: self.min_opacity,
                max: self.max_opacity,
            });
        }
        if self.connection_distance <= 0.0 {
            return Err(ConfigError::NotPositive {
                name: "connection_distance",
                value: self.connection_distance,
            });
        }
        if !(0.0..=1.0).contains(&self.connection_dampening) {
            return Err(ConfigError::OutOfRange {
                name: "connection_dampening",
                range: "[0, 1]",
                value: self.connection_dampening,
            });
        }

        if let ClearMode::Trail { alpha, .. } = self.clear_mode {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(ConfigError::OutOfRange {
                    name: "trail alpha",
                    range: "(0, 1]",
                    value: alpha,
                });
            }
        }
        if let Some(pulse) = self.pulse {
            if !pulse.amplitude.is_finite() || !pulse.speed.is_finite() || !pulse.spread.is_finite() {
                return Err(ConfigError::NonFinite {
                    name: "pulse",
                    value: pulse.amplitude + pulse.speed + pulse.spread,
                });
            }
        }
        if let Some(pointer) = self.pointer {
            if !(pointer.radius.is_finite() && pointer.radius >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    name: "pointer radius",
                    range: "[0, inf)",
                    value: pointer.radius,
                });
            }
            check_opacity("pointer opacity", pointer.opacity)?;
        }
        Ok(())
    }
}

fn check_opacity(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            range: "(0, 1]",
            value,
        })
    }
}

/// Named configurations matching the backdrops used across the site's pages.
pub struct FieldPreset;

impl FieldPreset {
    pub const NAMES: [&'static str; 4] = ["ambient", "pulse", "interactive", "trail"];

    /// Plain drifting field with thin links.
    pub fn ambient() -> FieldConfig {
        FieldConfig::default()
    }

    /// Denser field with longer links and a breathing radius.
    pub fn pulse() -> FieldConfig {
        FieldConfig {
            particle_count: 120,
            connection_distance: 150.0,
            connection_dampening: 0.15,
            pulse: Some(PulseConfig::default()),
            ..FieldConfig::default()
        }
    }

    /// Pointer movement leaves a ripple of short-lived particles.
    pub fn interactive() -> FieldConfig {
        FieldConfig {
            pointer: Some(PointerConfig::default()),
            ..FieldConfig::default()
        }
    }

    /// Frames fade out through a dark overlay instead of a hard clear.
    pub fn trail() -> FieldConfig {
        FieldConfig {
            clear_mode: ClearMode::Trail {
                color: Rgb::from_u32(0x030712),
                alpha: 0.15,
            },
            ..FieldConfig::default()
        }
    }

    /// Resolve a preset by its case-insensitive name.
    pub fn by_name(name: &str) -> Result<FieldConfig, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "ambient" => Ok(Self::ambient()),
            "pulse" => Ok(Self::pulse()),
            "interactive" => Ok(Self::interactive()),
            "trail" => Ok(Self::trail()),
            _ => Err(ConfigError::UnknownPreset(name.to_owned())),
        }
    }
}
