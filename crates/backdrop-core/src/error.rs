use thiserror::Error;

/// Errors raised while parsing palette colors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("invalid hex color {0:?}: expected #rrggbb or #rgb")]
    InvalidHex(String),
}

/// Errors raised when a field configuration cannot produce a valid particle set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must lie in {range}, got {value}")]
    OutOfRange {
        name: &'static str,
        range: &'static str,
        value: f32,
    },

    #[error("unknown preset {0:?}")]
    UnknownPreset(String),

    #[error(transparent)]
    Color(#[from] ColorError),
}
