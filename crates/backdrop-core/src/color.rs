use std::fmt;

use crate::error::ColorError;

/// 8-bit RGB color, the unit of every palette.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_u32(num: u32) -> Self {
        Self {
            r: (num >> 16) as u8,
            g: (num >> 8) as u8,
            b: num as u8,
        }
    }

    /// Parse `#rrggbb` or `#rgb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_owned()));
        }
        match digits.len() {
            6 => {
                let num = u32::from_str_radix(digits, 16)
                    .map_err(|_| ColorError::InvalidHex(hex.to_owned()))?;
                Ok(Self::from_u32(num))
            }
            3 => {
                // #abc expands to #aabbcc
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16).unwrap_or(0) as u8;
                    *slot = v << 4 | v;
                }
                Ok(Self::new(channels[0], channels[1], channels[2]))
            }
            _ => Err(ColorError::InvalidHex(hex.to_owned())),
        }
    }

    /// Parse a comma separated list of hex colors, as passed in from a page.
    pub fn parse_palette(list: &str) -> Result<Vec<Self>, ColorError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::from_hex)
            .collect()
    }

    /// Normalised RGBA with the given alpha.
    pub fn to_rgba_f32(self, alpha: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            alpha,
        ]
    }

    /// CSS `rgba(...)` string for 2D canvas fill and stroke styles.
    pub fn css_rgba(self, alpha: f32) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
