use glam::Vec2;

use crate::color::Rgb;

/// Pixel dimensions of a drawing surface, never smaller than 1×1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    /// Build an extent, clamping zero, negative and non-finite sides to 1.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: clamp_side(width),
            height: clamp_side(height),
        }
    }

    /// Whole-pixel size for canvas attributes.
    pub fn pixels(&self) -> (u32, u32) {
        (self.width.round() as u32, self.height.round() as u32)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

fn clamp_side(v: f32) -> f32 {
    if v.is_finite() {
        v.max(1.0)
    } else {
        1.0
    }
}

/// A 2D drawing target the field renders into.
///
/// Implementations are expected to be cheap no-ops when they have lost their
/// drawing context; the field checks `has_context` once per frame and skips
/// the frame entirely when it is `false`.
pub trait Surface {
    /// Resize the backing pixel buffer.
    fn resize(&mut self, extent: Extent);

    /// Whether draw calls can currently reach pixels.
    fn has_context(&self) -> bool;

    /// Wipe every pixel.
    fn clear(&mut self, extent: Extent);

    /// Paint a translucent rectangle over the whole surface.
    fn fill_overlay(&mut self, extent: Extent, color: Rgb, alpha: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb, alpha: f32);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb, alpha: f32);
}
