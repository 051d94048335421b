/// Advance one axis by `vel` inside `[0, max]`, reflecting off the walls.
///
/// Returns the new `(position, velocity)`. A step that would leave the range
/// flips the velocity and mirrors the overshoot back inside. A particle that
/// already sits outside (the surface shrank under it) is turned inward and
/// keeps moving at its own speed instead of being teleported.
#[inline]
pub fn reflect_axis(pos: f32, vel: f32, max: f32) -> (f32, f32) {
    let next = pos + vel;
    if (0.0..=max).contains(&next) {
        return (next, vel);
    }

    if pos < 0.0 || pos > max {
        if vel == 0.0 {
            return (pos.clamp(0.0, max), vel);
        }
        let inward = if pos < 0.0 { vel.abs() } else { -vel.abs() };
        return (pos + inward, inward);
    }

    let mirrored = if next < 0.0 { -next } else { 2.0 * max - next };
    (mirrored.clamp(0.0, max), -vel)
}

/// Link alpha for two particles `dist` apart: 1 at contact, 0 at `threshold`,
/// scaled by `dampening`. Zero at or beyond the threshold.
#[inline]
pub fn connection_alpha(dist: f32, threshold: f32, dampening: f32) -> f32 {
    if dist >= threshold || threshold <= 0.0 {
        return 0.0;
    }
    (1.0 - dist / threshold) * dampening
}

/// Draw radius of a pulsing particle. Never negative.
#[inline]
pub fn pulse_radius(radius: f32, amplitude: f32, phase: f32) -> f32 {
    (radius * (1.0 + amplitude * phase.sin())).max(0.0)
}

/// Sample uniformly from `[min, max]`, tolerating a degenerate range.
#[inline]
pub fn sample_range<R: rand::Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_inside_is_plain_advance() {
        assert_eq!(reflect_axis(10.0, 0.5, 100.0), (10.5, 0.5));
    }

    #[test]
    fn test_reflect_mirrors_overshoot() {
        assert_eq!(reflect_axis(99.8, 0.5, 100.0).1, -0.5);
        assert!((reflect_axis(99.8, 0.5, 100.0).0 - 99.7).abs() < 1e-4);
        assert_eq!(reflect_axis(0.0, -1.0, 100.0), (1.0, 1.0));
    }

    #[test]
    fn test_reflect_fast_particle_stays_inside() {
        let (p, v) = reflect_axis(0.5, 10.0, 1.0);
        assert!((0.0..=1.0).contains(&p));
        assert_eq!(v, -10.0);
    }

    #[test]
    fn test_outside_particle_drifts_back() {
        assert_eq!(reflect_axis(150.0, 0.5, 100.0), (149.5, -0.5));
        assert_eq!(reflect_axis(-4.0, -0.5, 100.0), (-3.5, 0.5));
        assert_eq!(reflect_axis(150.0, 0.0, 100.0), (100.0, 0.0));
    }

    #[test]
    fn test_pulse_radius_never_negative() {
        assert_eq!(pulse_radius(2.0, 0.0, 1.0), 2.0);
        assert_eq!(pulse_radius(2.0, 3.0, -std::f32::consts::FRAC_PI_2), 0.0);
    }
}
