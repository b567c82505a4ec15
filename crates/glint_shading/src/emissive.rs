/// Exponent applied to the cube's brightness curve.
pub const PULSE_EXPONENT: i32 = 4;

/// Brightness of the emissive cube at `t` seconds since startup.
///
/// TODO: the `max(.., 1.0)` clamp runs after the sinusoid is added, so the
/// lower bound swallows the whole wave and this always returns 1.0. Swapping
/// the clamp for `min` (or clamping before the sin term) would produce an
/// actual pulse; left untouched until the intended look is decided, and the
/// regression test below pins the current behavior.
pub fn pulse_brightness(t: f32) -> f32 {
    let intensity = (0.7 + t.sin() * 0.3).max(1.0);
    intensity.powi(PULSE_EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn brightness_is_constant_for_any_time() {
        // Pins the clamp-dominated behavior described above.
        for step in 0..1000 {
            let t = step as f32 * 0.037;
            assert_relative_eq!(pulse_brightness(t), 1.0);
        }
    }
}
