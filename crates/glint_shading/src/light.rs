use glam::Vec3;

/// A point light with quadratic distance falloff.
///
/// The scene binds the light's position to the emissive cube every frame,
/// so the light moves when the cube does.
#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// Falloff at `dist` units from the light.
    ///
    /// The `1.0 +` offset keeps the result finite at dist = 0, where it
    /// equals the raw intensity. Strictly decreasing in `dist`.
    pub fn attenuation(&self, dist: f32) -> f32 {
        self.intensity / (1.0 + 0.1 * dist * dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn attenuation_at_zero_distance_is_raw_intensity() {
        let light = PointLight::new(Vec3::ZERO, 2.0);
        assert_relative_eq!(light.attenuation(0.0), 2.0);
    }

    #[test]
    fn attenuation_is_strictly_decreasing_and_positive() {
        let light = PointLight::new(Vec3::ZERO, 3.0);
        let mut previous = f32::INFINITY;
        for step in 0..100 {
            let dist = step as f32 * 0.5;
            let a = light.attenuation(dist);
            assert!(a > 0.0);
            assert!(a < previous);
            previous = a;
        }
    }
}
