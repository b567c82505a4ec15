use glam::Vec3;

/// Base ambient term plus the extra fill component, shared by both presets.
pub const AMBIENT_BASE: f32 = 0.200;
pub const AMBIENT_FILL: f32 = 0.137;
pub const AMBIENT_INTENSITY: f32 = AMBIENT_BASE + AMBIENT_FILL;

/// Which glyph a material is for. The letter gets the softer "plastic"
/// preset, the digit the harder "metal" one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphRole {
    Letter,
    Digit,
}

impl GlyphRole {
    /// Intensity of the point light as seen by this glyph. Each glyph
    /// carries its own value; the digit is lit brighter.
    pub fn light_intensity(self) -> f32 {
        match self {
            GlyphRole::Letter => 2.0,
            GlyphRole::Digit => 3.0,
        }
    }
}

/// Reflectance parameters for the per-pixel lighting model.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    /// RGB in [0,1].
    pub diffuse_color: Vec3,
    /// RGB in [0,1].
    pub specular_color: Vec3,
    /// Specular lobe sharpness, > 0. Higher values narrow the highlight.
    pub shininess: f32,
    /// Fraction of the diffuse color present regardless of the light.
    pub ambient_intensity: f32,
}

impl Material {
    /// Pale blue plastic with a broad white highlight.
    pub fn plastic() -> Self {
        Self {
            diffuse_color: Vec3::new(0.5373, 0.8118, 0.9412),
            specular_color: Vec3::ONE,
            shininess: 70.0,
            ambient_intensity: AMBIENT_INTENSITY,
        }
    }

    /// Red metal with a tight highlight.
    pub fn metal() -> Self {
        Self {
            diffuse_color: Vec3::new(1.0, 0.0, 0.0),
            specular_color: Vec3::ONE,
            shininess: 200.0,
            ambient_intensity: AMBIENT_INTENSITY,
        }
    }

    pub fn for_role(role: GlyphRole) -> Self {
        match role {
            GlyphRole::Letter => Self::plastic(),
            GlyphRole::Digit => Self::metal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ambient_intensity_is_the_sum_of_its_components() {
        assert_relative_eq!(AMBIENT_INTENSITY, 0.337);
    }

    #[test]
    fn presets_map_to_roles() {
        let letter = Material::for_role(GlyphRole::Letter);
        let digit = Material::for_role(GlyphRole::Digit);
        assert_relative_eq!(letter.shininess, 70.0);
        assert_relative_eq!(digit.shininess, 200.0);
        assert_relative_eq!(digit.diffuse_color.x, 1.0);
        assert_relative_eq!(GlyphRole::Letter.light_intensity(), 2.0);
        assert_relative_eq!(GlyphRole::Digit.light_intensity(), 3.0);
    }
}
