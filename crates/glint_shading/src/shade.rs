use glam::Vec3;

use crate::{light::PointLight, material::Material};

/// One fragment's worth of interpolated geometry, in the same space as the
/// light position, with the viewer at the origin.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceSample {
    pub position: Vec3,
    /// Must be unit length.
    pub normal: Vec3,
}

impl SurfaceSample {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal: normal.normalize(),
        }
    }
}

/// Mirror of GLSL/WGSL `reflect`: the incident vector bounced off the plane
/// with the given unit normal.
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

/// Ambient + diffuse + specular reflection with point-light attenuation.
///
/// Returns the componentwise sum without clamping to [0,1]; values above 1
/// are left for the display pipeline to clamp.
pub fn shade(sample: &SurfaceSample, light: &PointLight, material: &Material) -> Vec3 {
    let to_light = light.position - sample.position;
    let dist = to_light.length();
    // A sample sitting exactly on the light has no defined direction; use
    // the surface normal so the diffuse factor degrades to 1 instead of NaN.
    let light_dir = to_light.try_normalize().unwrap_or(sample.normal);
    let attenuation = light.attenuation(dist);

    let ambient = material.ambient_intensity * material.diffuse_color;

    let diffuse_factor = sample.normal.dot(light_dir).max(0.0);
    let diffuse = diffuse_factor * material.diffuse_color * attenuation;

    // Viewer sits at the origin of the sample's space.
    let view_dir = (-sample.position).try_normalize().unwrap_or(Vec3::Z);
    let reflect_dir = reflect(-light_dir, sample.normal);
    let specular_factor = view_dir.dot(reflect_dir).max(0.0).powf(material.shininess);
    let specular = specular_factor * material.specular_color * attenuation;

    ambient + diffuse + specular
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::AMBIENT_INTENSITY;
    use approx::assert_relative_eq;

    #[test]
    fn diffuse_factor_stays_in_unit_range() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, 10.0), 1.0);
        let directions = [
            Vec3::Z,
            -Vec3::Z,
            Vec3::X,
            Vec3::new(1.0, 1.0, 1.0).normalize(),
            Vec3::new(-0.3, 0.9, -0.1).normalize(),
        ];
        for normal in directions {
            let sample = SurfaceSample::new(Vec3::new(0.0, 0.0, 5.0), normal);
            let to_light = (light.position - sample.position).normalize();
            let factor = sample.normal.dot(to_light).max(0.0);
            assert!((0.0..=1.0).contains(&factor));
        }
    }

    #[test]
    fn reflect_mirrors_across_the_normal() {
        let reflected = reflect(Vec3::new(1.0, -1.0, 0.0).normalize(), Vec3::Y);
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_relative_eq!(reflected.x, expected.x, epsilon = 1e-6);
        assert_relative_eq!(reflected.y, expected.y, epsilon = 1e-6);
        assert_relative_eq!(reflected.z, expected.z, epsilon = 1e-6);
    }

    #[test]
    fn lit_head_on_matches_the_closed_form() {
        // Sample coincides with the light, normal facing the viewer:
        // attenuation is the raw intensity, diffuse factor is 1, and the
        // reflected ray points away from the viewer so specular is zero.
        let material = Material::plastic();
        let light = PointLight::new(Vec3::new(0.0, 0.0, 5.0), 2.0);
        let sample = SurfaceSample::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);

        let color = shade(&sample, &light, &material);
        let expected = material.diffuse_color * (AMBIENT_INTENSITY + 2.0);

        assert_relative_eq!(color.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(color.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(color.z, expected.z, epsilon = 1e-4);
    }

    #[test]
    fn grazing_surface_keeps_only_ambient() {
        let material = Material::metal();
        let light = PointLight::new(Vec3::new(0.0, 0.0, 10.0), 3.0);
        // Normal orthogonal to the light direction: no diffuse, and the
        // reflected ray points straight away from the viewer.
        let sample = SurfaceSample::new(Vec3::new(0.0, 0.0, -5.0), Vec3::X);

        let color = shade(&sample, &light, &material);
        let ambient = material.ambient_intensity * material.diffuse_color;

        assert_relative_eq!(color.x, ambient.x, epsilon = 1e-4);
        assert_relative_eq!(color.y, ambient.y, epsilon = 1e-4);
        assert_relative_eq!(color.z, ambient.z, epsilon = 1e-4);
    }

    #[test]
    fn output_may_exceed_one() {
        // A strong light right on top of a white-ish surface overshoots 1;
        // clamping is the display pipeline's job, not the model's.
        let material = Material::plastic();
        let light = PointLight::new(Vec3::new(0.0, 0.0, 5.0), 10.0);
        let sample = SurfaceSample::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let color = shade(&sample, &light, &material);
        assert!(color.max_element() > 1.0);
    }
}
