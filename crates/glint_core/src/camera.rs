use glam::Mat4;

#[derive(Clone, Debug)]
pub struct Camera {
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 75.0f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Tracks the window's client area: subsequent frames project with an
    /// aspect ratio of exactly `width / height`.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// Computes the "Projection Matrix" (World -> Screen)
    pub fn compute_projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_sets_the_exact_aspect_ratio() {
        let mut camera = Camera::default();
        camera.set_viewport(1920, 1080);
        assert_eq!(camera.aspect_ratio, 1920.0 / 1080.0);
        camera.set_viewport(997, 313);
        assert_eq!(camera.aspect_ratio, 997.0 / 313.0);
    }

    #[test]
    fn degenerate_viewport_is_ignored() {
        let mut camera = Camera::default();
        camera.set_viewport(800, 600);
        camera.set_viewport(800, 0);
        assert_eq!(camera.aspect_ratio, 800.0 / 600.0);
    }
}
