//! The scene as one explicit state struct.
//!
//! Ownership is deliberately narrow: the frame loop owns `SceneState` and is
//! the only thing that mutates transforms. Input handlers never touch a
//! transform directly; they queue [`TransformDelta`]s which are applied at
//! the next frame boundary. The font completion handler is an explicit
//! method receiving the loaded typeface, not a closure capturing scene
//! internals.

use glam::{Mat4, Vec3};
use winit::keyboard::KeyCode;

use glint_assets::{AssetError, MeshData, Typeface, mesh::extrude_contours, outline::flatten_outline};
use glint_core::{Camera, Time, Transform};
use glint_shading::GlyphRole;

/// Vertical step of the light-emitting cube per W/S press.
pub const LIGHT_STEP: f32 = 0.1;
/// Horizontal step of the camera per A/D press.
pub const CAMERA_STEP: f32 = 0.2;

/// Glyph size in world units and extrusion depth, as the original scene used.
pub const GLYPH_SIZE: f32 = 2.0;
pub const GLYPH_DEPTH: f32 = 0.2;

/// Cube spin rate in radians per second.
pub const CUBE_SPIN_RATE: f32 = 0.8;

/// What a queued delta applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeltaTarget {
    /// The emissive cube, which the point light tracks.
    Light,
    Camera,
}

#[derive(Clone, Copy, Debug)]
pub struct TransformDelta {
    pub target: DeltaTarget,
    pub translation: Vec3,
}

/// One extruded glyph ready for upload: mesh, placement, material role.
pub struct GlyphEntry {
    pub glyph: char,
    pub role: GlyphRole,
    pub mesh: MeshData,
    pub transform: Transform,
}

pub struct SceneState {
    pub time: Time,
    pub camera: Camera,
    pub camera_transform: Transform,
    /// The pulsing emissive cube at the center of the scene.
    pub cube: Transform,
    /// Bound to the cube's position every frame.
    pub light_position: Vec3,
    /// Empty until the font completion handler runs.
    pub glyphs: Vec<GlyphEntry>,
    pending: Vec<TransformDelta>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            time: Time::default(),
            camera: Camera::default(),
            camera_transform: Transform::from_xyz(0.0, 0.0, 7.0),
            cube: Transform::default(),
            light_position: Vec3::ZERO,
            glyphs: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Maps a key press to a queued delta. Physical key codes make the
    /// bindings case-insensitive. Returns false for unbound keys.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let delta = match key {
            KeyCode::KeyW => TransformDelta {
                target: DeltaTarget::Light,
                translation: Vec3::Y * LIGHT_STEP,
            },
            KeyCode::KeyS => TransformDelta {
                target: DeltaTarget::Light,
                translation: -Vec3::Y * LIGHT_STEP,
            },
            KeyCode::KeyA => TransformDelta {
                target: DeltaTarget::Camera,
                translation: -Vec3::X * CAMERA_STEP,
            },
            KeyCode::KeyD => TransformDelta {
                target: DeltaTarget::Camera,
                translation: Vec3::X * CAMERA_STEP,
            },
            _ => return false,
        };
        self.queue_delta(delta);
        true
    }

    pub fn queue_delta(&mut self, delta: TransformDelta) {
        self.pending.push(delta);
    }

    /// Applies all queued input deltas. Runs once per frame, before
    /// anything reads the transforms, so handlers and the frame loop never
    /// observe half-applied movement.
    pub fn apply_pending(&mut self) {
        for delta in self.pending.drain(..) {
            match delta.target {
                DeltaTarget::Light => self.cube.translation += delta.translation,
                DeltaTarget::Camera => self.camera_transform.translation += delta.translation,
            }
        }
    }

    /// Frame-boundary update: drain input, advance the clock, spin the
    /// cube, and re-bind the light to the cube's position.
    pub fn frame_start(&mut self) {
        self.apply_pending();
        self.time.update();
        self.cube.rotate_y(CUBE_SPIN_RATE * self.time.delta_seconds());
        self.light_position = self.cube.translation;
    }

    /// Seconds since startup; the cube shader's time uniform.
    pub fn elapsed_seconds(&self) -> f32 {
        self.time.elapsed_seconds()
    }

    /// World -> view. The camera never rotates in this scene, so this is
    /// just the inverse of its translation, but going through the full
    /// matrix keeps it honest if that changes.
    pub fn view_matrix(&self) -> Mat4 {
        self.camera_transform.compute_matrix().inverse()
    }

    /// One-shot completion handler for the font fetch: builds both glyph
    /// meshes. Until this runs the scene renders without text, by design.
    pub fn on_font_loaded(&mut self, font: &Typeface) -> Result<(), AssetError> {
        let scale = GLYPH_SIZE / font.resolution;
        let placements = [
            ('N', GlyphRole::Letter, Vec3::new(-4.0, -0.5, 0.0)),
            ('7', GlyphRole::Digit, Vec3::new(2.5, -0.5, 0.0)),
        ];

        let mut entries = Vec::with_capacity(placements.len());
        for (glyph, role, position) in placements {
            let outline = &font.glyph(glyph)?.o;
            let contours = flatten_outline(outline, scale)?;
            let mesh = extrude_contours(&contours, GLYPH_DEPTH);
            log::debug!(
                "built glyph {glyph:?}: {} vertices, {} indices",
                mesh.vertices.len(),
                mesh.indices.len()
            );
            entries.push(GlyphEntry {
                glyph,
                role,
                mesh,
                transform: Transform::from_xyz(position.x, position.y, position.z),
            });
        }

        // All-or-nothing: a partial glyph set is never installed.
        self.glyphs = entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn w_press_raises_the_cube_at_the_frame_boundary() {
        let mut scene = SceneState::new();
        assert!(scene.handle_key(KeyCode::KeyW));
        // Queued, not yet applied.
        assert_relative_eq!(scene.cube.translation.y, 0.0);
        scene.apply_pending();
        assert_relative_eq!(scene.cube.translation.y, 0.1);
    }

    #[test]
    fn s_press_lowers_the_cube() {
        let mut scene = SceneState::new();
        scene.handle_key(KeyCode::KeyS);
        scene.apply_pending();
        assert_relative_eq!(scene.cube.translation.y, -0.1);
    }

    #[test]
    fn a_and_d_move_the_camera_horizontally() {
        let mut scene = SceneState::new();
        scene.handle_key(KeyCode::KeyA);
        scene.apply_pending();
        assert_relative_eq!(scene.camera_transform.translation.x, -0.2);

        scene.handle_key(KeyCode::KeyD);
        scene.handle_key(KeyCode::KeyD);
        scene.apply_pending();
        assert_relative_eq!(scene.camera_transform.translation.x, 0.2);
    }

    #[test]
    fn unbound_keys_queue_nothing() {
        let mut scene = SceneState::new();
        assert!(!scene.handle_key(KeyCode::KeyQ));
        scene.apply_pending();
        assert_relative_eq!(scene.cube.translation.y, 0.0);
        assert_relative_eq!(scene.camera_transform.translation.x, 0.0);
    }

    #[test]
    fn light_tracks_the_cube_every_frame() {
        let mut scene = SceneState::new();
        scene.handle_key(KeyCode::KeyW);
        scene.handle_key(KeyCode::KeyW);
        scene.frame_start();
        assert_relative_eq!(scene.light_position.y, 0.2);
        assert_relative_eq!(scene.light_position.x, scene.cube.translation.x);
    }

    #[test]
    fn view_matrix_moves_the_world_opposite_the_camera() {
        let scene = SceneState::new();
        let origin_in_view = scene.view_matrix().transform_point3(Vec3::ZERO);
        assert_relative_eq!(origin_in_view.z, -7.0);
    }

    #[test]
    fn font_completion_installs_both_glyphs() {
        let json = r#"{
            "familyName": "T", "resolution": 1000,
            "glyphs": {
                "N": {"ha": 720, "o": "m 50 0 l 50 700 l 150 700 l 570 120 l 570 700 l 670 700 l 670 0 l 570 0 l 150 580 l 150 0"},
                "7": {"ha": 560, "o": "m 40 700 l 520 700 l 220 0 l 110 0 l 390 610 l 40 610"}
            }
        }"#;
        let font = Typeface::from_json(json).unwrap();

        let mut scene = SceneState::new();
        scene.on_font_loaded(&font).unwrap();

        assert_eq!(scene.glyphs.len(), 2);
        let n = &scene.glyphs[0];
        assert_eq!(n.glyph, 'N');
        assert_eq!(n.role, GlyphRole::Letter);
        assert_relative_eq!(n.transform.translation.x, -4.0);
        assert_relative_eq!(n.transform.translation.y, -0.5);
        assert!(!n.mesh.vertices.is_empty());

        let seven = &scene.glyphs[1];
        assert_eq!(seven.role, GlyphRole::Digit);
        assert_relative_eq!(seven.transform.translation.x, 2.5);
    }

    #[test]
    fn missing_glyph_leaves_the_scene_unchanged() {
        let json = r#"{"familyName":"T","resolution":1000,"glyphs":{
            "N": {"ha": 720, "o": "m 0 0 l 700 0 l 700 700"}
        }}"#;
        let font = Typeface::from_json(json).unwrap();

        let mut scene = SceneState::new();
        let err = scene.on_font_loaded(&font).unwrap_err();
        assert!(matches!(err, AssetError::MissingGlyph('7')));
        assert!(scene.glyphs.is_empty());
    }
}
