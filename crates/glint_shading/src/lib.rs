//! The surface shading model used by the glyph meshes, plus the emissive
//! pulse of the central cube.
//!
//! This is the CPU reference for the math in `lit.wgsl` / `emissive.wgsl`:
//! the shaders are expected to produce the same colors for the same inputs,
//! and the unit tests here pin the behavior down.

pub mod emissive;
pub mod light;
pub mod material;
pub mod shade;

pub use emissive::{PULSE_EXPONENT, pulse_brightness};
pub use light::PointLight;
pub use material::{AMBIENT_INTENSITY, GlyphRole, Material};
pub use shade::{SurfaceSample, shade};
