//! One-shot font asset pipeline: fetch a three.js typeface JSON, parse it,
//! and turn glyph outlines into extruded meshes.

use thiserror::Error;

pub mod loader;
pub mod mesh;
pub mod outline;
pub mod typeface;

pub use loader::{AssetMessage, FontLoader, FontSource};
pub use mesh::{MeshData, Vertex};
pub use typeface::Typeface;

#[derive(Debug, Error)]
pub enum AssetError {
    /// The remote fetch kept failing. Recoverable: the scene renders
    /// without glyph meshes and the failure is reported, not fatal.
    #[error("font fetch failed after {attempts} attempts: {reason}")]
    Fetch { attempts: u32, reason: String },

    #[error("typeface parse error: {0}")]
    Parse(String),

    #[error("glyph {0:?} missing from typeface")]
    MissingGlyph(char),

    #[error("malformed outline: {0}")]
    Outline(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AssetError {
    /// Fetch and IO failures can be retried or ignored; a typeface that
    /// parsed but is malformed cannot.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AssetError::Fetch { .. } | AssetError::Io(_))
    }
}

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        AssetError::Parse(err.to_string())
    }
}
