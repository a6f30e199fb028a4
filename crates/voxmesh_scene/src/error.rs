use voxmesh_image::AtlasError;
use voxmesh_vox::VoxError;

use thiserror::Error;

/// Conditions that abort the conversion of a whole file.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to parse .vox file: {0}")]
    Parse(#[from] VoxError),
    #[error("no models found to convert")]
    NoModels,
    #[error("invalid config: {0}")]
    Config(#[from] ron::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why one (shape, frame) pair produced no mesh. Conversion continues with the rest of the scene.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SkipReason {
    #[error("hidden")]
    Hidden,
    #[error("no model for this frame")]
    NoModelForFrame,
    #[error("model has no visible faces")]
    NoFaces,
    #[error(transparent)]
    Atlas(#[from] AtlasError),
}
