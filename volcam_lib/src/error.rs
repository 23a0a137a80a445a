use std::path::PathBuf;

use thiserror::Error;

use crate::parse::LineError;

/// Errors produced while loading volumes, reading camera or transfer function files
/// and writing images.
#[derive(Error, Debug)]
pub enum VolcamError {
    /// File could not be opened, mapped, listed or written
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized voxel type `{0}` (expected uint8, uint16, float32 or float64)")]
    UnknownVoxelType(String),

    /// File holds fewer bytes than the requested dimensions need
    #[error("volume {} holds {actual} bytes, {expected} expected", path.display())]
    SizeMismatch {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("volume has no voxels (dims {0} x {1} x {2})")]
    EmptyVolume(usize, usize, usize),

    /// Voxel or byte count does not fit in `usize`
    #[error("volume dims {0} x {1} x {2} are too large")]
    TooLarge(usize, usize, usize),

    #[error("got {actual} samples for a volume of {expected} voxels")]
    SampleCount { expected: usize, actual: usize },

    /// Text file with a malformed line
    #[error("parse error in {}, {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: LineError,
    },

    #[error("no timestep number in file name {}", .0.display())]
    MissingTimestep(PathBuf),

    #[error("unsupported image format for {} (use .jpg or .png)", .0.display())]
    UnsupportedImageFormat(PathBuf),

    #[error("cannot encode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl VolcamError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> VolcamError {
        VolcamError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, VolcamError>;
