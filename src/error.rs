//! Error types for the replication engine

use crate::palette::Rgb;
use thiserror::Error;

/// Errors produced while preparing or executing a drawing job.
///
/// Cancellation is not represented here: a cancelled job terminates
/// normally with [`crate::director::DrawOutcome::Cancelled`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// Drawing was requested before both calibration points were captured.
    #[error("calibration incomplete: canvas and palette origins must both be set")]
    CalibrationIncomplete,

    /// Drawing was requested with no image selected.
    #[error("no image selected")]
    NoImage,

    /// A quantized color has no swatch on the canvas palette. The palette
    /// is a closed set, so this is a defect upstream, not a transient fault.
    #[error("color not on the canvas palette: {0}")]
    UnknownColor(Rgb),

    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("png encode error: {0}")]
    Encode(String),

    #[error("image fetch failed: {0}")]
    Fetch(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pointer device error: {0}")]
    Pointer(String),
}
