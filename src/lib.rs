//! Canvas replication engine
//!
//! Reproduces a raster image on a networked collaborative drawing canvas by
//! driving a simulated pointer. The pipeline:
//!
//! 1. [`quantize`] an arbitrary RGB image onto the canvas's fixed 22-color
//!    [`palette`]
//! 2. [`plan`] a minimal ordered sequence of strokes (single clicks and
//!    horizontal press-drag-release runs)
//! 3. execute the plan with the [`director`], translating logical pixels
//!    through two operator-[`calibrate`]d screen points
//!
//! The surrounding desktop UI, web image search and global hotkey handling
//! are external collaborators: they select an image (see [`acquire`]), feed
//! the two calibration clicks, assert the [`cancel`] token and consume
//! [`progress`] events plus the completion handle returned by
//! [`job::DrawJob::spawn`].

pub mod acquire;
pub mod calibrate;
pub mod cancel;
pub mod director;
pub mod error;
pub mod job;
pub mod palette;
pub mod plan;
pub mod pointer;
pub mod progress;
pub mod quantize;

pub use calibrate::{CalibrationStore, ScreenPoint};
pub use cancel::CancelToken;
pub use director::{Director, DrawOutcome, Pacing, PIXEL_SCALE};
pub use error::EngineError;
pub use job::DrawJob;
pub use palette::{Rgb, CANVAS_PALETTE};
pub use plan::{DrawPlan, PlannedColor, Stroke};
pub use pointer::{Pointer, SystemPointer};
pub use progress::{Progress, ProgressReceiver, ProgressSender};
pub use quantize::QuantizedImage;
