//! Drawing job lifecycle
//!
//! A job is the explicit single-owner context for one drawing run: the
//! quantized image, its stroke plan, and a snapshot of the calibration
//! points, frozen at preparation time. Preconditions are checked before any
//! worker exists; execution happens on a blocking task whose join handle
//! doubles as the completion notification.
//!
//! At most one drawing job should be active at a time. The caller (the
//! external UI, which disables its initiation controls while a worker runs)
//! serializes initiation; a prepared job consumes itself on spawn so it
//! cannot be executed twice.

use crate::calibrate::{CalibrationStore, ScreenPoint};
use crate::cancel::CancelToken;
use crate::director::{Director, DrawOutcome, Pacing};
use crate::error::EngineError;
use crate::plan::{self, DrawPlan};
use crate::pointer::Pointer;
use crate::progress::ProgressSender;
use crate::quantize::{self, QuantizedImage};
use image::DynamicImage;
use tokio::task::JoinHandle;

/// A prepared drawing job.
pub struct DrawJob {
    quantized: QuantizedImage,
    plan: DrawPlan,
    canvas_origin: ScreenPoint,
    palette_origin: ScreenPoint,
}

impl DrawJob {
    /// Quantize the selected image and plan its strokes.
    ///
    /// Rejects synchronously, before any worker is spawned, if calibration
    /// is incomplete or no image was selected.
    pub fn prepare(
        calibration: &CalibrationStore,
        image: Option<&DynamicImage>,
    ) -> Result<DrawJob, EngineError> {
        let (canvas_origin, palette_origin) =
            match (calibration.canvas_origin(), calibration.palette_origin()) {
                (Some(canvas), Some(palette)) => (canvas, palette),
                _ => return Err(EngineError::CalibrationIncomplete),
            };

        let image = image.ok_or(EngineError::NoImage)?;

        let quantized = quantize::quantize(image);
        let plan = plan::plan(&quantized);

        tracing::info!(
            "prepared draw job: {}x{} pixels, {} colors, {} strokes",
            quantized.width(),
            quantized.height(),
            plan.groups.len(),
            plan.stroke_count()
        );

        Ok(DrawJob {
            quantized,
            plan,
            canvas_origin,
            palette_origin,
        })
    }

    /// The quantized image, e.g. for a UI preview before drawing starts.
    pub fn quantized(&self) -> &QuantizedImage {
        &self.quantized
    }

    pub fn plan(&self) -> &DrawPlan {
        &self.plan
    }

    /// Run the job on a blocking worker task.
    ///
    /// The returned handle resolves to the job's outcome; cancellation
    /// resolves to `Ok(DrawOutcome::Cancelled)`, never an error. Nothing
    /// else crosses the worker boundary.
    pub fn spawn(
        self,
        pointer: Box<dyn Pointer>,
        cancel: CancelToken,
        progress: Option<ProgressSender>,
        pacing: Pacing,
    ) -> JoinHandle<Result<DrawOutcome, EngineError>> {
        tokio::task::spawn_blocking(move || {
            let mut director =
                Director::new(pointer, self.canvas_origin, self.palette_origin, cancel)
                    .with_pacing(pacing);
            if let Some(tx) = progress {
                director = director.with_progress(tx);
            }

            let outcome = director.draw(&self.plan);
            match &outcome {
                Ok(DrawOutcome::Completed) => tracing::info!("drawing job finished"),
                Ok(DrawOutcome::Cancelled) => tracing::info!("drawing job cancelled"),
                Err(e) => tracing::error!("drawing job aborted: {}", e),
            }
            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn calibrated() -> CalibrationStore {
        let mut store = CalibrationStore::new();
        store.set_canvas_origin(ScreenPoint::new(0, 0));
        store.set_palette_origin(ScreenPoint::new(0, 500));
        store
    }

    fn red_dot() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, image::Rgb([239, 19, 11])))
    }

    #[test]
    fn test_prepare_rejects_missing_calibration() {
        let store = CalibrationStore::new();
        let image = red_dot();
        assert!(matches!(
            DrawJob::prepare(&store, Some(&image)),
            Err(EngineError::CalibrationIncomplete)
        ));
    }

    #[test]
    fn test_prepare_rejects_partial_calibration() {
        let mut store = CalibrationStore::new();
        store.set_canvas_origin(ScreenPoint::new(0, 0));
        let image = red_dot();
        assert!(matches!(
            DrawJob::prepare(&store, Some(&image)),
            Err(EngineError::CalibrationIncomplete)
        ));
    }

    #[test]
    fn test_prepare_rejects_missing_image() {
        assert!(matches!(
            DrawJob::prepare(&calibrated(), None),
            Err(EngineError::NoImage)
        ));
    }

    #[test]
    fn test_prepare_plans_the_image() {
        let image = red_dot();
        let job = DrawJob::prepare(&calibrated(), Some(&image)).unwrap();
        assert_eq!(job.quantized().width(), 1);
        assert_eq!(job.plan().stroke_count(), 1);
    }
}
