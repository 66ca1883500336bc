//! Draw plan execution
//!
//! The director reproduces a [`DrawPlan`] on the remote canvas: per color it
//! clicks the palette swatch, waits for the remote UI to register the
//! switch, then replays the color's strokes. All coordinates are absolute,
//! translated through the two calibration origins.
//!
//! Cancellation is polled before every discrete action - color switch,
//! point, run-step. A tripped token ends the job normally with
//! [`DrawOutcome::Cancelled`], leaving the plan partially executed; pixels
//! already drawn stay on the canvas.

use crate::calibrate::ScreenPoint;
use crate::cancel::CancelToken;
use crate::error::EngineError;
use crate::palette::{self, Rgb};
use crate::plan::{DrawPlan, Stroke};
use crate::pointer::Pointer;
use crate::progress::{self, Progress, ProgressSender};
use std::thread;
use std::time::Duration;

/// Physical units per logical canvas pixel
pub const PIXEL_SCALE: i32 = 6;

/// Offset from the palette origin to the smallest brush-size control
const BRUSH_OFFSET: (i32, i32) = (492, 24);

/// Delays between pointer actions, tuned to what the remote input handler
/// tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after each stroke
    pub stroke_delay: Duration,
    /// Pause after a color switch, letting the remote UI register it
    pub color_settle: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            stroke_delay: Duration::from_micros(500),
            color_settle: Duration::from_secs(1),
        }
    }
}

impl Pacing {
    /// No delays at all; for tests.
    pub fn none() -> Self {
        Self {
            stroke_delay: Duration::ZERO,
            color_settle: Duration::ZERO,
        }
    }
}

/// How a draw run ended. Cancellation is a normal termination, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    Completed,
    Cancelled,
}

/// Executes draw plans against a calibrated coordinate space.
pub struct Director<P> {
    pointer: P,
    canvas_origin: ScreenPoint,
    palette_origin: ScreenPoint,
    cancel: CancelToken,
    pacing: Pacing,
    progress: Option<ProgressSender>,
}

impl<P: Pointer> Director<P> {
    pub fn new(
        pointer: P,
        canvas_origin: ScreenPoint,
        palette_origin: ScreenPoint,
        cancel: CancelToken,
    ) -> Self {
        Self {
            pointer,
            canvas_origin,
            palette_origin,
            cancel,
            pacing: Pacing::default(),
            progress: None,
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_progress(mut self, sender: ProgressSender) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Execute a plan from start to finish.
    ///
    /// Returns [`DrawOutcome::Cancelled`] as soon as the token is observed
    /// set; fails with [`EngineError::UnknownColor`] if a plan color has no
    /// swatch, aborting without executing further strokes.
    pub fn draw(&mut self, plan: &DrawPlan) -> Result<DrawOutcome, EngineError> {
        if plan.is_empty() {
            tracing::info!("draw plan is empty, nothing to do");
            return Ok(DrawOutcome::Completed);
        }

        let total = plan.stroke_count();
        let mut done = 0usize;

        if self.cancel.is_cancelled() {
            return Ok(DrawOutcome::Cancelled);
        }
        self.select_brush()?;

        for group in &plan.groups {
            if self.cancel.is_cancelled() {
                return Ok(DrawOutcome::Cancelled);
            }
            self.select_color(group.color)?;

            for stroke in &group.strokes {
                if self.cancel.is_cancelled() {
                    return Ok(DrawOutcome::Cancelled);
                }

                match *stroke {
                    Stroke::Point { x, y } => {
                        self.pointer.move_to(self.canvas_point(x, y))?;
                        self.pointer.click()?;
                    }
                    Stroke::Run { y, x_start, x_end } => {
                        if self.drag_run(y, x_start, x_end)? == DrawOutcome::Cancelled {
                            return Ok(DrawOutcome::Cancelled);
                        }
                    }
                }

                done += 1;
                progress::emit(self.progress.as_ref(), Progress::Drawing { done, total });
                thread::sleep(self.pacing.stroke_delay);
            }
        }

        tracing::info!("draw plan complete: {} strokes, {} colors", total, plan.groups.len());
        Ok(DrawOutcome::Completed)
    }

    /// Click the smallest brush size so strokes stay pixel-sized.
    fn select_brush(&mut self) -> Result<(), EngineError> {
        let (dx, dy) = BRUSH_OFFSET;
        self.pointer.move_to(self.palette_origin.offset(dx, dy))?;
        self.pointer.click()
    }

    /// Click a color's swatch and wait for the remote UI to settle.
    fn select_color(&mut self, color: Rgb) -> Result<(), EngineError> {
        let (dx, dy) =
            palette::swatch_offset(color).ok_or(EngineError::UnknownColor(color))?;

        tracing::debug!("selecting color {}", color);
        progress::emit(self.progress.as_ref(), Progress::SelectingColor { color });

        self.pointer.move_to(self.palette_origin.offset(dx, dy))?;
        self.pointer.click()?;
        thread::sleep(self.pacing.color_settle);
        Ok(())
    }

    /// Draw a horizontal run as one press-drag-release.
    ///
    /// If cancellation trips between steps the button is released before
    /// aborting, so the device is never left pressed.
    fn drag_run(&mut self, y: u32, x_start: u32, x_end: u32) -> Result<DrawOutcome, EngineError> {
        self.pointer.move_to(self.canvas_point(x_start, y))?;
        self.pointer.press()?;

        for x in (x_start + 1)..=x_end {
            if self.cancel.is_cancelled() {
                self.pointer.release()?;
                return Ok(DrawOutcome::Cancelled);
            }
            self.pointer.move_to(self.canvas_point(x, y))?;
        }

        self.pointer.release()?;
        Ok(DrawOutcome::Completed)
    }

    /// Translate a logical pixel to its physical canvas position.
    fn canvas_point(&self, x: u32, y: u32) -> ScreenPoint {
        self.canvas_origin
            .offset(x as i32 * PIXEL_SCALE, y as i32 * PIXEL_SCALE)
    }
}
