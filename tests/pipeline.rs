//! End-to-end pipeline tests: quantize -> plan -> execute against a
//! recording pointer device.

use autosketch::{
    CalibrationStore, CancelToken, DrawJob, DrawOutcome, EngineError, Pacing, Pointer, Progress,
    Rgb, ScreenPoint,
};
use image::{DynamicImage, RgbImage};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    MoveTo(ScreenPoint),
    Press,
    Release,
}

/// Shared-log pointer; optionally asserts a cancel token after a fixed
/// number of recorded actions.
#[derive(Clone)]
struct RecordingPointer {
    log: Arc<Mutex<Vec<Action>>>,
    cancel_after: Option<(usize, CancelToken)>,
}

impl RecordingPointer {
    fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            cancel_after: None,
        }
    }

    fn cancelling_after(count: usize, token: CancelToken) -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            cancel_after: Some((count, token)),
        }
    }

    fn record(&mut self, action: Action) {
        let mut log = self.log.lock().unwrap();
        log.push(action);
        if let Some((count, token)) = &self.cancel_after {
            if log.len() >= *count {
                token.cancel();
            }
        }
    }

    fn actions(&self) -> Vec<Action> {
        self.log.lock().unwrap().clone()
    }
}

impl Pointer for RecordingPointer {
    fn move_to(&mut self, point: ScreenPoint) -> Result<(), EngineError> {
        self.record(Action::MoveTo(point));
        Ok(())
    }

    fn press(&mut self) -> Result<(), EngineError> {
        self.record(Action::Press);
        Ok(())
    }

    fn release(&mut self) -> Result<(), EngineError> {
        self.record(Action::Release);
        Ok(())
    }
}

const CANVAS: ScreenPoint = ScreenPoint::new(1000, 400);
const PALETTE: ScreenPoint = ScreenPoint::new(30, 700);

fn calibrated() -> CalibrationStore {
    let mut store = CalibrationStore::new();
    store.set_canvas_origin(CANVAS);
    store.set_palette_origin(PALETTE);
    store
}

/// A red run of three pixels followed by one green pixel.
fn bar_and_dot() -> DynamicImage {
    let mut img = RgbImage::new(4, 1);
    img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
    img.put_pixel(1, 0, image::Rgb([255, 0, 0]));
    img.put_pixel(2, 0, image::Rgb([255, 0, 0]));
    img.put_pixel(3, 0, image::Rgb([0, 204, 0]));
    DynamicImage::ImageRgb8(img)
}

#[tokio::test]
async fn full_pipeline_replays_the_image() {
    let image = bar_and_dot();
    let job = DrawJob::prepare(&calibrated(), Some(&image)).unwrap();

    let pointer = RecordingPointer::new();
    let (tx, mut rx) = autosketch::progress::channel();
    let handle = job.spawn(
        Box::new(pointer.clone()),
        CancelToken::new(),
        Some(tx),
        Pacing::none(),
    );

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome, DrawOutcome::Completed);

    assert_eq!(
        pointer.actions(),
        vec![
            // smallest brush
            Action::MoveTo(ScreenPoint::new(30 + 492, 700 + 24)),
            Action::Press,
            Action::Release,
            // red swatch (column 2, row 0)
            Action::MoveTo(ScreenPoint::new(30 + 2 * 24 + 12, 700 + 12)),
            Action::Press,
            Action::Release,
            // the red run: press, two steps right, release
            Action::MoveTo(ScreenPoint::new(1000, 400)),
            Action::Press,
            Action::MoveTo(ScreenPoint::new(1006, 400)),
            Action::MoveTo(ScreenPoint::new(1012, 400)),
            Action::Release,
            // green swatch (column 5, row 0)
            Action::MoveTo(ScreenPoint::new(30 + 5 * 24 + 12, 700 + 12)),
            Action::Press,
            Action::Release,
            // the green pixel
            Action::MoveTo(ScreenPoint::new(1018, 400)),
            Action::Press,
            Action::Release,
        ]
    );

    // progress told the story in order
    let red = Rgb::new(239, 19, 11);
    let green = Rgb::new(0, 204, 0);
    assert_eq!(rx.recv().await, Some(Progress::SelectingColor { color: red }));
    assert_eq!(rx.recv().await, Some(Progress::Drawing { done: 1, total: 2 }));
    assert_eq!(
        rx.recv().await,
        Some(Progress::SelectingColor { color: green })
    );
    assert_eq!(rx.recv().await, Some(Progress::Drawing { done: 2, total: 2 }));
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn cancellation_mid_run_ends_normally() {
    let image = bar_and_dot();
    let job = DrawJob::prepare(&calibrated(), Some(&image)).unwrap();

    let token = CancelToken::new();
    // brush (3) + swatch (3) + run start move + press = 8: trip on the press
    let pointer = RecordingPointer::cancelling_after(8, token.clone());
    let handle = job.spawn(Box::new(pointer.clone()), token, None, Pacing::none());

    let outcome = handle.await.unwrap().unwrap();
    assert_eq!(outcome, DrawOutcome::Cancelled);

    // the button was released and nothing ran afterwards
    let actions = pointer.actions();
    assert_eq!(actions.last(), Some(&Action::Release));
    assert_eq!(actions.len(), 9);
}

#[tokio::test]
async fn all_background_image_completes_without_touching_the_pointer() {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(
        8,
        8,
        image::Rgb([255, 255, 255]),
    ));
    let job = DrawJob::prepare(&calibrated(), Some(&image)).unwrap();
    assert!(job.plan().is_empty());

    let pointer = RecordingPointer::new();
    let handle = job.spawn(
        Box::new(pointer.clone()),
        CancelToken::new(),
        None,
        Pacing::none(),
    );

    assert_eq!(handle.await.unwrap().unwrap(), DrawOutcome::Completed);
    assert!(pointer.actions().is_empty());
}
