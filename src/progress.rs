//! Coarse progress notifications for the external UI layer
//!
//! Advisory only: events describe what the engine is doing, not a
//! correctness contract. A closed receiver never stalls a worker.

use crate::palette::Rgb;
use tokio::sync::mpsc;

pub type ProgressSender = mpsc::UnboundedSender<Progress>;
pub type ProgressReceiver = mpsc::UnboundedReceiver<Progress>;

/// A progress event emitted by an acquisition or drawing worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Thumbnail `done` of `total` has been fetched (or skipped).
    Downloading { done: usize, total: usize },
    /// The director is switching to a palette color.
    SelectingColor { color: Rgb },
    /// `done` of `total` strokes have been executed.
    Drawing { done: usize, total: usize },
}

/// Create a progress channel pair.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}

/// Send an event if a sender is attached, ignoring a hung-up receiver.
pub(crate) fn emit(sender: Option<&ProgressSender>, event: Progress) {
    if let Some(tx) = sender {
        let _ = tx.send(event);
    }
}
