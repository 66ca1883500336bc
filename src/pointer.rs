//! Simulated pointer device
//!
//! The pointer is a single global resource; the concurrency model
//! guarantees only one worker drives it at a time. The trait seam exists so
//! the director can be exercised against a recording device in tests.

use crate::calibrate::ScreenPoint;
use crate::error::EngineError;
use rdev::{simulate, Button, EventType};

/// A device that can move the system pointer and press its primary button.
pub trait Pointer: Send {
    /// Move the pointer to an absolute screen position.
    fn move_to(&mut self, point: ScreenPoint) -> Result<(), EngineError>;

    /// Press the primary button at the current position.
    fn press(&mut self) -> Result<(), EngineError>;

    /// Release the primary button at the current position.
    fn release(&mut self) -> Result<(), EngineError>;

    /// Press and release at the current position.
    fn click(&mut self) -> Result<(), EngineError> {
        self.press()?;
        self.release()
    }
}

impl<P: Pointer + ?Sized> Pointer for Box<P> {
    fn move_to(&mut self, point: ScreenPoint) -> Result<(), EngineError> {
        (**self).move_to(point)
    }

    fn press(&mut self) -> Result<(), EngineError> {
        (**self).press()
    }

    fn release(&mut self) -> Result<(), EngineError> {
        (**self).release()
    }

    fn click(&mut self) -> Result<(), EngineError> {
        (**self).click()
    }
}

/// The real OS pointer, driven through `rdev` synthetic events.
#[derive(Debug, Default)]
pub struct SystemPointer;

impl SystemPointer {
    pub fn new() -> Self {
        Self
    }

    fn send(event: &EventType) -> Result<(), EngineError> {
        // SimulateError carries no detail; name the event that failed
        simulate(event)
            .map_err(|_| EngineError::Pointer(format!("could not simulate {:?}", event)))
    }
}

impl Pointer for SystemPointer {
    fn move_to(&mut self, point: ScreenPoint) -> Result<(), EngineError> {
        Self::send(&EventType::MouseMove {
            x: point.x as f64,
            y: point.y as f64,
        })
    }

    fn press(&mut self) -> Result<(), EngineError> {
        Self::send(&EventType::ButtonPress(Button::Left))
    }

    fn release(&mut self) -> Result<(), EngineError> {
        Self::send(&EventType::ButtonRelease(Button::Left))
    }
}
