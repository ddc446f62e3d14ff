//! Window event translation into pointer events
//!
//! winit reports button presses without a position, so [`PointerListeners`]
//! remembers the last cursor position and attaches it to presses.

use log::{debug, trace};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

/// Pixel scroll deltas are converted to lines at this rate
const PIXELS_PER_LINE: f32 = 100.0;

/// Pointer input in window-space physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    /// Positive values scroll away from the user
    Wheel { lines: f32 },
    Modifiers { shift: bool },
}

/// Subscription to the pointer events of the mounted window
#[derive(Debug, Default)]
pub struct PointerListeners {
    subscribed: bool,
    cursor: Option<(f32, f32)>,
}

impl PointerListeners {
    pub fn subscribe() -> Self {
        debug!("Pointer listeners subscribed");
        Self {
            subscribed: true,
            cursor: None,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Stops translating events; later calls are no-ops
    pub fn unsubscribe(&mut self) {
        if self.subscribed {
            debug!("Pointer listeners unsubscribed");
        }
        self.subscribed = false;
        self.cursor = None;
    }

    /// Last known cursor position inside the window
    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        if !self.subscribed {
            return None;
        }

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.cursor = Some((x, y));
                Some(PointerEvent::Move { x, y })
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => match self.cursor {
                    Some((x, y)) => Some(PointerEvent::Down { x, y }),
                    None => {
                        trace!("Ignoring press with unknown cursor position");
                        None
                    }
                },
                ElementState::Released => Some(PointerEvent::Up),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 / PIXELS_PER_LINE
                    }
                };
                Some(PointerEvent::Wheel { lines })
            }
            WindowEvent::ModifiersChanged(modifiers) => Some(PointerEvent::Modifiers {
                shift: modifiers.state().shift_key(),
            }),
            _ => None,
        }
    }
}
