//=========================================================================
// Gesture Recognizer
//=========================================================================
//
// Turns a pointer press → move → release sequence into a tap or a
// four-way swipe.
//
// Thresholds:
//   Tap:   released within 250 ms, moved at most 9 px
//   Swipe: moved at least 10 px, at an average of at least 0.3 px/ms,
//          classified by the dominant axis
//
// Anything else (a slow drag, a long press) produces no event.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, SwipeDirection};

//=== Thresholds ==========================================================

const TAP_MAX_DURATION: Duration = Duration::from_millis(250);
const TAP_MAX_DISTANCE: f32 = 9.0;
const SWIPE_MIN_DISTANCE: f32 = 10.0;
const SWIPE_MIN_VELOCITY: f32 = 0.3; // px per ms

//=== GestureRecognizer ===================================================

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: (f32, f32),
    last: (f32, f32),
    started: Instant,
}

/// Tracks one pointer at a time. A second press while one is active
/// restarts tracking from the new position.
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    press: Option<Press>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a press at `position`.
    pub fn press(&mut self, position: (f32, f32), now: Instant) {
        self.press = Some(Press {
            origin: position,
            last: position,
            started: now,
        });
    }

    /// Records pointer movement. Ignored when nothing is pressed.
    pub fn moved(&mut self, position: (f32, f32)) {
        if let Some(press) = &mut self.press {
            press.last = position;
        }
    }

    /// Drops the active press without producing an event.
    pub fn cancel(&mut self) {
        self.press = None;
    }

    /// Finishes the active press and classifies it.
    pub fn release(&mut self, position: (f32, f32), now: Instant) -> Option<InputEvent> {
        let mut press = self.press.take()?;
        press.last = position;

        let dx = press.last.0 - press.origin.0;
        let dy = press.last.1 - press.origin.1;
        let distance = (dx * dx + dy * dy).sqrt();
        let duration = now.saturating_duration_since(press.started);

        if distance <= TAP_MAX_DISTANCE && duration <= TAP_MAX_DURATION {
            return Some(InputEvent::Tap);
        }

        let millis = (duration.as_secs_f32() * 1000.0).max(1.0);
        if distance >= SWIPE_MIN_DISTANCE && distance / millis >= SWIPE_MIN_VELOCITY {
            let direction = if dx.abs() >= dy.abs() {
                if dx < 0.0 { SwipeDirection::Left } else { SwipeDirection::Right }
            } else if dy < 0.0 {
                SwipeDirection::Up
            } else {
                SwipeDirection::Down
            };
            return Some(InputEvent::Swipe(direction));
        }

        None
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
