//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine InputEvents.
//
// Architecture:
//   Winit key events      ─┐
//   Winit mouse / touch   ─┼→ InputProcessor → InputEvent → InputBuffer
//                          └─ GestureRecognizer (pointer → tap / swipe)
//
// Keys produce an event on press only; releases and auto-repeat are
// dropped. Mouse and touch share one pointer: the left button and a
// finger both drive the same gesture recognizer. Unmapped keys
// (F1-F24, numpad, media keys) are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use log::trace;
use winit::{
    event::{ElementState, KeyEvent, MouseButton, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{GestureRecognizer, InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents.
///
/// Tracks the last cursor position so button presses, which carry no
/// coordinates in Winit, can start and finish gestures.
#[derive(Debug, Default)]
pub(crate) struct InputProcessor {
    cursor: (f32, f32),
    gestures: GestureRecognizer,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Keyboard ---------------------------------------------------------

    /// Converts a Winit KeyEvent to a key press (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.process_key(key_event.physical_key, key_event.state, key_event.repeat)
    }

    fn process_key(&self, key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
        if state != ElementState::Pressed || repeat {
            return None;
        }

        let key_code = match key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if matches!(key_code, KeyCode::Unidentified) {
            return None;
        }

        Some(InputEvent::KeyPress(key_code))
    }

    //--- Pointer ----------------------------------------------------------

    /// Records cursor movement (feeds an active gesture).
    pub(crate) fn process_cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
        self.gestures.moved(self.cursor);
    }

    /// Starts or finishes a gesture on the left mouse button.
    pub(crate) fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        now: Instant,
    ) -> Option<InputEvent> {
        if button != MouseButton::Left {
            return None;
        }

        match state {
            ElementState::Pressed => {
                self.gestures.press(self.cursor, now);
                None
            }
            ElementState::Released => self.finish_gesture(self.cursor, now),
        }
    }

    /// Drives the gesture recognizer from a touch event.
    pub(crate) fn process_touch(
        &mut self,
        phase: TouchPhase,
        x: f32,
        y: f32,
        now: Instant,
    ) -> Option<InputEvent> {
        self.cursor = (x, y);

        match phase {
            TouchPhase::Started => {
                self.gestures.press(self.cursor, now);
                None
            }
            TouchPhase::Moved => {
                self.gestures.moved(self.cursor);
                None
            }
            TouchPhase::Ended => self.finish_gesture(self.cursor, now),
            TouchPhase::Cancelled => {
                self.gestures.cancel();
                None
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn finish_gesture(&mut self, position: (f32, f32), now: Instant) -> Option<InputEvent> {
        let event = self.gestures.release(position, now);
        if event.is_none() {
            trace!(target: "platform::input", "Pointer release matched no gesture");
        }
        event
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, arrows, and Space/Enter/Escape. Everything else
/// returns `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::SwipeDirection;
    use std::time::Duration;

    fn code(key: WinitKeyCode) -> PhysicalKey {
        PhysicalKey::Code(key)
    }

    #[test]
    fn key_press_produces_event() {
        let processor = InputProcessor::new();
        let event = processor.process_key(code(WinitKeyCode::KeyW), ElementState::Pressed, false);
        assert_eq!(event, Some(InputEvent::KeyPress(KeyCode::KeyW)));
    }

    #[test]
    fn key_release_and_repeat_are_dropped() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.process_key(code(WinitKeyCode::KeyW), ElementState::Released, false),
            None
        );
        assert_eq!(
            processor.process_key(code(WinitKeyCode::KeyW), ElementState::Pressed, true),
            None
        );
    }

    #[test]
    fn unmapped_key_is_filtered() {
        let processor = InputProcessor::new();
        let event = processor.process_key(code(WinitKeyCode::F13), ElementState::Pressed, false);
        assert_eq!(event, None);
    }

    #[test]
    fn keycode_conversion_alphabetic() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
    }

    #[test]
    fn keycode_conversion_special() {
        assert_eq!(KeyCode::from(WinitKeyCode::Space), KeyCode::Space);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowLeft), KeyCode::ArrowLeft);
        assert_eq!(KeyCode::from(WinitKeyCode::Tab), KeyCode::Unidentified);
    }

    #[test]
    fn mouse_click_in_place_is_tap() {
        let mut processor = InputProcessor::new();
        let start = Instant::now();

        processor.process_cursor_moved(100.0, 100.0);
        assert_eq!(
            processor.process_mouse_button(MouseButton::Left, ElementState::Pressed, start),
            None
        );
        let event = processor.process_mouse_button(
            MouseButton::Left,
            ElementState::Released,
            start + Duration::from_millis(80),
        );

        assert_eq!(event, Some(InputEvent::Tap));
    }

    #[test]
    fn mouse_drag_is_swipe() {
        let mut processor = InputProcessor::new();
        let start = Instant::now();

        processor.process_cursor_moved(100.0, 100.0);
        processor.process_mouse_button(MouseButton::Left, ElementState::Pressed, start);
        processor.process_cursor_moved(100.0, 40.0);
        let event = processor.process_mouse_button(
            MouseButton::Left,
            ElementState::Released,
            start + Duration::from_millis(100),
        );

        assert_eq!(event, Some(InputEvent::Swipe(SwipeDirection::Up)));
    }

    #[test]
    fn right_button_is_ignored() {
        let mut processor = InputProcessor::new();
        let start = Instant::now();

        processor.process_mouse_button(MouseButton::Right, ElementState::Pressed, start);
        let event = processor.process_mouse_button(MouseButton::Right, ElementState::Released, start);

        assert_eq!(event, None);
    }

    #[test]
    fn touch_swipe_right() {
        let mut processor = InputProcessor::new();
        let start = Instant::now();

        processor.process_touch(TouchPhase::Started, 10.0, 50.0, start);
        processor.process_touch(TouchPhase::Moved, 60.0, 55.0, start + Duration::from_millis(50));
        let event =
            processor.process_touch(TouchPhase::Ended, 90.0, 55.0, start + Duration::from_millis(100));

        assert_eq!(event, Some(InputEvent::Swipe(SwipeDirection::Right)));
    }

    #[test]
    fn cancelled_touch_produces_nothing() {
        let mut processor = InputProcessor::new();
        let start = Instant::now();

        processor.process_touch(TouchPhase::Started, 10.0, 10.0, start);
        processor.process_touch(TouchPhase::Cancelled, 10.0, 10.0, start);
        let event = processor.process_touch(TouchPhase::Ended, 10.0, 10.0, start);

        assert_eq!(event, None);
    }
}
