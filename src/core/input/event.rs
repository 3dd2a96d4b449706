//=========================================================================
// Input Event Types
//
// Defines the engine-side representation of player input.
//
// This module abstracts away platform-specific input (e.g. Winit key
// codes, raw pointer coordinates) into the three event kinds scenes
// actually react to: a key press, a directional swipe and a tap.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputProcessor / GestureRecognizer
//         ↓
//    InputEvent (this module)
//         ↓
//    Application → active Scene
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyW` is the same key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,

    /// Fallback for keys the platform layer does not map.
    Unidentified,
}

//=== SwipeDirection ======================================================

/// Direction of a recognised swipe gesture, in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

//=== InputEvent ==========================================================

/// A discrete player input routed to the active scene.
///
/// Events are compared by kind and payload, so two taps are equal and a
/// key press of `KeyA` differs from one of `KeyD`. The platform input
/// buffer relies on this to drop consecutive duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed. The platform layer filters auto-repeat.
    KeyPress(KeyCode),

    /// Pointer or finger swept in one of four directions.
    Swipe(SwipeDirection),

    /// Short press and release without significant movement.
    Tap,
}

//=========================================================================
// Unit Tests
//=========================================================================
