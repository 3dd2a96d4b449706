//=========================================================================
// Input
//=========================================================================
//
// Engine-level input vocabulary and gesture recognition.
//
// The platform layer converts OS events into `InputEvent`s; the driver
// routes them to the active scene unmodified.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod gesture;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, SwipeDirection};
pub use gesture::GestureRecognizer;
