//=========================================================================
// Input Buffer
//
// Collects engine input events between two frames.
//
// Responsibilities:
// - Store incoming events in arrival order, repeats included
// - Hand the whole batch to the driver via `drain()` at the frame boundary
//
// Notes:
// OS key auto-repeat is filtered before events reach the buffer, so two
// identical events here are two real presses or taps.
// The buffer keeps its allocation across frames; `drain()` empties it
// without shrinking.
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================

#[derive(Debug)]
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 32;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- Event Handling ---------------------------------------------------

    pub(crate) fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Yields every buffered event in arrival order and empties the buffer.
    //
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, InputEvent> {
        self.events.drain(..)
    }

    //--- Utilities --------------------------------------------------------

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
