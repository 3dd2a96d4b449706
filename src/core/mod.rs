//=========================================================================
// Core Systems
//
// Platform-independent building blocks of the game loop.
//
// Responsibilities:
// - Drive the active scene once per frame (`Application`)
// - Provide canonical frame timing and the arena viewport
// - Define the input events scenes react to
// - Hold the immutable game configuration
//
// Notes:
// Nothing in here touches Winit or the framebuffer. The platform layer
// owns those and talks to the core through `Application::tick()`,
// `Application::handle_input()` and `Application::resize()`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod application;
pub mod config;
pub mod input;
pub mod scene;
pub mod time;
pub mod viewport;

//=== Public API ==========================================================

pub use application::Application;
pub use config::{Config, Palette};
pub use time::{FrameClock, TimeSample};
pub use viewport::Viewport;
