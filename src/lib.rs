//=========================================================================
// Aetheric Snake: Library Root
//
// A walled-arena Snake game on top of a small single-scene frame loop.
//
// Responsibilities:
// - Expose the game entry point (`Engine`, `EngineBuilder`)
// - Expose the frame loop, scene and rendering building blocks
// - Keep the OS integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use aetheric_snake::EngineBuilder;
//
// fn main() -> Result<(), aetheric_snake::PlatformError> {
//     EngineBuilder::new().with_snake_speed(6.0).build().run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the frame loop driver, scenes, timing and input types.
// `game` and `menu` are the two scenes of the game. `render` defines the
// drawing surface scenes issue their draw calls against.
//
pub mod core;
pub mod game;
pub mod menu;
pub mod prelude;
pub mod render;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit window, the softbuffer surface and the
// translation of OS input into engine events.
//
// `engine` defines the configuration builder and the run entry point.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
pub use platform::PlatformError;
