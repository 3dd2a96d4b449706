//=========================================================================
// Prelude
//
// Convenience re-exports for writing scenes.
//
// ```
// use aetheric_snake::prelude::*;
// ```
//
//=========================================================================

pub use crate::core::input::{InputEvent, KeyCode, SwipeDirection};
pub use crate::core::scene::{
    Frame, Invocation, RenderPipeline, Scene, SceneContext, SceneSwitcher,
};
pub use crate::core::{Config, Palette, TimeSample, Viewport};
pub use crate::render::{Canvas, Color};
pub use crate::{Engine, EngineBuilder};
