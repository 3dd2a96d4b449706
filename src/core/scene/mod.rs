//=========================================================================
// Scene System
//=========================================================================
//
// One mode of the application (title screen, gameplay) at a time.
//
// Architecture:
//   Application
//     ├─ current: Box<dyn Scene>
//     └─ requests: SceneRequests  <── SceneSwitcher (held by scenes)
//
// Flow:
//   tick() → install requested scene → Scene::on_render(frame)
//                                        └─ RenderPipeline::dispatch()
//
// Scene changes requested during a frame are applied at the start of the
// next tick, never while a scene is rendering.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

//=== Internal Dependencies ===============================================

use crate::core::config::Config;
use crate::core::input::{KeyCode, SwipeDirection};
use crate::core::time::TimeSample;
use crate::core::viewport::Viewport;
use crate::render::Canvas;

//=== Module Declarations =================================================

mod pipeline;
mod switcher;

//=== Public API ==========================================================

pub use pipeline::{Invocation, RenderPipeline};
pub use switcher::{scene_channel, SceneRequests, SceneSwitcher};

//=== Frame ===============================================================

/// Everything a scene needs to draw one frame.
///
/// The canvas already carries the viewport transform, so scenes draw in
/// arena cell units.
pub struct Frame<'a> {
    pub time: TimeSample,
    pub viewport: &'a Viewport,
    pub config: &'a Config,
    pub canvas: &'a mut dyn Canvas,
}

//=== SceneContext ========================================================

/// Construction-time dependencies for scenes.
///
/// Cheap to clone; scenes keep one so they can build their successor.
#[derive(Debug, Clone)]
pub struct SceneContext {
    pub config: Arc<Config>,

    /// Viewport at the time the context was taken.
    pub viewport: Viewport,

    pub switcher: SceneSwitcher,
}

//=== Scene Trait =========================================================

/// Defines scene behavior: rendering plus optional input handlers.
///
/// Only `on_render()` is required. Input handlers default to ignoring
/// the event.
///
/// ```rust
/// # use aetheric_snake::prelude::*;
/// struct Blank;
///
/// impl Scene for Blank {
///     fn name(&self) -> &'static str {
///         "blank"
///     }
///
///     fn on_render(&mut self, _frame: &mut Frame<'_>) {}
/// }
/// ```
pub trait Scene: Send {
    /// Short identifier used in log output.
    fn name(&self) -> &'static str;

    /// Called once per frame while the scene is active.
    fn on_render(&mut self, frame: &mut Frame<'_>);

    fn on_key_press(&mut self, _key: KeyCode) {}

    fn on_swipe(&mut self, _direction: SwipeDirection) {}

    fn on_tap(&mut self) {}

    /// Called after the driver recomputes the viewport.
    fn on_resize(&mut self, _viewport: &Viewport) {}
}
