//=========================================================================
// Application
//=========================================================================
//
// The scene loop driver.
//
// Owns canonical time, the viewport and the active scene. The host calls
// `tick()` once per display frame and forwards input through
// `handle_input()`.
//
// Per tick:
// ```text
//   1. install the most recent scene request (if any)
//   2. sample the frame clock          → TimeSample { elapsed, delta }
//   3. clear the surface
//   4. translate + scale to the arena  → scene draws in cell units
//   5. Scene::on_render(frame)
//   6. restore the transform
// ```
//
// Scene changes never happen mid-frame: a request made while rendering
// or handling input waits in the channel until the next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::config::Config;
use crate::core::input::InputEvent;
use crate::core::scene::{scene_channel, Frame, Scene, SceneContext, SceneRequests, SceneSwitcher};
use crate::core::time::FrameClock;
use crate::core::viewport::Viewport;
use crate::render::Canvas;

//=== Application =========================================================

pub struct Application {
    config: Arc<Config>,
    clock: FrameClock,
    viewport: Viewport,

    /// Active scene, `None` until the first request is installed.
    current: Option<Box<dyn Scene>>,

    requests: SceneRequests,
    switcher: SceneSwitcher,
}

impl Application {
    //--- Construction -----------------------------------------------------

    /// Creates a driver with no active scene.
    ///
    /// `now` marks the loop start; elapsed time is measured from here.
    pub fn new(config: Arc<Config>, window_size: (u32, u32), now: Instant) -> Self {
        let viewport = Viewport::from_window(window_size.0, window_size.1, config.virtual_height);
        let (switcher, requests) = scene_channel();

        debug!(
            "Application created: arena {}x{} cells @ {}px",
            viewport.width, viewport.height, viewport.scale_factor
        );

        Self {
            config,
            clock: FrameClock::new(now),
            viewport,
            current: None,
            requests,
            switcher,
        }
    }

    //--- Scene Management -------------------------------------------------

    /// Dependencies for building a scene against the current viewport.
    pub fn scene_context(&self) -> SceneContext {
        SceneContext {
            config: Arc::clone(&self.config),
            viewport: self.viewport,
            switcher: self.switcher.clone(),
        }
    }

    /// Records `scene` as the next scene. Takes effect at the next tick.
    pub fn request_scene_change(&self, scene: Box<dyn Scene>) {
        self.switcher.request_boxed(scene);
    }

    fn install_requested_scene(&mut self) {
        let Some(next) = self.requests.take_latest() else {
            return;
        };

        match &self.current {
            Some(previous) => info!("Switching scene: {} -> {}", previous.name(), next.name()),
            None => info!("Starting scene: {}", next.name()),
        }
        self.current = Some(next);
    }

    pub fn has_scene(&self) -> bool {
        self.current.is_some()
    }

    pub fn scene_name(&self) -> Option<&'static str> {
        self.current.as_ref().map(|scene| scene.name())
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one frame: installs a pending scene, samples time and renders.
    pub fn tick(&mut self, now: Instant, canvas: &mut dyn Canvas) {
        self.install_requested_scene();

        let time = self.clock.sample(now);
        trace!("Tick: elapsed {:.3}s, delta {:.4}s", time.elapsed, time.delta);

        canvas.clear(self.config.palette.background);

        let Some(scene) = self.current.as_mut() else {
            return;
        };

        let scale = self.viewport.scale_factor as f32;
        canvas.save();
        canvas.translate(self.viewport.offset_x, self.viewport.offset_y);
        canvas.scale(scale, scale);

        let mut frame = Frame {
            time,
            viewport: &self.viewport,
            config: &self.config,
            canvas: &mut *canvas,
        };
        scene.on_render(&mut frame);

        canvas.restore();
    }

    //--- Input ------------------------------------------------------------

    /// Forwards `event` to the active scene. Dropped when there is none.
    pub fn handle_input(&mut self, event: InputEvent) {
        let Some(scene) = self.current.as_mut() else {
            trace!("No active scene, dropping {:?}", event);
            return;
        };

        match event {
            InputEvent::KeyPress(key) => scene.on_key_press(key),
            InputEvent::Swipe(direction) => scene.on_swipe(direction),
            InputEvent::Tap => scene.on_tap(),
        }
    }

    //--- Viewport ---------------------------------------------------------

    /// Recomputes the viewport for a window of `width` x `height` pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::from_window(width, height, self.config.virtual_height);

        debug!(
            "Resized to {}x{}: arena {}x{} cells @ {}px",
            width, height, self.viewport.width, self.viewport.height, self.viewport.scale_factor
        );

        if let Some(scene) = self.current.as_mut() {
            scene.on_resize(&self.viewport);
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
