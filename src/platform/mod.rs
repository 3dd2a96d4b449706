//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) and softbuffer (pixel presentation)
// with the engine's frame loop driver.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌───────────────────────────────────────────────────┐
//  │  Winit Event Loop                                 │
//  │   ↓                                               │
//  │  InputProcessor                                   │
//  │   ├─ Converts Winit keys → KeyPress               │
//  │   └─ Mouse / touch → GestureRecognizer → Tap/Swipe│
//  │   ↓                                               │
//  │  InputBuffer                                      │
//  │   ↓                                               │
//  │  RedrawRequested                                  │
//  │   ├─ flush buffer → Application::handle_input()   │
//  │   ├─ Application::tick() → Rasterizer             │
//  │   └─ copy pixels → softbuffer → present           │
//  └───────────────────────────────────────────────────┘
//
//  Frame Boundary: RedrawRequested
//    → All buffered input delivered before the frame renders
//    → Next frame requested immediately (runs at display rate)
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: input that arrived since the
//   last frame is applied in arrival order, then the scene renders
// - **Frame errors are not fatal**: a failed surface resize or present
//   is logged and the frame skipped
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use log::*;
use softbuffer::{Context, SoftBufferError, Surface};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    error::{EventLoopError, OsError},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::config::Config;
use crate::core::Application;
use crate::menu::MainMenuScene;
use crate::render::{Canvas, Rasterizer};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: if the event loop, the window or its surface can't
/// be created, the game cannot run.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),

    #[error("Window creation failed: {0}")]
    WindowCreation(#[from] OsError),

    /// The softbuffer context or surface could not be created.
    #[error("Surface setup failed: {0}")]
    Surface(#[from] SoftBufferError),
}

//=== Graphics ============================================================

/// Window plus the surface presenting into it.
struct Graphics {
    window: Rc<Window>,
    surface: Surface<Rc<Window>, Rc<Window>>,
}

impl Graphics {
    fn new(window: Window) -> Result<Self, PlatformError> {
        let window = Rc::new(window);
        let context = Context::new(Rc::clone(&window))?;
        let surface = Surface::new(&context, Rc::clone(&window))?;
        Ok(Self { window, surface })
    }

    /// Resizes the surface. Zero-sized (minimised) windows are skipped.
    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), SoftBufferError> {
        match (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            (Some(width), Some(height)) => self.surface.resize(width, height),
            _ => Ok(()),
        }
    }

    /// Copies `pixels` into the surface and presents it.
    fn present(&mut self, pixels: &[u32]) -> Result<(), SoftBufferError> {
        let mut buffer = self.surface.buffer_mut()?;
        if buffer.len() != pixels.len() {
            // Surface and rasterizer disagree until the pending resize lands
            trace!(
                target: "platform",
                "Skipping present: surface {} px, frame {} px",
                buffer.len(),
                pixels.len()
            );
            return Ok(());
        }
        buffer.copy_from_slice(pixels);
        buffer.present()
    }
}

//=== Platform ============================================================

/// Window manager, input aggregator and frame pump.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(config)` - creates the driver and
///    queues the title screen
/// 2. **Execution**: `platform.run()` - starts the event loop
/// 3. **Event processing**: Winit calls `ApplicationHandler` methods
/// 4. **Shutdown**: user closes window → event loop exits → `run()` returns
///
/// # Thread Safety
///
/// This type is NOT Send/Sync - it must remain on the main thread.
pub(crate) struct Platform {
    config: Arc<Config>,

    /// Window and surface (None until `resumed()` called).
    graphics: Option<Graphics>,

    /// CPU framebuffer the scenes draw into.
    rasterizer: Rasterizer,

    /// Scene loop driver.
    application: Application,

    /// Buffers input events until frame boundary.
    buffer: InputBuffer,

    /// Converts Winit events to engine InputEvents.
    input_processor: InputProcessor,

    /// Fatal error raised inside the event loop, returned by `run()`.
    error: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates the platform and queues the title screen.
    ///
    /// Does not create the window yet - that happens lazily in `resumed()`.
    pub fn new(config: Arc<Config>) -> Self {
        let (width, height) = config.window_size;
        let application = Application::new(Arc::clone(&config), (width, height), Instant::now());
        application.request_scene_change(Box::new(MainMenuScene::new(application.scene_context())));

        info!(target: "platform", "Platform subsystem initialized");

        Self {
            config,
            graphics: None,
            rasterizer: Rasterizer::new(width, height),
            application,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            error: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop can't be created or
    /// fails, or if window/surface setup failed inside the loop.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS Winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Delivers buffered input events to the driver in arrival order.
    fn flush_input_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        trace!(target: "platform::input", "Flushing {} events", self.buffer.len());

        for event in self.buffer.drain() {
            self.application.handle_input(event);
        }
    }

    /// Applies a new window size to the surface, framebuffer and driver.
    fn apply_size(&mut self, size: PhysicalSize<u32>) {
        if let Some(graphics) = &mut self.graphics {
            if let Err(e) = graphics.resize(size) {
                warn!(target: "platform", "Surface resize failed: {}", e);
            }
        }

        self.rasterizer.resize(size.width, size.height);
        self.application.resize(size.width, size.height);
    }

    /// Runs one frame: input, tick, present, schedule the next frame.
    fn redraw(&mut self) {
        // Frame boundary: apply everything that arrived since last frame
        self.flush_input_buffer();

        self.application.tick(Instant::now(), &mut self.rasterizer);

        let Some(graphics) = &mut self.graphics else {
            return;
        };

        let (width, height) = self.rasterizer.size();
        if width > 0 && height > 0 {
            if let Err(e) = graphics.present(self.rasterizer.pixels()) {
                warn!(target: "platform", "Present failed, frame dropped: {}", e);
            }
        }

        graphics.window.request_redraw();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlatformError) {
        error!(target: "platform", "{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn has_window(&self) -> bool {
        self.graphics.is_some()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window and its surface if they don't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.config.window_size;
        let attrs = WindowAttributes::default()
            .with_title(self.config.window_title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let size = window.inner_size();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        match Graphics::new(window) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
                self.apply_size(size);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                debug!(target: "platform", "Window resized to {}x{}", size.width, size.height);
                self.apply_size(size);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(&key_event) {
                    Some(event) => self.buffer.push(event),
                    None => trace!(target: "platform::input", "Key event ignored"),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input_processor
                    .process_cursor_moved(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(event) =
                    self.input_processor
                        .process_mouse_button(button, state, Instant::now())
                {
                    debug!(target: "platform::input", "Gesture: {:?}", event);
                    self.buffer.push(event);
                }
            }

            WindowEvent::Touch(touch) => {
                if let Some(event) = self.input_processor.process_touch(
                    touch.phase,
                    touch.location.x as f32,
                    touch.location.y as f32,
                    Instant::now(),
                ) {
                    debug!(target: "platform::input", "Gesture: {:?}", event);
                    self.buffer.push(event);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {
                // Ignore: Focused, Moved, etc.
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
