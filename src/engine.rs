//=========================================================================
// Aetheric Snake Engine
//
// Main entry point: configuration builder and run loop launcher.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Platform]
//         │                          │
//         ├─ with_virtual_height()   └─ creates window + surface
//         ├─ with_snake_speed()         drives Application per frame
//         ├─ with_title_reveal()        blocks until window closes
//         ├─ with_seed()
//         ├─ with_window_title()
//         ├─ with_window_size()
//         └─ with_palette()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::config::{Config, Palette};
use crate::platform::{Platform, PlatformError};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Virtual height**: 20 cells
/// - **Snake speed**: 4.0 steps per second
/// - **Title reveal**: 2.0 seconds
/// - **Seed**: none (OS entropy)
/// - **Window**: "Snake", 800x600
///
/// # Examples
///
/// Simple usage with defaults:
/// ```no_run
/// use aetheric_snake::EngineBuilder;
///
/// EngineBuilder::new().build().run().unwrap();
/// ```
///
/// Advanced configuration:
/// ```no_run
/// # use aetheric_snake::EngineBuilder;
/// EngineBuilder::new()
///     .with_virtual_height(30)      // Taller arena
///     .with_snake_speed(8.0)        // Faster snake
///     .with_seed(7)                 // Reproducible fruit
///     .build()
///     .run()
///     .unwrap();
/// ```
pub struct EngineBuilder {
    config: Config,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the number of grid cells spanning the window height.
    ///
    /// Default: 20
    ///
    /// # Panics
    ///
    /// Panics if `cells == 0`.
    pub fn with_virtual_height(mut self, cells: u32) -> Self {
        assert!(cells > 0, "Virtual height must be positive");
        self.config.virtual_height = cells;
        self
    }

    /// Sets the simulation rate in steps per second.
    ///
    /// Default: 4.0
    ///
    /// # Panics
    ///
    /// Panics if `speed` is not a positive finite number.
    pub fn with_snake_speed(mut self, speed: f64) -> Self {
        assert!(
            speed.is_finite() && speed > 0.0,
            "Snake speed must be positive, got {}",
            speed
        );
        self.config.snake_speed = speed;
        self
    }

    /// Sets how long the title sprite takes to assemble.
    ///
    /// Default: 2.0
    ///
    /// # Panics
    ///
    /// Panics if `secs` is not a positive finite number.
    pub fn with_title_reveal(mut self, secs: f64) -> Self {
        assert!(
            secs.is_finite() && secs > 0.0,
            "Title reveal must be positive, got {}",
            secs
        );
        self.config.title_reveal_secs = secs;
        self
    }

    /// Fixes the RNG seed for fruit placement and the title shuffle.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.config.window_title = title.into();
        self
    }

    /// Sets the initial inner window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero");
        self.config.window_size = (width, height);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    /// Freezes the configuration and builds the engine.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (arena height: {}, speed: {}, seed: {:?})",
            self.config.virtual_height, self.config.snake_speed, self.config.seed
        );

        Engine {
            config: Arc::new(self.config),
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Configured game, ready to run.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   └─► Platform (Winit event loop)
///         ├─► Window + softbuffer surface
///         ├─► InputProcessor / GestureRecognizer → InputBuffer
///         └─► Application (tick per RedrawRequested)
///               └─► MainMenuScene ⇄ GameScene
/// ```
pub struct Engine {
    config: Arc<Config>,
}

impl Engine {
    pub fn config(&self) -> &Config {
        &self.config
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and runs the game until it is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running, or if the window or its surface cannot be set
    /// up.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime");

        let result = Platform::new(self.config).run();

        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
