//=========================================================================
// Configuration
//=========================================================================
//
// Immutable game configuration shared by the driver and every scene.
//
// Built once by `EngineBuilder::build()` and handed out as `Arc<Config>`.
// Nothing mutates it after construction; render code reads colours and
// timings from here instead of from global state.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::render::Color;

//=== Palette =============================================================

/// Colours used by the title screen and the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Snake body, fruit glyph and title letters.
    pub primary: Color,

    /// Wall blocks.
    pub secondary: Color,

    /// Surface clear colour.
    pub background: Color,

    /// Strong shadow (title drop shadow, overlays).
    pub shadow_strong: Color,

    /// Regular drop shadow (walls, snake).
    pub shadow: Color,

    /// Faint shadow (background grid lines).
    pub shadow_faint: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0x39, 0x37, 0x82),
            secondary: Color::rgb(0x90, 0xA5, 0x9E),
            background: Color::rgb(0xF2, 0xEF, 0xE6),
            shadow_strong: Color::rgba(0, 0, 0, 0.75),
            shadow: Color::rgba(0, 0, 0, 0.5),
            shadow_faint: Color::rgba(0, 0, 0, 0.25),
        }
    }
}

//=== Config ==============================================================

/// Game-wide settings.
///
/// # Default Values
///
/// - **Virtual height**: 20 cells
/// - **Snake speed**: 4 steps per second
/// - **Title reveal**: 2 seconds
/// - **Window**: 800x600, titled "Snake"
/// - **Seed**: none (fruit placement uses OS entropy)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of grid cells spanning the window height.
    pub virtual_height: u32,

    /// Simulation steps per second.
    pub snake_speed: f64,

    /// Seconds the title sprite takes to fully appear.
    pub title_reveal_secs: f64,

    /// Fixed RNG seed for reproducible fruit placement and title shuffles.
    pub seed: Option<u64>,

    pub window_title: String,
    pub window_size: (u32, u32),
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            virtual_height: 20,
            snake_speed: 4.0,
            title_reveal_secs: 2.0,
            seed: None,
            window_title: "Snake".to_string(),
            window_size: (800, 600),
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Random source for fruit placement and title shuffles.
    ///
    /// Deterministic when a seed is configured, OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
