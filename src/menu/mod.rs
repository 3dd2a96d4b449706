//=========================================================================
// Main Menu Scene
//=========================================================================
//
// Title screen. The "SNAKE" sprite assembles itself cell by cell in a
// random order, then a start hint blinks underneath. Tap, Enter or Space
// starts a game.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::seq::SliceRandom;

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;
use crate::core::scene::{Frame, Invocation, RenderPipeline, Scene, SceneContext};
use crate::core::viewport::Viewport;
use crate::game::GameScene;

//=== Constants ===========================================================

const TITLE_SPRITE: [&str; 5] = [
    "XXXXX.X...X.XXXXX.X...X.XXXXX",
    "X.....XX..X.X...X.X..X..X....",
    "XXXXX.X.X.X.XXXXX.XXX...XXX..",
    "....X.X..XX.X...X.X..X..X....",
    "XXXXX.X...X.X...X.X...X.XXXXX",
];

const SHADOW_OFFSET: f32 = 0.1;
const START_HINT: &str = "TAP TO START";

//=== TitleReveal =========================================================

/// Persistent data of the title render callback.
struct TitleReveal {
    width: f32,
    height: f32,

    /// Lit sprite cells in reveal order.
    cells: Vec<(f32, f32)>,
}

impl TitleReveal {
    fn new(frame: &Frame<'_>) -> Self {
        let mut cells: Vec<(f32, f32)> = TITLE_SPRITE
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.chars()
                    .enumerate()
                    .filter(|&(_, c)| c == 'X')
                    .map(move |(x, _)| (x as f32, y as f32))
            })
            .collect();
        cells.shuffle(&mut frame.config.rng());

        Self {
            width: TITLE_SPRITE[0].len() as f32,
            height: TITLE_SPRITE.len() as f32,
            cells,
        }
    }
}

//=== Menu ================================================================

struct Menu {
    context: SceneContext,
}

impl Menu {
    fn render_title(&mut self, frame: &mut Frame<'_>, invocation: Invocation<'_, TitleReveal>) {
        let reveal = &*invocation.data;
        let Some(last) = reveal.cells.len().checked_sub(1) else {
            return;
        };

        let duration = frame.config.title_reveal_secs.max(f64::EPSILON);
        let progress = invocation.elapsed.clamp(0.0, duration) / duration;
        let position = progress * reveal.cells.len() as f64;
        let current = (position.floor() as usize).min(last);
        let fraction = (position - current as f64) as f32;

        let palette = frame.config.palette;
        let viewport = frame.viewport;
        let canvas = &mut *frame.canvas;

        canvas.save();
        canvas.translate(
            (viewport.width as f32 - reveal.width) / 2.0,
            viewport.height as f32 / 4.0,
        );

        for (color, offset) in [(palette.shadow_strong, SHADOW_OFFSET), (palette.primary, 0.0)] {
            for &(x, y) in &reveal.cells[..current] {
                canvas.fill_rect(x + offset, y + offset, 1.0, 1.0, color);
            }

            // The cell being revealed fades in while dropping into place
            let (x, y) = reveal.cells[current];
            canvas.save();
            canvas.set_alpha(fraction);
            canvas.fill_rect(x + offset, y + offset + (1.0 - fraction), 1.0, 1.0, color);
            canvas.restore();
        }

        canvas.restore();

        if progress >= 1.0 && (invocation.elapsed * 2.0) as u64 % 2 == 0 {
            canvas.fill_text(
                START_HINT,
                viewport.width as f32 / 2.0,
                viewport.height as f32 / 4.0 + reveal.height + 3.0,
                1.0,
                palette.primary,
            );
        }
    }

    fn start_game(&self) {
        let context = self.context.clone();
        self.context.switcher.request(GameScene::new(context));
    }
}

//=== MainMenuScene =======================================================

pub struct MainMenuScene {
    menu: Menu,
    pipeline: RenderPipeline<Menu>,
}

impl MainMenuScene {
    pub fn new(context: SceneContext) -> Self {
        let mut pipeline = RenderPipeline::new();
        pipeline.add_render_function_with(
            |_: &Menu, frame: &Frame<'_>| TitleReveal::new(frame),
            Menu::render_title,
        );

        Self {
            menu: Menu { context },
            pipeline,
        }
    }
}

impl Scene for MainMenuScene {
    fn name(&self) -> &'static str {
        "main_menu"
    }

    fn on_render(&mut self, frame: &mut Frame<'_>) {
        self.pipeline.dispatch(&mut self.menu, frame);
    }

    fn on_key_press(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Space) {
            self.menu.start_game();
        }
    }

    fn on_tap(&mut self) {
        self.menu.start_game();
    }

    fn on_resize(&mut self, viewport: &Viewport) {
        self.menu.context.viewport = *viewport;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
