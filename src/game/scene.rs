//=========================================================================
// Game Scene
//=========================================================================
//
// Gameplay mode: feeds frame time into the simulation, maps input onto
// headings, and draws the arena.
//
// Render order per frame:
//   1. field:   advance simulation, then shadows, grid lines, walls,
//              fruit, snake
//   2. overlay: "PAUSED" / "GAME OVER" / "YOU WIN" banner when the
//              simulation is not running
//
// Terminal states freeze the board. A tap, Enter or Space then returns
// to a fresh title screen.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::direction::Direction;
use super::grid::Cell;
use super::simulation::{GameState, Simulation};
use crate::core::input::{KeyCode, SwipeDirection};
use crate::core::scene::{Frame, RenderPipeline, Scene, SceneContext};
use crate::core::viewport::Viewport;
use crate::menu::MainMenuScene;

//=== Constants ===========================================================

const SHADOW_OFFSET: f32 = 0.1;
const FRUIT_GLYPH: &str = "A";

//=== GameField ===========================================================

/// Scene state shared by the render callbacks.
pub(crate) struct GameField {
    simulation: Simulation,
    context: SceneContext,
    announced: bool,
}

impl GameField {
    fn render_field(&mut self, frame: &mut Frame<'_>) {
        self.simulation.advance(frame.time.delta);

        if self.simulation.state().is_terminal() && !self.announced {
            info!(
                "Game finished ({:?}) with length {}",
                self.simulation.state(),
                self.simulation.len()
            );
            self.announced = true;
        }

        let palette = frame.config.palette;
        let canvas = &mut *frame.canvas;
        let grid = self.simulation.grid();
        let (width, height) = (grid.width() as f32, grid.height() as f32);

        // Snake shadow
        for segment in self.simulation.snake() {
            canvas.fill_rect(
                segment.x as f32 + SHADOW_OFFSET,
                segment.y as f32 + SHADOW_OFFSET,
                1.0,
                1.0,
                palette.shadow,
            );
        }

        // Background grid
        let line_width = 1.0 / frame.viewport.scale_factor as f32;
        for x in 0..grid.width() {
            canvas.stroke_line((x as f32, 0.0), (x as f32, height), line_width, palette.shadow_faint);
        }
        for y in 0..grid.height() {
            canvas.stroke_line((0.0, y as f32), (width, y as f32), line_width, palette.shadow_faint);
        }

        // Walls and fruit
        for (point, cell) in grid.iter() {
            let (x, y) = (point.x as f32, point.y as f32);
            match cell {
                Cell::Wall => {
                    canvas.fill_rect(x + SHADOW_OFFSET, y + SHADOW_OFFSET, 1.0, 1.0, palette.shadow);
                    canvas.fill_rect(x, y, 1.0, 1.0, palette.secondary);
                }
                Cell::Fruit => {
                    canvas.fill_text(FRUIT_GLYPH, x + 0.5, y + 0.5, 0.8, palette.primary);
                }
                Cell::Empty | Cell::Snake => {}
            }
        }

        // Snake
        for segment in self.simulation.snake() {
            canvas.fill_rect(segment.x as f32, segment.y as f32, 1.0, 1.0, palette.primary);
        }
    }

    fn render_overlay(&mut self, frame: &mut Frame<'_>) {
        let (title, hint) = match self.simulation.state() {
            GameState::Playing => return,
            GameState::Paused => ("PAUSED", "PRESS P TO RESUME"),
            GameState::GameOver => ("GAME OVER", "TAP TO CONTINUE"),
            GameState::Won => ("YOU WIN", "TAP TO CONTINUE"),
        };

        let palette = frame.config.palette;
        let grid = self.simulation.grid();
        let (width, middle) = (grid.width() as f32, grid.height() as f32 / 2.0);

        frame.canvas.fill_rect(0.0, middle - 2.0, width, 4.0, palette.shadow_strong);
        frame.canvas.fill_text(title, width / 2.0, middle - 0.5, 1.5, palette.background);
        frame.canvas.fill_text(hint, width / 2.0, middle + 1.1, 0.8, palette.background);
    }

    fn steer(&mut self, direction: Direction) {
        self.simulation.request_direction(direction);
    }

    fn leave_if_finished(&mut self) {
        if self.simulation.state().is_terminal() {
            let context = self.context.clone();
            self.context.switcher.request(MainMenuScene::new(context));
        }
    }
}

//=== GameScene ===========================================================

pub struct GameScene {
    field: GameField,
    pipeline: RenderPipeline<GameField>,
}

impl GameScene {
    /// Starts a new game sized to the context's viewport.
    pub fn new(context: SceneContext) -> Self {
        let simulation = Simulation::new(
            context.viewport.width,
            context.viewport.height,
            context.config.snake_speed,
            context.config.rng(),
        );

        let mut pipeline = RenderPipeline::new();
        pipeline.add_render_function(GameField::render_field);
        pipeline.add_render_function(GameField::render_overlay);

        Self {
            field: GameField {
                simulation,
                context,
                announced: false,
            },
            pipeline,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.field.simulation
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.field.simulation
    }
}

impl Scene for GameScene {
    fn name(&self) -> &'static str {
        "game"
    }

    fn on_render(&mut self, frame: &mut Frame<'_>) {
        self.pipeline.dispatch(&mut self.field, frame);
    }

    fn on_key_press(&mut self, key: KeyCode) {
        match key {
            KeyCode::KeyA | KeyCode::ArrowLeft => self.field.steer(Direction::Left),
            KeyCode::KeyD | KeyCode::ArrowRight => self.field.steer(Direction::Right),
            KeyCode::KeyW | KeyCode::ArrowUp => self.field.steer(Direction::Up),
            KeyCode::KeyS | KeyCode::ArrowDown => self.field.steer(Direction::Down),
            KeyCode::KeyP | KeyCode::Escape => self.field.simulation.toggle_pause(),
            KeyCode::Enter | KeyCode::Space => self.field.leave_if_finished(),
            _ => {}
        }
    }

    fn on_swipe(&mut self, direction: SwipeDirection) {
        self.field.steer(direction.into());
    }

    fn on_tap(&mut self) {
        self.field.leave_if_finished();
    }

    // The running arena keeps its size; the next game picks this up
    fn on_resize(&mut self, viewport: &Viewport) {
        self.field.context.viewport = *viewport;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::config::Config;
    use crate::core::scene::{scene_channel, SceneRequests};
    use crate::core::time::TimeSample;
    use crate::game::grid::Point;
    use crate::render::recording::RecordingCanvas;

    fn game() -> (GameScene, SceneRequests) {
        let (switcher, requests) = scene_channel();
        let config = Config {
            seed: Some(3),
            ..Config::default()
        };
        let context = SceneContext {
            config: Arc::new(config),
            viewport: Viewport::from_window(100, 100, 10),
            switcher,
        };
        (GameScene::new(context), requests)
    }

    fn render(scene: &mut GameScene, delta: f64) -> RecordingCanvas {
        let config = Config::default();
        let viewport = Viewport::from_window(100, 100, 10);
        let mut canvas = RecordingCanvas::default();
        let mut frame = Frame {
            time: TimeSample { elapsed: 0.0, delta },
            viewport: &viewport,
            config: &config,
            canvas: &mut canvas,
        };
        scene.on_render(&mut frame);
        canvas
    }

    #[test]
    fn arena_matches_viewport() {
        let (scene, _) = game();
        assert_eq!(scene.simulation().grid().width(), 10);
        assert_eq!(scene.simulation().grid().height(), 10);
        assert_eq!(scene.simulation().head(), Point::new(5, 5));
    }

    #[test]
    fn render_advances_simulation_by_frame_delta() {
        let (mut scene, _) = game();
        assert!(scene.simulation_mut().set_fruit(Point::new(2, 2)));

        // Default speed is 4 steps per second
        render(&mut scene, 0.25);
        assert_eq!(scene.simulation().head(), Point::new(6, 5));
    }

    #[test]
    fn render_draws_walls_fruit_and_snake() {
        let (mut scene, _) = game();
        let canvas = render(&mut scene, 0.0);
        let palette = Config::default().palette;

        // 10x10 border has 36 wall cells
        assert_eq!(canvas.rects_with(palette.secondary), 36);
        assert_eq!(canvas.rects_with(palette.primary), 1);
        assert_eq!(canvas.texts(), vec![FRUIT_GLYPH]);
    }

    #[test]
    fn wasd_and_arrows_steer() {
        let (mut scene, _) = game();
        scene.on_key_press(KeyCode::KeyW);
        assert_eq!(scene.simulation().pending_direction(), Some(Direction::Up));
        scene.on_key_press(KeyCode::ArrowDown);
        assert_eq!(scene.simulation().pending_direction(), Some(Direction::Down));
        scene.on_key_press(KeyCode::KeyA);
        assert_eq!(scene.simulation().pending_direction(), Some(Direction::Down));
    }

    #[test]
    fn swipe_steers() {
        let (mut scene, _) = game();
        scene.on_swipe(SwipeDirection::Up);
        assert_eq!(scene.simulation().pending_direction(), Some(Direction::Up));
    }

    #[test]
    fn pause_key_toggles_and_shows_banner() {
        let (mut scene, _) = game();
        scene.on_key_press(KeyCode::KeyP);
        assert_eq!(scene.simulation().state(), GameState::Paused);

        let canvas = render(&mut scene, 1.0);
        assert!(canvas.texts().contains(&"PAUSED"));
        assert_eq!(scene.simulation().head(), Point::new(5, 5));

        scene.on_key_press(KeyCode::Escape);
        assert_eq!(scene.simulation().state(), GameState::Playing);
    }

    #[test]
    fn tap_during_play_does_nothing() {
        let (mut scene, requests) = game();
        scene.on_tap();
        assert!(requests.is_empty());
        assert_eq!(scene.simulation().state(), GameState::Playing);
    }

    #[test]
    fn game_over_shows_banner_and_tap_returns_to_menu() {
        let (mut scene, requests) = game();
        assert!(scene.simulation_mut().set_fruit(Point::new(2, 2)));

        // Four steps right from (5,5) reach the wall at x = 9
        let canvas = render(&mut scene, 1.0);
        assert_eq!(scene.simulation().state(), GameState::GameOver);
        assert!(canvas.texts().contains(&"GAME OVER"));

        scene.on_tap();
        let next = requests.take_latest().expect("menu requested");
        assert_eq!(next.name(), "main_menu");
    }

    #[test]
    fn enter_after_game_over_returns_to_menu() {
        let (mut scene, requests) = game();
        assert!(scene.simulation_mut().set_fruit(Point::new(2, 2)));
        render(&mut scene, 1.0);

        scene.on_key_press(KeyCode::Enter);
        assert_eq!(requests.len(), 1);
    }

    #[test]
    fn resize_keeps_arena_and_sizes_next_game() {
        let (mut scene, requests) = game();
        assert!(scene.simulation_mut().set_fruit(Point::new(2, 2)));

        let resized = Viewport::from_window(400, 100, 10);
        scene.on_resize(&resized);
        assert_eq!(scene.field.context.viewport, resized);
        assert_eq!(scene.simulation().grid().width(), 10);

        render(&mut scene, 1.0);
        assert_eq!(scene.simulation().state(), GameState::GameOver);

        // Game over -> menu -> new game, all through the shared context
        scene.on_tap();
        let mut menu = requests.take_latest().expect("menu requested");
        menu.on_tap();
        let mut next = requests.take_latest().expect("game requested");
        assert_eq!(next.name(), "game");

        let mut canvas = RecordingCanvas::default();
        let config = Config::default();
        let mut frame = Frame {
            time: TimeSample { elapsed: 0.0, delta: 0.0 },
            viewport: &resized,
            config: &config,
            canvas: &mut canvas,
        };
        next.on_render(&mut frame);

        // 40x10 border has 96 wall cells
        assert_eq!(canvas.rects_with(config.palette.secondary), 96);
    }
}
