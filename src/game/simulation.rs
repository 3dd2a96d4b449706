//=========================================================================
// Grid Simulation
//=========================================================================
//
// Snake rules engine: grid contents, snake body, heading, fixed-step
// clock and fruit placement. Knows nothing about rendering or input
// devices.
//
// State machine:
// ```text
//   Playing ⇄ Paused
//      │
//      ├─ hit wall / body ──> GameOver
//      └─ no empty cell for fruit ──> Won
// ```
//
// Clock:
//   accumulator += delta * speed
//   while accumulator >= 1 → one step
//
// Large deltas (e.g. the window was hidden) run as many catch-up steps
// as fit; the fractional remainder carries into the next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

//=== Internal Dependencies ===============================================

use super::direction::Direction;
use super::grid::{Cell, Grid, Point};

//=== GameState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,

    /// The head ran into a wall or the body. Terminal.
    GameOver,

    /// The board filled up. Terminal.
    Won,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

//=== StepOutcome =========================================================

/// Result of one discrete step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Slid forward with constant length.
    Moved,

    /// Ate the fruit and grew by one; a new fruit was placed.
    Ate,

    /// Hit the given cell (`Wall` or `Snake`).
    Collided(Cell),

    /// Ate the last fruit the board had room for.
    Won,
}

//=== Simulation ==========================================================

pub struct Simulation {
    grid: Grid,
    snake: VecDeque<Point>,
    direction: Direction,
    pending: Option<Direction>,
    fruit: Option<Point>,
    speed: f64,
    accumulator: f64,
    state: GameState,
    rng: StdRng,
}

impl Simulation {
    //--- Construction -----------------------------------------------------

    /// Starts a game on a walled `width` x `height` arena.
    ///
    /// The snake is a single segment in the centre heading right, and one
    /// fruit is placed on a random empty cell. An arena with no room for
    /// fruit starts out `Won`.
    pub fn new(width: u32, height: u32, speed: f64, rng: StdRng) -> Self {
        let grid = Grid::walled(width, height);
        let center = Point::new(grid.width() as i32 / 2, grid.height() as i32 / 2);

        let mut simulation = Self {
            grid,
            snake: VecDeque::from([center]),
            direction: Direction::Right,
            pending: None,
            fruit: None,
            speed,
            accumulator: 0.0,
            state: GameState::Playing,
            rng,
        };
        simulation.grid.set(center, Cell::Snake);

        if !simulation.spawn_fruit() {
            simulation.state = GameState::Won;
        }

        debug!(
            "Simulation started on {}x{} arena at {:?}",
            simulation.grid.width(),
            simulation.grid.height(),
            center
        );
        simulation
    }

    //--- Accessors --------------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Segments, head first.
    pub fn snake(&self) -> &VecDeque<Point> {
        &self.snake
    }

    pub fn head(&self) -> Point {
        self.snake.front().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn fruit(&self) -> Option<Point> {
        self.fruit
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Fraction of a step carried over from previous frames.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    //--- Control ----------------------------------------------------------

    /// Buffers a heading change for the next step.
    ///
    /// Only headings on the other axis than the current one are accepted;
    /// same-axis requests, reversals included, are ignored. The latest
    /// accepted request replaces any earlier one. Returns whether the
    /// request was buffered.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        if !direction.is_perpendicular_to(self.direction) {
            trace!("Ignoring {:?} while heading {:?}", direction, self.direction);
            return false;
        }
        self.pending = Some(direction);
        true
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Paused;
            debug!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Playing;
            debug!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Playing => self.pause(),
            GameState::Paused => self.resume(),
            _ => {}
        }
    }

    /// Moves the fruit to `at`.
    ///
    /// Returns `false` and leaves the board untouched unless `at` is an
    /// empty cell or already holds the fruit.
    pub fn set_fruit(&mut self, at: Point) -> bool {
        if self.grid.get(at) != Cell::Empty && self.fruit != Some(at) {
            return false;
        }
        if let Some(previous) = self.fruit.take() {
            self.grid.set(previous, Cell::Empty);
        }
        self.grid.set(at, Cell::Fruit);
        self.fruit = Some(at);
        true
    }

    //--- Update Loop ------------------------------------------------------

    /// Feeds `delta` seconds into the clock and runs every step that fits.
    ///
    /// Returns the number of steps taken. Nothing happens unless the game
    /// is `Playing`; reaching a terminal state stops the loop and discards
    /// the leftover time.
    pub fn advance(&mut self, delta: f64) -> u32 {
        if self.state != GameState::Playing || !delta.is_finite() || delta <= 0.0 {
            return 0;
        }

        self.accumulator += delta * self.speed;

        let mut steps = 0;
        while self.accumulator >= 1.0 {
            self.accumulator -= 1.0;
            steps += 1;

            if self.step().map_or(true, |_| self.state.is_terminal()) {
                self.accumulator = 0.0;
                break;
            }
        }
        steps
    }

    /// Runs one discrete step regardless of the clock.
    ///
    /// Returns `None` when the game is not `Playing`.
    pub fn step(&mut self) -> Option<StepOutcome> {
        if self.state != GameState::Playing {
            return None;
        }

        if let Some(next) = self.pending.take() {
            self.direction = next;
        }

        let candidate = self.head().step(self.direction);

        let outcome = match self.grid.get(candidate) {
            Cell::Fruit => {
                self.grid.set(candidate, Cell::Snake);
                self.snake.push_front(candidate);
                self.fruit = None;

                if self.spawn_fruit() {
                    StepOutcome::Ate
                } else {
                    info!("Board full at length {}", self.snake.len());
                    self.state = GameState::Won;
                    StepOutcome::Won
                }
            }
            cell @ (Cell::Wall | Cell::Snake) => {
                info!(
                    "Game over: hit {:?} at {:?} with length {}",
                    cell,
                    candidate,
                    self.snake.len()
                );
                self.state = GameState::GameOver;
                StepOutcome::Collided(cell)
            }
            Cell::Empty => {
                self.grid.set(candidate, Cell::Snake);
                if let Some(tail) = self.snake.pop_back() {
                    self.grid.set(tail, Cell::Empty);
                }
                self.snake.push_front(candidate);
                StepOutcome::Moved
            }
        };

        trace!("Step {:?} → {:?}", candidate, outcome);
        Some(outcome)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Places the fruit on a uniformly random empty cell.
    ///
    /// Returns `false` when no empty cell remains.
    fn spawn_fruit(&mut self) -> bool {
        let empty = self.grid.positions_of(Cell::Empty);
        let Some(&at) = empty.choose(&mut self.rng) else {
            return false;
        };
        self.grid.set(at, Cell::Fruit);
        self.fruit = Some(at);
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn simulation(width: u32, height: u32, speed: f64) -> Simulation {
        Simulation::new(width, height, speed, StdRng::seed_from_u64(7))
    }

    fn assert_consistent(sim: &Simulation) {
        assert_eq!(sim.grid().count(Cell::Snake), sim.len());
        for segment in sim.snake() {
            assert_eq!(sim.grid().get(*segment), Cell::Snake);
        }

        let grid = sim.grid();
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        assert_eq!(grid.count(Cell::Wall), (2 * (width + height) - 4) as usize);
        for (point, cell) in grid.iter() {
            let border = point.x == 0 || point.y == 0 || point.x == width - 1 || point.y == height - 1;
            assert_eq!(cell == Cell::Wall, border, "unexpected cell at {:?}", point);
        }
    }

    //=====================================================================
    // Construction
    //=====================================================================

    #[test]
    fn new_game_has_centred_snake_and_one_fruit() {
        let sim = simulation(10, 10, 4.0);
        assert_eq!(sim.head(), Point::new(5, 5));
        assert_eq!(sim.len(), 1);
        assert_eq!(sim.direction(), Direction::Right);
        assert_eq!(sim.state(), GameState::Playing);
        assert_eq!(sim.grid().count(Cell::Fruit), 1);

        let fruit = sim.fruit().expect("fruit placed");
        assert_eq!(sim.grid().get(fruit), Cell::Fruit);
        assert_consistent(&sim);
    }

    #[test]
    fn arena_without_room_starts_won() {
        let sim = simulation(3, 3, 4.0);
        assert_eq!(sim.state(), GameState::Won);
        assert!(sim.fruit().is_none());
    }

    //=====================================================================
    // Stepping
    //=====================================================================

    #[test]
    fn eating_fruit_grows_snake_and_respawns_fruit() {
        let mut sim = simulation(10, 10, 4.0);
        assert!(sim.set_fruit(Point::new(6, 5)));

        assert_eq!(sim.step(), Some(StepOutcome::Ate));

        assert_eq!(sim.head(), Point::new(6, 5));
        assert_eq!(sim.grid().get(Point::new(6, 5)), Cell::Snake);
        assert_eq!(sim.len(), 2);

        let fruit = sim.fruit().expect("new fruit placed");
        assert_ne!(fruit, Point::new(6, 5));
        assert_eq!(sim.grid().get(fruit), Cell::Fruit);
        assert_eq!(sim.grid().count(Cell::Fruit), 1);
        assert_consistent(&sim);
    }

    #[test]
    fn plain_step_keeps_length() {
        let mut sim = simulation(10, 10, 4.0);
        assert!(sim.set_fruit(Point::new(2, 2)));

        assert_eq!(sim.step(), Some(StepOutcome::Moved));
        assert_eq!(sim.head(), Point::new(6, 5));
        assert_eq!(sim.len(), 1);
        assert_eq!(sim.grid().get(Point::new(5, 5)), Cell::Empty);
        assert_consistent(&sim);
    }

    #[test]
    fn longer_body_follows_head() {
        let mut sim = simulation(12, 12, 4.0);
        assert!(sim.set_fruit(Point::new(7, 6)));
        sim.step();
        assert!(sim.set_fruit(Point::new(8, 6)));
        sim.step();
        assert!(sim.set_fruit(Point::new(1, 1)));

        assert!(sim.request_direction(Direction::Down));
        assert_eq!(sim.step(), Some(StepOutcome::Moved));

        let body: Vec<_> = sim.snake().iter().copied().collect();
        assert_eq!(body, vec![Point::new(8, 7), Point::new(8, 6), Point::new(7, 6)]);
        assert_eq!(sim.grid().get(Point::new(6, 6)), Cell::Empty);
        assert_consistent(&sim);
    }

    #[test]
    fn running_into_wall_ends_game() {
        let mut sim = simulation(10, 10, 4.0);
        assert!(sim.set_fruit(Point::new(2, 2)));
        for _ in 0..3 {
            assert_eq!(sim.step(), Some(StepOutcome::Moved));
        }
        assert_eq!(sim.head(), Point::new(8, 5));

        assert_eq!(sim.step(), Some(StepOutcome::Collided(Cell::Wall)));
        assert_eq!(sim.state(), GameState::GameOver);

        assert_eq!(sim.step(), None);
        assert_eq!(sim.advance(10.0), 0);
        assert_eq!(sim.head(), Point::new(8, 5));
        assert_consistent(&sim);
    }

    #[test]
    fn running_into_body_ends_game() {
        let mut sim = simulation(12, 12, 4.0);
        // Grow to length 5 along the row
        for x in 7..=10 {
            assert!(sim.set_fruit(Point::new(x, 6)));
            sim.step();
        }
        assert_eq!(sim.len(), 5);
        assert!(sim.set_fruit(Point::new(1, 1)));

        assert!(sim.request_direction(Direction::Down));
        sim.step();
        assert!(sim.request_direction(Direction::Left));
        sim.step();
        assert!(sim.request_direction(Direction::Up));

        assert_eq!(sim.step(), Some(StepOutcome::Collided(Cell::Snake)));
        assert_eq!(sim.state(), GameState::GameOver);
    }

    #[test]
    fn filling_the_board_wins() {
        // Interior is the single column (1,1)..(1,2)
        let mut sim = simulation(3, 4, 4.0);
        assert_eq!(sim.head(), Point::new(1, 2));
        assert_eq!(sim.fruit(), Some(Point::new(1, 1)));

        assert!(sim.request_direction(Direction::Up));
        assert_eq!(sim.step(), Some(StepOutcome::Won));
        assert_eq!(sim.state(), GameState::Won);
        assert!(sim.fruit().is_none());
        assert_eq!(sim.len(), 2);
        assert_consistent(&sim);
    }

    //=====================================================================
    // Direction Policy
    //=====================================================================

    #[test]
    fn reversal_is_ignored() {
        let mut sim = simulation(10, 10, 4.0);
        assert!(sim.set_fruit(Point::new(2, 2)));

        assert!(!sim.request_direction(Direction::Left));
        assert_eq!(sim.pending_direction(), None);

        sim.step();
        assert_eq!(sim.direction(), Direction::Right);
        assert_eq!(sim.head(), Point::new(6, 5));
    }

    #[test]
    fn perpendicular_turn_is_buffered_until_step() {
        let mut sim = simulation(10, 10, 4.0);
        assert!(sim.set_fruit(Point::new(2, 2)));

        assert!(sim.request_direction(Direction::Up));
        assert_eq!(sim.direction(), Direction::Right);
        assert_eq!(sim.pending_direction(), Some(Direction::Up));

        sim.step();
        assert_eq!(sim.direction(), Direction::Up);
        assert_eq!(sim.pending_direction(), None);
        assert_eq!(sim.head(), Point::new(5, 4));
    }

    #[test]
    fn latest_accepted_turn_wins() {
        let mut sim = simulation(10, 10, 4.0);
        assert!(sim.set_fruit(Point::new(2, 2)));

        assert!(sim.request_direction(Direction::Up));
        assert!(sim.request_direction(Direction::Down));
        sim.step();
        assert_eq!(sim.head(), Point::new(5, 6));
    }

    #[test]
    fn same_axis_requests_never_change_trajectory() {
        let mut steered = simulation(16, 16, 4.0);
        let mut plain = simulation(16, 16, 4.0);

        for _ in 0..6 {
            steered.request_direction(Direction::Left);
            steered.request_direction(Direction::Right);
            steered.step();
            plain.step();
            assert_eq!(steered.head(), plain.head());
        }
    }

    //=====================================================================
    // Clock
    //=====================================================================

    #[test]
    fn one_step_duration_takes_exactly_one_step() {
        let mut sim = simulation(20, 20, 1.0);
        assert_eq!(sim.advance(1.0), 1);
        assert_eq!(sim.accumulator(), 0.0);
    }

    #[test]
    fn fractional_delta_carries_remainder() {
        let mut sim = simulation(20, 20, 1.0);
        assert!(sim.set_fruit(Point::new(1, 1)));

        assert_eq!(sim.advance(2.5), 2);
        assert!((sim.accumulator() - 0.5).abs() < 1e-12);
        assert_eq!(sim.head(), Point::new(12, 10));

        assert_eq!(sim.advance(0.5), 1);
        assert_eq!(sim.head(), Point::new(13, 10));
    }

    #[test]
    fn speed_scales_step_rate() {
        let mut sim = simulation(40, 20, 4.0);
        assert_eq!(sim.advance(0.25), 1);
        assert_eq!(sim.advance(0.1), 0);
    }

    #[test]
    fn collision_stops_catch_up_steps() {
        let mut sim = simulation(10, 10, 1.0);
        assert!(sim.set_fruit(Point::new(2, 2)));

        assert_eq!(sim.advance(100.0), 4);
        assert_eq!(sim.state(), GameState::GameOver);
        assert_eq!(sim.accumulator(), 0.0);
    }

    #[test]
    fn invalid_deltas_are_ignored() {
        let mut sim = simulation(10, 10, 1.0);
        assert_eq!(sim.advance(-1.0), 0);
        assert_eq!(sim.advance(f64::NAN), 0);
        assert_eq!(sim.accumulator(), 0.0);
    }

    //=====================================================================
    // Pause
    //=====================================================================

    #[test]
    fn paused_game_ignores_time_and_turns() {
        let mut sim = simulation(10, 10, 4.0);
        sim.toggle_pause();
        assert_eq!(sim.state(), GameState::Paused);

        let head = sim.head();
        assert_eq!(sim.advance(5.0), 0);
        assert!(!sim.request_direction(Direction::Up));
        assert_eq!(sim.head(), head);

        sim.toggle_pause();
        assert_eq!(sim.state(), GameState::Playing);
    }

    #[test]
    fn terminal_state_cannot_be_paused() {
        let mut sim = simulation(3, 3, 4.0);
        sim.pause();
        assert_eq!(sim.state(), GameState::Won);
    }

    //=====================================================================
    // Invariants
    //=====================================================================

    #[test]
    fn random_play_keeps_grid_in_sync() {
        let mut sim = simulation(12, 9, 4.0);
        let mut rng = StdRng::seed_from_u64(99);
        let directions = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

        for _ in 0..500 {
            if sim.state().is_terminal() {
                break;
            }
            sim.request_direction(directions[rng.gen_range(0..4)]);

            let before = sim.len();
            match sim.step() {
                Some(StepOutcome::Moved) => assert_eq!(sim.len(), before),
                Some(StepOutcome::Ate) => {
                    assert_eq!(sim.len(), before + 1);
                    assert_eq!(sim.grid().count(Cell::Fruit), 1);
                }
                Some(StepOutcome::Collided(_)) => assert_eq!(sim.len(), before),
                Some(StepOutcome::Won) | None => {}
            }
            assert_consistent(&sim);
        }
    }

    #[test]
    fn set_fruit_rejects_occupied_cells() {
        let mut sim = simulation(10, 10, 4.0);
        assert!(!sim.set_fruit(Point::new(0, 0)));
        assert!(!sim.set_fruit(sim.head()));
        assert_eq!(sim.grid().count(Cell::Fruit), 1);
    }
}
