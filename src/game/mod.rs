//=========================================================================
// Game
//=========================================================================
//
// Snake rules and the gameplay scene built on them.
//
//   grid        walled cell array and coordinates
//   direction   headings and the perpendicular-turn rule
//   simulation  fixed-step state machine
//   scene       input mapping, drawing, terminal flow
//
//=========================================================================

//=== Module Declarations =================================================

mod direction;
mod grid;
mod scene;
mod simulation;

//=== Public API ==========================================================

pub use direction::Direction;
pub use grid::{Cell, Grid, Point};
pub use scene::GameScene;
pub use simulation::{GameState, Simulation, StepOutcome};
