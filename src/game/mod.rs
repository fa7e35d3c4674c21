//! Football game simulation core

pub mod clock;
pub mod engine;
pub mod generator;
pub mod possession;
pub mod state;
pub mod types;

pub use engine::{run_step, run_to_completion, GameSimulator, StepMode, StepOutcome};
pub use generator::{PlayGenerator, RandomPlayGenerator};
pub use state::{init_game, Game, GameSummary, Matchup};
pub use types::*;
