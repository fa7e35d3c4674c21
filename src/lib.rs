//! Gridiron - American football game simulator
//!
//! Simulates a full game between two teams as a step-by-step state machine
//! (clock, quarters, downs, field position, possession, overtime) and serves
//! it over HTTP.

pub mod api;
pub mod config;
pub mod errors;
pub mod game;

pub use config::GridironConfig;
pub use errors::{GridironError, GridironResult, ValidationError};
pub use game::{init_game, run_to_completion, Game, GameSimulator, Matchup, Team};

/// Install the tracing subscriber used by the binaries
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}
