//! Error types for the gridiron service
//!
//! The simulation core has no recoverable errors; everything here belongs to
//! the boundary (request validation, configuration, serving).

use crate::config::ConfigError;

/// Which side of a matchup a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home_team"),
            Side::Away => write!(f, "away_team"),
        }
    }
}

/// Rejected simulation request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingTeam(Side),

    #[error("{0}.name is required")]
    MissingName(Side),

    #[error("{0}.name must not be blank")]
    BlankName(Side),

    #[error("{0}.overall is required")]
    MissingRating(Side),

    #[error("{side}.overall must be between {min} and {max}, got {value}")]
    RatingOutOfRange {
        side: Side,
        value: i64,
        min: u8,
        max: u8,
    },
}

/// Root error type
#[derive(Debug, thiserror::Error)]
pub enum GridironError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Simulation ended without a winner")]
    Undecided,
}

pub type GridironResult<T> = Result<T, GridironError>;
