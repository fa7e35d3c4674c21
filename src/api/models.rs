//! API Request and Response Models

use crate::{
    errors::{Side, ValidationError},
    game::{Game, GameLog, Matchup, Quarter, Team},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 100;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Team as sent by the client. Every field is optional on the wire so that
/// missing values surface as validation errors rather than parse failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamPayload {
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "Overall")]
    pub overall: Option<i64>,
}

/// POST /simulate body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulateGameRequest {
    #[serde(default, alias = "HomeTeam")]
    pub home_team: Option<TeamPayload>,
    #[serde(default, alias = "AwayTeam")]
    pub away_team: Option<TeamPayload>,
}

impl SimulateGameRequest {
    pub fn new(home: Team, away: Team) -> Self {
        Self {
            home_team: Some(TeamPayload::from(home)),
            away_team: Some(TeamPayload::from(away)),
        }
    }

    /// Check every field and produce a matchup the engine can run
    pub fn validate(self) -> Result<Matchup, ValidationError> {
        Ok(Matchup {
            home: validate_team(self.home_team, Side::Home)?,
            away: validate_team(self.away_team, Side::Away)?,
        })
    }
}

impl From<Team> for TeamPayload {
    fn from(team: Team) -> Self {
        Self {
            name: Some(team.name),
            overall: Some(i64::from(team.overall)),
        }
    }
}

fn validate_team(payload: Option<TeamPayload>, side: Side) -> Result<Team, ValidationError> {
    let payload = payload.ok_or(ValidationError::MissingTeam(side))?;

    let name = payload.name.ok_or(ValidationError::MissingName(side))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankName(side));
    }

    let value = payload.overall.ok_or(ValidationError::MissingRating(side))?;
    let overall = u8::try_from(value)
        .ok()
        .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
        .ok_or(ValidationError::RatingOutOfRange {
            side,
            value,
            min: MIN_RATING,
            max: MAX_RATING,
        })?;

    Ok(Team::new(name, overall))
}

/// Optional query parameters for POST /simulate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulateQuery {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub include_log: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalScore {
    pub home: u32,
    pub away: u32,
}

/// Result of a simulated game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateGameResponse {
    pub game_id: String,
    pub winner: Team,
    pub loser: Team,
    pub final_score: FinalScore,
    pub quarter: Quarter,
    pub overtime: bool,
    pub plays: usize,
    pub simulated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_log: Option<Vec<GameLog>>,
}

impl SimulateGameResponse {
    /// Build the response from a finished game. `None` if the game is not over.
    pub fn from_game(game_id: String, game: Game, include_log: bool) -> Option<Self> {
        let summary = game.summary()?;
        Some(Self {
            game_id,
            winner: summary.winner,
            loser: summary.loser,
            final_score: FinalScore {
                home: summary.home_score,
                away: summary.away_score,
            },
            quarter: summary.quarter,
            overtime: summary.quarter.is_overtime(),
            plays: summary.plays,
            simulated_at: Utc::now(),
            play_log: include_log.then_some(game.log),
        })
    }
}
