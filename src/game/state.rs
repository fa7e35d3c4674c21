//! In-progress game state
//!
//! A `Game` is built once per simulation request by [`init_game`], mutated in
//! place by the engine and dropped once the summary has been produced.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Two validated teams ready to play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub home: Team,
    pub away: Team,
}

/// Full game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub home_team: Team,
    pub away_team: Team,
    pub game_over: bool,
    pub quarter: Quarter,
    pub clock: u32,
    pub home_score: u32,
    pub away_score: u32,
    pub log: Vec<GameLog>,
    pub home_end_zone: EndZone,
    pub away_end_zone: EndZone,
    pub possession: Possession,
    pub possession_at_half: Possession,
    pub down: Down,
    pub ball_position: u8,
    pub first_down_marker: u8,
    pub requires_kickoff: bool,
    pub requires_extra_point: bool,
}

/// Build the opening state for a matchup
pub fn init_game(matchup: Matchup) -> Game {
    Game {
        home_team: matchup.home,
        away_team: matchup.away,
        game_over: false,
        quarter: Quarter::First,
        clock: QUARTER_SECONDS,
        home_score: 0,
        away_score: 0,
        log: vec![GameLog::new(GameEvent::GameStart, QUARTER_SECONDS)],
        home_end_zone: EndZone::West,
        away_end_zone: EndZone::East,
        possession: Possession::Home,
        possession_at_half: Possession::Away,
        down: Down::First,
        ball_position: RESTART_SPOT,
        first_down_marker: RESTART_SPOT,
        requires_kickoff: true,
        requires_extra_point: true,
    }
}

impl Game {
    pub fn last_event(&self) -> Option<GameEvent> {
        self.log.last().map(|entry| entry.event)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.log.push(GameLog::new(event, self.clock));
    }

    pub fn team(&self, side: Possession) -> &Team {
        match side {
            Possession::Home => &self.home_team,
            Possession::Away => &self.away_team,
        }
    }

    pub fn offense(&self) -> &Team {
        self.team(self.possession)
    }

    pub fn defense(&self) -> &Team {
        self.team(self.possession.other())
    }

    pub fn add_points(&mut self, side: Possession, points: u32) {
        match side {
            Possession::Home => self.home_score += points,
            Possession::Away => self.away_score += points,
        }
    }

    pub fn is_tied(&self) -> bool {
        self.home_score == self.away_score
    }

    /// Put the ball at `spot` with a fresh first-down marker
    pub fn reset_drive(&mut self, spot: u8) {
        self.ball_position = spot.min(FIELD_LENGTH);
        self.first_down_marker = spot.saturating_add(FIRST_DOWN_YARDS).min(FIELD_LENGTH);
        self.down = Down::First;
    }

    /// Count of regular plays run so far
    pub fn plays_run(&self) -> usize {
        self.log
            .iter()
            .filter(|entry| entry.event == GameEvent::PlayRan)
            .count()
    }

    /// Winner and loser once the game is over; `None` while in progress
    pub fn summary(&self) -> Option<GameSummary> {
        if !self.game_over || self.is_tied() {
            return None;
        }

        let (winner, loser) = if self.home_score > self.away_score {
            (Possession::Home, Possession::Away)
        } else {
            (Possession::Away, Possession::Home)
        };

        Some(GameSummary {
            winner: self.team(winner).clone(),
            loser: self.team(loser).clone(),
            home_score: self.home_score,
            away_score: self.away_score,
            quarter: self.quarter,
            plays: self.plays_run(),
        })
    }
}

/// Final outcome of a finished game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSummary {
    pub winner: Team,
    pub loser: Team,
    pub home_score: u32,
    pub away_score: u32,
    pub quarter: Quarter,
    pub plays: usize,
}
