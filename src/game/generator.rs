//! Play generation strategy
//!
//! A generator only decides what happens on the field: how long the event
//! took, how many yards a play gained, whether an extra point was good. All
//! state changes are applied by the engine, so a scripted generator can stand
//! in for randomness in tests.

use super::state::Game;
use rand::Rng;
use std::ops::RangeInclusive;

/// Seconds a regular play takes
pub const PLAY_SECONDS: RangeInclusive<u32> = 5..=41;

/// Seconds a kickoff or extra point takes
pub const SPECIAL_TEAMS_SECONDS: RangeInclusive<u32> = 3..=12;

/// Base yardage range before the rating adjustment
pub const PLAY_YARDS: RangeInclusive<i8> = -3..=12;

/// Largest shift a rating gap can apply to a play's yardage
pub const MAX_RATING_EDGE: i8 = 3;

pub const EXTRA_POINT_SUCCESS_RATE: f64 = 0.94;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayCall {
    pub elapsed: u32,
    pub yards: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KickoffCall {
    pub elapsed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraPointCall {
    pub elapsed: u32,
    pub good: bool,
}

/// Produces the outcome of each atomic event
pub trait PlayGenerator {
    fn run_play<R: Rng + ?Sized>(&mut self, game: &Game, rng: &mut R) -> PlayCall;

    fn run_kickoff<R: Rng + ?Sized>(&mut self, game: &Game, rng: &mut R) -> KickoffCall;

    fn run_extra_point<R: Rng + ?Sized>(&mut self, game: &Game, rng: &mut R) -> ExtraPointCall;
}

/// Default generator drawing every outcome from the supplied RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlayGenerator;

impl RandomPlayGenerator {
    /// Yardage shift from the offense/defense rating gap
    fn rating_edge(game: &Game) -> i8 {
        let gap = i16::from(game.offense().overall) - i16::from(game.defense().overall);
        let edge = (gap / 10).clamp(-i16::from(MAX_RATING_EDGE), i16::from(MAX_RATING_EDGE));
        edge as i8
    }
}

impl PlayGenerator for RandomPlayGenerator {
    fn run_play<R: Rng + ?Sized>(&mut self, game: &Game, rng: &mut R) -> PlayCall {
        let base = rng.gen_range(PLAY_YARDS);
        PlayCall {
            elapsed: rng.gen_range(PLAY_SECONDS),
            yards: base + Self::rating_edge(game),
        }
    }

    fn run_kickoff<R: Rng + ?Sized>(&mut self, _game: &Game, rng: &mut R) -> KickoffCall {
        KickoffCall {
            elapsed: rng.gen_range(SPECIAL_TEAMS_SECONDS),
        }
    }

    fn run_extra_point<R: Rng + ?Sized>(&mut self, _game: &Game, rng: &mut R) -> ExtraPointCall {
        ExtraPointCall {
            elapsed: rng.gen_range(SPECIAL_TEAMS_SECONDS),
            good: rng.gen_bool(EXTRA_POINT_SUCCESS_RATE),
        }
    }
}
