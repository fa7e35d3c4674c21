//! Clock and quarter rules
//!
//! Both checks only fire when the clock has run out. `check_game_over` must be
//! evaluated before `advance_quarter` on every regular play, otherwise a
//! decided fourth quarter would roll into overtime.

use super::state::Game;
use super::types::{Down, GameEvent, Quarter, QUARTER_SECONDS, RESTART_SPOT};
use tracing::debug;

/// Subtract `elapsed` seconds from the clock, saturating at zero.
/// Returns the new clock value.
pub fn run_clock(game: &mut Game, elapsed: u32) -> u32 {
    game.clock = game.clock.saturating_sub(elapsed);
    game.clock
}

/// End the game when time has expired in the fourth quarter or overtime and
/// the scores differ.
pub fn check_game_over(game: &mut Game) -> bool {
    if game.clock != 0 || !game.quarter.is_final_stretch() || game.is_tied() {
        return false;
    }

    game.game_over = true;
    game.push_event(GameEvent::EndOfGame);
    debug!(
        quarter = %game.quarter,
        home = game.home_score,
        away = game.away_score,
        "final whistle"
    );
    true
}

/// Move to the next period once the clock reaches zero.
///
/// Halftime hands the ball to `possession_at_half` at the restart spot.
/// Entering overtime keeps the expired clock, so overtime is untimed; once in
/// overtime this is a no-op.
pub fn advance_quarter(game: &mut Game) -> bool {
    if game.clock != 0 || game.quarter.is_overtime() {
        return false;
    }

    if game.quarter == Quarter::Second {
        game.possession = game.possession_at_half;
        game.reset_drive(RESTART_SPOT);
    }

    game.quarter = game.quarter.next();

    if game.quarter.is_overtime() {
        game.down = Down::First;
        game.push_event(GameEvent::EndOfRegulationPlay);
        debug!(score = game.home_score, "regulation ended tied, going to overtime");
        return true;
    }

    flip_end_zones(game);
    game.clock = QUARTER_SECONDS;
    game.push_event(GameEvent::EndOfQuarter);
    debug!(quarter = %game.quarter, "quarter started");
    true
}

/// Teams switch ends between quarters
pub fn flip_end_zones(game: &mut Game) {
    game.home_end_zone = game.home_end_zone.opposite();
    game.away_end_zone = game.away_end_zone.opposite();
}
