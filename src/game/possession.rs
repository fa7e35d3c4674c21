//! Possession, downs and field position
//!
//! Field position is measured from the offense's own goal line, so 100 is
//! always the goal line the offense is attacking.

use super::state::Game;
use super::types::*;

/// Move the ball by a signed number of yards, clamped to the field.
/// Returns true when the ball crossed the goal line.
pub fn advance_ball(game: &mut Game, yards: i8) -> bool {
    let spot = i16::from(game.ball_position) + i16::from(yards);
    game.ball_position = spot.clamp(0, i16::from(FIELD_LENGTH)) as u8;
    game.ball_position == FIELD_LENGTH
}

/// Credit a touchdown to the offense and queue the extra point and kickoff.
pub fn score_touchdown(game: &mut Game) {
    let scorer = game.possession;
    game.add_points(scorer, TOUCHDOWN_POINTS);
    game.push_event(GameEvent::TouchDown);
    game.requires_extra_point = true;
    game.requires_kickoff = true;
    game.reset_drive(RESTART_SPOT);
}

/// Move the marker when the ball has gone past it.
pub fn update_first_down(game: &mut Game) -> bool {
    if game.ball_position <= game.first_down_marker {
        return false;
    }

    game.first_down_marker = game
        .ball_position
        .saturating_add(FIRST_DOWN_YARDS)
        .min(FIELD_LENGTH);
    true
}

/// Step the down cycle. Failing on fourth down turns the ball over.
pub fn advance_down(game: &mut Game, first_down_achieved: bool) {
    if first_down_achieved {
        game.down = Down::First;
        return;
    }

    game.down = match game.down {
        Down::First => Down::Second,
        Down::Second => Down::Third,
        Down::Third => Down::Fourth,
        Down::Fourth => {
            flip_possession(game);
            mirror_field(game);
            Down::First
        }
    };
}

pub fn flip_possession(game: &mut Game) {
    game.possession = game.possession.other();
}

/// Re-measure the spot from the new offense's goal line
fn mirror_field(game: &mut Game) {
    let spot = FIELD_LENGTH - game.ball_position;
    game.reset_drive(spot);
}
