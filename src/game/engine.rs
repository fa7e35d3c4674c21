//! Step orchestrator and game loop
//!
//! Each step produces exactly one event chosen by [`StepMode`]. Special-teams
//! steps only log their event. A regular play runs these checks in order:
//!
//! 1. apply the play (clock, yardage)
//! 2. touchdown: stop; the try and kickoff are played even with no time left
//! 3. game over
//! 4. quarter advance
//! 5. first down and down cycle

use super::clock::{advance_quarter, check_game_over, run_clock};
use super::generator::{PlayGenerator, RandomPlayGenerator};
use super::possession::{
    advance_ball, advance_down, flip_possession, score_touchdown, update_first_down,
};
use super::state::{init_game, Game, Matchup};
use super::types::*;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

/// What the next step has to resolve, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    PendingExtraPoint,
    PendingKickoff,
    Regular,
}

impl StepMode {
    pub fn of(game: &Game) -> Self {
        if game.requires_extra_point {
            StepMode::PendingExtraPoint
        } else if game.requires_kickoff {
            StepMode::PendingKickoff
        } else {
            StepMode::Regular
        }
    }
}

/// How a step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    ExtraPoint { converted: bool },
    KickOff,
    GameOver,
    QuarterEnded,
    TouchDown,
    Play { first_down: bool },
}

/// Advance the game by one event
pub fn run_step<G, R>(game: &mut Game, generator: &mut G, rng: &mut R) -> StepOutcome
where
    G: PlayGenerator,
    R: Rng + ?Sized,
{
    debug_assert!(!game.game_over, "stepping a finished game");
    debug_assert!(game.clock <= QUARTER_SECONDS);
    debug_assert!(game.first_down_marker <= FIELD_LENGTH);

    match StepMode::of(game) {
        StepMode::PendingExtraPoint => run_extra_point(game, generator, rng),
        StepMode::PendingKickoff => run_kickoff(game, generator, rng),
        StepMode::Regular => run_regular_play(game, generator, rng),
    }
}

fn run_extra_point<G, R>(game: &mut Game, generator: &mut G, rng: &mut R) -> StepOutcome
where
    G: PlayGenerator,
    R: Rng + ?Sized,
{
    let call = generator.run_extra_point(game, rng);
    game.requires_extra_point = false;

    // only a try after a touchdown can score
    let converted = call.good && game.last_event() == Some(GameEvent::TouchDown);
    if converted {
        game.add_points(game.possession, EXTRA_POINT_POINTS);
    }

    let end = run_clock(game, call.elapsed);
    game.log
        .push(GameLog::new(GameEvent::ExtraPoint, end).with_conversion(converted));
    StepOutcome::ExtraPoint { converted }
}

fn run_kickoff<G, R>(game: &mut Game, generator: &mut G, rng: &mut R) -> StepOutcome
where
    G: PlayGenerator,
    R: Rng + ?Sized,
{
    let call = generator.run_kickoff(game, rng);
    game.requires_kickoff = false;
    flip_possession(game);

    let end = run_clock(game, call.elapsed);
    game.log.push(GameLog::new(GameEvent::KickOff, end));
    StepOutcome::KickOff
}

fn run_regular_play<G, R>(game: &mut Game, generator: &mut G, rng: &mut R) -> StepOutcome
where
    G: PlayGenerator,
    R: Rng + ?Sized,
{
    let call = generator.run_play(game, rng);
    let end = run_clock(game, call.elapsed);
    game.log
        .push(GameLog::new(GameEvent::PlayRan, end).with_yardage(call.yards));

    if advance_ball(game, call.yards) {
        debug!(team = %game.offense().name, quarter = %game.quarter, "touchdown");
        score_touchdown(game);
        return StepOutcome::TouchDown;
    }

    if check_game_over(game) {
        return StepOutcome::GameOver;
    }

    if advance_quarter(game) {
        // a first down earned on the last snap of a period still counts
        if update_first_down(game) {
            game.down = Down::First;
        }
        return StepOutcome::QuarterEnded;
    }

    let first_down = update_first_down(game);
    advance_down(game, first_down);
    StepOutcome::Play { first_down }
}

/// Step until the game is over. There is no step cap; a generator that can
/// never break a tie in overtime will never return.
pub fn run_to_completion<G, R>(mut game: Game, generator: &mut G, rng: &mut R) -> Game
where
    G: PlayGenerator,
    R: Rng + ?Sized,
{
    while !game.game_over {
        run_step(&mut game, generator, rng);
    }

    info!(
        home = %game.home_team.name,
        away = %game.away_team.name,
        home_score = game.home_score,
        away_score = game.away_score,
        quarter = %game.quarter,
        events = game.log.len(),
        "game finished"
    );
    game
}

/// Runs whole games with a fixed generator
#[derive(Debug, Clone, Default)]
pub struct GameSimulator<G = RandomPlayGenerator> {
    generator: G,
}

impl GameSimulator<RandomPlayGenerator> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: PlayGenerator> GameSimulator<G> {
    pub fn with_generator(generator: G) -> Self {
        Self { generator }
    }

    /// Play a full game with a caller-owned random source
    pub fn simulate<R: Rng + ?Sized>(&mut self, matchup: Matchup, rng: &mut R) -> Game {
        run_to_completion(init_game(matchup), &mut self.generator, rng)
    }

    /// Play a full game from a seed, or from entropy when none is given
    pub fn simulate_seeded(&mut self, matchup: Matchup, seed: Option<u64>) -> Game {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.simulate(matchup, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::generator::{ExtraPointCall, KickoffCall, PlayCall};
    use std::collections::VecDeque;

    /// Replays scripted plays; falls back to a fixed play once the script runs out
    #[derive(Default)]
    struct Scripted {
        plays: VecDeque<PlayCall>,
        fallback: Option<PlayCall>,
        extra_point_good: bool,
    }

    impl Scripted {
        fn plays(plays: &[(u32, i8)]) -> Self {
            Self {
                plays: plays
                    .iter()
                    .map(|&(elapsed, yards)| PlayCall { elapsed, yards })
                    .collect(),
                ..Default::default()
            }
        }
    }

    impl PlayGenerator for Scripted {
        fn run_play<R: Rng + ?Sized>(&mut self, _game: &Game, _rng: &mut R) -> PlayCall {
            self.plays
                .pop_front()
                .or(self.fallback)
                .unwrap_or(PlayCall { elapsed: 10, yards: 0 })
        }

        fn run_kickoff<R: Rng + ?Sized>(&mut self, _game: &Game, _rng: &mut R) -> KickoffCall {
            KickoffCall { elapsed: 5 }
        }

        fn run_extra_point<R: Rng + ?Sized>(
            &mut self,
            _game: &Game,
            _rng: &mut R,
        ) -> ExtraPointCall {
            ExtraPointCall {
                elapsed: 4,
                good: self.extra_point_good,
            }
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    /// A game past the opening extra point and kickoff
    fn in_play() -> Game {
        let mut game = init_game(Matchup {
            home: Team::new("Team1", 51),
            away: Team::new("Team2", 52),
        });
        game.requires_extra_point = false;
        game.requires_kickoff = false;
        game
    }

    fn new_events(game: &Game, before: usize) -> Vec<GameEvent> {
        game.log[before..].iter().map(|entry| entry.event).collect()
    }

    #[test]
    fn test_step_mode_priority() {
        let mut game = in_play();
        assert_eq!(StepMode::of(&game), StepMode::Regular);
        game.requires_kickoff = true;
        assert_eq!(StepMode::of(&game), StepMode::PendingKickoff);
        game.requires_extra_point = true;
        assert_eq!(StepMode::of(&game), StepMode::PendingExtraPoint);
    }

    #[test]
    fn test_quarter_boundary_step() {
        let mut game = in_play();
        game.clock = 0;
        let home_side = game.home_end_zone;
        let before = game.log.len();

        let outcome = run_step(&mut game, &mut Scripted::plays(&[(10, 0)]), &mut rng());

        assert_eq!(outcome, StepOutcome::QuarterEnded);
        assert_eq!(game.clock, QUARTER_SECONDS);
        assert_eq!(game.quarter, Quarter::Second);
        assert_eq!(game.home_end_zone, home_side.opposite());
        assert_eq!(game.away_end_zone, home_side);
        assert_eq!(
            new_events(&game, before),
            vec![GameEvent::PlayRan, GameEvent::EndOfQuarter]
        );
    }

    #[test]
    fn test_halftime_step() {
        let mut game = in_play();
        game.clock = 0;
        game.quarter = Quarter::Second;
        game.possession = Possession::Home;
        game.possession_at_half = Possession::Away;
        game.down = Down::Second;

        run_step(&mut game, &mut Scripted::plays(&[(10, 0)]), &mut rng());

        assert_eq!(game.quarter, Quarter::Third);
        assert_eq!(game.possession, Possession::Away);
        assert_eq!(game.down, Down::First);
    }

    #[test]
    fn test_tied_regulation_goes_to_overtime() {
        let mut game = in_play();
        game.clock = 0;
        game.quarter = Quarter::Fourth;
        game.home_score = 7;
        game.away_score = 7;
        let before = game.log.len();

        let outcome = run_step(&mut game, &mut Scripted::plays(&[(10, 0)]), &mut rng());

        assert_eq!(outcome, StepOutcome::QuarterEnded);
        assert_eq!(game.quarter, Quarter::Overtime(1));
        assert!(!game.game_over);
        assert_eq!(game.clock, 0);
        let events = new_events(&game, before);
        assert!(events.contains(&GameEvent::EndOfRegulationPlay));
        assert!(!events.contains(&GameEvent::EndOfQuarter));
    }

    #[test]
    fn test_decided_regulation_ends_game() {
        let mut game = in_play();
        game.clock = 0;
        game.quarter = Quarter::Fourth;
        game.home_score = 7;
        game.away_score = 0;

        let outcome = run_step(&mut game, &mut Scripted::plays(&[(10, 0)]), &mut rng());

        assert_eq!(outcome, StepOutcome::GameOver);
        assert!(game.game_over);
        assert_eq!(game.quarter, Quarter::Fourth);
        assert_eq!(game.last_event(), Some(GameEvent::EndOfGame));
    }

    #[test]
    fn test_fourth_down_turnover_step() {
        let mut game = in_play();
        game.down = Down::Fourth;
        game.possession = Possession::Home;
        game.ball_position = 40;
        game.first_down_marker = 45;

        let outcome = run_step(&mut game, &mut Scripted::plays(&[(10, 2)]), &mut rng());

        assert_eq!(outcome, StepOutcome::Play { first_down: false });
        assert_eq!(game.down, Down::First);
        assert_eq!(game.possession, Possession::Away);
        assert_eq!(game.ball_position, 58);
    }

    #[test]
    fn test_first_down_with_clamped_marker() {
        let mut game = in_play();
        game.ball_position = 90;
        game.first_down_marker = 92;
        game.down = Down::Third;

        let outcome = run_step(&mut game, &mut Scripted::plays(&[(10, 3)]), &mut rng());

        assert_eq!(outcome, StepOutcome::Play { first_down: true });
        assert_eq!(game.ball_position, 93);
        assert_eq!(game.first_down_marker, 100);
        assert_eq!(game.down, Down::First);
    }

    #[test]
    fn test_kickoff_step_changes_only_possession() {
        let mut game = in_play();
        game.requires_kickoff = true;
        game.down = Down::Third;
        game.ball_position = 50;
        game.first_down_marker = 55;
        let before = game.log.len();

        let outcome = run_step(&mut game, &mut Scripted::default(), &mut rng());

        assert_eq!(outcome, StepOutcome::KickOff);
        assert!(!game.requires_kickoff);
        assert_eq!(game.possession, Possession::Away);
        assert_eq!(new_events(&game, before), vec![GameEvent::KickOff]);
        assert_eq!(game.down, Down::Third);
        assert_eq!(game.ball_position, 50);
        assert_eq!(game.first_down_marker, 55);
        assert_eq!(game.quarter, Quarter::First);
    }

    #[test]
    fn test_opening_extra_point_never_scores() {
        let mut game = init_game(Matchup {
            home: Team::new("Team1", 51),
            away: Team::new("Team2", 52),
        });
        let mut generator = Scripted {
            extra_point_good: true,
            ..Default::default()
        };

        let first = run_step(&mut game, &mut generator, &mut rng());
        assert_eq!(first, StepOutcome::ExtraPoint { converted: false });
        assert_eq!(game.log.last().and_then(|e| e.converted), Some(false));
        assert!(!game.requires_extra_point);
        assert!(game.requires_kickoff);
        assert_eq!(game.possession, Possession::Home);
        assert_eq!(game.home_score, 0);

        let second = run_step(&mut game, &mut generator, &mut rng());
        assert_eq!(second, StepOutcome::KickOff);
        assert_eq!(game.possession, Possession::Away);
    }

    #[test]
    fn test_touchdown_then_extra_point_then_kickoff() {
        let mut game = in_play();
        game.ball_position = 95;
        game.first_down_marker = 100;
        let mut generator = Scripted {
            plays: [PlayCall { elapsed: 6, yards: 9 }].into(),
            extra_point_good: true,
            ..Default::default()
        };

        assert_eq!(run_step(&mut game, &mut generator, &mut rng()), StepOutcome::TouchDown);
        assert_eq!(game.home_score, 6);
        assert_eq!(game.down, Down::First);

        let pat = run_step(&mut game, &mut generator, &mut rng());
        assert_eq!(pat, StepOutcome::ExtraPoint { converted: true });
        assert_eq!(game.home_score, 7);
        assert_eq!(game.log.last().and_then(|e| e.converted), Some(true));

        assert_eq!(run_step(&mut game, &mut generator, &mut rng()), StepOutcome::KickOff);
        assert_eq!(game.possession, Possession::Away);
        assert_eq!(game.ball_position, RESTART_SPOT);
    }

    #[test]
    fn test_overtime_touchdown_ends_game() {
        let mut game = in_play();
        game.clock = 0;
        game.quarter = Quarter::Overtime(1);
        game.possession = Possession::Away;
        game.ball_position = 98;
        game.first_down_marker = 100;

        let mut generator = Scripted {
            plays: [PlayCall { elapsed: 7, yards: 5 }].into(),
            extra_point_good: true,
            ..Default::default()
        };
        let mut rng = rng();

        assert_eq!(run_step(&mut game, &mut generator, &mut rng), StepOutcome::TouchDown);
        assert!(!game.game_over);
        assert_eq!(
            run_step(&mut game, &mut generator, &mut rng),
            StepOutcome::ExtraPoint { converted: true }
        );
        assert_eq!(run_step(&mut game, &mut generator, &mut rng), StepOutcome::KickOff);
        assert_eq!(game.clock, 0);

        assert_eq!(run_step(&mut game, &mut generator, &mut rng), StepOutcome::GameOver);
        assert_eq!(game.away_score, 7);
        assert_eq!(game.quarter, Quarter::Overtime(1));
        let summary = game.summary().expect("game is decided");
        assert_eq!(summary.winner.name, "Team2");
    }

    #[test]
    fn test_touchdown_on_last_snap_of_half_keeps_the_try() {
        let mut game = in_play();
        game.quarter = Quarter::Second;
        game.clock = 8;
        game.possession = Possession::Home;
        game.possession_at_half = Possession::Away;
        game.ball_position = 92;
        let mut generator = Scripted {
            plays: [PlayCall { elapsed: 20, yards: 10 }].into(),
            extra_point_good: true,
            ..Default::default()
        };
        let mut rng = rng();

        assert_eq!(run_step(&mut game, &mut generator, &mut rng), StepOutcome::TouchDown);
        assert_eq!(game.quarter, Quarter::Second);
        assert_eq!(
            run_step(&mut game, &mut generator, &mut rng),
            StepOutcome::ExtraPoint { converted: true }
        );
        assert_eq!(game.home_score, 7);
        assert_eq!(run_step(&mut game, &mut generator, &mut rng), StepOutcome::KickOff);

        assert_eq!(run_step(&mut game, &mut generator, &mut rng), StepOutcome::QuarterEnded);
        assert_eq!(game.quarter, Quarter::Third);
        assert_eq!(game.possession, Possession::Away);
    }

    #[test]
    fn test_run_to_completion_with_scoring_script() {
        let game = init_game(Matchup {
            home: Team::new("Team1", 51),
            away: Team::new("Team2", 52),
        });
        // every play gains 8 yards, so each drive ends in a touchdown
        let mut generator = Scripted {
            fallback: Some(PlayCall { elapsed: 30, yards: 8 }),
            extra_point_good: true,
            ..Default::default()
        };

        let finished = run_to_completion(game, &mut generator, &mut rng());

        assert!(finished.game_over);
        assert!(!finished.is_tied());
        assert_eq!(finished.last_event(), Some(GameEvent::EndOfGame));
        assert!(finished.quarter.is_final_stretch());
    }

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let matchup = Matchup {
            home: Team::new("Team1", 70),
            away: Team::new("Team2", 72),
        };
        let first = GameSimulator::new().simulate_seeded(matchup.clone(), Some(99));
        let second = GameSimulator::new().simulate_seeded(matchup, Some(99));
        assert_eq!(first, second);
    }
}
