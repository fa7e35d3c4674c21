//! Gridiron command-line simulator
//!
//! Plays one game and writes the result as JSON to stdout.

use clap::Parser;
use gridiron::{
    api::models::{SimulateGameRequest, SimulateGameResponse, TeamPayload},
    GameSimulator, GridironError, GridironResult,
};
use std::io::Write;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "gridiron")]
#[command(about = "Simulate a single football game", long_about = None)]
struct Args {
    /// Home team name
    #[arg(long, default_value = "Home")]
    home: String,

    /// Home team overall rating (1-100)
    #[arg(long, default_value = "50")]
    home_overall: i64,

    /// Away team name
    #[arg(long, default_value = "Away")]
    away: String,

    /// Away team overall rating (1-100)
    #[arg(long, default_value = "50")]
    away_overall: i64,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Include the play-by-play log
    #[arg(long)]
    log: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> GridironResult<()> {
    gridiron::init_tracing("gridiron=warn");
    let args = Args::parse();

    let request = SimulateGameRequest {
        home_team: Some(TeamPayload {
            name: Some(args.home),
            overall: Some(args.home_overall),
        }),
        away_team: Some(TeamPayload {
            name: Some(args.away),
            overall: Some(args.away_overall),
        }),
    };
    let matchup = request.validate()?;

    let game = GameSimulator::new().simulate_seeded(matchup, args.seed);
    let response = SimulateGameResponse::from_game(Uuid::new_v4().to_string(), game, args.log)
        .ok_or(GridironError::Undecided)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}
