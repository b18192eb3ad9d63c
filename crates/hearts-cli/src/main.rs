use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use hearts_bot::ComputerStrategy;
use hearts_cli::config::TableConfig;
use hearts_cli::events::{Fanout, JsonEventLog};
use hearts_cli::logging::init_logging;
use hearts_cli::names::pick_names;
use hearts_cli::terminal::{ConsoleRenderer, Prompter, human_controller};
use hearts_core::AppInfo;
use hearts_core::game::match_state::MatchState;
use hearts_core::game::round::RoundObserver;
use hearts_core::model::player::{Player, PlayerPosition};

const HUMAN_SEAT: PlayerPosition = PlayerPosition::North;

/// Play Hearts against three computer opponents.
#[derive(Debug, Parser)]
#[command(name = "hearts", author, version, about = "Hearts for one human and three bots")]
struct Cli {
    /// Path to a YAML table configuration.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// RNG seed for deals and computer choices.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Maximum number of rounds to play.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Stop once any player reaches this total.
    #[arg(long, value_name = "POINTS")]
    target_score: Option<u32>,

    /// Name of the human player. Prompted for when neither this nor a config
    /// file is given.
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Let four computer players play without a human seat.
    #[arg(long, conflicts_with = "name")]
    autoplay: bool,

    /// Write every round event as a JSON line to this file.
    #[arg(long, value_name = "FILE")]
    json_events: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => TableConfig::from_path(path)?,
        None => TableConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(rounds) = cli.rounds {
        config.rounds = rounds;
    }
    if let Some(target) = cli.target_score {
        config.target_score = target;
    }
    if let Some(name) = cli.name {
        config.human = Some(name);
    }
    if let Some(path) = cli.json_events {
        config.logging.events_path = Some(path);
    }
    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;
    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, app = AppInfo::name(), version = AppInfo::version(), "starting table");

    // A config file without `human` asks for four computers; only a bare
    // command line prompts for a name.
    let human_name = match (cli.autoplay, config.human.clone(), cli.config.is_some()) {
        (true, _, _) | (false, None, true) => None,
        (false, Some(name), _) => Some(name),
        (false, None, false) => {
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
            Some(prompter.ask_name().context("reading player name")?)
        }
    };

    let mut name_rng = StdRng::seed_from_u64(seed);
    let opponents = config
        .opponents
        .clone()
        .unwrap_or_else(|| {
            let count = if human_name.is_some() { 3 } else { 4 };
            pick_names(&mut name_rng, count, human_name.as_deref())
        });
    let (players, names) = seat_players(human_name.as_deref(), &opponents);

    let human_seat = human_name.as_ref().map(|_| HUMAN_SEAT);
    let mut renderer = ConsoleRenderer::new(io::stdout(), names, human_seat, human_seat.is_some());
    let mut event_log = match config.logging.events_path.as_deref() {
        Some(path) => Some(JsonEventLog::new(BufWriter::new(
            hearts_cli::logging::create_file(path)?,
        ))),
        None => None,
    };

    let mut state = MatchState::with_target(players, seed, config.target_score)?;
    println!("Seed {seed}. Playing up to {} round(s).", config.rounds);
    while state.round_number() < config.rounds && !state.is_finished() {
        let mut observers: Vec<&mut dyn RoundObserver> = vec![&mut renderer];
        if let Some(log) = event_log.as_mut() {
            observers.push(log);
        }
        state.play_round(&mut Fanout(observers))?;
    }

    if let Some(log) = event_log {
        log.finish().context("writing event log")?;
    }

    println!("\nStandings after {} round(s):", state.round_number());
    for (player, total) in state.players().iter().zip(state.scores().standings()) {
        println!("  {:<12} {:>3}", player.name(), total);
    }
    let leader = state.leader();
    println!("{} leads.", state.players()[leader.index()].name());
    Ok(())
}

/// Builds the table in seat order; the human, if any, sits North.
fn seat_players(human: Option<&str>, opponents: &[String]) -> (Vec<Player>, [String; 4]) {
    let mut bots = opponents.iter();
    let mut players = Vec::with_capacity(4);
    let mut names: [String; 4] = Default::default();
    for seat in PlayerPosition::LOOP {
        let player = match human {
            Some(name) if seat == HUMAN_SEAT => {
                let prompter = Prompter::new(io::stdin().lock(), io::stdout());
                Player::new(name, true, human_controller(prompter))
            }
            _ => {
                let name = bots.next().cloned().unwrap_or_else(|| seat.to_string());
                Player::new(name, false, ComputerStrategy::boxed())
            }
        };
        names[seat.index()] = player.name().to_string();
        players.push(player);
    }
    (players, names)
}
