use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use judge::{play_game, Config, GameResult, Player, PlayerConfig, Recorder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use triad::{Rules, NUM_CELLS};
use triad_bot_utils::initialize_logging;

/// Plays every pair of bots against each other.
#[derive(Parser)]
struct Args {
    /// Paths to the players' JSON config files
    #[clap(num_args(2..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// Games per pair of players
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed for dealing and turn order
    #[arg(long)]
    seed: Option<u64>,

    /// Enable the Same rule
    #[arg(long)]
    same: bool,

    /// Enable the Plus rule
    #[arg(long)]
    plus: bool,

    /// End a matchup at its first illegal move instead of scoring it as a forfeit
    #[arg(short, long)]
    stop_on_illegal_move: bool,

    /// Write each game's requests and responses as JSON into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

/// Results of one pair of players, indexed like the players.
#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    forfeits: [usize; 2],
    ties: usize,
    /// Cells owned at the end of games that filled the board.
    cells: [usize; 2],
}

impl MatchScore {
    fn record(&mut self, result: &GameResult) {
        match *result {
            GameResult::WonByPlayer { player_idx, cells } => {
                self.wins[player_idx] += 1;
                self.add_cells(cells);
            }
            GameResult::Tie { cells } => {
                self.ties += 1;
                self.add_cells(cells);
            }
            GameResult::IllegalMoveByPlayer { player_idx, .. } => {
                self.wins[1 - player_idx] += 1;
                self.forfeits[player_idx] += 1;
            }
        }
    }

    fn add_cells(&mut self, cells: [usize; 2]) {
        self.cells[0] += cells[0];
        self.cells[1] += cells[1];
    }

    fn num_games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.ties
    }

    fn num_full_boards(&self) -> usize {
        (self.cells[0] + self.cells[1]) / NUM_CELLS
    }

    fn mean_cells(&self, player_idx: usize) -> f32 {
        self.cells[player_idx] as f32 / self.num_full_boards().max(1) as f32
    }
}

/// "outer: inner: innermost" for an error and its sources.
fn error_chain(err: &(dyn Error + 'static)) -> String {
    std::iter::successors(Some(err), |&e| e.source()).join(": ")
}

fn play_matchup(
    players: [&mut Player; 2],
    num_games: usize,
    config: &mut Config,
    stop_on_illegal_move: bool,
) -> anyhow::Result<MatchScore> {
    let [player_1, player_2] = players;
    let names = [player_1.name.clone(), player_2.name.clone()];
    let mut score = MatchScore::default();

    for game_idx in 0..num_games {
        let result = play_game(config, player_1, player_2)?;
        match &result {
            GameResult::WonByPlayer { player_idx, cells } => {
                debug!(game_idx, winner = names[*player_idx], ?cells);
            }
            GameResult::Tie { cells } => debug!(game_idx, ?cells, "Tie"),
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                warn!(
                    game_idx,
                    player = names[*player_idx],
                    "Illegal move: {}",
                    error_chain(err)
                );
                if stop_on_illegal_move {
                    break;
                }
            }
        }
        score.record(&result);
    }

    eprintln!("{} vs {} ({}):", names[0], names[1], config.rules);
    for idx in 0..2 {
        eprintln!(
            "- {}: {} wins, {} forfeits, {:.2} cells per full board",
            names[idx],
            score.wins[idx],
            score.forfeits[idx],
            score.mean_cells(idx)
        );
    }
    eprintln!("- {} ties", score.ties);

    Ok(score)
}

/// Prints players ordered by their share of wins over all their games.
fn print_leaderboard(player_configs: &[PlayerConfig], results: &[((usize, usize), MatchScore)]) {
    let mut totals = vec![(0usize, 0usize, 0usize); player_configs.len()];
    for ((i1, i2), score) in results {
        for (slot, idx) in [(*i1, 0), (*i2, 1)] {
            totals[slot].0 += score.wins[idx];
            totals[slot].1 += score.forfeits[idx];
            totals[slot].2 += score.num_games();
        }
    }

    println!("\n {:19} | {:>6} | {:>8} | {:>6}", "player", "wins", "forfeits", "win %");
    println!("{}", "-".repeat(50));
    let ranking = totals
        .iter()
        .enumerate()
        .sorted_by_key(|(_, (wins, _, games))| {
            std::cmp::Reverse(wins * 1000 / (*games).max(1))
        });
    for (idx, (wins, forfeits, games)) in ranking {
        println!(
            " {:19} | {:>6} | {:>8} | {:>5.1}%",
            player_configs[idx].nick,
            wins,
            forfeits,
            *wins as f32 / (*games).max(1) as f32 * 100.0
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    let rules = Rules {
        same: args.same,
        plus: args.plus,
    };
    info!(seed, %rules, "Starting tournament");

    let recorder = args
        .record_games_to_directory
        .map(Recorder::new)
        .transpose()?;
    let mut config = Config {
        rng: StdRng::seed_from_u64(seed),
        rules,
        recorder,
    };

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<anyhow::Result<Vec<PlayerConfig>>>()?;

    let mut results = Vec::new();
    for (i1, i2) in (0..player_configs.len()).tuple_combinations() {
        let mut player_1 = Player::from_config(&player_configs[i1])?;
        let mut player_2 = Player::from_config(&player_configs[i2])?;
        let score = play_matchup(
            [&mut player_1, &mut player_2],
            args.num_games,
            &mut config,
            args.stop_on_illegal_move,
        )?;
        player_1.bye()?;
        player_2.bye()?;
        results.push(((i1, i2), score));
    }

    if player_configs.len() > 2 {
        print_leaderboard(&player_configs, &results);
    }
    Ok(())
}
