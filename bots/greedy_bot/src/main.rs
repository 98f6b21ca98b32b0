use clap::Parser;
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, SeedableRng};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use triad::{Card, CardId, CardToPlay, Engine, Rules, Team};
use triad_bot_utils::{initialize_logging, possible_placements, Bot};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    GreedyBot { rng }.run()
}

struct GreedyBot {
    rng: StdRng,
}

impl GreedyBot {
    /// The placements that flip the most cards.
    fn best_placements(&self, engine: &Engine, cards: &[Card]) -> Vec<CardToPlay> {
        let mut top_choices: Vec<CardToPlay> = Vec::new();
        let mut top_score = 0;
        for placement in possible_placements(engine, cards) {
            let Some(card) = cards.iter().find(|c| c.id == placement.card_id) else {
                continue;
            };
            let Ok(calculation) = engine.calculate(placement.coord(), card) else {
                continue;
            };
            let score = calculation.flipped().len();
            match score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    top_choices.push(placement);
                }
                std::cmp::Ordering::Greater => {
                    top_choices = vec![placement];
                    top_score = score;
                }
            }
        }
        debug!(top_score, num_choices = top_choices.len(), "Evaluated placements");
        top_choices
    }
}

impl Bot for GreedyBot {
    fn new_game(&mut self, team: Team, rules: Rules) {
        debug!(%team, %rules, "New game");
    }

    fn play_turn(&mut self, cards: Vec<Card>, engine: Engine) -> CardToPlay {
        let choices = self.best_placements(&engine, &cards);
        match choices.choose(&mut self.rng) {
            Some(&placement) => placement,
            // Nothing to play. The judge will report this as an illegal move.
            None => CardToPlay {
                card_id: cards.first().map(|c| c.id).unwrap_or(CardId(0)),
                row: 0,
                col: 0,
            },
        }
    }
}
