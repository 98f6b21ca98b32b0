use clap::Parser;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use triad::{Card, CardId, CardToPlay, Engine, Rules, Team};
use triad_bot_utils::{possible_placements, Bot};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot { rng }.run()
}

struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn new_game(&mut self, _team: Team, _rules: Rules) {}

    fn play_turn(&mut self, cards: Vec<Card>, engine: Engine) -> CardToPlay {
        let placements = possible_placements(&engine, &cards);
        // The judge only asks when there is an empty cell and a card in hand.
        // If it asks anyway, answer something and let it report the illegal move.
        match placements.choose(&mut self.rng) {
            Some(&placement) => placement,
            None => CardToPlay {
                card_id: cards.first().map(|c| c.id).unwrap_or(CardId(0)),
                row: 0,
                col: 0,
            },
        }
    }
}
