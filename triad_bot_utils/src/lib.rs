use tracing::trace;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use triad::{Card, CardToPlay, Coord, Engine, Okay, Request, Rules, Team};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, team: Team, rules: Rules);

    /// Picks a card from `cards` and an empty cell for it.
    ///
    /// The engine is a copy of the current game, so it can be used to
    /// try out placements.
    fn play_turn(&mut self, cards: Vec<Card>, engine: Engine) -> CardToPlay;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();
        let mut rules = Rules::default();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;
            trace!(request = buf.trim_end(), "Received request");

            match req {
                Request::NewGame { team, rules: new_rules } => {
                    rules = new_rules;
                    self.new_game(team, rules);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::PlayTurn { cards, fields } => {
                    let engine = Engine::from_fields(rules, &fields)?;
                    serde_json::to_writer(&mut stdout, &self.play_turn(cards, engine))?
                }
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}

/// Every legal placement of a card from `cards`.
pub fn possible_placements(engine: &Engine, cards: &[Card]) -> Vec<CardToPlay> {
    let mut placements = Vec::new();
    for card in cards {
        placements.extend(engine.board().empty_cells().map(|Coord { row, col }| CardToPlay {
            card_id: card.id,
            row,
            col,
        }));
    }
    placements
}

/// Logs to stderr, since stdout is reserved for talking to the judge.
pub fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use triad::{CardId, Field};

    #[test]
    fn placements_cover_every_card_and_empty_cell() {
        let fields = vec![Field {
            row: 1,
            col: 1,
            card: Card::new(CardId(0), Team::A, "5555".parse().unwrap()),
        }];
        let engine = Engine::from_fields(Rules::default(), &fields).unwrap();
        let cards = vec![
            Card::new(CardId(5), Team::B, "1111".parse().unwrap()),
            Card::new(CardId(6), Team::B, "2222".parse().unwrap()),
        ];
        let placements = possible_placements(&engine, &cards);
        assert_eq!(placements.len(), 16);
        assert!(placements
            .iter()
            .all(|p| engine.calculate(p.coord(), &cards[0]).is_ok()));
        assert!(!placements.iter().any(|p| p.coord() == Coord::new(1, 1)));
    }
}
