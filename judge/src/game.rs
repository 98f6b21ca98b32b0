use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};
use triad::{
    execute_turn, visualize_board, CardToPlay, Engine, Hand, IllegalMove, Okay, Outcome, Request,
    Team, TurnOutcome, HAND_SIZE,
};

use crate::player::{Connection, PlayerWithGameState};
use crate::Config;

pub enum GameResult {
    /// `cells` is how many cells each player owned on the full board.
    WonByPlayer { player_idx: usize, cells: [usize; 2] },
    Tie { cells: [usize; 2] },
    IllegalMoveByPlayer { player_idx: usize, err: IllegalMove },
}

/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game<C: Connection>(
    config: &mut Config,
    player_1: &mut C,
    player_2: &mut C,
) -> anyhow::Result<GameResult> {
    let Config {
        rng,
        rules,
        recorder,
    } = config;

    // Assign one player team A and the other team B randomly
    let teams = {
        let mut arr = [Team::A, Team::B];
        arr.shuffle(rng);
        arr
    };

    // Card ids are unique across both hands
    let first_id = |team: Team| match team {
        Team::A => 0,
        Team::B => HAND_SIZE as u8,
    };
    let hand_1 = Hand::deal(teams[0], first_id(teams[0]), rng);
    let hand_2 = Hand::deal(teams[1], first_id(teams[1]), rng);
    // Bundle everything up in a PlayerWithGameState struct, which tracks the player's hand during this game
    let mut players = [
        PlayerWithGameState::new(player_1, hand_1),
        PlayerWithGameState::new(player_2, hand_2),
    ];

    // Inform the players about the new game, so that they can reset their state
    for (player, &team) in players.iter_mut().zip(&teams) {
        let _: Okay = player.perform_request(
            recorder,
            &Request::NewGame {
                team,
                rules: *rules,
            },
        )?;
    }

    let mut engine = Engine::new(*rules);

    // Randomly pick a starting player
    let mut current_player_idx = if rng.gen::<bool>() { 1 } else { 0 };

    let game_result = loop {
        let current_player = &mut players[current_player_idx];
        let req = Request::PlayTurn {
            cards: current_player.hand.cards().to_vec(),
            fields: engine.board().to_fields_vec(),
        };
        let action: CardToPlay = current_player.perform_request(recorder, &req)?;
        match execute_turn(&mut current_player.hand, &mut engine, action) {
            Ok(TurnOutcome::Normal { flipped }) => {
                trace!(player_idx = current_player_idx, ?flipped, "Turn played");
            }
            Ok(TurnOutcome::GameEnded { flipped, outcome }) => {
                trace!(player_idx = current_player_idx, ?flipped, "Last turn played");
                let cells = teams.map(|team| engine.board().count_owned_by(team));
                // Report who won
                break match outcome {
                    Outcome::Winner(team) if team == teams[0] => GameResult::WonByPlayer {
                        player_idx: 0,
                        cells,
                    },
                    Outcome::Winner(_) => GameResult::WonByPlayer {
                        player_idx: 1,
                        cells,
                    },
                    Outcome::Draw => GameResult::Tie { cells },
                };
            }
            Err(err) => {
                break GameResult::IllegalMoveByPlayer {
                    player_idx: current_player_idx,
                    err,
                }
            }
        };
        current_player_idx = 1 - current_player_idx;
    };
    debug!("Final board:\n{}", visualize_board(engine.board()));

    // Forfeited games are recorded too
    if let Some(rec) = recorder {
        rec.write_game_recording(*rules)?;
    }

    Ok(game_result)
}
