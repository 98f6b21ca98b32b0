use std::collections::BTreeSet;

use crate::{
    CardToPlay, Coord, Engine, Hand, IllegalMove, NotTerminal, Outcome, PlacementRejected,
};

/// Summarizes the outcome of playing a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Normal {
        flipped: BTreeSet<Coord>,
    },
    /// The move filled the board.
    GameEnded {
        flipped: BTreeSet<Coord>,
        outcome: Outcome,
    },
}

/// Moves a card from the hand onto the board.
///
/// If the move is illegal, neither the hand nor the board is changed.
pub fn execute_turn(
    hand: &mut Hand,
    engine: &mut Engine,
    action: CardToPlay,
) -> Result<TurnOutcome, IllegalMove> {
    if engine.is_board_full() {
        return Err(IllegalMove::GameAlreadyOver);
    }
    let not_in_hand = IllegalMove::PlayedCardNotInHand {
        card_id: action.card_id,
    };

    // Validate before taking the card, so that the hand keeps its order
    let card = hand.get(action.card_id).ok_or(not_in_hand)?;
    if let Err(err) = engine.calculate(action.coord(), card) {
        return Err(IllegalMove::IllegalPlacement {
            card: card.clone(),
            err,
        });
    }

    let card = hand
        .take(action.card_id)
        .ok_or(IllegalMove::PlayedCardNotInHand {
            card_id: action.card_id,
        })?;
    let result = engine
        .place(action.coord(), card)
        .map_err(|PlacementRejected { card, reason }| IllegalMove::IllegalPlacement {
            card,
            err: reason,
        })?;

    match engine.winner() {
        Ok(outcome) => Ok(TurnOutcome::GameEnded {
            flipped: result.flipped,
            outcome,
        }),
        Err(NotTerminal { .. }) => Ok(TurnOutcome::Normal {
            flipped: result.flipped,
        }),
    }
}
