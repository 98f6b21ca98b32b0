use serde::{Deserialize, Serialize};

use crate::{Card, CardId, Coord, Rules, Team};

/// Request for a bot to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame { team: Team, rules: Rules },
    /// Request to place one card.
    ///
    /// The response should be a [`CardToPlay`].
    PlayTurn {
        /// The cards still in the player's hand.
        cards: Vec<Card>,
        /// The occupied cells of the board, in row-major order.
        fields: Vec<Field>,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

/// A single occupied cell on the board, including coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub row: u8,
    pub col: u8,
    pub card: Card,
}

impl Field {
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

/// Specifies which card from the hand to play, and where.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardToPlay {
    pub card_id: CardId,
    pub row: u8,
    pub col: u8,
}

impl CardToPlay {
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}
