use crate::{Card, CardId, Coord};

/// The error type for placing a single card on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    OutOfBounds { coord: Coord },
    CellOccupied { coord: Coord, existing_card: CardId },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::OutOfBounds { coord } => {
                write!(f, "Card was placed at {}, outside of the board", coord)
            }
            IllegalPlacement::CellOccupied {
                coord,
                existing_card,
            } => write!(
                f,
                "Card was placed at {}, which is already occupied by card {}",
                coord, existing_card
            ),
        }
    }
}

/// Returned by [`Engine::place()`](crate::Engine::place) when the placement is illegal.
///
/// The board is left untouched, and the card is handed back.
#[derive(Debug)]
pub struct PlacementRejected {
    pub card: Card,
    pub reason: IllegalPlacement,
}

impl std::error::Error for PlacementRejected {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}

impl std::fmt::Display for PlacementRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not place card {}", self.card)
    }
}

/// The error type for [`Engine::winner()`](crate::Engine::winner) while cells are still empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotTerminal {
    pub empty_cells: usize,
}

impl std::error::Error for NotTerminal {}

impl std::fmt::Display for NotTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The game is not over yet, {} cells are still empty",
            self.empty_cells
        )
    }
}

/// The error type for one turn.
#[derive(Debug)]
pub enum IllegalMove {
    PlayedCardNotInHand { card_id: CardId },
    IllegalPlacement { card: Card, err: IllegalPlacement },
    GameAlreadyOver,
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::IllegalPlacement { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::PlayedCardNotInHand { card_id } => write!(
                f,
                "Tried to play card {}, which was not in the player's hand",
                card_id
            ),
            IllegalMove::IllegalPlacement { card, err: _ } => {
                write!(f, "Error placing card {}", card)
            }
            IllegalMove::GameAlreadyOver => {
                write!(f, "Tried to play a card after the board was full")
            }
        }
    }
}
