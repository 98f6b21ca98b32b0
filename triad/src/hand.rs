use rand::rngs::StdRng;
use rand::Rng;

use crate::{Card, CardId, Strengths, Team, MAX_STRENGTH, MIN_STRENGTH};

/// How many cards each team starts with.
pub const HAND_SIZE: usize = 5;

/// The cards a team has not placed yet.
///
/// A hand only ever shrinks. Cards leave it by being moved onto the board.
#[derive(Clone, Debug)]
pub struct Hand {
    pub team: Team,
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(team: Team, cards: Vec<Card>) -> Self {
        Self { team, cards }
    }

    /// Deals a fresh hand of random cards with ids starting at `first_id`.
    pub fn deal(team: Team, first_id: u8, rng: &mut StdRng) -> Self {
        let cards = (0..HAND_SIZE as u8)
            .map(|offset| {
                let strengths =
                    Strengths(std::array::from_fn(|_| rng.gen_range(MIN_STRENGTH..=MAX_STRENGTH)));
                Card::new(CardId(first_id + offset), team, strengths)
            })
            .collect();
        Self { team, cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Removes the card with the given id from the hand.
    pub fn take(&mut self, id: CardId) -> Option<Card> {
        let idx = self.cards.iter().position(|card| card.id == id)?;
        Some(self.cards.remove(idx))
    }
}
