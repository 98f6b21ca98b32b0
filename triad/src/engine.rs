use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    Board, CaptureCalculation, Card, Coord, Field, IllegalPlacement, NotTerminal,
    PlacementRejected, Rules, Team, NUM_CELLS,
};

/// The result of a game with a full board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Team),
    Draw,
}

/// What happened when a card was placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementResult {
    /// Cells whose card changed owner. Never contains the placed cell itself.
    pub flipped: BTreeSet<Coord>,
    /// Whether this placement filled the last empty cell.
    pub board_full: bool,
}

/// A single game: the board plus the rules it is played with.
///
/// The engine owns the board. Hands are the caller's business; a card is
/// moved into the engine by [`Engine::place()`].
#[derive(Clone, Debug)]
pub struct Engine {
    board: Board,
    rules: Rules,
}

impl Engine {
    /// Starts a new game on an empty board.
    pub fn new(rules: Rules) -> Self {
        Self {
            board: Board::new(),
            rules,
        }
    }

    /// Resumes a game from a list of occupied fields.
    pub fn from_fields(rules: Rules, fields: &[Field]) -> Result<Self, IllegalPlacement> {
        Ok(Self {
            board: Board::from_fields(fields)?,
            rules,
        })
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn card_at(&self, coord: impl Into<Coord>) -> Option<&Card> {
        self.board.card_at(coord.into())
    }

    /// Calculate placing a card and return the effects that this would have.
    ///
    /// This does not modify the board, so it can be used to try out moves.
    /// The card is captured for its current owner.
    pub fn calculate(
        &self,
        coord: impl Into<Coord>,
        card: &Card,
    ) -> Result<CaptureCalculation, IllegalPlacement> {
        let coord = coord.into();
        self.board.check_placement(coord)?;
        Ok(CaptureCalculation::new(&self.board, self.rules, coord, card))
    }

    /// Places a card on an empty cell and flips the neighbors it captures.
    ///
    /// If the placement is illegal, nothing changes and the card is returned
    /// as part of the error.
    pub fn place(
        &mut self,
        coord: impl Into<Coord>,
        card: Card,
    ) -> Result<PlacementResult, PlacementRejected> {
        let calculation = match self.calculate(coord, &card) {
            Ok(calculation) => calculation,
            Err(reason) => return Err(PlacementRejected { card, reason }),
        };
        trace!(
            card = %card,
            coord = %calculation.coord,
            basic = ?calculation.basic,
            same = ?calculation.same,
            plus = ?calculation.plus,
            "Placing card"
        );
        Ok(self.execute(calculation, card))
    }

    fn execute(&mut self, calculation: CaptureCalculation, card: Card) -> PlacementResult {
        self.board.put(calculation.coord, card);
        for &coord in calculation.flipped() {
            if let Some(neighbor) = self.board.card_at_mut(coord) {
                neighbor.set_owner(calculation.team);
            }
        }
        PlacementResult {
            flipped: calculation.flipped().clone(),
            board_full: self.board.is_full(),
        }
    }

    pub fn is_board_full(&self) -> bool {
        self.board.is_full()
    }

    /// The number of cells currently owned by team A and team B.
    pub fn score(&self) -> (usize, usize) {
        (
            self.board.count_owned_by(Team::A),
            self.board.count_owned_by(Team::B),
        )
    }

    /// Who owns the majority of the board. Only available once the board is full.
    pub fn winner(&self) -> Result<Outcome, NotTerminal> {
        let occupied = self.board.num_occupied();
        if occupied < NUM_CELLS {
            return Err(NotTerminal {
                empty_cells: NUM_CELLS - occupied,
            });
        }
        let (a, b) = self.score();
        Ok(match a.cmp(&b) {
            Ordering::Greater => Outcome::Winner(Team::A),
            Ordering::Less => Outcome::Winner(Team::B),
            Ordering::Equal => Outcome::Draw,
        })
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::{ArbitraryBoard, ArbitraryPlacement};
    use crate::{strengths, CardId};

    fn card(id: u8, owner: Team, s: &str) -> Card {
        Card::new(CardId(id), owner, s.parse().unwrap())
    }

    fn coords(cs: &[(u8, u8)]) -> BTreeSet<Coord> {
        cs.iter().map(|&c| Coord::from(c)).collect()
    }

    quickcheck! {
        fn placed_card_is_on_the_board(input: ArbitraryPlacement) -> bool {
            let mut engine = Engine::from_fields(input.rules, &input.fields).unwrap();
            let id = input.card.id;
            match engine.place(input.coord, input.card) {
                Ok(result) => {
                    engine.card_at(input.coord).map(|c| c.id) == Some(id)
                        && !result.flipped.contains(&input.coord)
                        && result.board_full == (input.fields.len() + 1 == NUM_CELLS)
                }
                Err(_) => false,
            }
        }

        fn flipped_cells_end_up_with_the_placing_team(input: ArbitraryPlacement) -> bool {
            let mut engine = Engine::from_fields(input.rules, &input.fields).unwrap();
            let team = input.card.owner();
            let before = engine.board().clone();
            let result = engine.place(input.coord, input.card).unwrap();
            let consistent = before.iter().all(|(coord, old)| {
                let new = engine.card_at(coord).unwrap();
                let changed = old.owner() != new.owner();
                new.strengths() == old.strengths()
                    && changed == result.flipped.contains(&coord)
                    && (!changed || new.owner() == team)
            });
            consistent
        }

        fn occupied_cells_reject_placement(input: ArbitraryBoard) -> bool {
            let mut engine = Engine::from_fields(input.rules, &input.fields).unwrap();
            input.fields.iter().all(|field| {
                let intruder = Card::new(CardId(200), Team::A, strengths!("9999"));
                match engine.place(field.coord(), intruder) {
                    Err(PlacementRejected { card, reason: IllegalPlacement::CellOccupied { .. } }) => {
                        card.id == CardId(200)
                            && engine.board().to_fields_vec() == input.fields
                    }
                    _ => false,
                }
            })
        }
    }

    #[test]
    fn place_then_card_at() {
        let mut engine = Engine::new(Rules::BASIC);
        let result = engine.place((2, 0), card(4, Team::B, "1234")).unwrap();
        assert!(result.flipped.is_empty());
        assert!(!result.board_full);
        let placed = engine.card_at((2, 0)).unwrap();
        assert_eq!(placed.id, CardId(4));
        assert_eq!(placed.owner(), Team::B);
        assert!(engine.card_at((0, 0)).is_none());
    }

    #[test]
    fn invalid_placements_change_nothing() {
        let mut engine = Engine::new(Rules::BASIC);
        engine.place((1, 1), card(0, Team::A, "5555")).unwrap();

        let err = engine.place((1, 1), card(1, Team::B, "9999")).unwrap_err();
        assert_eq!(
            err.reason,
            IllegalPlacement::CellOccupied {
                coord: Coord::new(1, 1),
                existing_card: CardId(0)
            }
        );
        assert_eq!(err.card.id, CardId(1));
        assert_eq!(engine.card_at((1, 1)).unwrap().id, CardId(0));

        let err = engine.place((0, 3), card(1, Team::B, "9999")).unwrap_err();
        assert_eq!(
            err.reason,
            IllegalPlacement::OutOfBounds {
                coord: Coord::new(0, 3)
            }
        );
        assert_eq!(engine.board().num_occupied(), 1);
        assert_eq!(engine.score(), (1, 0));
    }

    #[test]
    fn basic_flip_above() {
        let mut engine = Engine::new(Rules::BASIC);
        engine.place((0, 1), card(5, Team::B, "1111")).unwrap();
        let result = engine.place((1, 1), card(0, Team::A, "9111")).unwrap();
        assert_eq!(result.flipped, coords(&[(0, 1)]));
        assert_eq!(engine.card_at((0, 1)).unwrap().owner(), Team::A);
        assert_eq!(engine.score(), (2, 0));
    }

    #[test]
    fn basic_weak_card_does_not_flip() {
        let mut engine = Engine::new(Rules::BASIC);
        engine.place((0, 1), card(5, Team::B, "1911")).unwrap();
        let result = engine.place((1, 1), card(0, Team::A, "1111")).unwrap();
        assert!(result.flipped.is_empty());

        // Equal strengths never flip under the basic rule
        let result = engine.place((1, 0), card(6, Team::B, "9911")).unwrap();
        assert!(result.flipped.is_empty());
        assert_eq!(engine.score(), (1, 2));
    }

    #[test]
    fn same_rule_scenario() {
        let fields = [
            Field {
                row: 0,
                col: 1,
                card: card(5, Team::B, "1511"),
            },
            Field {
                row: 1,
                col: 0,
                card: card(6, Team::B, "1115"),
            },
        ];

        let mut engine = Engine::from_fields(Rules::BASIC, &fields).unwrap();
        let result = engine.place((1, 1), card(0, Team::A, "5151")).unwrap();
        assert!(result.flipped.is_empty());

        let same = Rules {
            same: true,
            plus: false,
        };
        let mut engine = Engine::from_fields(same, &fields).unwrap();
        let result = engine.place((1, 1), card(0, Team::A, "5151")).unwrap();
        assert_eq!(result.flipped, coords(&[(0, 1), (1, 0)]));

        // With only one matching neighbor, nothing flips
        let mut engine = Engine::from_fields(same, &fields[..1]).unwrap();
        let result = engine.place((1, 1), card(0, Team::A, "5151")).unwrap();
        assert!(result.flipped.is_empty());
    }

    #[test]
    fn plus_rule_flips_both_neighbors() {
        let plus = Rules {
            same: false,
            plus: true,
        };
        let mut engine = Engine::new(plus);
        engine.place((1, 2), card(5, Team::B, "9959")).unwrap();
        engine.place((2, 1), card(6, Team::B, "4999")).unwrap();
        // right: 2 + 5, bottom: 3 + 4
        let result = engine.place((1, 1), card(0, Team::A, "1312")).unwrap();
        assert_eq!(result.flipped, coords(&[(1, 2), (2, 1)]));
        assert_eq!(engine.score(), (3, 0));
    }

    #[test]
    fn captured_cards_can_be_recaptured() {
        let mut engine = Engine::new(Rules::BASIC);
        engine.place((0, 0), card(0, Team::A, "1111")).unwrap();
        let result = engine.place((0, 1), card(5, Team::B, "1111")).unwrap();
        assert!(result.flipped.is_empty());
        let result = engine.place((1, 1), card(1, Team::A, "9111")).unwrap();
        assert_eq!(result.flipped, coords(&[(0, 1)]));
        let result = engine.place((0, 2), card(6, Team::B, "1191")).unwrap();
        assert_eq!(result.flipped, coords(&[(0, 1)]));
        assert_eq!(engine.card_at((0, 1)).unwrap().owner(), Team::B);
    }

    #[test]
    fn winner_only_when_full() {
        let mut engine = Engine::new(Rules::BASIC);
        assert_eq!(engine.winner(), Err(NotTerminal { empty_cells: 9 }));

        let mut id = 0;
        for coord in Coord::all() {
            assert!(!engine.is_board_full());
            assert!(engine.winner().is_err());
            // Team A gets the corners and the center, nothing is ever captured
            let owner = if (coord.row + coord.col) % 2 == 0 {
                Team::A
            } else {
                Team::B
            };
            let result = engine.place(coord, card(id, owner, "1111")).unwrap();
            assert!(result.flipped.is_empty());
            assert_eq!(result.board_full, coord == Coord::new(2, 2));
            id += 1;
        }
        assert!(engine.is_board_full());
        assert_eq!(engine.score(), (5, 4));
        assert_eq!(engine.winner(), Ok(Outcome::Winner(Team::A)));

        // Still full after a failed placement
        assert!(engine.place((0, 0), card(id, Team::B, "9999")).is_err());
        assert!(engine.is_board_full());
    }

    #[test]
    fn winner_is_team_b_with_majority() {
        let fields: Vec<Field> = Coord::all()
            .enumerate()
            .map(|(idx, coord)| Field {
                row: coord.row,
                col: coord.col,
                card: card(idx as u8, if idx < 3 { Team::A } else { Team::B }, "5555"),
            })
            .collect();
        let engine = Engine::from_fields(Rules::BASIC, &fields).unwrap();
        assert_eq!(engine.score(), (3, 6));
        assert_eq!(engine.winner(), Ok(Outcome::Winner(Team::B)));
    }
}
