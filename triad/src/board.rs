mod coord;

pub use coord::*;

use crate::{Card, Direction, Field, IllegalPlacement, Team};

pub const BOARD_SIZE: u8 = 3;

/// The number of cells on the board.
pub const NUM_CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// The 3×3 grid of cards.
///
/// Once a cell holds a card, it is never emptied again. The board only
/// stores cards; the capture rules live in [`Engine`](crate::Engine).
#[derive(Clone, Debug, Default)]
pub struct Board {
    cells: [[Option<Card>; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from a list of occupied fields, without applying any captures.
    pub fn from_fields(fields: &[Field]) -> Result<Self, IllegalPlacement> {
        let mut board = Board::new();
        for field in fields {
            let coord = field.coord();
            board.check_placement(coord)?;
            board.put(coord, field.card.clone());
        }
        Ok(board)
    }

    /// Returns the card at the given coordinate, if there is one.
    ///
    /// Coordinates outside of the board are simply empty.
    pub fn card_at(&self, coord: Coord) -> Option<&Card> {
        if !coord.is_in_bounds() {
            return None;
        }
        self.cells[coord.row as usize][coord.col as usize].as_ref()
    }

    /// Checks that a card may be placed at this coordinate.
    pub fn check_placement(&self, coord: Coord) -> Result<(), IllegalPlacement> {
        if !coord.is_in_bounds() {
            return Err(IllegalPlacement::OutOfBounds { coord });
        }
        match self.card_at(coord) {
            Some(existing) => Err(IllegalPlacement::CellOccupied {
                coord,
                existing_card: existing.id,
            }),
            None => Ok(()),
        }
    }

    pub fn num_occupied(&self) -> usize {
        self.iter().count()
    }

    pub fn is_full(&self) -> bool {
        self.num_occupied() == NUM_CELLS
    }

    /// How many cards on the board are currently owned by this team.
    pub fn count_owned_by(&self, team: Team) -> usize {
        self.iter().filter(|(_, card)| card.owner() == team).count()
    }

    /// All occupied cells, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Card)> + '_ {
        Coord::all().filter_map(|coord| self.card_at(coord).map(|card| (coord, card)))
    }

    /// All empty cells, in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(|&coord| self.card_at(coord).is_none())
    }

    /// The occupied cells next to `coord`, together with the direction in
    /// which they lie as seen from `coord`.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord, &Card)> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            let n = coord.neighbor(dir)?;
            self.card_at(n).map(|card| (dir, n, card))
        })
    }

    pub fn to_fields_vec(&self) -> Vec<Field> {
        self.iter()
            .map(|(coord, card)| Field {
                row: coord.row,
                col: coord.col,
                card: card.clone(),
            })
            .collect()
    }

    // The caller must have checked the coordinate with check_placement()
    pub(crate) fn put(&mut self, coord: Coord, card: Card) {
        let cell = &mut self.cells[coord.row as usize][coord.col as usize];
        debug_assert!(cell.is_none());
        *cell = Some(card);
    }

    pub(crate) fn card_at_mut(&mut self, coord: Coord) -> Option<&mut Card> {
        if !coord.is_in_bounds() {
            return None;
        }
        self.cells[coord.row as usize][coord.col as usize].as_mut()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::ArbitraryBoard;
    use crate::{strengths, CardId};

    fn field(row: u8, col: u8, id: u8, owner: Team, s: &str) -> Field {
        Field {
            row,
            col,
            card: Card::new(CardId(id), owner, s.parse().unwrap()),
        }
    }

    quickcheck! {
        fn fields_roundtrip(input: ArbitraryBoard) -> bool {
            let board = Board::from_fields(&input.fields).unwrap();
            board.to_fields_vec() == input.fields
                && board.num_occupied() == input.fields.len()
                && board.num_occupied() + board.empty_cells().count() == NUM_CELLS
                && board.count_owned_by(Team::A) + board.count_owned_by(Team::B) == board.num_occupied()
        }
    }

    #[test]
    fn from_fields_rejects_bad_cells() {
        let err = Board::from_fields(&[field(3, 0, 0, Team::A, "1111")]).unwrap_err();
        assert_eq!(
            err,
            IllegalPlacement::OutOfBounds {
                coord: Coord::new(3, 0)
            }
        );

        let err = Board::from_fields(&[
            field(1, 1, 0, Team::A, "1111"),
            field(1, 1, 1, Team::B, "2222"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            IllegalPlacement::CellOccupied {
                coord: Coord::new(1, 1),
                existing_card: CardId(0)
            }
        );
    }

    #[test]
    fn neighbors_only_yields_occupied_cells() {
        let board = Board::from_fields(&[
            field(0, 1, 0, Team::B, "1111"),
            field(1, 2, 1, Team::B, "2222"),
            field(2, 2, 2, Team::A, "3333"),
        ])
        .unwrap();
        let neighbors: Vec<(Direction, Coord, CardId)> = board
            .neighbors(Coord::new(1, 1))
            .map(|(dir, coord, card)| (dir, coord, card.id))
            .collect();
        assert_eq!(
            neighbors,
            vec![
                (Direction::Top, Coord::new(0, 1), CardId(0)),
                (Direction::Right, Coord::new(1, 2), CardId(1)),
            ]
        );
        assert_eq!(
            board.card_at(Coord::new(2, 2)).map(|c| c.strengths()),
            Some(strengths!("3333"))
        );
        assert!(board.card_at(Coord::new(5, 5)).is_none());
    }
}
