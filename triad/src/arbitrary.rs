use quickcheck::{Arbitrary, Gen};

use crate::{Card, CardId, Coord, Field, Rules, Strengths, Team, MAX_STRENGTH, MIN_STRENGTH};

/// A board with some cards on it, sorted in row-major order.
#[derive(Clone, Debug)]
pub struct ArbitraryBoard {
    pub rules: Rules,
    pub fields: Vec<Field>,
}

/// A board with at least one empty cell, and a card to put there.
#[derive(Clone, Debug)]
pub struct ArbitraryPlacement {
    pub rules: Rules,
    pub fields: Vec<Field>,
    pub coord: Coord,
    pub card: Card,
}

fn arbitrary_fields(g: &mut Gen, max_cards: usize) -> Vec<Field> {
    let mut fields = Vec::new();
    for (idx, coord) in Coord::all().enumerate() {
        if fields.len() < max_cards && bool::arbitrary(g) {
            fields.push(Field {
                row: coord.row,
                col: coord.col,
                card: Card::new(
                    CardId(idx as u8),
                    Team::arbitrary(g),
                    Strengths::arbitrary(g),
                ),
            });
        }
    }
    fields
}

impl Arbitrary for ArbitraryBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            rules: Rules::arbitrary(g),
            fields: arbitrary_fields(g, Coord::all().count()),
        }
    }
}

impl Arbitrary for ArbitraryPlacement {
    fn arbitrary(g: &mut Gen) -> Self {
        let fields = arbitrary_fields(g, Coord::all().count() - 1);
        let empty: Vec<Coord> = Coord::all()
            .filter(|&coord| fields.iter().all(|f| f.coord() != coord))
            .collect();
        let coord = *g.choose(&empty).unwrap();
        let card = Card::new(CardId(100), Team::arbitrary(g), Strengths::arbitrary(g));
        Self {
            rules: Rules::arbitrary(g),
            fields,
            coord,
            card,
        }
    }
}

impl Arbitrary for Team {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Team::A, Team::B]).unwrap()
    }
}

impl Arbitrary for Rules {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            same: bool::arbitrary(g),
            plus: bool::arbitrary(g),
        }
    }
}

impl Arbitrary for Strengths {
    fn arbitrary(g: &mut Gen) -> Self {
        let values: Vec<u8> = (MIN_STRENGTH..=MAX_STRENGTH).collect();
        Strengths([
            *g.choose(&values).unwrap(),
            *g.choose(&values).unwrap(),
            *g.choose(&values).unwrap(),
            *g.choose(&values).unwrap(),
        ])
    }
}
