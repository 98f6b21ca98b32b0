use std::collections::BTreeSet;

use crate::{Board, Card, Coord, Direction, Rules, Team};

/// The effects that placing a card would have, computed without touching the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureCalculation {
    /// Where the card goes.
    pub coord: Coord,
    /// The team that placed the card, and captures the neighbors.
    pub team: Team,
    /// Neighbors captured by the basic rule.
    pub basic: BTreeSet<Coord>,
    /// Neighbors captured by the same rule. Empty if the rule is disabled.
    pub same: BTreeSet<Coord>,
    /// Neighbors captured by the plus rule. Empty if the rule is disabled.
    pub plus: BTreeSet<Coord>,
    flipped: BTreeSet<Coord>,
}

impl CaptureCalculation {
    /// Evaluates all capture rules for `card` at `coord`.
    ///
    /// The target cell must have been validated already.
    pub(crate) fn new(board: &Board, rules: Rules, coord: Coord, card: &Card) -> Self {
        let basic = basic_captures(board, coord, card);
        let same = if rules.same {
            same_captures(board, coord, card)
        } else {
            BTreeSet::new()
        };
        let plus = if rules.plus {
            plus_captures(board, coord, card)
        } else {
            BTreeSet::new()
        };

        let team = card.owner();
        // Captures are applied in rule order, but since every rule only looks
        // at strengths, the union is the same no matter the order.
        let flipped = basic
            .iter()
            .chain(&same)
            .chain(&plus)
            .copied()
            .filter(|&c| board.card_at(c).is_some_and(|n| n.owner() != team))
            .collect();

        Self {
            coord,
            team,
            basic,
            same,
            plus,
            flipped,
        }
    }

    /// All neighbors captured by any rule, including those already owned by the team.
    pub fn captured(&self) -> BTreeSet<Coord> {
        self.basic
            .iter()
            .chain(&self.same)
            .chain(&self.plus)
            .copied()
            .collect()
    }

    /// The neighbors that will change owner.
    pub fn flipped(&self) -> &BTreeSet<Coord> {
        &self.flipped
    }
}

/// Strength of `card` facing `dir`, and the strength of `neighbor` facing back.
fn facing(card: &Card, dir: Direction, neighbor: &Card) -> (u8, u8) {
    (card.strength(dir), neighbor.strength(dir.opposite()))
}

fn basic_captures(board: &Board, coord: Coord, card: &Card) -> BTreeSet<Coord> {
    board
        .neighbors(coord)
        .filter(|&(dir, _, neighbor)| {
            let (own, other) = facing(card, dir, neighbor);
            own > other
        })
        .map(|(_, n, _)| n)
        .collect()
}

fn same_captures(board: &Board, coord: Coord, card: &Card) -> BTreeSet<Coord> {
    let matches: BTreeSet<Coord> = board
        .neighbors(coord)
        .filter(|&(dir, _, neighbor)| {
            let (own, other) = facing(card, dir, neighbor);
            own == other
        })
        .map(|(_, n, _)| n)
        .collect();
    if matches.len() >= 2 {
        matches
    } else {
        BTreeSet::new()
    }
}

fn plus_captures(board: &Board, coord: Coord, card: &Card) -> BTreeSet<Coord> {
    let sum_towards = |dir: Direction| -> Option<(Coord, u8)> {
        let n = coord.neighbor(dir)?;
        let neighbor = board.card_at(n)?;
        let (own, other) = facing(card, dir, neighbor);
        Some((n, own + other))
    };

    let mut captured = BTreeSet::new();
    let cw = Direction::CLOCKWISE;
    for (idx, &dir_a) in cw.iter().enumerate() {
        let dir_b = cw[(idx + 1) % cw.len()];
        if let (Some((n_a, sum_a)), Some((n_b, sum_b))) = (sum_towards(dir_a), sum_towards(dir_b))
        {
            if sum_a == sum_b {
                captured.insert(n_a);
                captured.insert(n_b);
            }
        }
    }
    captured
}
