use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the two sides in a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

/// The four sides of a card, which are also the four orthogonal
/// directions on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order in which strengths are stored.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    /// All directions going around the card clockwise, starting at the top.
    ///
    /// Consecutive entries (wrapping around) are the adjacent direction pairs
    /// compared by the Plus rule.
    pub const CLOCKWISE: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// The side of a neighbor that faces a card in this direction.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Offset of the neighboring cell, as `(row, col)`.
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

pub const MIN_STRENGTH: u8 = 1;
pub const MAX_STRENGTH: u8 = 9;

/// The four directional strengths of a card.
///
/// Written as four digits in top, bottom, left, right order:
/// ```
/// # use triad::{strengths, Direction, Strengths};
/// let s = strengths!("9124");
/// assert_eq!(s[Direction::Top], 9);
/// assert_eq!(s[Direction::Right], 4);
/// assert_eq!(s.to_string(), "9124");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 4]")]
pub struct Strengths(pub [u8; 4]);

/// A strength outside of `MIN_STRENGTH..=MAX_STRENGTH`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrengthOutOfRange(pub u8);

impl std::error::Error for StrengthOutOfRange {}

impl std::fmt::Display for StrengthOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Strength {} is not between {} and {}",
            self.0, MIN_STRENGTH, MAX_STRENGTH
        )
    }
}

impl TryFrom<[u8; 4]> for Strengths {
    type Error = StrengthOutOfRange;

    fn try_from(values: [u8; 4]) -> Result<Self, Self::Error> {
        match values
            .into_iter()
            .find(|v| !(MIN_STRENGTH..=MAX_STRENGTH).contains(v))
        {
            Some(v) => Err(StrengthOutOfRange(v)),
            None => Ok(Strengths(values)),
        }
    }
}

impl std::ops::Index<Direction> for Strengths {
    type Output = u8;

    fn index(&self, dir: Direction) -> &u8 {
        &self.0[dir as usize]
    }
}

impl std::fmt::Display for Strengths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for s in self.0 {
            write!(f, "{}", s)?;
        }
        Ok(())
    }
}

/// The error type for the [`FromStr`] instance of [`Strengths`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthsFromStrErr {
    WrongLength,
    InvalidDigit(char),
}

impl std::error::Error for StrengthsFromStrErr {}

impl std::fmt::Display for StrengthsFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrengthsFromStrErr::WrongLength => write!(f, "Expected exactly four digits"),
            StrengthsFromStrErr::InvalidDigit(c) => {
                write!(f, "'{}' is not a strength between 1 and 9", c)
            }
        }
    }
}

impl FromStr for Strengths {
    type Err = StrengthsFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [0u8; 4];
        let mut chars = s.chars();
        for value in values.iter_mut() {
            let c = chars.next().ok_or(StrengthsFromStrErr::WrongLength)?;
            *value = match c.to_digit(10) {
                Some(d) if d >= MIN_STRENGTH as u32 => d as u8,
                _ => return Err(StrengthsFromStrErr::InvalidDigit(c)),
            };
        }
        if chars.next().is_some() {
            return Err(StrengthsFromStrErr::WrongLength);
        }
        Ok(Strengths(values))
    }
}

/// Shorthand for creating [`Strengths`] from a four-digit string.
///
/// This macro is just calling the [`FromStr`] instance of [`Strengths`].
#[macro_export]
macro_rules! strengths {
    ($s:literal) => {
        <$crate::Strengths as std::str::FromStr>::from_str($s)
            .expect("Invalid strengths given to strengths! macro")
    };
}
#[allow(unused_imports)]
pub(crate) use strengths;

/// Identifies a card within one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A card with four fixed strengths and an owner that changes on capture.
///
/// Cards compare by [`CardId`] only: two cards with the same strengths are
/// still different cards. A clone is a snapshot of the same card.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    owner: Team,
    strengths: Strengths,
}

impl Card {
    pub fn new(id: CardId, owner: Team, strengths: Strengths) -> Self {
        Self {
            id,
            owner,
            strengths,
        }
    }

    pub fn owner(&self) -> Team {
        self.owner
    }

    pub fn strengths(&self) -> Strengths {
        self.strengths
    }

    /// The strength on the given side.
    pub fn strength(&self, dir: Direction) -> u8 {
        self.strengths[dir]
    }

    pub fn set_owner(&mut self, team: Team) {
        self.owner = team;
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}:{}", self.id, self.owner, self.strengths)
    }
}
