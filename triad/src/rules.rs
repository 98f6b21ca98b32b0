use serde::{Deserialize, Serialize};

/// Which capture rules are active in a game, in addition to the basic rule.
///
/// Chosen once at setup and fixed for the duration of the game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Capture two or more neighbors whose facing strengths equal the placed card's.
    #[serde(default)]
    pub same: bool,
    /// Capture both neighbors of any adjacent direction pair with equal sums.
    #[serde(default)]
    pub plus: bool,
}

impl Rules {
    pub const BASIC: Rules = Rules {
        same: false,
        plus: false,
    };
}

impl std::fmt::Display for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "basic")?;
        if self.same {
            write!(f, "+same")?;
        }
        if self.plus {
            write!(f, "+plus")?;
        }
        Ok(())
    }
}
