mod game;
mod player;
mod recording;
pub use game::*;
pub use player::*;
pub use recording::*;

use rand::rngs::StdRng;
use triad::Rules;

/// Settings shared by all games of a tournament.
pub struct Config {
    pub rng: StdRng,
    pub rules: Rules,
    pub recorder: Option<recording::Recorder>,
}
