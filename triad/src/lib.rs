pub use board::*;
pub use capture::*;
pub use cards::*;
pub use engine::*;
pub use errors::*;
pub use hand::*;
pub use protocol_types::*;
pub use rules::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod capture;
mod cards;
mod engine;
mod errors;
mod hand;
mod protocol_types;
mod rules;
mod turn;
mod visualization;
