use crate::{Board, Coord, Direction, BOARD_SIZE};

const CELL_WIDTH: usize = 7;

/// Draws the board as a box of 3×3 cells.
///
/// Each card shows its owner in the middle and its strengths on the sides.
pub fn visualize_board(board: &Board) -> String {
    let horizontal = "─".repeat(CELL_WIDTH);
    let separator = |left: &str, middle: &str, right: &str| {
        let mut line = String::from(left);
        for col in 0..BOARD_SIZE {
            if col > 0 {
                line += middle;
            }
            line += &horizontal;
        }
        line += right;
        line += "\n";
        line
    };

    let mut result = separator("╭", "┬", "╮");
    for row in 0..BOARD_SIZE {
        if row > 0 {
            result += &separator("├", "┼", "┤");
        }
        // Every cell is three lines high
        for line in 0..3 {
            result += "│";
            for col in 0..BOARD_SIZE {
                let content = match board.card_at(Coord::new(row, col)) {
                    None => " ".repeat(CELL_WIDTH),
                    Some(card) => match line {
                        0 => format!("   {}   ", card.strength(Direction::Top)),
                        1 => format!(
                            " {} {} {} ",
                            card.strength(Direction::Left),
                            card.owner(),
                            card.strength(Direction::Right)
                        ),
                        _ => format!("   {}   ", card.strength(Direction::Bottom)),
                    },
                };
                result += &content;
                result += "│";
            }
            result += "\n";
        }
    }
    result += &separator("╰", "┴", "╯");
    result
}
