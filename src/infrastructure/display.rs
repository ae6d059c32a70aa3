use crate::application::sync_controller::BoardSnapshot;
use crate::domain::models::{Occupant, Player};
use crate::domain::square::{BOARD_SIDE, CELL_COUNT};
use std::fmt;

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_WHITE: &str = "\x1b[37m";
const COLOR_BLACK: &str = "\x1b[31m";
const COLOR_DIM: &str = "\x1b[90m";

const LABEL_WIDTH: usize = 2;

struct Canvas {
    width: usize,
    height: usize,
    buffer: Vec<String>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            buffer: vec![" ".to_string(); width * height],
        }
    }

    fn put(&mut self, x: usize, y: usize, s: &str) {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x] = s.to_string();
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.buffer[y * self.width + x])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Draws the board with rank 8 on top and file `a` on the left, the same
/// orientation the view slots are laid out in.
pub fn render_board(cells: &[Occupant; CELL_COUNT]) -> String {
    let width = LABEL_WIDTH + BOARD_SIDE * 2 - 1;
    let height = BOARD_SIDE + 1;
    let mut canvas = Canvas::new(width, height);

    for y in 0..BOARD_SIDE {
        let row = BOARD_SIDE - 1 - y;
        canvas.put(0, y, &(row + 1).to_string());

        for dx in 0..BOARD_SIDE {
            let col = BOARD_SIDE - 1 - dx;
            let index = row * BOARD_SIDE + col;

            let s = match cells[index] {
                Occupant::Disc(player) => {
                    let color = match player {
                        Player::Black => COLOR_BLACK,
                        Player::White => COLOR_WHITE,
                    };
                    format!("{}{}{}", color, player.symbol(), COLOR_RESET)
                }
                Occupant::Empty => format!("{}.{}", COLOR_DIM, COLOR_RESET),
            };
            canvas.put(LABEL_WIDTH + dx * 2, y, &s);
        }
    }

    for dx in 0..BOARD_SIDE {
        let label = (b'A' + dx as u8) as char;
        canvas.put(LABEL_WIDTH + dx * 2, BOARD_SIDE, &label.to_string());
    }

    canvas.to_string()
}

/// Board plus the status and count lines.
pub fn render_snapshot(snapshot: &BoardSnapshot) -> String {
    let mut out = render_board(&snapshot.cells);
    match snapshot.status {
        Some(status) => out.push_str(status.text()),
        None => out.push_str("Waiting for game state..."),
    }
    out.push('\n');
    out.push_str(&snapshot.count.to_string());
    out.push('\n');
    out
}
