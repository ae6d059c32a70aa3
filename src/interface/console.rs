use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::sync_controller::SyncController;
use crate::domain::square::{CellIndex, square_to_index};
use crate::error::SquareError;
use crate::infrastructure::display::render_snapshot;

const HELP: &str = "Enter a square (e.g. 'e3') to play, 'board' to redraw, 'refresh' to resync, 'quit' to exit.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(CellIndex),
    Board,
    Refresh,
    Help,
    Quit,
    Empty,
    Invalid(SquareError),
}

pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "q" | "quit" | "exit" => Command::Quit,
        "b" | "board" => Command::Board,
        "r" | "refresh" => Command::Refresh,
        "h" | "help" | "?" => Command::Help,
        _ => match square_to_index(input) {
            Ok(index) => Command::Play(index),
            Err(err) => Command::Invalid(err),
        },
    }
}

pub struct ConsoleInterface;

impl ConsoleInterface {
    /// Reads commands from stdin until `quit` or end of input. The board is
    /// redrawn whenever the controller publishes a new snapshot.
    pub async fn run(controller: Arc<SyncController>) -> std::io::Result<()> {
        let mut snapshots = controller.subscribe();
        let redraw = tokio::spawn(async move {
            while snapshots.changed().await.is_ok() {
                let frame = render_snapshot(&snapshots.borrow_and_update());
                println!("{frame}");
            }
        });

        println!("{HELP}");
        println!("{}", render_snapshot(&controller.snapshot().await));

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match parse_command(&line) {
                Command::Play(index) => controller.activate_cell(index).await,
                Command::Board => println!("{}", render_snapshot(&controller.snapshot().await)),
                Command::Refresh => {
                    // Failure is already logged; the board just stays as it is.
                    let _ = controller.startup().await;
                }
                Command::Help => println!("{HELP}"),
                Command::Quit => break,
                Command::Empty => {}
                Command::Invalid(err) => println!("Error: {err}"),
            }
        }

        redraw.abort();
        Ok(())
    }
}
