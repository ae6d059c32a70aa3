#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use othello_client::domain::services::{AuthorityFuture, RemoteAuthority};
use othello_client::domain::square::Square;
use othello_client::domain::state::{BoardState, MoveResponse};
use othello_client::error::SyncError;

pub const START_BLACK: u64 = 0x0000000810000000;
pub const START_WHITE: u64 = 0x0000001008000000;

pub fn state_json(black: u64, white: u64, black_turn: bool) -> String {
    format!(r#"{{"black":{black},"white":{white},"black_turn":{black_turn}}}"#)
}

#[derive(Clone, Debug)]
pub enum StateReply {
    Body(String),
    Transport,
}

#[derive(Clone, Debug)]
pub enum MoveReply {
    Body(String),
    Status(u16, &'static str),
    Transport,
}

/// In-memory authority that answers from a script. Bodies go through the
/// real wire decoder. The last state reply repeats once the script runs out.
#[derive(Default)]
pub struct ScriptedAuthority {
    states: Mutex<VecDeque<StateReply>>,
    last_state: Mutex<Option<StateReply>>,
    moves: Mutex<VecDeque<MoveReply>>,
    submitted: Mutex<Vec<String>>,
    fetch_calls: AtomicUsize,
}

impl ScriptedAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_states<I: IntoIterator<Item = StateReply>>(self, replies: I) -> Self {
        self.states.lock().unwrap().extend(replies);
        self
    }

    pub fn with_moves<I: IntoIterator<Item = MoveReply>>(self, replies: I) -> Self {
        self.moves.lock().unwrap().extend(replies);
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }

    fn next_state(&self) -> Option<StateReply> {
        let next = self.states.lock().unwrap().pop_front();
        let mut last = self.last_state.lock().unwrap();
        match next {
            Some(reply) => {
                *last = Some(reply.clone());
                Some(reply)
            }
            None => last.clone(),
        }
    }
}

impl RemoteAuthority for ScriptedAuthority {
    fn fetch_state(&self) -> AuthorityFuture<'_, BoardState> {
        Box::pin(async move {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            match self.next_state() {
                Some(StateReply::Body(body)) => BoardState::from_json(body.as_bytes()),
                Some(StateReply::Transport) | None => {
                    Err(SyncError::Transport("connection refused".into()))
                }
            }
        })
    }

    fn submit_move<'a>(&'a self, square: Square) -> AuthorityFuture<'a, MoveResponse> {
        Box::pin(async move {
            self.submitted.lock().unwrap().push(square.to_string());
            let reply = self.moves.lock().unwrap().pop_front();
            match reply {
                Some(MoveReply::Body(body)) => {
                    BoardState::from_json(body.as_bytes()).map(MoveResponse::Accepted)
                }
                Some(MoveReply::Status(status, reason)) => Ok(MoveResponse::Rejected {
                    status,
                    reason: reason.to_string(),
                }),
                Some(MoveReply::Transport) | None => {
                    Err(SyncError::Transport("connection reset".into()))
                }
            }
        })
    }
}

/// Collects formatted log lines for the current thread.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Installs a plain-text subscriber at `level` until the guard drops.
    /// Use with a current-thread runtime so every event lands here.
    pub fn install(level: Level) -> (Self, DefaultGuard) {
        let capture = LogCapture::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(capture.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }

    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
