use std::future::Future;
use std::pin::Pin;

use crate::domain::square::Square;
use crate::domain::state::{BoardState, MoveResponse};
use crate::error::SyncError;

pub type AuthorityFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SyncError>> + Send + 'a>>;

/// The side that owns the rules and the real board.
///
/// Implementations return [`SyncError::Transport`] when the authority cannot
/// be reached and [`SyncError::MalformedState`] when its answer does not
/// decode. A rejected move is an `Ok(MoveResponse::Rejected { .. })`.
pub trait RemoteAuthority: Send + Sync {
    fn fetch_state(&self) -> AuthorityFuture<'_, BoardState>;

    fn submit_move<'a>(&'a self, square: Square) -> AuthorityFuture<'a, MoveResponse>;
}
