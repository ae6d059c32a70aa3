use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{RwLock, mpsc, watch};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::models::{Occupant, PieceCount, TurnStatus};
use crate::domain::services::RemoteAuthority;
use crate::domain::square::{CELL_COUNT, CellIndex, cell_to_square};
use crate::domain::state::{BoardState, MoveResponse};
use crate::error::SyncError;
use crate::interface::board_view::BoardView;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SyncState {
    #[default]
    Idle,
    AwaitingMoveResult,
    Polling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncEvent {
    MoveSubmitted,
    MoveRejected,
    MoveFailed,
    MoveAccepted { black_turn: bool },
    PollStarted,
    PollObserved { black_turn: bool },
}

impl SyncState {
    /// The only place the controller's state changes.
    ///
    /// Move submissions are not serialized against a running poll, so an
    /// event can arrive in any state. The most recent event wins, except
    /// that poll ticks never hide a move that is still in flight.
    pub fn on(self, event: SyncEvent) -> SyncState {
        use SyncEvent::*;
        use SyncState::*;

        match (self, event) {
            (_, MoveSubmitted) => AwaitingMoveResult,
            (_, MoveRejected | MoveFailed) => Idle,
            (_, MoveAccepted { black_turn: true }) => Idle,
            (_, MoveAccepted { black_turn: false }) => Polling,
            (AwaitingMoveResult, PollStarted | PollObserved { .. }) => AwaitingMoveResult,
            (_, PollStarted) => Polling,
            (_, PollObserved { black_turn: false }) => Polling,
            (_, PollObserved { black_turn: true }) => Idle,
        }
    }
}

/// Result of one move submission, as seen by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted { black_turn: bool },
    Rejected { status: u16 },
    Failed(SyncError),
}

/// What the player is looking at after a render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub cells: [Occupant; CELL_COUNT],
    pub count: PieceCount,
    pub status: Option<TurnStatus>,
    pub state: SyncState,
    pub revision: u64,
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        BoardSnapshot {
            cells: [Occupant::Empty; CELL_COUNT],
            count: PieceCount::default(),
            status: None,
            state: SyncState::Idle,
            revision: 0,
        }
    }
}

struct Session {
    state: SyncState,
    black_turn: Option<bool>,
    status: Option<TurnStatus>,
    view: BoardView,
    revision: u64,
}

impl Session {
    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cells: self.view.occupants(),
            count: self.view.piece_count(),
            status: self.status,
            state: self.state,
            revision: self.revision,
        }
    }
}

/// Clears the polling flag however the loop exits.
struct PollGuard<'a>(&'a AtomicBool);

impl<'a> PollGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PollGuard(flag))
    }
}

impl Drop for PollGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Keeps one client session in step with the remote authority.
///
/// The session lock is held only while rendering, never across a request,
/// so a render always completes before anything else touches the view.
pub struct SyncController {
    authority: Arc<dyn RemoteAuthority>,
    poll_interval: Duration,
    session: RwLock<Session>,
    polling: AtomicBool,
    snapshots: watch::Sender<BoardSnapshot>,
}

impl SyncController {
    pub fn new(
        authority: Arc<dyn RemoteAuthority>,
        view: BoardView,
        poll_interval: Duration,
    ) -> Arc<Self> {
        let session = Session {
            state: SyncState::Idle,
            black_turn: None,
            status: None,
            view,
            revision: 0,
        };
        let (snapshots, _) = watch::channel(session.snapshot());

        Arc::new(SyncController {
            authority,
            poll_interval,
            session: RwLock::new(session),
            polling: AtomicBool::new(false),
            snapshots,
        })
    }

    /// Builds a view whose cell activations feed this controller, and starts
    /// dispatching them. Must be called inside a tokio runtime.
    pub fn spawn(authority: Arc<dyn RemoteAuthority>, poll_interval: Duration) -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let view = BoardView::initialize(move |index| {
            if tx.send(index).is_err() {
                warn!(index, "activation dropped, controller is gone");
            }
        });

        let controller = Self::new(authority, view, poll_interval);
        tokio::spawn(Arc::clone(&controller).dispatch_activations(rx));
        controller
    }

    pub fn subscribe(&self) -> watch::Receiver<BoardSnapshot> {
        self.snapshots.subscribe()
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        self.session.read().await.snapshot()
    }

    pub async fn state(&self) -> SyncState {
        self.session.read().await.state
    }

    /// `None` until the first state has been received.
    pub async fn black_turn(&self) -> Option<bool> {
        self.session.read().await.black_turn
    }

    pub async fn status_text(&self) -> Option<&'static str> {
        self.session.read().await.status.map(|s| s.text())
    }

    pub fn is_polling(&self) -> bool {
        self.polling.load(Ordering::Acquire)
    }

    /// Fires the activation callback of a cell, as a click would.
    pub async fn activate_cell(&self, index: CellIndex) {
        self.session.read().await.view.activate(index);
    }

    /// Runs each activation as its own submission. Submissions are not
    /// serialized; the authority rejects anything out of turn.
    pub async fn dispatch_activations(
        self: Arc<Self>,
        mut activations: mpsc::UnboundedReceiver<CellIndex>,
    ) {
        while let Some(index) = activations.recv().await {
            let controller = Arc::clone(&self);
            tokio::spawn(async move {
                controller.submit_move(index).await;
            });
        }
        debug!("activation channel closed");
    }

    /// Initial sync. Failures are logged and leave the board as it was.
    pub async fn startup(&self) -> Result<BoardState, SyncError> {
        match self.authority.fetch_state().await {
            Ok(state) => {
                self.apply_state(&state, None).await;
                info!(black_turn = state.black_turn, "synchronized with remote authority");
                Ok(state)
            }
            Err(err) => {
                warn!(error = %err, "initial state fetch failed");
                Err(err)
            }
        }
    }

    pub async fn submit_move(&self, index: CellIndex) -> MoveOutcome {
        let square = cell_to_square(index);
        self.transition(SyncEvent::MoveSubmitted).await;
        info!(%square, index, "submitting move");

        match self.authority.submit_move(square).await {
            Ok(MoveResponse::Accepted(state)) => {
                let black_turn = state.black_turn;
                self.apply_state(&state, Some(SyncEvent::MoveAccepted { black_turn }))
                    .await;

                if !black_turn {
                    self.poll_for_remote_move().await;
                }
                MoveOutcome::Accepted { black_turn }
            }
            Ok(MoveResponse::Rejected { status, reason }) => {
                info!(%square, status, reason = %reason, "move rejected");
                self.transition(SyncEvent::MoveRejected).await;
                MoveOutcome::Rejected { status }
            }
            Err(err) => {
                warn!(%square, error = %err, "move submission failed");
                self.transition(SyncEvent::MoveFailed).await;
                MoveOutcome::Failed(err)
            }
        }
    }

    /// Fetches state every poll interval until it is black's turn again.
    ///
    /// Returns `false` without fetching if a loop is already running. A
    /// failed fetch is logged and the loop carries on with the next tick.
    pub async fn poll_for_remote_move(&self) -> bool {
        let Some(_guard) = PollGuard::acquire(&self.polling) else {
            debug!("polling loop already active");
            return false;
        };

        self.transition(SyncEvent::PollStarted).await;
        info!("waiting for remote move");

        loop {
            match self.authority.fetch_state().await {
                Ok(state) => {
                    let black_turn = state.black_turn;
                    self.apply_state(&state, Some(SyncEvent::PollObserved { black_turn }))
                        .await;
                    if black_turn {
                        info!("remote move complete");
                        return true;
                    }
                }
                Err(err) => warn!(error = %err, "poll fetch failed"),
            }

            sleep(self.poll_interval).await;
        }
    }

    // Snapshots are published while the session lock is held so the watch
    // channel never lags behind the session.
    async fn transition(&self, event: SyncEvent) {
        let mut session = self.session.write().await;
        let next = session.state.on(event);
        if next == session.state {
            return;
        }
        debug!(from = ?session.state, to = ?next, ?event, "state transition");
        session.state = next;
        self.snapshots.send_replace(session.snapshot());
    }

    async fn apply_state(&self, state: &BoardState, event: Option<SyncEvent>) -> PieceCount {
        let mut session = self.session.write().await;
        let count = session.view.render(state.black, state.white);
        session.black_turn = Some(state.black_turn);
        session.status = Some(TurnStatus::from_black_turn(state.black_turn));
        if let Some(event) = event {
            session.state = session.state.on(event);
        }
        session.revision += 1;
        debug!(
            black = count.black,
            white = count.white,
            black_turn = state.black_turn,
            revision = session.revision,
            "rendered board"
        );
        self.snapshots.send_replace(session.snapshot());
        count
    }
}
