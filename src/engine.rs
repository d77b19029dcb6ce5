/// The board reconciliation engine.
///
/// Owns the current board snapshot and the transient drag session,
/// and is driven one event at a time by the host: load, the three
/// drag calls, and column creation. Every mutation swaps in a whole
/// new snapshot; the rendering layer only ever sees immutable boards.
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::bridge::build_board;
use crate::drag::finalize::{finalize_drop, DropOutcome, PersistRequest};
use crate::drag::reconcile::reconcile_hover;
use crate::drag::{DragSession, DragTarget};
use crate::events::BoardEvent;
use crate::store::{StoreError, TaskStore};
use crate::types::{Board, Column, ColumnId};

/// Capacity of the event channel. Laggy subscribers lose old events
/// and re-read the current snapshot instead.
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to load board: {0}")]
    Load(#[source] StoreError),

    #[error("Failed to create column: {0}")]
    CreateColumn(#[source] StoreError),
}

/// Static engine configuration. Session identity is injected here
/// rather than read from ambient state, so the engine can run and be
/// tested without any surrounding application context.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub project_id: String,
    pub current_user_id: Option<String>,
}

pub struct BoardEngine {
    store: Arc<dyn TaskStore>,
    config: EngineConfig,
    board: Arc<Board>,
    drag: Option<DragSession>,
    events: broadcast::Sender<BoardEvent>,
    /// Fire-and-forget persistence calls still in flight.
    inflight: Vec<JoinHandle<()>>,
}

impl BoardEngine {
    pub fn new(store: Arc<dyn TaskStore>, config: EngineConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        BoardEngine {
            store,
            config,
            board: Arc::new(Board::default()),
            drag: None,
            events,
            inflight: Vec::new(),
        }
    }

    /// The current immutable board snapshot.
    pub fn board(&self) -> Arc<Board> {
        Arc::clone(&self.board)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Subscribe to board change events.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Fetch categories and tasks for the configured project and
    /// build the board. On failure the engine keeps an empty board,
    /// never a partial one.
    pub async fn load(&mut self) -> Result<(), EngineError> {
        match self
            .store
            .list_categories_and_tasks(&self.config.project_id)
            .await
        {
            Ok((categories, tasks)) => {
                let board = build_board(&categories, tasks);
                let _ = self.events.send(BoardEvent::Loaded {
                    columns: board.columns.len(),
                    cards: board.card_count(),
                });
                self.board = Arc::new(board);
                Ok(())
            }
            Err(e) => {
                self.board = Arc::new(Board::default());
                Err(EngineError::Load(e))
            }
        }
    }

    /// Idle -> Dragging. An id not on the board is a logged no-op;
    /// the model may be momentarily stale.
    pub fn on_drag_start(&mut self, card_id: &str) {
        match DragSession::begin(&self.board, card_id) {
            Some(session) => self.drag = Some(session),
            None => {
                log::debug!(
                    "[flowboard.engine] Drag-start for unknown card {}; staying idle",
                    card_id
                );
            }
        }
    }

    /// Dragging -> Dragging. Runs the hover reconciler and swaps in
    /// the new snapshot when the hover crossed a column boundary.
    pub fn on_drag_over(&mut self, target: &DragTarget) {
        let Some(session) = &self.drag else {
            return;
        };
        if let Some(next) = reconcile_hover(&self.board, &session.active_card_id, target) {
            self.board = Arc::new(next);
        }
    }

    /// Dragging -> Idle, unconditionally, then the drop decision.
    /// A cross-column move dispatches its single persistence call
    /// without waiting for it; the local move stands either way.
    pub fn on_drag_end(&mut self, target: Option<&DragTarget>) -> DropOutcome {
        let Some(session) = self.drag.take() else {
            return DropOutcome::Abandoned;
        };
        let resolution = finalize_drop(&self.board, &session, target);
        if let Some(next) = resolution.board {
            self.board = Arc::new(next);
        }
        if let Some(request) = resolution.persist {
            if let DropOutcome::Moved { from, to } = &resolution.outcome {
                let _ = self.events.send(BoardEvent::CardMoved {
                    card_id: request.card_id.clone(),
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            self.dispatch_persist(request);
        }
        resolution.outcome
    }

    /// Create a backend category and append the new empty column.
    /// Column ids always come from the backend, never minted locally.
    pub async fn add_column(&mut self, name: &str) -> Result<ColumnId, EngineError> {
        let category = self
            .store
            .create_category(name)
            .await
            .map_err(EngineError::CreateColumn)?;
        let column_id = ColumnId::Category(category.id);
        let mut board = (*self.board).clone();
        board.columns.push(Column {
            id: column_id.clone(),
            title: category.name.clone(),
            cards: Vec::new(),
        });
        self.board = Arc::new(board);
        let _ = self.events.send(BoardEvent::ColumnAdded {
            column_id: column_id.clone(),
            title: category.name,
        });
        Ok(column_id)
    }

    /// Await all outstanding persistence calls. The engine never
    /// needs this for correctness; it exists for orderly shutdown.
    pub async fn flush(&mut self) {
        for handle in self.inflight.drain(..) {
            let _ = handle.await;
        }
    }

    fn dispatch_persist(&mut self, request: PersistRequest) {
        self.inflight.retain(|h| !h.is_finished());
        let store = Arc::clone(&self.store);
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = store
                .set_task_category(&request.card_id, &request.column_id)
                .await
            {
                // No rollback and no retry: the optimistic move stays
                // until the next full reload.
                log::warn!(
                    "[flowboard.engine] Failed to persist card {} into column {}: {}",
                    request.card_id,
                    request.column_id,
                    e
                );
                let _ = events.send(BoardEvent::PersistFailed {
                    card_id: request.card_id,
                    column_id: request.column_id,
                    error: e.to_string(),
                });
            }
        });
        self.inflight.push(handle);
    }
}
