//! Core board reconciliation engine for FlowBoard kanban boards.
//!
//! Models a board as an ordered set of columns holding ordered cards,
//! keeps that model consistent while a card is dragged across columns,
//! and persists the one thing the backend tracks about a drag: which
//! column (category) the card ended in. Intra-column order is
//! presentation-only and never leaves the client.
//!
//! The engine is event-driven and UI-toolkit agnostic: the host feeds
//! it drag-start / drag-over / drag-end calls and renders the
//! immutable snapshot it exposes after each one. The remote backend
//! is reached only through the [`store::TaskStore`] trait.

pub mod bridge;
pub mod drag;
pub mod engine;
pub mod events;
pub mod store;
pub mod types;

pub use drag::finalize::{DropOutcome, PersistRequest};
pub use drag::{DragSession, DragTarget};
pub use engine::{BoardEngine, EngineConfig, EngineError};
pub use events::BoardEvent;
pub use store::{Category, StoreError, TaskRecord, TaskStore};
pub use types::{Board, Card, Column, ColumnId, ColumnSummary, Priority};
