/// Events emitted by the engine for render/observability layers.
use serde::{Deserialize, Serialize};

use crate::types::ColumnId;

/// Events broadcast when the board changes or a persistence call
/// settles. Subscribers that lag simply miss events; the current
/// board snapshot is always available from the engine directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BoardEvent {
    Loaded {
        columns: usize,
        cards: usize,
    },
    ColumnAdded {
        column_id: ColumnId,
        title: String,
    },
    CardMoved {
        card_id: String,
        from: ColumnId,
        to: ColumnId,
    },
    PersistFailed {
        card_id: String,
        column_id: ColumnId,
        error: String,
    },
}
