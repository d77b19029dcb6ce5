/// Drag lifecycle: session state plus the hover/drop logic.
///
/// The engine is driven by three plain calls (drag-start, drag-over,
/// drag-end) so it stays independent of any pointer/UI toolkit. State
/// transitions: Idle -> Dragging on start, Dragging -> Dragging on
/// every hover, Dragging -> Idle unconditionally on end.
pub mod finalize;
pub mod reconcile;

use crate::types::{Board, ColumnId};

/// What the pointer is currently over: a card, or a column's empty
/// area. Board drop zones are always one of the two.
#[derive(Debug, Clone, PartialEq)]
pub enum DragTarget {
    Card(String),
    Column(ColumnId),
}

impl DragTarget {
    /// True when the target is the card with the given id.
    pub fn is_card(&self, card_id: &str) -> bool {
        matches!(self, DragTarget::Card(id) if id == card_id)
    }
}

/// Transient state of an in-progress drag. Created on drag-start,
/// never mutated by hovers, dropped unconditionally on drag-end.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub active_card_id: String,
    /// The column the card was in when the drag began. Hover
    /// reconciliation moves the card visually; this stays fixed and
    /// decides at drop time whether anything must be persisted.
    pub origin_column_id: ColumnId,
}

impl DragSession {
    /// Begin a drag for the given card. Returns `None` when the card
    /// is not on the board (it may have been removed concurrently),
    /// in which case the state machine stays Idle.
    pub fn begin(board: &Board, card_id: &str) -> Option<DragSession> {
        let column = board.find_column_containing(card_id)?;
        Some(DragSession {
            active_card_id: card_id.to_string(),
            origin_column_id: column.id.clone(),
        })
    }
}

/// Resolve the column a drag target falls in: the column itself, or
/// the column currently holding the target card.
pub(crate) fn resolve_target_column<'a>(
    board: &'a Board,
    target: &DragTarget,
) -> Option<&'a crate::types::Column> {
    match target {
        DragTarget::Column(id) => board.find_column(id),
        DragTarget::Card(card_id) => board.find_column_containing(card_id),
    }
}
