/// Cross-column hover reconciliation.
///
/// Runs on every drag-over event. Only structural cross-column moves
/// happen here; a hover inside the card's current column is a no-op,
/// same-column reordering is resolved once at drop time.
use super::{resolve_target_column, DragTarget};
use crate::types::Board;

/// Compute the next board snapshot for a hover, or `None` when the
/// hover changes nothing (self-target, failed resolution, or target
/// inside the card's current column). The input board is never
/// touched; a changed result is a fresh snapshot with the active card
/// removed from its column and inserted into the hovered one.
pub fn reconcile_hover(board: &Board, active_id: &str, target: &DragTarget) -> Option<Board> {
    // Guard ordering matters: the dragged card hovering over itself
    // is a no-op before any column resolution happens.
    if target.is_card(active_id) {
        return None;
    }

    let active_column = board.find_column_containing(active_id)?;
    let over_column = resolve_target_column(board, target)?;
    if active_column.id == over_column.id {
        return None;
    }

    let insert_at = match target {
        // Hovering a column's empty area drops the card at the end.
        DragTarget::Column(_) => over_column.cards.len(),
        // Hovering a card takes that card's slot; it and everything
        // after shift right.
        DragTarget::Card(over_id) => over_column
            .cards
            .iter()
            .position(|c| &c.id == over_id)?,
    };

    let from = active_column.id.clone();
    let to = over_column.id.clone();
    Some(move_card_between_columns(board, active_id, insert_at, &from, &to))
}

/// Build a new snapshot with `card_id` moved from column `from` to
/// position `insert_at` of column `to`. Exactly one removal and one
/// insertion: a card can never be duplicated or dropped here.
pub(crate) fn move_card_between_columns(
    board: &Board,
    card_id: &str,
    insert_at: usize,
    from: &crate::types::ColumnId,
    to: &crate::types::ColumnId,
) -> Board {
    let mut next = board.clone();
    let mut moved = None;
    for column in &mut next.columns {
        if &column.id == from {
            if let Some(pos) = column.cards.iter().position(|c| c.id == card_id) {
                moved = Some(column.cards.remove(pos));
            }
        }
    }
    if let Some(card) = moved {
        for column in &mut next.columns {
            if &column.id == to {
                let at = insert_at.min(column.cards.len());
                column.cards.insert(at, card);
                break;
            }
        }
    }
    next
}
