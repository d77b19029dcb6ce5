/// Drop finalization: the decision taken once per completed drag.
///
/// Same-column reorders are local-only (the backend never persists
/// intra-column order). A drop whose final column differs from the
/// drag's origin column produces exactly one persistence request,
/// no matter how many columns the card passed through while hovering.
use super::{resolve_target_column, DragSession, DragTarget};
use crate::drag::reconcile::move_card_between_columns;
use crate::types::{Board, ColumnId};

/// The single mutation the engine ever asks the task store to make.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistRequest {
    pub card_id: String,
    pub column_id: ColumnId,
}

/// What a completed drag amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// No valid target, or the card vanished from the board.
    Abandoned,
    /// Nothing changed (self-drop, or dropped where it already was).
    NoChange,
    /// Card order changed within one column; never persisted.
    Reordered { column_id: ColumnId },
    /// The card ended in a different column than it started in.
    Moved { from: ColumnId, to: ColumnId },
}

/// Result of finalizing a drop: the replacement snapshot if the board
/// changed, the outcome, and at most one persistence request.
#[derive(Debug)]
pub struct DropResolution {
    pub board: Option<Board>,
    pub outcome: DropOutcome,
    pub persist: Option<PersistRequest>,
}

impl DropResolution {
    fn unchanged(outcome: DropOutcome) -> Self {
        DropResolution {
            board: None,
            outcome,
            persist: None,
        }
    }
}

/// Apply the drop decision table against the board as it stands at
/// drag-end (already reflecting any hover reconciliation).
pub fn finalize_drop(
    board: &Board,
    session: &DragSession,
    target: Option<&DragTarget>,
) -> DropResolution {
    let Some(target) = target else {
        // Pointer released outside any drop zone.
        return DropResolution::unchanged(DropOutcome::Abandoned);
    };

    let active_id = session.active_card_id.as_str();
    if target.is_card(active_id) {
        return DropResolution::unchanged(DropOutcome::NoChange);
    }

    let Some(active_column) = board.find_column_containing(active_id) else {
        log::debug!(
            "[flowboard.drag] Card {} gone at drop time; abandoning",
            active_id
        );
        return DropResolution::unchanged(DropOutcome::Abandoned);
    };
    let Some(over_column) = resolve_target_column(board, target) else {
        return DropResolution::unchanged(DropOutcome::Abandoned);
    };

    if active_column.id == over_column.id {
        return finalize_within_column(board, session, target, over_column);
    }

    // Cross-column at drop time: the hover reconciler normally gets
    // here first, but a drop can land without any hover event having
    // fired. Apply the same structural move it would have.
    let insert_at = match target {
        DragTarget::Column(_) => over_column.cards.len(),
        DragTarget::Card(over_id) => over_column
            .cards
            .iter()
            .position(|c| &c.id == over_id)
            .unwrap_or(over_column.cards.len()),
    };
    let from = active_column.id.clone();
    let to = over_column.id.clone();
    let next = move_card_between_columns(board, active_id, insert_at, &from, &to);

    if to == session.origin_column_id {
        // The card came back home; a local adjustment only.
        return DropResolution {
            board: Some(next),
            outcome: DropOutcome::Reordered { column_id: to },
            persist: None,
        };
    }
    DropResolution {
        board: Some(next),
        outcome: DropOutcome::Moved {
            from: session.origin_column_id.clone(),
            to: to.clone(),
        },
        persist: Some(PersistRequest {
            card_id: active_id.to_string(),
            column_id: to,
        }),
    }
}

/// The drop landed in the column the card is already in. Reorder by
/// index if the target is a card in a different slot, and persist only
/// when this column is not the one the drag originally started in.
fn finalize_within_column(
    board: &Board,
    session: &DragSession,
    target: &DragTarget,
    column: &crate::types::Column,
) -> DropResolution {
    let active_id = session.active_card_id.as_str();
    let column_id = &column.id;
    let mut next: Option<Board> = None;
    let mut reordered = false;

    if let DragTarget::Card(over_id) = target {
        let old_index = column.cards.iter().position(|c| c.id == active_id);
        let new_index = column.cards.iter().position(|c| &c.id == over_id);
        if let (Some(old_index), Some(new_index)) = (old_index, new_index) {
            if old_index != new_index {
                let mut moved = board.clone();
                for col in &mut moved.columns {
                    if &col.id == column_id {
                        let card = col.cards.remove(old_index);
                        col.cards.insert(new_index, card);
                    }
                }
                next = Some(moved);
                reordered = true;
            }
        }
    }

    if column_id != &session.origin_column_id {
        // The card crossed columns during hover; the visual move is
        // already applied, only the category change goes upstream.
        return DropResolution {
            board: next,
            outcome: DropOutcome::Moved {
                from: session.origin_column_id.clone(),
                to: column_id.clone(),
            },
            persist: Some(PersistRequest {
                card_id: active_id.to_string(),
                column_id: column_id.clone(),
            }),
        };
    }

    if reordered {
        return DropResolution {
            board: next,
            outcome: DropOutcome::Reordered {
                column_id: column_id.clone(),
            },
            persist: None,
        };
    }
    DropResolution::unchanged(DropOutcome::NoChange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Card, Column};

    fn make_card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            priority: None,
            status: None,
            start_date: None,
            end_date: None,
            assignees: Vec::new(),
        }
    }

    fn make_column(id: &str, card_ids: &[&str]) -> Column {
        Column {
            id: ColumnId::Category(id.to_string()),
            title: id.to_uppercase(),
            cards: card_ids.iter().map(|c| make_card(c)).collect(),
        }
    }

    fn session(card: &str, origin: &str) -> DragSession {
        DragSession {
            active_card_id: card.to_string(),
            origin_column_id: ColumnId::Category(origin.to_string()),
        }
    }

    fn card_ids(board: &Board, column: &str) -> Vec<String> {
        board
            .find_column(&ColumnId::Category(column.to_string()))
            .unwrap()
            .cards
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    #[test]
    fn test_no_target_abandons() {
        let board = Board {
            columns: vec![make_column("a", &["t1"])],
        };
        let res = finalize_drop(&board, &session("t1", "a"), None);
        assert_eq!(res.outcome, DropOutcome::Abandoned);
        assert!(res.board.is_none());
        assert!(res.persist.is_none());
    }

    #[test]
    fn test_self_drop_changes_nothing() {
        let board = Board {
            columns: vec![make_column("a", &["t1", "t2"])],
        };
        let res = finalize_drop(
            &board,
            &session("t1", "a"),
            Some(&DragTarget::Card("t1".to_string())),
        );
        assert_eq!(res.outcome, DropOutcome::NoChange);
        assert!(res.board.is_none());
        assert!(res.persist.is_none());
    }

    #[test]
    fn test_same_column_reorder_is_local_only() {
        let board = Board {
            columns: vec![make_column("a", &["t1", "t2"])],
        };
        let res = finalize_drop(
            &board,
            &session("t2", "a"),
            Some(&DragTarget::Card("t1".to_string())),
        );
        assert_eq!(
            res.outcome,
            DropOutcome::Reordered {
                column_id: ColumnId::Category("a".to_string())
            }
        );
        assert!(res.persist.is_none());
        assert_eq!(card_ids(&res.board.unwrap(), "a"), vec!["t2", "t1"]);
    }

    #[test]
    fn test_drop_after_hover_persists_final_column() {
        // Hover already moved t1 into b; the drop sees a same-column
        // target but a changed origin.
        let board = Board {
            columns: vec![make_column("a", &[]), make_column("b", &["t1"])],
        };
        let res = finalize_drop(
            &board,
            &session("t1", "a"),
            Some(&DragTarget::Column(ColumnId::Category("b".to_string()))),
        );
        assert_eq!(
            res.outcome,
            DropOutcome::Moved {
                from: ColumnId::Category("a".to_string()),
                to: ColumnId::Category("b".to_string()),
            }
        );
        assert_eq!(
            res.persist,
            Some(PersistRequest {
                card_id: "t1".to_string(),
                column_id: ColumnId::Category("b".to_string()),
            })
        );
        // Board already reflected the move; no new snapshot needed.
        assert!(res.board.is_none());
    }

    #[test]
    fn test_drop_without_hover_applies_move_and_persists() {
        let board = Board {
            columns: vec![make_column("a", &["t1"]), make_column("b", &["t2"])],
        };
        let res = finalize_drop(
            &board,
            &session("t1", "a"),
            Some(&DragTarget::Card("t2".to_string())),
        );
        assert!(matches!(res.outcome, DropOutcome::Moved { .. }));
        let next = res.board.unwrap();
        assert_eq!(card_ids(&next, "a"), Vec::<String>::new());
        assert_eq!(card_ids(&next, "b"), vec!["t1", "t2"]);
        assert_eq!(
            res.persist.unwrap().column_id,
            ColumnId::Category("b".to_string())
        );
    }

    #[test]
    fn test_drop_back_into_origin_never_persists() {
        // Hover moved t1 out to b, then the drop lands on a card back
        // in the origin column.
        let board = Board {
            columns: vec![make_column("a", &["t2"]), make_column("b", &["t1"])],
        };
        let res = finalize_drop(
            &board,
            &session("t1", "a"),
            Some(&DragTarget::Card("t2".to_string())),
        );
        assert_eq!(
            res.outcome,
            DropOutcome::Reordered {
                column_id: ColumnId::Category("a".to_string())
            }
        );
        assert!(res.persist.is_none());
        let next = res.board.unwrap();
        assert_eq!(card_ids(&next, "a"), vec!["t1", "t2"]);
        assert!(card_ids(&next, "b").is_empty());
    }

    #[test]
    fn test_unresolvable_target_abandons() {
        let board = Board {
            columns: vec![make_column("a", &["t1"])],
        };
        let res = finalize_drop(
            &board,
            &session("t1", "a"),
            Some(&DragTarget::Card("ghost".to_string())),
        );
        assert_eq!(res.outcome, DropOutcome::Abandoned);
        assert!(res.persist.is_none());
    }

    #[test]
    fn test_same_slot_drop_is_nochange() {
        let board = Board {
            columns: vec![make_column("a", &["t1", "t2"])],
        };
        let res = finalize_drop(
            &board,
            &session("t1", "a"),
            Some(&DragTarget::Column(ColumnId::Category("a".to_string()))),
        );
        assert_eq!(res.outcome, DropOutcome::NoChange);
        assert!(res.board.is_none());
        assert!(res.persist.is_none());
    }
}
