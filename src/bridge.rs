/// Builds the initial board from backend categories and tasks.
///
/// One column per category, in backend return order. Tasks with no
/// category collect into a synthetic Uncategorized column appended
/// last, created only when at least one such task exists.
use crate::store::{Category, TaskRecord};
use crate::types::{Board, Card, Column, ColumnId, UNCATEGORIZED_TITLE};

pub fn build_board(categories: &[Category], tasks: Vec<TaskRecord>) -> Board {
    let mut columns: Vec<Column> = categories
        .iter()
        .map(|cat| Column {
            id: ColumnId::Category(cat.id.clone()),
            title: cat.name.clone(),
            cards: Vec::new(),
        })
        .collect();

    let mut uncategorized: Vec<Card> = Vec::new();

    for task in tasks {
        match task.category_id.clone() {
            None => uncategorized.push(task.into_card()),
            Some(cat_id) => {
                match columns
                    .iter_mut()
                    .find(|col| col.id == ColumnId::Category(cat_id.clone()))
                {
                    Some(col) => col.cards.push(task.into_card()),
                    None => {
                        // Dangling category reference: the task is left
                        // off the board until the next reload, same as
                        // the backend returning it under a deleted
                        // category. Not repaired into Uncategorized.
                        log::warn!(
                            "[flowboard.bridge] Task {} references unknown category {}; omitted",
                            task.id,
                            cat_id
                        );
                    }
                }
            }
        }
    }

    if !uncategorized.is_empty() {
        columns.push(Column {
            id: ColumnId::Uncategorized,
            title: UNCATEGORIZED_TITLE.to_string(),
            cards: uncategorized,
        });
    }

    Board { columns }
}
