use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved column id for cards whose task carries no category.
/// Never a valid backend category id.
pub const UNCATEGORIZED_ID: &str = "uncategorized";

/// Display title of the synthetic catch-all column.
pub const UNCATEGORIZED_TITLE: &str = "Uncategorized";

/// Card priority, a small fixed set. Absent is allowed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    Important,
}

/// A task or sub-task surfaced on the board.
///
/// Identity is owned by the backend: the board never invents or
/// destroys a card id, it only moves cards between columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Free-form workflow label, independent of column membership.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
}

/// Identifies a board column: a backend category, or the single
/// synthetic catch-all for uncategorized cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Category(String),
    Uncategorized,
}

impl ColumnId {
    pub fn as_str(&self) -> &str {
        match self {
            ColumnId::Category(id) => id,
            ColumnId::Uncategorized => UNCATEGORIZED_ID,
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ColumnId {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColumnId {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        if s == UNCATEGORIZED_ID {
            Ok(ColumnId::Uncategorized)
        } else {
            Ok(ColumnId::Category(s))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Card order is presentation-only; the backend does not persist it.
    pub cards: Vec<Card>,
}

/// The full board: an ordered sequence of columns. Column order is
/// append-only for the lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// Find a column by id.
    pub fn find_column(&self, column_id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == column_id)
    }

    /// Find the column holding the card with the given id.
    /// At most one column can match: a card id appears in exactly one
    /// column's card list at any time.
    pub fn find_column_containing(&self, card_id: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|col| col.cards.iter().any(|c| c.id == card_id))
    }

    /// Index of a card within its column, if present anywhere.
    pub fn locate_card(&self, card_id: &str) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, col)| {
            col.cards
                .iter()
                .position(|c| c.id == card_id)
                .map(|pos| (ci, pos))
        })
    }

    /// Total number of cards across all columns.
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|col| col.cards.len()).sum()
    }

    /// Summary rows for list-style views.
    pub fn summaries(&self) -> Vec<ColumnSummary> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, col)| ColumnSummary {
                index,
                title: col.title.clone(),
                card_count: col.cards.len(),
            })
            .collect()
    }
}

/// Summary info for a column in list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub index: usize,
    pub title: String,
    pub card_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn make_board() -> Board {
        Board {
            columns: vec![
                Column {
                    id: ColumnId::Category("design".to_string()),
                    title: "Design".to_string(),
                    cards: vec![make_card("t1"), make_card("t2")],
                },
                Column {
                    id: ColumnId::Uncategorized,
                    title: UNCATEGORIZED_TITLE.to_string(),
                    cards: vec![make_card("t3")],
                },
            ],
        }
    }

    #[test]
    fn test_find_column_by_id() {
        let board = make_board();
        let col = board
            .find_column(&ColumnId::Category("design".to_string()))
            .unwrap();
        assert_eq!(col.title, "Design");
        assert!(board
            .find_column(&ColumnId::Category("missing".to_string()))
            .is_none());
    }

    #[test]
    fn test_find_column_containing_card() {
        let board = make_board();
        let col = board.find_column_containing("t3").unwrap();
        assert_eq!(col.id, ColumnId::Uncategorized);
        assert!(board.find_column_containing("t9").is_none());
    }

    #[test]
    fn test_locate_card() {
        let board = make_board();
        assert_eq!(board.locate_card("t2"), Some((0, 1)));
        assert_eq!(board.locate_card("t3"), Some((1, 0)));
        assert_eq!(board.locate_card("nope"), None);
    }

    #[test]
    fn test_card_count_and_summaries() {
        let board = make_board();
        assert_eq!(board.card_count(), 3);
        let summaries = board.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].card_count, 2);
        assert_eq!(summaries[1].title, UNCATEGORIZED_TITLE);
    }

    #[test]
    fn test_column_id_serde_round_trip() {
        let cat: ColumnId = serde_json::from_str("\"design\"").unwrap();
        assert_eq!(cat, ColumnId::Category("design".to_string()));
        let sentinel: ColumnId = serde_json::from_str("\"uncategorized\"").unwrap();
        assert_eq!(sentinel, ColumnId::Uncategorized);
        assert_eq!(serde_json::to_string(&sentinel).unwrap(), "\"uncategorized\"");
    }

    #[test]
    fn test_card_serializes_camel_case() {
        let mut card = make_card("t1");
        card.start_date = NaiveDate::from_ymd_opt(2025, 3, 1);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["startDate"], "2025-03-01");
        assert!(json.get("endDate").is_none());
        assert!(json.get("assignees").is_none());
    }
}
