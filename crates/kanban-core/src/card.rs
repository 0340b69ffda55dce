//! Card Entity
//!
//! A unit of work on the board. Column membership and position are local
//! state; only the column is persisted remotely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::column::ColumnId;
use crate::todo::{TodoFields, TodoItem};

/// Opaque identifier assigned by the remote store
pub type CardId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub column: ColumnId,
    pub title: String,
    pub description: Option<String>,
    /// Zero-based rank within the column
    pub position: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Build a card from a remote item placed in a known column
    pub fn in_column(item: &TodoItem, column: ColumnId, position: usize) -> Self {
        let now = Utc::now();
        Self {
            id: item.id.clone(),
            column,
            title: item.title.clone(),
            description: item.description.clone().filter(|d| !d.is_empty()),
            position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Fields to send when persisting this card
    pub fn fields(&self) -> TodoFields {
        TodoFields::new(self.title.clone(), self.description.clone(), self.column)
    }

    pub(crate) fn relocate(&mut self, column: ColumnId, position: usize) {
        if self.column != column || self.position != position {
            self.column = column;
            self.position = position;
            self.updated_at = Utc::now();
        }
    }
}
