//! Drag Reconciler
//!
//! Keeps card column membership and positions consistent across a drag
//! gesture:
//!
//! - `drag_start` records the active card (Idle -> Dragging)
//! - `drag_over` previews the card in the hovered column (repeatable)
//! - `drag_end` finalizes order and yields the single remote update
//!
//! A cancelled gesture (no target, or dropped on itself) puts the card
//! back where it started.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::card::{Card, CardId};
use crate::column::ColumnId;
use crate::todo::TodoFields;

/// Element under the pointer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropTarget {
    Column(ColumnId),
    Card(CardId),
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveDrag {
    card_id: CardId,
    origin_column: ColumnId,
    origin_position: usize,
}

/// Result of a finalized gesture: the moved card after reordering
#[derive(Debug, Clone, PartialEq)]
pub struct CardMove {
    pub card: Card,
    pub from: ColumnId,
}

impl CardMove {
    pub fn to(&self) -> ColumnId {
        self.card.column
    }

    /// Remote update for the moved card: its column, encoded
    pub fn fields(&self) -> TodoFields {
        self.card.fields()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragReconciler {
    active: Option<ActiveDrag>,
}

impl DragReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Pick up a card. Unknown ids are ignored.
    pub fn drag_start(&mut self, board: &mut BoardState, card_id: &str) -> bool {
        if let Some(previous) = self.active.take() {
            restore(board, &previous);
        }
        let Some(card) = board.card(card_id) else {
            return false;
        };
        debug!("[DND] start {} in {}", card_id, card.column);
        self.active = Some(ActiveDrag {
            card_id: card.id.clone(),
            origin_column: card.column,
            origin_position: card.position,
        });
        true
    }

    /// Live preview while hovering. Returns whether the board changed.
    ///
    /// Hovering another column (or a card in it) appends the dragged card
    /// to that column provisionally; its final slot is decided on drop.
    pub fn drag_over(&mut self, board: &mut BoardState, target: &DropTarget) -> bool {
        let Some(active) = &self.active else {
            return false;
        };
        let Some(current) = board.card(&active.card_id).map(|card| card.column) else {
            return false;
        };
        let column = match target {
            DropTarget::Column(column) => *column,
            DropTarget::Card(id) => match board.card(id) {
                Some(over) => over.column,
                None => return false,
            },
        };
        if column == current {
            return false;
        }

        let position = board.count_in(column);
        let card_id = active.card_id.clone();
        if let Some(card) = board.card_mut(&card_id) {
            card.relocate(column, position);
        }
        debug!("[DND] over {} -> preview in {} at {}", card_id, column, position);
        true
    }

    /// Drop. Clears the active card unconditionally.
    pub fn drag_end(&mut self, board: &mut BoardState, target: Option<&DropTarget>) -> Option<CardMove> {
        let active = self.active.take()?;

        let target = match target {
            Some(DropTarget::Card(id)) if *id == active.card_id => None,
            other => other,
        };
        let Some(target) = target else {
            debug!("[DND] cancelled {}", active.card_id);
            restore(board, &active);
            return None;
        };
        let Some(current) = board.card(&active.card_id).map(|card| card.column) else {
            debug!("[DND] {} vanished before drop", active.card_id);
            return None;
        };

        let column = match target {
            DropTarget::Column(column) => *column,
            DropTarget::Card(id) => board.card(id).map(|over| over.column).unwrap_or(current),
        };
        if column != current {
            // No preview reached this column; append before ordering
            let position = board.count_in(column);
            if let Some(card) = board.card_mut(&active.card_id) {
                card.relocate(column, position);
            }
        }

        let mut order: Vec<CardId> = board.cards_in(column).iter().map(|card| card.id.clone()).collect();
        let from = order.iter().position(|id| *id == active.card_id)?;
        let to = match target {
            DropTarget::Card(id) => order.iter().position(|other| other == id).unwrap_or(order.len()),
            DropTarget::Column(_) => order.len(),
        };
        move_element(&mut order, from, to);
        board.reindex(column, &order);
        if active.origin_column != column {
            board.compact(active.origin_column);
        }

        let card = board.card(&active.card_id)?.clone();
        debug!("[DND] drop {} into {} at {}", card.id, column, card.position);
        Some(CardMove {
            card,
            from: active.origin_column,
        })
    }
}

/// Put a card back where the gesture started
fn restore(board: &mut BoardState, drag: &ActiveDrag) {
    if let Some(card) = board.card_mut(&drag.card_id) {
        card.relocate(drag.origin_column, drag.origin_position);
    }
}

/// Remove the element at `from` and reinsert it at `to` (clamped)
fn move_element<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}
