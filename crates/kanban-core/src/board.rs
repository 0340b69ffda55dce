//! Board State
//!
//! In-memory snapshot of the three columns and their cards.
//! Within each column, positions are a dense 0..n-1 ranking once any
//! reconciliation pass has finished.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::card::{Card, CardId};
use crate::codec::derive_column;
use crate::column::{Column, ColumnId};
use crate::todo::TodoItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub title: String,
    columns: Vec<Column>,
    cards: Vec<Card>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardState {
    pub const DEFAULT_TITLE: &'static str = "Mi Tablero";

    /// Three fixed columns, no cards
    pub fn empty() -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            columns: Column::fixed(),
            cards: Vec::new(),
        }
    }

    /// Bucket remote items into columns, keeping the order they arrived in
    pub fn from_items(items: &[TodoItem]) -> Self {
        let mut board = Self::empty();
        for item in items {
            let column = derive_column(&item.completed, &item.category);
            let position = board.count_in(column);
            board.cards.push(Card::in_column(item, column, position));
        }
        debug!("[BOARD] built from {} items", board.cards.len());
        board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub(crate) fn card_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    /// Cards of a column ordered by position
    pub fn cards_in(&self, column: ColumnId) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self.cards.iter().filter(|card| card.column == column).collect();
        cards.sort_by_key(|card| card.position);
        cards
    }

    pub fn count_in(&self, column: ColumnId) -> usize {
        self.cards.iter().filter(|card| card.column == column).count()
    }

    /// Append a card to the end of its column
    pub fn insert_card(&mut self, mut card: Card) {
        card.position = self.count_in(card.column);
        self.cards.push(card);
    }

    /// Remove a card and close the gap it leaves
    pub fn remove_card(&mut self, id: &str) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        let removed = self.cards.remove(index);
        self.compact(removed.column);
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Assign positions 0..n-1 following `order`
    pub(crate) fn reindex(&mut self, column: ColumnId, order: &[CardId]) {
        for (position, id) in order.iter().enumerate() {
            if let Some(card) = self.card_mut(id) {
                card.relocate(column, position);
            }
        }
    }

    /// Re-densify a column, keeping its current relative order
    pub(crate) fn compact(&mut self, column: ColumnId) {
        let order: Vec<CardId> = self.cards_in(column).iter().map(|card| card.id.clone()).collect();
        self.reindex(column, &order);
    }

    /// Every column holds exactly the positions 0..n-1
    pub fn is_dense(&self) -> bool {
        ColumnId::ALL.into_iter().all(|column| {
            self.cards_in(column)
                .iter()
                .enumerate()
                .all(|(rank, card)| card.position == rank)
        })
    }
}
