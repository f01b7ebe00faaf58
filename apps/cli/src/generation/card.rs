//! Card data model.
//!
//! A `Card` is an immutable n×n matrix of cells. The numeric matrix is
//! built first; the FREE marker is applied afterwards as a derived copy
//! (`with_free_space`), never by mutating a finished card.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// A single card cell: a drawn number or the FREE marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Number(u16),
    Free,
}

/// One bingo card, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    dimension: u8,
    rows: Vec<Vec<Cell>>,
}

impl Card {
    /// Builds a card from column-major drawn values.
    ///
    /// `columns[c]` holds the values for column `c`, top to bottom. Callers
    /// guarantee `columns` is square with side `dimension`.
    pub(crate) fn from_columns(dimension: u8, columns: Vec<Vec<u16>>) -> Self {
        let n = dimension as usize;
        debug_assert_eq!(columns.len(), n);
        debug_assert!(columns.iter().all(|c| c.len() == n));

        let rows = (0..n)
            .map(|row| (0..n).map(|col| Cell::Number(columns[col][row])).collect())
            .collect();

        Self { dimension, rows }
    }

    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    /// The values of one column, top to bottom.
    pub fn column(&self, col: usize) -> Vec<Cell> {
        self.rows.iter().map(|row| row[col]).collect()
    }

    /// Derived copy with one cell overridden to FREE.
    pub fn with_free_space(&self, row: usize, col: usize) -> Card {
        let mut rows = self.rows.clone();
        rows[row][col] = Cell::Free;
        Card {
            dimension: self.dimension,
            rows,
        }
    }

    /// Position of the FREE cell, if the card has one.
    pub fn free_cell(&self) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|cell| *cell == Cell::Free)
                .map(|c| (r, c))
        })
    }

    /// Flattened row-major cell sequence — the structural identity used to
    /// deduplicate cards within a set.
    pub fn signature(&self) -> Vec<Cell> {
        self.rows.iter().flatten().copied().collect()
    }
}

/// An ordered sequence of structurally distinct cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSet {
    cards: Vec<Card>,
}

impl CardSet {
    /// Wraps cards the generator has already deduplicated.
    pub(crate) fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
