//! Card generation — per-column sampling without replacement and bounded
//! unique card-set collection.
//!
//! Two sampling modes:
//! - banded (default): each column draws its values from that column's
//!   catalog range, so per-column uniqueness holds by construction;
//! - flat pool (`GenerateOptions::custom_range`): all n×n values are drawn
//!   unique across the whole card from one caller-supplied range.
//!
//! Set collection regenerates on signature collision under an explicit
//! attempt budget and fails with `CardSpaceExhausted` when the budget runs
//! out, instead of looping forever on exhaustively small pools.

#![allow(dead_code)]

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::config::{FreeSpacePolicy, GridCatalog, GridConfig};
use crate::errors::AppError;
use crate::generation::card::{Card, CardSet, Cell};

/// Card-count bounds for a single run.
pub const MIN_CARD_COUNT: u32 = 1;
pub const MAX_CARD_COUNT: u32 = 100;

/// Flat-pool values may not exceed three digits.
pub const MAX_POOL_VALUE: u16 = 999;

/// Generation attempts allowed per requested card before giving up.
const ATTEMPTS_PER_CARD: u32 = 100;

/// Options resolved from the CLI before generation starts.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Tri-state free-space override: `Some` beats the grid's default.
    pub free_space: Option<bool>,
    pub free_space_policy: FreeSpacePolicy,
    /// `Some((min, max))` switches to flat-pool sampling.
    pub custom_range: Option<(u16, u16)>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            free_space: None,
            free_space_policy: FreeSpacePolicy::Center,
            custom_range: None,
        }
    }
}

/// Generates a single card for `grid_size`.
pub fn generate_card<R: Rng + ?Sized>(
    catalog: &GridCatalog,
    grid_size: u8,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Card, AppError> {
    let config = catalog.get(grid_size)?;
    validate_custom_range(config, options.custom_range)?;
    Ok(draw_card(config, options, rng))
}

/// Generates `count` structurally distinct cards under the default attempt
/// budget (`count` × 100).
pub fn generate_card_set<R: Rng + ?Sized>(
    catalog: &GridCatalog,
    grid_size: u8,
    options: &GenerateOptions,
    count: u32,
    rng: &mut R,
) -> Result<CardSet, AppError> {
    generate_card_set_bounded(
        catalog,
        grid_size,
        options,
        count,
        count.saturating_mul(ATTEMPTS_PER_CARD),
        rng,
    )
}

/// Same as [`generate_card_set`] with an explicit attempt budget.
///
/// All validation happens up front; no card is drawn for an invalid
/// request.
pub fn generate_card_set_bounded<R: Rng + ?Sized>(
    catalog: &GridCatalog,
    grid_size: u8,
    options: &GenerateOptions,
    count: u32,
    attempt_budget: u32,
    rng: &mut R,
) -> Result<CardSet, AppError> {
    if !(MIN_CARD_COUNT..=MAX_CARD_COUNT).contains(&count) {
        return Err(AppError::InvalidCount(count));
    }
    let config = catalog.get(grid_size)?;
    validate_custom_range(config, options.custom_range)?;

    let mut seen: HashSet<Vec<Cell>> = HashSet::with_capacity(count as usize);
    let mut cards: Vec<Card> = Vec::with_capacity(count as usize);
    let mut attempts = 0u32;

    while cards.len() < count as usize {
        if attempts >= attempt_budget {
            return Err(AppError::CardSpaceExhausted {
                requested: count,
                collected: cards.len() as u32,
                attempts,
            });
        }
        attempts += 1;

        let card = draw_card(config, options, rng);
        if seen.insert(card.signature()) {
            debug!(card = cards.len() + 1, of = count, "generated card");
            cards.push(card);
        }
    }

    Ok(CardSet::new(cards))
}

fn draw_card<R: Rng + ?Sized>(
    config: &GridConfig,
    options: &GenerateOptions,
    rng: &mut R,
) -> Card {
    let n = config.dimension as usize;

    let columns: Vec<Vec<u16>> = match options.custom_range {
        Some((min, max)) => {
            // Flat pool: n×n values unique across the whole card.
            let mut pool: Vec<u16> = (min..=max).collect();
            pool.shuffle(rng);
            pool.truncate(n * n);
            pool.chunks(n).map(|chunk| chunk.to_vec()).collect()
        }
        None => config
            .column_ranges
            .iter()
            .map(|&(min, max)| {
                let mut pool: Vec<u16> = (min..=max).collect();
                pool.shuffle(rng);
                pool.truncate(n);
                pool
            })
            .collect(),
    };

    let card = Card::from_columns(config.dimension, columns);
    let free_enabled = options.free_space.unwrap_or(config.default_free_space);
    if free_enabled {
        let (row, col) = free_cell(config.dimension, options.free_space_policy, rng);
        card.with_free_space(row, col)
    } else {
        card
    }
}

/// Resolves where the FREE marker lands for one card.
fn free_cell<R: Rng + ?Sized>(
    dimension: u8,
    policy: FreeSpacePolicy,
    rng: &mut R,
) -> (usize, usize) {
    let n = dimension as usize;
    match policy {
        FreeSpacePolicy::Center => (n / 2, n / 2),
        FreeSpacePolicy::CenterRandomized => {
            if n % 2 == 0 {
                let lo = n / 2 - 1;
                (rng.random_range(lo..=lo + 1), rng.random_range(lo..=lo + 1))
            } else {
                (n / 2, n / 2)
            }
        }
    }
}

fn validate_custom_range(
    config: &GridConfig,
    range: Option<(u16, u16)>,
) -> Result<(), AppError> {
    let Some((min, max)) = range else {
        return Ok(());
    };

    if min >= max {
        return Err(AppError::InvalidRange(format!(
            "minimum value ({min}) cannot be greater than or equal to maximum value ({max})"
        )));
    }
    if max > MAX_POOL_VALUE {
        return Err(AppError::InvalidRange(format!(
            "maximum value ({max}) cannot exceed {MAX_POOL_VALUE}"
        )));
    }

    let cells = (config.dimension as usize).pow(2);
    let pool = (max - min + 1) as usize;
    if pool < cells {
        return Err(AppError::InvalidRange(format!(
            "range {min}..={max} holds {pool} values but a {0}x{0} card needs {cells}",
            config.dimension
        )));
    }

    Ok(())
}
