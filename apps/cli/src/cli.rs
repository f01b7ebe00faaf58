//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::FreeSpacePolicy;
use crate::layout::page::CardsPerPage;

/// Titles longer than this would collide with the card grid.
const MAX_TITLE_CHARS: usize = 30;

/// Random bingo card generator.
#[derive(Parser, Debug)]
#[command(name = "byngo", version, about = "Random bingo card generator")]
pub struct Cli {
    /// Location and filename of the PDF to write.
    #[arg(short, long, default_value = "byngo-cards.pdf")]
    pub output: PathBuf,

    /// Number of players/cards to generate.
    #[arg(short = 'i', long = "num-players", default_value_t = 1)]
    pub num_players: u32,

    /// Size of grid: 3x3, 4x4, or 5x5.
    #[arg(short, long, default_value_t = 5)]
    pub grid_size: u8,

    /// Remove the free space.
    #[arg(short = 'x', long, conflicts_with = "free")]
    pub no_free: bool,

    /// Force a free space even if the grid's default omits it.
    #[arg(long)]
    pub free: bool,

    /// Draw the even-grid free space from the middle cells at random.
    #[arg(long)]
    pub random_free: bool,

    /// Minimum value to appear on the grid (flat-pool mode; requires --max).
    #[arg(short, long, requires = "max")]
    pub min: Option<u16>,

    /// Maximum value to appear on the grid (flat-pool mode; requires --min).
    #[arg(short = 'n', long, requires = "min")]
    pub max: Option<u16>,

    /// A title printed above each card.
    #[arg(short, long, value_parser = parse_title)]
    pub title: Option<String>,

    /// Cards per page when exporting: 1, 2, or 4.
    #[arg(short, long = "page", default_value = "4", value_parser = parse_cards_per_page)]
    pub page: CardsPerPage,

    /// Hide the column-label header row.
    #[arg(long)]
    pub no_headers: bool,
}

impl Cli {
    /// Tri-state free-space override: forced on, forced off, or grid default.
    pub fn free_space_override(&self) -> Option<bool> {
        if self.no_free {
            Some(false)
        } else if self.free {
            Some(true)
        } else {
            None
        }
    }

    pub fn free_space_policy(&self) -> FreeSpacePolicy {
        if self.random_free {
            FreeSpacePolicy::CenterRandomized
        } else {
            FreeSpacePolicy::Center
        }
    }

    /// Flat-pool range, when both bounds were given.
    pub fn custom_range(&self) -> Option<(u16, u16)> {
        self.min.zip(self.max)
    }
}

fn parse_title(s: &str) -> Result<String, String> {
    let chars = s.chars().count();
    if chars > MAX_TITLE_CHARS {
        Err(format!(
            "title is limited to {MAX_TITLE_CHARS} characters (got {chars})"
        ))
    } else {
        Ok(s.to_string())
    }
}

fn parse_cards_per_page(s: &str) -> Result<CardsPerPage, String> {
    match s {
        "1" => Ok(CardsPerPage::One),
        "2" => Ok(CardsPerPage::Two),
        "4" => Ok(CardsPerPage::Four),
        other => Err(format!("cards per page must be 1, 2, or 4 (got {other})")),
    }
}
