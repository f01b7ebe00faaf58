//! Draw-instruction emission — pure coordinate computation, no rendering.
//!
//! Consumes a `CardSet` and produces per-page instruction lists for the
//! document backend: one rectangle outline and one centered text per cell,
//! plus optional header-label and title rows. Deterministic: identical
//! inputs yield identical instructions.

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::generation::{Card, CardSet, Cell};
use crate::layout::font_metrics::{get_metrics, FontStyle};
use crate::layout::page::{slot_rect, CardsPerPage, Rect, TITLE_BAND_MM};

/// Millimetres per PostScript point.
const MM_PER_PT: f32 = 0.352_778;

/// Baseline drop from the vertical center, in em — roughly half the
/// Helvetica cap height, so cell text sits optically centered.
const BASELINE_DROP_EM: f32 = 0.35;

/// Visual role of a text instruction; the renderer picks face and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextStyle {
    Title,
    Header,
    Number,
    /// The FREE marker — rendered bold and smaller than numbers.
    Free,
}

impl TextStyle {
    pub fn size_pt(self) -> f32 {
        match self {
            TextStyle::Title => 14.0,
            TextStyle::Header => 12.0,
            TextStyle::Number => 12.0,
            TextStyle::Free => 9.0,
        }
    }

    pub fn font(self) -> FontStyle {
        match self {
            TextStyle::Number => FontStyle::Regular,
            TextStyle::Title | TextStyle::Header | TextStyle::Free => FontStyle::Bold,
        }
    }
}

/// One drawing primitive, in mm with a bottom-left origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawInstruction {
    /// Stroke the outline of a rectangle.
    CellOutline(Rect),
    /// Draw `content` with its baseline starting at (x, y).
    Text {
        x: f32,
        y: f32,
        style: TextStyle,
        content: String,
    },
}

/// All instructions for one output page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInstructions {
    /// 1-based page number.
    pub number: usize,
    pub instructions: Vec<DrawInstruction>,
}

/// Layout settings resolved from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageLayoutConfig {
    pub cards_per_page: CardsPerPage,
    pub show_header_row: bool,
    /// Drawn above each card when set (at most 30 characters).
    pub title: Option<String>,
}

/// Assigns cards to pages and slots in row-major order and emits the draw
/// instructions for every cell.
pub fn layout_cards(
    cards: &CardSet,
    grid: &GridConfig,
    config: &PageLayoutConfig,
) -> Vec<PageInstructions> {
    cards
        .cards()
        .chunks(config.cards_per_page.count())
        .enumerate()
        .map(|(page_index, page_cards)| {
            let mut instructions = Vec::new();
            for (position, card) in page_cards.iter().enumerate() {
                let slot = slot_rect(config.cards_per_page, position);
                layout_card(card, grid, config, slot, &mut instructions);
            }
            PageInstructions {
                number: page_index + 1,
                instructions,
            }
        })
        .collect()
}

fn layout_card(
    card: &Card,
    grid: &GridConfig,
    config: &PageLayoutConfig,
    slot: Rect,
    out: &mut Vec<DrawInstruction>,
) {
    let n = card.dimension() as usize;

    let mut grid_top = slot.y + slot.height;
    if let Some(title) = &config.title {
        out.push(centered_text(
            title,
            TextStyle::Title,
            slot.x + slot.width / 2.0,
            grid_top - TITLE_BAND_MM / 2.0,
        ));
        grid_top -= TITLE_BAND_MM;
    }

    let total_rows = n + usize::from(config.show_header_row);
    let cell_w = slot.width / n as f32;
    let cell_h = (grid_top - slot.y) / total_rows as f32;

    // Top edge of the row currently being emitted.
    let mut row_top = grid_top;

    if config.show_header_row {
        for (col, label) in grid.column_labels.iter().enumerate() {
            let rect = cell_rect(slot.x, row_top, col, cell_w, cell_h);
            out.push(DrawInstruction::CellOutline(rect));
            out.push(centered_cell_text(label, TextStyle::Header, rect));
        }
        row_top -= cell_h;
    }

    for row in 0..n {
        for col in 0..n {
            let rect = cell_rect(slot.x, row_top, col, cell_w, cell_h);
            out.push(DrawInstruction::CellOutline(rect));
            let (text, style) = match card.cell(row, col) {
                Cell::Free => ("FREE".to_string(), TextStyle::Free),
                Cell::Number(v) => (v.to_string(), TextStyle::Number),
            };
            out.push(centered_cell_text(&text, style, rect));
        }
        row_top -= cell_h;
    }
}

fn cell_rect(origin_x: f32, row_top: f32, col: usize, cell_w: f32, cell_h: f32) -> Rect {
    Rect {
        x: origin_x + col as f32 * cell_w,
        y: row_top - cell_h,
        width: cell_w,
        height: cell_h,
    }
}

fn centered_cell_text(text: &str, style: TextStyle, rect: Rect) -> DrawInstruction {
    centered_text(
        text,
        style,
        rect.x + rect.width / 2.0,
        rect.y + rect.height / 2.0,
    )
}

/// Centers `text` on (cx, cy): horizontally from the metric tables,
/// vertically by dropping the baseline below the center.
fn centered_text(text: &str, style: TextStyle, cx: f32, cy: f32) -> DrawInstruction {
    let size_mm = style.size_pt() * MM_PER_PT;
    let width_mm = get_metrics(style.font()).measure_str(text) * size_mm;
    DrawInstruction::Text {
        x: cx - width_mm / 2.0,
        y: cy - BASELINE_DROP_EM * size_mm,
        style,
        content: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridCatalog;
    use crate::generation::{generate_card_set, GenerateOptions};
    use crate::layout::page::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_cards(count: u32, grid_size: u8) -> (CardSet, GridConfig) {
        let catalog = GridCatalog::standard();
        let mut rng = StdRng::seed_from_u64(11);
        let cards = generate_card_set(
            &catalog,
            grid_size,
            &GenerateOptions::default(),
            count,
            &mut rng,
        )
        .unwrap();
        let grid = catalog.get(grid_size).unwrap().clone();
        (cards, grid)
    }

    fn make_config(cards_per_page: CardsPerPage) -> PageLayoutConfig {
        PageLayoutConfig {
            cards_per_page,
            show_header_row: true,
            title: Some("Byngo Card".to_string()),
        }
    }

    // ── pagination ──────────────────────────────────────────────────────────

    #[test]
    fn test_nine_cards_at_four_per_page_lay_out_as_4_4_1() {
        let (cards, grid) = make_cards(9, 5);
        let pages = layout_cards(&cards, &grid, &make_config(CardsPerPage::Four));

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[2].number, 3);

        // Each card emits: 1 title + header (n outlines + n labels) +
        // n*n cells × (outline + text).
        let per_card = 1 + 2 * 5 + 2 * 25;
        let card_counts: Vec<usize> = pages
            .iter()
            .map(|p| p.instructions.len() / per_card)
            .collect();
        assert_eq!(card_counts, vec![4, 4, 1]);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let (cards, grid) = make_cards(7, 4);
        let config = make_config(CardsPerPage::Two);

        let first = layout_cards(&cards, &grid, &config);
        let second = layout_cards(&cards, &grid, &config);
        assert_eq!(first, second, "same inputs must give identical coordinates");
    }

    // ── per-card geometry ───────────────────────────────────────────────────

    #[test]
    fn test_hiding_the_header_row_makes_cells_taller() {
        let (cards, grid) = make_cards(1, 5);
        let mut config = make_config(CardsPerPage::One);

        let tall = cell_heights(&layout_cards(&cards, &grid, &config));
        config.show_header_row = false;
        let taller = cell_heights(&layout_cards(&cards, &grid, &config));

        // With headers: 6 bands share the grid; without: 5.
        assert!(taller[0] > tall[0]);
        assert!((tall[0] * 6.0 - taller[0] * 5.0).abs() < 1e-3);
    }

    fn cell_heights(pages: &[PageInstructions]) -> Vec<f32> {
        pages[0]
            .instructions
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::CellOutline(rect) => Some(rect.height),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_header_labels_precede_cells_and_use_header_style() {
        let (cards, grid) = make_cards(1, 3);
        let pages = layout_cards(&cards, &grid, &make_config(CardsPerPage::One));

        let texts: Vec<(&str, TextStyle)> = pages[0]
            .instructions
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::Text { content, style, .. } => {
                    Some((content.as_str(), *style))
                }
                _ => None,
            })
            .collect();

        assert_eq!(texts[0], ("Byngo Card", TextStyle::Title));
        assert_eq!(texts[1], ("BY", TextStyle::Header));
        assert_eq!(texts[2], ("N", TextStyle::Header));
        assert_eq!(texts[3], ("GO", TextStyle::Header));
    }

    #[test]
    fn test_free_cell_is_flagged_for_alternate_styling() {
        let (cards, grid) = make_cards(1, 5);
        let pages = layout_cards(&cards, &grid, &make_config(CardsPerPage::One));

        let free: Vec<&DrawInstruction> = pages[0]
            .instructions
            .iter()
            .filter(|i| {
                matches!(
                    i,
                    DrawInstruction::Text {
                        style: TextStyle::Free,
                        ..
                    }
                )
            })
            .collect();
        assert_eq!(free.len(), 1, "exactly one FREE marker per card");
        if let DrawInstruction::Text { content, .. } = free[0] {
            assert_eq!(content, "FREE");
        }
    }

    #[test]
    fn test_no_title_means_no_title_band() {
        let (cards, grid) = make_cards(1, 5);
        let mut config = make_config(CardsPerPage::One);
        config.title = None;

        let pages = layout_cards(&cards, &grid, &config);
        let has_title = pages[0].instructions.iter().any(|i| {
            matches!(
                i,
                DrawInstruction::Text {
                    style: TextStyle::Title,
                    ..
                }
            )
        });
        assert!(!has_title);
    }

    #[test]
    fn test_everything_stays_inside_the_page() {
        let (cards, grid) = make_cards(8, 4);
        let pages = layout_cards(&cards, &grid, &make_config(CardsPerPage::Four));

        for page in &pages {
            for instruction in &page.instructions {
                match instruction {
                    DrawInstruction::CellOutline(rect) => {
                        assert!(rect.x >= 0.0 && rect.x + rect.width <= PAGE_WIDTH_MM);
                        assert!(rect.y >= 0.0 && rect.y + rect.height <= PAGE_HEIGHT_MM);
                    }
                    DrawInstruction::Text { x, y, .. } => {
                        assert!((0.0..=PAGE_WIDTH_MM).contains(x));
                        assert!((0.0..=PAGE_HEIGHT_MM).contains(y));
                    }
                }
            }
        }
    }
}
