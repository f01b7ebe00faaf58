//! PDF rendering — consumes layout instructions and writes the document.
//!
//! The backend is printpdf with the builtin Helvetica faces, so no font
//! files ship with the binary. All geometry arrives pre-computed in mm from
//! the layout engine; this module only translates instructions into page
//! operations.

use std::fs;
use std::path::Path;

use printpdf::{BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, Point, Rgb};
use tracing::debug;

use crate::errors::AppError;
use crate::layout::font_metrics::FontStyle;
use crate::layout::instructions::{DrawInstruction, PageInstructions};
use crate::layout::page::{Rect, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

/// Grid line thickness in points.
const OUTLINE_THICKNESS_PT: f32 = 0.75;

pub struct PdfRenderer {
    document_title: String,
}

impl PdfRenderer {
    pub fn new(document_title: impl Into<String>) -> Self {
        Self {
            document_title: document_title.into(),
        }
    }

    /// Renders all pages into an in-memory PDF byte stream.
    ///
    /// Assembling fully in memory before any filesystem work means a write
    /// failure can never leave a partial document behind.
    pub fn render(&self, pages: &[PageInstructions]) -> Result<Vec<u8>, AppError> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            &self.document_title,
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "cards",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Pdf(e.to_string()))?;

        for (index, page) in pages.iter().enumerate() {
            let (page_idx, layer_idx) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(
                    Mm(PAGE_WIDTH_MM),
                    Mm(PAGE_HEIGHT_MM),
                    format!("Page {}", index + 1),
                )
            };
            let layer = doc.get_page(page_idx).get_layer(layer_idx);
            layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
            layer.set_outline_thickness(OUTLINE_THICKNESS_PT);

            for instruction in &page.instructions {
                match instruction {
                    DrawInstruction::CellOutline(rect) => layer.add_line(outline(rect)),
                    DrawInstruction::Text {
                        x,
                        y,
                        style,
                        content,
                    } => {
                        let font: &IndirectFontRef = match style.font() {
                            FontStyle::Regular => &regular,
                            FontStyle::Bold => &bold,
                        };
                        layer.use_text(content.clone(), style.size_pt(), Mm(*x), Mm(*y), font);
                    }
                }
            }
            debug!(page = page.number, ops = page.instructions.len(), "rendered page");
        }

        doc.save_to_bytes().map_err(|e| AppError::Pdf(e.to_string()))
    }
}

/// Closed stroke path around `rect`.
fn outline(rect: &Rect) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(rect.x), Mm(rect.y)), false),
            (Point::new(Mm(rect.x + rect.width), Mm(rect.y)), false),
            (
                Point::new(Mm(rect.x + rect.width), Mm(rect.y + rect.height)),
                false,
            ),
            (Point::new(Mm(rect.x), Mm(rect.y + rect.height)), false),
        ],
        is_closed: true,
    }
}

/// Writes the finished byte stream to `path`.
///
/// A locked or unwritable target is reported with a remediation hint and
/// never retried.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    fs::write(path, bytes).map_err(|source| AppError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
