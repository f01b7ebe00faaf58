pub mod font_metrics;
pub mod instructions;
pub mod page;

pub use instructions::{layout_cards, PageInstructions, PageLayoutConfig};
pub use page::CardsPerPage;
