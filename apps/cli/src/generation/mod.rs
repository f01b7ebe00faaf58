pub mod card;
pub mod generator;

pub use card::{Card, CardSet, Cell};
pub use generator::{generate_card, generate_card_set, GenerateOptions};
