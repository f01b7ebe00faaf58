//! Grid rules catalog — the immutable grid-size-to-numbering table.
//!
//! One `GridConfig` per supported dimension, built once at startup and
//! passed by reference. Column ranges follow the standard ball counts:
//! 3x3/30-ball, 4x4/80-ball, 5x5/75-ball.

use serde::Serialize;

use crate::errors::AppError;

/// Numbering rules for one supported grid size.
#[derive(Debug, Clone, Serialize)]
pub struct GridConfig {
    pub dimension: u8,
    /// Header labels, one per column ("B Y N G O" split per size).
    pub column_labels: &'static [&'static str],
    /// Inclusive (min, max) value range per column.
    pub column_ranges: &'static [(u16, u16)],
    /// Whether a card gets a FREE space when the caller does not override.
    pub default_free_space: bool,
}

/// Where the FREE cell lands when a free space is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FreeSpacePolicy {
    /// Row = col = n / 2. For even n this is the lower-right of the four
    /// central cells, not a true center.
    Center,
    /// Odd n: exact center. Even n: the row and column are each drawn
    /// independently from the two middle indices.
    CenterRandomized,
}

const GRID_3: GridConfig = GridConfig {
    dimension: 3,
    column_labels: &["BY", "N", "GO"],
    column_ranges: &[(1, 10), (11, 20), (21, 30)],
    default_free_space: true,
};

const GRID_4: GridConfig = GridConfig {
    dimension: 4,
    column_labels: &["B", "Y", "N", "GO"],
    column_ranges: &[(1, 20), (21, 40), (41, 60), (61, 80)],
    default_free_space: true,
};

const GRID_5: GridConfig = GridConfig {
    dimension: 5,
    column_labels: &["B", "Y", "N", "G", "O"],
    column_ranges: &[(1, 15), (16, 30), (31, 45), (46, 60), (61, 75)],
    default_free_space: true,
};

/// Immutable lookup table of the supported grid variants.
#[derive(Debug, Clone, Serialize)]
pub struct GridCatalog {
    variants: [GridConfig; 3],
}

impl GridCatalog {
    /// The standard three-variant catalog.
    pub fn standard() -> Self {
        Self {
            variants: [GRID_3, GRID_4, GRID_5],
        }
    }

    /// Looks up the rules for `dimension`, failing for unsupported sizes.
    pub fn get(&self, dimension: u8) -> Result<&GridConfig, AppError> {
        self.variants
            .iter()
            .find(|v| v.dimension == dimension)
            .ok_or(AppError::InvalidConfiguration(dimension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_three_four_five() {
        let catalog = GridCatalog::standard();
        for dimension in [3u8, 4, 5] {
            let config = catalog
                .get(dimension)
                .unwrap_or_else(|_| panic!("dimension {dimension} should be supported"));
            assert_eq!(config.dimension, dimension);
            assert_eq!(config.column_labels.len(), dimension as usize);
            assert_eq!(config.column_ranges.len(), dimension as usize);
        }
    }

    #[test]
    fn test_unsupported_size_is_invalid_configuration() {
        let catalog = GridCatalog::standard();
        let err = catalog.get(6).expect_err("grid size 6 should be rejected");
        assert!(matches!(err, AppError::InvalidConfiguration(6)));
    }

    #[test]
    fn test_each_column_range_holds_a_full_column() {
        // Every column must be able to supply `dimension` distinct values.
        let catalog = GridCatalog::standard();
        for dimension in [3u8, 4, 5] {
            let config = catalog.get(dimension).unwrap();
            for &(min, max) in config.column_ranges {
                assert!(min < max);
                assert!(
                    (max - min + 1) as usize >= dimension as usize,
                    "range {min}..={max} too small for a {dimension}-cell column"
                );
            }
        }
    }

    #[test]
    fn test_column_ranges_are_contiguous_bands() {
        let catalog = GridCatalog::standard();
        for dimension in [3u8, 4, 5] {
            let config = catalog.get(dimension).unwrap();
            for pair in config.column_ranges.windows(2) {
                assert_eq!(
                    pair[0].1 + 1,
                    pair[1].0,
                    "bands should tile without gaps for {dimension}x{dimension}"
                );
            }
        }
    }

    #[test]
    fn test_five_by_five_is_seventy_five_ball() {
        let catalog = GridCatalog::standard();
        let config = catalog.get(5).unwrap();
        assert_eq!(config.column_labels, &["B", "Y", "N", "G", "O"]);
        assert_eq!(config.column_ranges.last(), Some(&(61, 75)));
    }
}
