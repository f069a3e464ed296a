//! Cell regions of a grid layout.

use std::fmt;

use crate::error::LayoutError;

/// A rectangular block of grid cells: top-left cell plus spans.
///
/// Equal iff row, column, row span and column span all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridLocation {
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
}

impl Default for GridLocation {
    fn default() -> Self {
        Self::at(0, 0)
    }
}

impl GridLocation {
    /// A single cell.
    #[must_use]
    pub const fn at(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            rows: 1,
            columns: 1,
        }
    }

    /// A block of `rows` x `columns` cells starting at (`row`, `column`).
    pub fn spanning(row: usize, column: usize, rows: usize, columns: usize) -> Result<Self, LayoutError> {
        if rows == 0 || columns == 0 {
            return Err(LayoutError::InvalidSpan { rows, columns });
        }
        Ok(Self {
            row,
            column,
            rows,
            columns,
        })
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Number of rows covered.
    #[must_use]
    pub const fn row_span(&self) -> usize {
        self.rows
    }

    /// Number of columns covered.
    #[must_use]
    pub const fn column_span(&self) -> usize {
        self.columns
    }

    /// One past the last row covered, saturating at `usize::MAX`.
    #[must_use]
    pub const fn row_end(&self) -> usize {
        self.row.saturating_add(self.rows)
    }

    /// One past the last column covered, saturating at `usize::MAX`.
    #[must_use]
    pub const fn column_end(&self) -> usize {
        self.column.saturating_add(self.columns)
    }

    /// Whether the block lies entirely inside a `rows` x `columns` grid.
    /// A block whose end does not fit in `usize` never fits.
    #[must_use]
    pub const fn fits(&self, rows: usize, columns: usize) -> bool {
        let (Some(row_end), Some(column_end)) =
            (self.row.checked_add(self.rows), self.column.checked_add(self.columns))
        else {
            return false;
        };
        row_end <= rows && column_end <= columns
    }

    /// Every (row, column) covered, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.row..self.row_end()).flat_map(move |r| (self.column..self.column_end()).map(move |c| (r, c)))
    }
}

impl fmt::Display for GridLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell ({}, {}) spanning {}x{}",
            self.row, self.column, self.rows, self.columns
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_is_single_cell() {
        let loc = GridLocation::at(2, 3);
        assert_eq!(loc.row(), 2);
        assert_eq!(loc.column(), 3);
        assert_eq!(loc.row_span(), 1);
        assert_eq!(loc.column_span(), 1);
        assert_eq!(GridLocation::default(), GridLocation::at(0, 0));
    }

    #[test]
    fn test_spanning_rejects_empty_span() {
        assert_eq!(
            GridLocation::spanning(0, 0, 0, 2),
            Err(LayoutError::InvalidSpan { rows: 0, columns: 2 })
        );
        assert!(GridLocation::spanning(0, 0, 1, 0).is_err());
    }

    #[test]
    fn test_equality_requires_all_four_fields() {
        let base = GridLocation::spanning(1, 2, 3, 4).unwrap();
        assert_eq!(base, GridLocation::spanning(1, 2, 3, 4).unwrap());
        assert_ne!(base, GridLocation::spanning(0, 2, 3, 4).unwrap());
        assert_ne!(base, GridLocation::spanning(1, 0, 3, 4).unwrap());
        assert_ne!(base, GridLocation::spanning(1, 2, 1, 4).unwrap());
        assert_ne!(base, GridLocation::spanning(1, 2, 3, 1).unwrap());
    }

    #[test]
    fn test_fits() {
        let loc = GridLocation::spanning(2, 0, 1, 2).unwrap();
        assert!(loc.fits(3, 4));
        assert!(loc.fits(3, 2));
        assert!(!loc.fits(2, 4));
        assert!(!loc.fits(3, 1));
    }

    #[test]
    fn test_fits_rejects_end_past_usize() {
        let loc = GridLocation::spanning(usize::MAX, 0, 2, 1).unwrap();
        assert!(!loc.fits(usize::MAX, usize::MAX));
        assert_eq!(loc.row_end(), usize::MAX);
        assert!(!GridLocation::at(0, usize::MAX).fits(1, usize::MAX));
    }

    #[test]
    fn test_cells_row_major() {
        let loc = GridLocation::spanning(1, 1, 2, 2).unwrap();
        let cells: Vec<_> = loc.cells().collect();
        assert_eq!(cells, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_display() {
        let loc = GridLocation::spanning(2, 0, 1, 2).unwrap();
        assert_eq!(loc.to_string(), "cell (2, 0) spanning 1x2");
    }
}
