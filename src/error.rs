//! Error types for layout configuration and record storage.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::layout::GridLocation;

/// Configuration errors raised by layout managers.
///
/// These are raised at the call that introduced the bad configuration
/// (`add`, a weight setter, a print pass); nothing is registered when an
/// error is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The constraint passed to `add` is not the kind this layout accepts.
    InvalidConstraint {
        layout: &'static str,
        found: &'static str,
    },
    /// Weights must be finite and non-negative.
    InvalidWeight(f64),
    /// Grid spans must cover at least one row and one column.
    InvalidSpan { rows: usize, columns: usize },
    /// A grid location reaches outside the grid.
    CellOutOfBounds {
        location: GridLocation,
        rows: usize,
        columns: usize,
    },
    /// A row or column index passed to a grid setter is out of range.
    TrackOutOfRange { index: usize, len: usize },
    /// A grid needs at least one row and one column.
    EmptyGrid,
    /// A visible child was never registered with the layout.
    UnregisteredWidget,
    /// Print layout needs a positive page height.
    InvalidPageHeight(i32),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConstraint { layout, found } => {
                write!(f, "cannot add to {layout}: unexpected {found} constraint")
            }
            Self::InvalidWeight(w) => {
                write!(f, "weight must be finite and non-negative, got {w}")
            }
            Self::InvalidSpan { rows, columns } => {
                write!(f, "grid span must be at least 1x1, got {rows}x{columns}")
            }
            Self::CellOutOfBounds {
                location,
                rows,
                columns,
            } => write!(f, "{location} does not fit in a {rows}x{columns} grid"),
            Self::TrackOutOfRange { index, len } => {
                write!(f, "track index {index} out of range (grid has {len})")
            }
            Self::EmptyGrid => write!(f, "grid must have at least one row and one column"),
            Self::UnregisteredWidget => write!(f, "widget is not registered with this layout"),
            Self::InvalidPageHeight(h) => write!(f, "page height must be positive, got {h}"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Why a line of a record file could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    FieldCount(usize),
    Price(String),
    Year(String),
    Flag(String),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected 6 fields, found {n}"),
            Self::Price(s) => write!(f, "invalid rental price: {s:?}"),
            Self::Year(s) => write!(f, "invalid year: {s:?}"),
            Self::Flag(s) => write!(f, "new-release flag must be T or F, got {s:?}"),
        }
    }
}

/// Errors raised while loading or saving a record file.
#[derive(Debug)]
pub enum StoreError {
    /// The record file does not exist.
    NotFound(PathBuf),
    /// Any other I/O failure.
    Io(io::Error),
    /// A line of the file is not a valid record (1-based line number).
    Malformed { line: usize, reason: MalformedReason },
    /// A field cannot be written without breaking the file format.
    InvalidField { field: &'static str, value: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "File {} not found", path.display()),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Malformed { line, reason } => write!(f, "line {line}: {reason}"),
            Self::InvalidField { field, value } => {
                write!(f, "{field} {value:?} cannot contain a comma or line break")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
