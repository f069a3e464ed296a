//! Weighted grid layout with per-track alignment and cell spans.
//!
//! The grid has a fixed number of rows and columns. Each column's width is
//! either its natural width (weight 0, the widest non-spanning widget in
//! it) or a share of the free width proportional to its weight; rows work
//! the same way vertically. A widget may cover a rectangular block of
//! cells; it is stored in every covered cell and recognised as one widget
//! by reference identity.
//!
//! ```rust
//! use videostore::geometry::Size;
//! use videostore::layout::{Constraint, GridLayout, GridLocation, LayoutManager, LayoutTarget};
//! use videostore::widget::{shared, Label};
//!
//! let caption = shared(Label::new("Title"));
//! let field = shared(Label::new("The Third Man"));
//!
//! let mut grid = GridLayout::new(1, 2).unwrap();
//! grid.set_column_weight(1, 1.0).unwrap();
//! grid.add_widget(&caption, GridLocation::at(0, 0).into()).unwrap();
//! grid.add_widget(&field, Constraint::Grid(GridLocation::at(0, 1))).unwrap();
//!
//! let target = LayoutTarget::new(Size::new(60, 11)).child(caption).child(field);
//! grid.lay_out(&target).unwrap();
//! ```

use std::sync::Arc;

use crate::error::LayoutError;
use crate::geometry::{Insets, Margins, Rect, Size};
use crate::sync::write_recover;
use crate::widget::{WidgetRef, measure, same_widget};

use super::cache::{Generation, GenerationCache};
use super::grid_location::GridLocation;
use super::weights::validate_weight;
use super::{
    Alignment, Constraint, DEFAULT_GAP, DEFAULT_MARGIN, LayoutManager, LayoutTarget, Paginator,
    Tracks, natural_extent, resolve_tracks,
};

/// Column widths and row heights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TrackSizes {
    columns: Tracks,
    rows: Tracks,
}

/// Grid of weighted, aligned tracks.
#[derive(Debug)]
pub struct GridLayout {
    rows: usize,
    columns: usize,
    hgap: i32,
    vgap: i32,
    margins: Margins,
    row_weights: Vec<f64>,
    column_weights: Vec<f64>,
    row_alignments: Vec<Alignment>,
    column_alignments: Vec<Alignment>,
    /// Row-major cell map.
    cells: Vec<Option<WidgetRef>>,
    generation: Generation,
    naturals: GenerationCache<Generation, TrackSizes>,
    finals: GenerationCache<(Generation, Size, Insets), TrackSizes>,
}

impl GridLayout {
    /// A `rows` x `columns` grid with 5 pixel gaps and margins, every track
    /// weight 0 and aligned [`Alignment::Fill`].
    pub fn new(rows: usize, columns: usize) -> Result<Self, LayoutError> {
        if rows == 0 || columns == 0 {
            return Err(LayoutError::EmptyGrid);
        }
        Ok(Self {
            rows,
            columns,
            hgap: DEFAULT_GAP,
            vgap: DEFAULT_GAP,
            margins: Margins::uniform(DEFAULT_MARGIN),
            row_weights: vec![0.0; rows],
            column_weights: vec![0.0; columns],
            row_alignments: vec![Alignment::Fill; rows],
            column_alignments: vec![Alignment::Fill; columns],
            cells: vec![None; rows * columns],
            generation: Generation::default(),
            naturals: GenerationCache::default(),
            finals: GenerationCache::default(),
        })
    }

    #[must_use]
    pub fn with_hgap(mut self, hgap: i32) -> Self {
        self.set_hgap(hgap);
        self
    }

    #[must_use]
    pub fn with_vgap(mut self, vgap: i32) -> Self {
        self.set_vgap(vgap);
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.set_margins(margins);
        self
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub const fn hgap(&self) -> i32 {
        self.hgap
    }

    pub fn set_hgap(&mut self, hgap: i32) {
        self.hgap = hgap;
        self.generation.bump();
    }

    #[must_use]
    pub const fn vgap(&self) -> i32 {
        self.vgap
    }

    pub fn set_vgap(&mut self, vgap: i32) {
        self.vgap = vgap;
        self.generation.bump();
    }

    #[must_use]
    pub const fn margins(&self) -> Margins {
        self.margins
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
        self.generation.bump();
    }

    /// Current state counter; changes whenever cached tables go stale.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    pub fn set_row_weight(&mut self, row: usize, weight: f64) -> Result<(), LayoutError> {
        let index = track_index(row, self.rows)?;
        self.row_weights[index] = validate_weight(weight)?;
        self.generation.bump();
        Ok(())
    }

    pub fn set_column_weight(&mut self, column: usize, weight: f64) -> Result<(), LayoutError> {
        let index = track_index(column, self.columns)?;
        self.column_weights[index] = validate_weight(weight)?;
        self.generation.bump();
        Ok(())
    }

    /// Vertical placement of widgets in `row`: `Near` is top, `Far` bottom.
    pub fn set_row_alignment(&mut self, row: usize, alignment: Alignment) -> Result<(), LayoutError> {
        let index = track_index(row, self.rows)?;
        self.row_alignments[index] = alignment;
        self.generation.bump();
        Ok(())
    }

    /// Horizontal placement of widgets in `column`: `Near` is left, `Far` right.
    pub fn set_column_alignment(&mut self, column: usize, alignment: Alignment) -> Result<(), LayoutError> {
        let index = track_index(column, self.columns)?;
        self.column_alignments[index] = alignment;
        self.generation.bump();
        Ok(())
    }

    #[must_use]
    pub fn row_weight(&self, row: usize) -> Option<f64> {
        self.row_weights.get(row).copied()
    }

    #[must_use]
    pub fn column_weight(&self, column: usize) -> Option<f64> {
        self.column_weights.get(column).copied()
    }

    /// Widget occupying a cell, if any.
    #[must_use]
    pub fn widget_at(&self, row: usize, column: usize) -> Option<&WidgetRef> {
        if row < self.rows && column < self.columns {
            self.cell(row, column)
        } else {
            None
        }
    }

    fn cell(&self, row: usize, column: usize) -> Option<&WidgetRef> {
        self.cells[row * self.columns + column].as_ref()
    }

    /// Whether (`row`, `column`) is where a widget's block starts.
    fn is_anchor(&self, row: usize, column: usize) -> bool {
        let here = self.cell(row, column);
        here.is_some()
            && (row == 0 || !same_widget(here, self.cell(row - 1, column)))
            && (column == 0 || !same_widget(here, self.cell(row, column - 1)))
    }

    /// Whether (`row`, `column`) is where a widget's block ends.
    fn is_last_cell(&self, row: usize, column: usize) -> bool {
        let here = self.cell(row, column);
        here.is_some()
            && (row + 1 == self.rows || !same_widget(here, self.cell(row + 1, column)))
            && (column + 1 == self.columns || !same_widget(here, self.cell(row, column + 1)))
    }

    fn natural_tracks(&mut self) -> TrackSizes {
        let (rows, columns) = (self.rows, self.columns);
        let cells = &self.cells;
        self.naturals
            .get_or_compute(self.generation, || natural_sizes(cells, rows, columns))
            .clone()
    }

    fn final_tracks(&mut self, target: &LayoutTarget) -> TrackSizes {
        let naturals = self.natural_tracks();
        let insets = target.insets;
        let available = Size::new(
            target.size.width - (insets.horizontal() + self.margins.horizontal()),
            target.size.height - (insets.vertical() + self.margins.vertical()),
        );
        let key = (self.generation, target.size, insets);
        let (hgap, vgap) = (self.hgap, self.vgap);
        let (row_weights, column_weights) = (&self.row_weights, &self.column_weights);
        self.finals
            .get_or_compute(key, || TrackSizes {
                columns: resolve_tracks(available.width, &naturals.columns, column_weights, hgap),
                rows: resolve_tracks(available.height, &naturals.rows, row_weights, vgap),
            })
            .clone()
    }

    /// Height row `row` needs when `first` is the first row on its page.
    ///
    /// Each widget ending in this row needs its natural height minus what
    /// the rows above it on the same page already provide.
    fn print_row_height(&self, row: usize, first: usize, heights: &[i32]) -> i32 {
        let mut needed = 0;
        for column in 0..self.columns {
            if !self.is_last_cell(row, column) {
                continue;
            }
            let here = self.cell(row, column);
            let Some(widget) = here else { continue };
            let m = measure(widget);
            if !m.visible {
                continue;
            }
            let mut height = m.preferred.height;
            let mut above = row;
            while above > first && same_widget(here, self.cell(above - 1, column)) {
                above -= 1;
                height -= heights[above] + self.vgap;
            }
            needed = needed.max(height);
        }
        needed
    }
}

fn track_index(index: usize, len: usize) -> Result<usize, LayoutError> {
    if index < len {
        Ok(index)
    } else {
        Err(LayoutError::TrackOutOfRange { index, len })
    }
}

/// Natural column widths and row heights. Widgets spanning several columns
/// do not count toward any column width; likewise for rows.
fn natural_sizes(cells: &[Option<WidgetRef>], rows: usize, columns: usize) -> TrackSizes {
    let at = |r: usize, c: usize| cells[r * columns + c].as_ref();
    let mut sizes = TrackSizes {
        columns: std::iter::repeat_n(0, columns).collect(),
        rows: std::iter::repeat_n(0, rows).collect(),
    };

    for row in 0..rows {
        for column in 0..columns {
            let here = at(row, column);
            let Some(widget) = here else { continue };
            let m = measure(widget);
            if !m.visible {
                continue;
            }

            let spans_columns = (column > 0 && same_widget(here, at(row, column - 1)))
                || (column + 1 < columns && same_widget(here, at(row, column + 1)));
            if !spans_columns {
                sizes.columns[column] = sizes.columns[column].max(m.preferred.width);
            }

            let spans_rows = (row > 0 && same_widget(here, at(row - 1, column)))
                || (row + 1 < rows && same_widget(here, at(row + 1, column)));
            if !spans_rows {
                sizes.rows[row] = sizes.rows[row].max(m.preferred.height);
            }
        }
    }
    sizes
}

/// Start offsets of consecutive tracks.
fn offsets(start: i32, sizes: &[i32], gap: i32) -> Tracks {
    let mut at = start;
    sizes
        .iter()
        .map(|&size| {
            let this = at;
            at += size + gap;
            this
        })
        .collect()
}

impl LayoutManager for GridLayout {
    fn add_widget(&mut self, widget: &WidgetRef, constraint: Constraint) -> Result<(), LayoutError> {
        let location = match constraint {
            Constraint::Grid(location) => location,
            other => {
                log::warn!("grid layout rejected a {} constraint", other.kind());
                return Err(LayoutError::InvalidConstraint {
                    layout: "grid layout",
                    found: other.kind(),
                });
            }
        };
        if !location.fits(self.rows, self.columns) {
            return Err(LayoutError::CellOutOfBounds {
                location,
                rows: self.rows,
                columns: self.columns,
            });
        }

        for (row, column) in location.cells() {
            self.cells[row * self.columns + column] = Some(Arc::clone(widget));
        }
        self.generation.bump();
        Ok(())
    }

    fn remove_widget(&mut self, widget: &WidgetRef) {
        for cell in &mut self.cells {
            if cell.as_ref().is_some_and(|w| Arc::ptr_eq(w, widget)) {
                *cell = None;
            }
        }
        self.generation.bump();
    }

    fn minimum_size(&mut self, target: &LayoutTarget) -> Result<Size, LayoutError> {
        self.preferred_size(target)
    }

    fn preferred_size(&mut self, target: &LayoutTarget) -> Result<Size, LayoutError> {
        let naturals = self.natural_tracks();
        let width = natural_extent(&naturals.columns, &self.column_weights, self.hgap);
        let height = natural_extent(&naturals.rows, &self.row_weights, self.vgap);
        Ok(Size::new(
            width + target.insets.horizontal() + self.margins.horizontal(),
            height + target.insets.vertical() + self.margins.vertical(),
        ))
    }

    fn lay_out(&mut self, target: &LayoutTarget) -> Result<(), LayoutError> {
        let tracks = self.final_tracks(target);
        let insets = target.insets;
        let xs = offsets(insets.left + self.margins.left, &tracks.columns, self.hgap);
        let ys = offsets(insets.top + self.margins.top, &tracks.rows, self.vgap);

        log::debug!(
            "grid layout {}x{}: columns {:?} rows {:?}",
            self.rows,
            self.columns,
            tracks.columns.as_slice(),
            tracks.rows.as_slice()
        );

        for row in 0..self.rows {
            for column in 0..self.columns {
                if !self.is_anchor(row, column) {
                    continue;
                }
                let here = self.cell(row, column);
                let Some(widget) = here else { continue };
                let m = measure(widget);
                if !m.visible {
                    continue;
                }

                let mut cell = Size::new(tracks.columns[column], tracks.rows[row]);
                let mut next = column + 1;
                while next < self.columns && same_widget(here, self.cell(row, next)) {
                    cell.width += tracks.columns[next] + self.hgap;
                    next += 1;
                }
                let mut next = row + 1;
                while next < self.rows && same_widget(here, self.cell(next, column)) {
                    cell.height += tracks.rows[next] + self.vgap;
                    next += 1;
                }

                let (dx, width) = self.column_alignments[column].place(m.preferred.width, cell.width);
                let (dy, height) = self.row_alignments[row].place(m.preferred.height, cell.height);
                let bounds = Rect::new(xs[column] + dx, ys[row] + dy, width, height);
                log::trace!("place ({row}, {column}) at {bounds:?}");
                write_recover(widget).set_bounds(bounds);
            }
        }
        Ok(())
    }

    fn layout_print(&mut self, target: &LayoutTarget, page_height: i32) -> Result<i32, LayoutError> {
        let mut pages = Paginator::new(page_height)?;
        let insets = target.insets;
        let mut tops = vec![0; self.rows];
        let mut heights = vec![0; self.rows];
        let mut first = 0;
        let mut cursor = self.margins.top + insets.top;

        for row in 0..self.rows {
            let mut needed = self.print_row_height(row, first, &heights);
            let top = pages.place(cursor, needed);
            if top != cursor {
                log::debug!("grid print: row {row} starts a page at {top}");
                first = row;
                needed = self.print_row_height(row, first, &heights);
            }
            tops[row] = top;
            heights[row] = needed;

            for column in 0..self.columns {
                if !self.is_last_cell(row, column) {
                    continue;
                }
                let here = self.cell(row, column);
                let Some(widget) = here else { continue };
                let m = measure(widget);
                if !m.visible {
                    continue;
                }
                let mut above = row;
                while above > first && same_widget(here, self.cell(above - 1, column)) {
                    above -= 1;
                }
                let y = tops[above];
                write_recover(widget).set_bounds(Rect::new(m.bounds.x, y, m.bounds.width, top + needed - y));
            }

            cursor = top + needed;
            if row + 1 < self.rows {
                cursor += self.vgap;
            }
        }

        Ok(cursor + self.margins.bottom + insets.bottom)
    }

    fn invalidate(&mut self) {
        self.naturals.clear();
        self.finals.clear();
        self.generation.bump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::testing::{bounds_of, hidden, sized};

    fn bare(rows: usize, columns: usize) -> GridLayout {
        GridLayout::new(rows, columns)
            .unwrap()
            .with_hgap(0)
            .with_vgap(0)
            .with_margins(Margins::default())
    }

    fn place(grid: &mut GridLayout, target: &mut LayoutTarget, widget: &WidgetRef, location: GridLocation) {
        grid.add_widget(widget, Constraint::Grid(location)).unwrap();
        target.children.push(Arc::clone(widget));
    }

    fn span(row: usize, column: usize, rows: usize, columns: usize) -> GridLocation {
        GridLocation::spanning(row, column, rows, columns).unwrap()
    }

    // =========================================================================
    // Configuration Tests
    // =========================================================================

    #[test]
    fn test_new_rejects_empty_grid() {
        assert!(matches!(GridLayout::new(0, 3), Err(LayoutError::EmptyGrid)));
        assert!(matches!(GridLayout::new(2, 0), Err(LayoutError::EmptyGrid)));
    }

    #[test]
    fn test_defaults() {
        let grid = GridLayout::new(2, 3).unwrap();
        assert_eq!((grid.rows(), grid.columns()), (2, 3));
        assert_eq!((grid.hgap(), grid.vgap()), (5, 5));
        assert_eq!(grid.margins(), Margins::uniform(5));
        assert_eq!(grid.row_weight(1), Some(0.0));
        assert_eq!(grid.column_weight(3), None);
    }

    #[test]
    fn test_track_setters_check_range() {
        let mut grid = GridLayout::new(2, 3).unwrap();
        assert_eq!(
            grid.set_row_weight(2, 1.0),
            Err(LayoutError::TrackOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            grid.set_column_alignment(5, Alignment::Far),
            Err(LayoutError::TrackOutOfRange { index: 5, len: 3 })
        );
        assert!(grid.set_row_alignment(1, Alignment::Center).is_ok());
        assert_eq!(grid.set_column_weight(0, -1.0), Err(LayoutError::InvalidWeight(-1.0)));
        assert_eq!(grid.column_weight(0), Some(0.0));
    }

    #[test]
    fn test_setters_bump_generation() {
        let mut grid = GridLayout::new(1, 1).unwrap();
        let before = grid.generation();
        grid.set_column_weight(0, 2.0).unwrap();
        assert_ne!(grid.generation(), before);

        let before = grid.generation();
        grid.set_hgap(9);
        assert_ne!(grid.generation(), before);
    }

    // =========================================================================
    // Add / Remove Tests
    // =========================================================================

    #[test]
    fn test_add_requires_grid_location() {
        let mut grid = GridLayout::new(1, 1).unwrap();
        let w = sized(1, 1);
        assert!(matches!(
            grid.add_widget(&w, Constraint::Weight(1.0)),
            Err(LayoutError::InvalidConstraint { layout: "grid layout", .. })
        ));
        assert!(grid.add_widget(&w, Constraint::None).is_err());
        assert!(grid.widget_at(0, 0).is_none());
    }

    #[test]
    fn test_add_out_of_bounds_registers_nothing() {
        let mut grid = GridLayout::new(2, 2).unwrap();
        let w = sized(1, 1);
        let err = grid.add_widget(&w, span(1, 1, 1, 2).into()).unwrap_err();
        assert!(matches!(err, LayoutError::CellOutOfBounds { rows: 2, columns: 2, .. }));
        assert!(grid.widget_at(1, 1).is_none());
    }

    #[test]
    fn test_add_span_past_usize_is_out_of_bounds() {
        let mut grid = bare(2, 2);
        let a = sized(1, 1);
        let err = grid
            .add_widget(&a, Constraint::Grid(span(usize::MAX, 0, 2, 1)))
            .unwrap_err();
        assert!(matches!(err, LayoutError::CellOutOfBounds { rows: 2, columns: 2, .. }));
        assert!((0..2).all(|r| (0..2).all(|c| grid.widget_at(r, c).is_none())));
    }

    #[test]
    fn test_span_fills_every_cell_with_same_widget() {
        let mut grid = GridLayout::new(3, 3).unwrap();
        let w = sized(1, 1);
        grid.add_widget(&w, span(1, 0, 2, 2).into()).unwrap();
        for (r, c) in [(1, 0), (1, 1), (2, 0), (2, 1)] {
            assert!(Arc::ptr_eq(grid.widget_at(r, c).unwrap(), &w));
        }
        assert!(grid.widget_at(0, 0).is_none());
        assert!(grid.widget_at(1, 2).is_none());
    }

    #[test]
    fn test_later_add_overwrites_cells() {
        let mut grid = GridLayout::new(1, 2).unwrap();
        let a = sized(1, 1);
        let b = sized(1, 1);
        grid.add_widget(&a, span(0, 0, 1, 2).into()).unwrap();
        grid.add_widget(&b, GridLocation::at(0, 1).into()).unwrap();
        assert!(Arc::ptr_eq(grid.widget_at(0, 0).unwrap(), &a));
        assert!(Arc::ptr_eq(grid.widget_at(0, 1).unwrap(), &b));
    }

    #[test]
    fn test_remove_clears_all_cells() {
        let mut grid = GridLayout::new(2, 2).unwrap();
        let w = sized(1, 1);
        grid.add_widget(&w, span(0, 0, 2, 2).into()).unwrap();
        grid.remove_widget(&w);
        assert!((0..2).all(|r| (0..2).all(|c| grid.widget_at(r, c).is_none())));
    }

    // =========================================================================
    // Size Query Tests
    // =========================================================================

    #[test]
    fn test_single_cell_preferred_size() {
        let mut grid = GridLayout::new(1, 1).unwrap();
        let mut target = LayoutTarget::new(Size::zero());
        place(&mut grid, &mut target, &sized(100, 40), GridLocation::at(0, 0));
        assert_eq!(grid.preferred_size(&target).unwrap(), Size::new(110, 50));
        assert_eq!(grid.minimum_size(&target).unwrap(), Size::new(110, 50));
    }

    #[test]
    fn test_spanning_widgets_do_not_size_tracks() {
        let mut grid = bare(2, 2);
        let mut target = LayoutTarget::new(Size::zero());
        place(&mut grid, &mut target, &sized(30, 10), GridLocation::at(0, 0));
        place(&mut grid, &mut target, &sized(20, 15), GridLocation::at(0, 1));
        place(&mut grid, &mut target, &sized(500, 12), span(1, 0, 1, 2));
        // widths 30 + 20, heights 15 + 12
        assert_eq!(grid.preferred_size(&target).unwrap(), Size::new(50, 27));
    }

    #[test]
    fn test_hidden_widgets_do_not_size_tracks() {
        let mut grid = bare(1, 2);
        let mut target = LayoutTarget::new(Size::zero());
        place(&mut grid, &mut target, &sized(30, 10), GridLocation::at(0, 0));
        place(&mut grid, &mut target, &hidden(80, 80), GridLocation::at(0, 1));
        assert_eq!(grid.preferred_size(&target).unwrap(), Size::new(30, 10));
    }

    #[test]
    fn test_preferred_size_weighted_estimate_and_gaps() {
        let mut grid = GridLayout::new(1, 3).unwrap().with_hgap(4).with_margins(Margins::default());
        grid.set_column_weight(1, 1.0).unwrap();
        grid.set_column_weight(2, 3.0).unwrap();
        let mut target = LayoutTarget::new(Size::zero());
        place(&mut grid, &mut target, &sized(10, 5), GridLocation::at(0, 0));
        place(&mut grid, &mut target, &sized(20, 5), GridLocation::at(0, 1));
        place(&mut grid, &mut target, &sized(30, 5), GridLocation::at(0, 2));
        // fixed 10 + gaps 8 + worst ratio 20/1 * 4
        assert_eq!(grid.preferred_size(&target).unwrap().width, 98);
    }

    #[test]
    fn test_cached_sizes_refresh_on_invalidate() {
        let mut grid = bare(1, 1);
        let label = Arc::new(std::sync::RwLock::new(crate::widget::Label::new("ab")));
        let handle: WidgetRef = label.clone();
        let mut target = LayoutTarget::new(Size::zero());
        place(&mut grid, &mut target, &handle, GridLocation::at(0, 0));
        assert_eq!(grid.preferred_size(&target).unwrap().width, 2);

        label.write().unwrap().set_text("abcdef");
        assert_eq!(grid.preferred_size(&target).unwrap().width, 2);
        grid.invalidate();
        assert_eq!(grid.preferred_size(&target).unwrap().width, 6);
    }

    // =========================================================================
    // Layout Pass Tests
    // =========================================================================

    #[test]
    fn test_column_span_covers_gap() {
        let mut grid = GridLayout::new(2, 2).unwrap().with_hgap(7).with_margins(Margins::default());
        let mut target = LayoutTarget::new(Size::new(400, 100));
        let a = sized(40, 10);
        let b = sized(60, 10);
        let wide = sized(10, 10);
        place(&mut grid, &mut target, &a, GridLocation::at(0, 0));
        place(&mut grid, &mut target, &b, GridLocation::at(0, 1));
        place(&mut grid, &mut target, &wide, span(1, 0, 1, 2));

        grid.lay_out(&target).unwrap();
        assert_eq!(bounds_of(&b).x, 47);
        assert_eq!(bounds_of(&wide).width, 40 + 60 + 7);
    }

    #[test]
    fn test_weighted_columns_share_free_width() {
        let mut grid = GridLayout::new(1, 3).unwrap().with_hgap(10).with_margins(Margins::default());
        grid.set_column_weight(1, 1.0).unwrap();
        grid.set_column_weight(2, 1.0).unwrap();
        let mut target = LayoutTarget::new(Size::new(200, 20));
        let (a, b, c) = (sized(30, 10), sized(5, 10), sized(5, 10));
        place(&mut grid, &mut target, &a, GridLocation::at(0, 0));
        place(&mut grid, &mut target, &b, GridLocation::at(0, 1));
        place(&mut grid, &mut target, &c, GridLocation::at(0, 2));

        grid.lay_out(&target).unwrap();
        // free = 200 - 30 - 20 = 150
        assert_eq!(bounds_of(&a), Rect::new(0, 0, 30, 10));
        assert_eq!(bounds_of(&b), Rect::new(40, 0, 75, 10));
        assert_eq!(bounds_of(&c), Rect::new(125, 0, 75, 10));
    }

    #[test]
    fn test_far_alignment_right_edge() {
        let mut grid = bare(1, 1);
        grid.set_column_weight(0, 1.0).unwrap();
        grid.set_column_alignment(0, Alignment::Far).unwrap();
        let mut target = LayoutTarget::new(Size::new(100, 20));
        let w = sized(30, 20);
        place(&mut grid, &mut target, &w, GridLocation::at(0, 0));

        grid.lay_out(&target).unwrap();
        let b = bounds_of(&w);
        assert_eq!(b.right(), 100);
        assert_eq!(b.width, 30);
    }

    #[test]
    fn test_row_alignments() {
        let mut grid = bare(1, 3);
        grid.set_row_weight(0, 1.0).unwrap();
        grid.set_row_alignment(0, Alignment::Center).unwrap();
        grid.set_column_alignment(1, Alignment::Near).unwrap();
        let mut target = LayoutTarget::new(Size::new(90, 50));
        let (a, b, c) = (sized(30, 10), sized(30, 20), sized(30, 30));
        place(&mut grid, &mut target, &a, GridLocation::at(0, 0));
        place(&mut grid, &mut target, &b, GridLocation::at(0, 1));
        place(&mut grid, &mut target, &c, GridLocation::at(0, 2));

        grid.lay_out(&target).unwrap();
        assert_eq!(bounds_of(&a), Rect::new(0, 20, 30, 10));
        assert_eq!(bounds_of(&b), Rect::new(30, 15, 30, 20));
        assert_eq!(bounds_of(&c), Rect::new(60, 10, 30, 30));
    }

    #[test]
    fn test_oversized_widget_clamped_to_cell() {
        let mut grid = bare(1, 2);
        grid.set_column_alignment(1, Alignment::Near).unwrap();
        let mut target = LayoutTarget::new(Size::new(100, 10));
        let a = sized(20, 10);
        let b = sized(50, 10);
        place(&mut grid, &mut target, &a, GridLocation::at(0, 0));
        place(&mut grid, &mut target, &b, GridLocation::at(0, 1));
        grid.set_column_weight(1, 1.0).unwrap();

        grid.lay_out(&LayoutTarget { size: Size::new(40, 10), ..target }).unwrap();
        assert_eq!(bounds_of(&b), Rect::new(20, 0, 20, 10));
    }

    #[test]
    fn test_row_span_with_margins_and_insets() {
        let mut grid = GridLayout::new(2, 2).unwrap().with_hgap(2).with_vgap(3);
        let mut target = LayoutTarget::new(Size::new(200, 200)).insets(Insets::uniform(1));
        let tall = sized(10, 10);
        let top = sized(20, 15);
        let bottom = sized(20, 25);
        place(&mut grid, &mut target, &tall, span(0, 0, 2, 1));
        place(&mut grid, &mut target, &top, GridLocation::at(0, 1));
        place(&mut grid, &mut target, &bottom, GridLocation::at(1, 1));

        grid.lay_out(&target).unwrap();
        assert_eq!(bounds_of(&tall), Rect::new(6, 6, 10, 15 + 25 + 3));
        assert_eq!(bounds_of(&top), Rect::new(18, 6, 20, 15));
        assert_eq!(bounds_of(&bottom), Rect::new(18, 24, 20, 25));
    }

    // =========================================================================
    // Print Layout Tests
    // =========================================================================

    #[test]
    fn test_print_rows_break_pages() {
        let mut grid = bare(3, 1);
        let mut target = LayoutTarget::new(Size::new(50, 200));
        let rows: Vec<WidgetRef> = (0..3).map(|_| sized(50, 40)).collect();
        for (r, w) in rows.iter().enumerate() {
            place(&mut grid, &mut target, w, GridLocation::at(r, 0));
        }

        let height = grid.layout_print(&target, 100).unwrap();
        assert_eq!(bounds_of(&rows[0]).y, 0);
        assert_eq!(bounds_of(&rows[1]).y, 40);
        assert_eq!(bounds_of(&rows[2]).y, 100);
        assert_eq!(height, 140);
    }

    #[test]
    fn test_print_gap_at_page_edge_is_dropped() {
        let mut grid = bare(3, 1).with_vgap(10);
        let mut target = LayoutTarget::new(Size::new(50, 200));
        let rows: Vec<WidgetRef> = (0..3).map(|_| sized(50, 45)).collect();
        for (r, w) in rows.iter().enumerate() {
            place(&mut grid, &mut target, w, GridLocation::at(r, 0));
        }

        let height = grid.layout_print(&target, 100).unwrap();
        assert_eq!(bounds_of(&rows[1]).y, 55);
        assert_eq!(bounds_of(&rows[2]).y, 100);
        assert_eq!(height, 145);
    }

    #[test]
    fn test_print_spanning_widget_on_one_page() {
        let mut grid = bare(2, 2).with_vgap(10);
        let mut target = LayoutTarget::new(Size::new(100, 100));
        let tall = sized(10, 100);
        let first = sized(10, 30);
        let second = sized(10, 20);
        place(&mut grid, &mut target, &tall, span(0, 0, 2, 1));
        place(&mut grid, &mut target, &first, GridLocation::at(0, 1));
        place(&mut grid, &mut target, &second, GridLocation::at(1, 1));

        let height = grid.layout_print(&target, 1000).unwrap();
        // row 0 is 30, row 1 needs 100 - (30 + 10) = 60
        assert_eq!(bounds_of(&tall).y, 0);
        assert_eq!(bounds_of(&tall).height, 100);
        assert_eq!(bounds_of(&first).height, 30);
        assert_eq!(bounds_of(&second), Rect::new(0, 40, 0, 60));
        assert_eq!(height, 100);
    }

    #[test]
    fn test_print_spanning_widget_across_break() {
        let mut grid = bare(2, 2).with_vgap(10);
        let mut target = LayoutTarget::new(Size::new(100, 100));
        let tall = sized(10, 100);
        let first = sized(10, 30);
        let second = sized(10, 20);
        place(&mut grid, &mut target, &tall, span(0, 0, 2, 1));
        place(&mut grid, &mut target, &first, GridLocation::at(0, 1));
        place(&mut grid, &mut target, &second, GridLocation::at(1, 1));

        let height = grid.layout_print(&target, 50).unwrap();
        // row 1 moves to the second page and only covers rows there
        assert_eq!(bounds_of(&first).y, 0);
        assert_eq!(bounds_of(&tall).y, 50);
        assert_eq!(bounds_of(&tall).height, 100);
        assert_eq!(bounds_of(&second).y, 50);
        assert_eq!(height, 150);
    }

    #[test]
    fn test_print_adds_bottom_margin_and_inset() {
        let mut grid = GridLayout::new(1, 1).unwrap();
        let mut target = LayoutTarget::new(Size::new(10, 10)).insets(Insets::uniform(2));
        let w = sized(10, 10);
        place(&mut grid, &mut target, &w, GridLocation::at(0, 0));
        // 5 + 2 top, 10 row, 5 + 2 bottom
        assert_eq!(grid.layout_print(&target, 100).unwrap(), 24);
        assert_eq!(bounds_of(&w).y, 7);
        assert!(grid.layout_print(&target, 0).is_err());
    }
}
