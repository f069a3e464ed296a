//! Weighted box layout - one row or one column sharing space by weight.
//!
//! Children with weight 0 keep their natural size along the axis. Children
//! with a positive weight split whatever is left after the zero-weight
//! children and the gaps, in proportion to their weights. Every child is
//! stretched across the whole interior on the cross axis.
//!
//! ```rust
//! use videostore::geometry::Size;
//! use videostore::layout::{Axis, BoxLayout, Constraint, LayoutManager, LayoutTarget};
//! use videostore::widget::{shared, Filler};
//!
//! let label = shared(Filler::new(50, 20));
//! let field = shared(Filler::new(80, 20));
//!
//! let mut layout = BoxLayout::new(Axis::Horizontal).with_gap(10);
//! layout.add_widget(&label, Constraint::None).unwrap();
//! layout.add_widget(&field, Constraint::Weight(1.0)).unwrap();
//!
//! let target = LayoutTarget::new(Size::new(300, 30)).child(label).child(field);
//! layout.lay_out(&target).unwrap();
//! ```

use crate::error::LayoutError;
use crate::geometry::{Margins, Point, Rect, Size};
use crate::sync::write_recover;
use crate::widget::{Measured, WidgetRef, measure};

use super::weights::WeightTable;
use super::{
    Constraint, DEFAULT_GAP, DEFAULT_MARGIN, LayoutManager, LayoutTarget, Paginator, gaps,
    resolve_tracks, weighted_estimate,
};

/// Direction along which a box layout distributes space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Extent along this axis.
    #[must_use]
    pub const fn main(self, size: Size) -> i32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Extent across this axis.
    #[must_use]
    pub const fn cross(self, size: Size) -> i32 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }

    /// Build a size from main and cross extents.
    #[must_use]
    pub const fn compose(self, main: i32, cross: i32) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    const fn advance(self, point: Point, by: i32) -> Point {
        match self {
            Self::Horizontal => Point::new(point.x + by, point.y),
            Self::Vertical => Point::new(point.x, point.y + by),
        }
    }
}

/// A visible child with its registered weight.
struct Entry<'a> {
    widget: &'a WidgetRef,
    measured: Measured,
    weight: f64,
}

/// Linear weighted layout.
#[derive(Debug, Clone)]
pub struct BoxLayout {
    axis: Axis,
    gap: i32,
    margins: Margins,
    weights: WeightTable,
}

impl BoxLayout {
    /// Create a box layout with a 5 pixel gap and 5 pixel margins.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            gap: DEFAULT_GAP,
            margins: Margins::uniform(DEFAULT_MARGIN),
            weights: WeightTable::new(),
        }
    }

    #[must_use]
    pub fn with_gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub const fn gap(&self) -> i32 {
        self.gap
    }

    pub fn set_gap(&mut self, gap: i32) {
        self.gap = gap;
    }

    #[must_use]
    pub const fn margins(&self) -> Margins {
        self.margins
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    /// Registered weight of `widget`, if any.
    #[must_use]
    pub fn weight(&self, widget: &WidgetRef) -> Option<f64> {
        self.weights.get(widget)
    }

    /// Change the weight of an already added (or new) widget.
    pub fn set_weight(&mut self, widget: &WidgetRef, weight: f64) -> Result<(), LayoutError> {
        self.weights.insert(widget, weight)
    }

    fn entries<'a>(&self, target: &'a LayoutTarget) -> Result<Vec<Entry<'a>>, LayoutError> {
        let mut entries = Vec::with_capacity(target.children.len());
        for widget in &target.children {
            let measured = measure(widget);
            if !measured.visible {
                continue;
            }
            let weight = self.weights.get(widget).ok_or(LayoutError::UnregisteredWidget)?;
            entries.push(Entry {
                widget,
                measured,
                weight,
            });
        }
        Ok(entries)
    }

    /// Shared body of the minimum and preferred size queries.
    ///
    /// Weighted children contribute `weighted_size` (minimum or natural);
    /// zero-weight children always contribute their natural size.
    fn layout_size(&self, target: &LayoutTarget, weighted_size: fn(&Measured) -> Size) -> Result<Size, LayoutError> {
        let entries = self.entries(target)?;
        let mut total = 0;
        let mut cross = 0;
        let mut weighted = Vec::new();

        for entry in &entries {
            if entry.weight > 0.0 {
                let size = weighted_size(&entry.measured);
                cross = cross.max(self.axis.cross(size));
                weighted.push((self.axis.main(size), entry.weight));
            } else {
                let size = entry.measured.preferred;
                cross = cross.max(self.axis.cross(size));
                total += self.axis.main(size);
            }
        }

        total += gaps(entries.len(), self.gap);
        total += weighted_estimate(weighted);

        let content = self.axis.compose(total, cross);
        Ok(Size::new(
            content.width + target.insets.horizontal() + self.margins.horizontal(),
            content.height + target.insets.vertical() + self.margins.vertical(),
        ))
    }
}

impl LayoutManager for BoxLayout {
    fn add_widget(&mut self, widget: &WidgetRef, constraint: Constraint) -> Result<(), LayoutError> {
        match constraint {
            Constraint::None => self.weights.insert(widget, 0.0),
            Constraint::Weight(weight) => self.weights.insert(widget, weight),
            other @ Constraint::Grid(_) => {
                log::warn!("box layout rejected a {} constraint", other.kind());
                Err(LayoutError::InvalidConstraint {
                    layout: "box layout",
                    found: other.kind(),
                })
            }
        }
    }

    fn remove_widget(&mut self, widget: &WidgetRef) {
        self.weights.remove(widget);
    }

    fn minimum_size(&mut self, target: &LayoutTarget) -> Result<Size, LayoutError> {
        self.layout_size(target, |m| m.minimum)
    }

    fn preferred_size(&mut self, target: &LayoutTarget) -> Result<Size, LayoutError> {
        self.layout_size(target, |m| m.preferred)
    }

    fn lay_out(&mut self, target: &LayoutTarget) -> Result<(), LayoutError> {
        let entries = self.entries(target)?;
        let insets = target.insets;
        let interior = Size::new(
            target.size.width - (insets.horizontal() + self.margins.horizontal()),
            target.size.height - (insets.vertical() + self.margins.vertical()),
        );
        let available = self.axis.main(interior);
        let cross = self.axis.cross(interior).max(0);

        log::debug!(
            "box layout {:?}: {} children in {}x{}",
            self.axis,
            entries.len(),
            target.size.width,
            target.size.height
        );

        let naturals: Vec<i32> = entries
            .iter()
            .map(|e| self.axis.main(e.measured.preferred))
            .collect();
        let weights: Vec<f64> = entries.iter().map(|e| e.weight).collect();
        let extents = resolve_tracks(available, &naturals, &weights, self.gap);

        let mut cursor = Point::new(insets.left + self.margins.left, insets.top + self.margins.top);
        for (entry, &extent) in entries.iter().zip(extents.iter()) {
            let bounds = Rect::from_parts(cursor, self.axis.compose(extent, cross));
            log::trace!("place {bounds:?} (weight {})", entry.weight);
            write_recover(entry.widget).set_bounds(bounds);
            cursor = self.axis.advance(cursor, extent + self.gap);
        }
        Ok(())
    }

    fn layout_print(&mut self, target: &LayoutTarget, page_height: i32) -> Result<i32, LayoutError> {
        let mut pages = Paginator::new(page_height)?;
        let insets = target.insets;
        let top = self.margins.top + insets.top;
        let visible: Vec<(&WidgetRef, Measured)> = target
            .children
            .iter()
            .map(|w| (w, measure(w)))
            .filter(|(_, m)| m.visible)
            .collect();

        let height = match self.axis {
            Axis::Vertical => {
                let mut cursor = top;
                for (i, (widget, m)) in visible.iter().enumerate() {
                    if i > 0 {
                        cursor += self.gap;
                    }
                    let extent = m.preferred.height;
                    let y = pages.place(cursor, extent);
                    write_recover(widget).set_bounds(Rect::new(m.bounds.x, y, m.bounds.width, extent));
                    cursor = y + extent;
                }
                cursor
            }
            Axis::Horizontal => {
                let tallest = visible
                    .iter()
                    .map(|(_, m)| m.preferred.height)
                    .max()
                    .unwrap_or(0);
                for (widget, m) in &visible {
                    write_recover(widget).set_bounds(Rect::new(m.bounds.x, m.bounds.y, m.bounds.width, tallest));
                }
                top + tallest
            }
        };

        Ok(height + self.margins.bottom + insets.bottom)
    }
}
