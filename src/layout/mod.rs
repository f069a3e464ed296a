//! Layout managers and the arithmetic they share.
//!
//! A [`LayoutManager`] arranges the children of a [`LayoutTarget`]. Three
//! implementations are provided:
//!
//! - [`BoxLayout`]: one axis, space shared by weight
//! - [`ButtonLayout`]: a centered row of equally sized buttons
//! - [`GridLayout`]: rows and columns with weights, alignments and spans
//!
//! All of them follow the same protocol: register children with
//! [`LayoutManager::add_widget`], query sizes, then call
//! [`LayoutManager::lay_out`] to write every child's bounds.

pub mod box_layout;
pub mod button_layout;
pub mod cache;
pub mod grid_layout;
pub mod grid_location;
pub mod weights;

pub use box_layout::{Axis, BoxLayout};
pub use button_layout::ButtonLayout;
pub use cache::Generation;
pub use grid_layout::GridLayout;
pub use grid_location::GridLocation;
pub use weights::WeightTable;

use std::fmt;

use smallvec::SmallVec;

use crate::error::LayoutError;
use crate::geometry::{Insets, Size};
use crate::widget::WidgetRef;

/// Default gap between neighbouring widgets.
pub const DEFAULT_GAP: i32 = 5;

/// Default margin on every side.
pub const DEFAULT_MARGIN: i32 = 5;

/// Per-track sizes; most layouts have only a handful of rows or columns.
pub(crate) type Tracks = SmallVec<[i32; 8]>;

/// Placement value passed when adding a widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Constraint {
    /// No placement value; a box layout treats it as weight 0.
    #[default]
    None,
    /// Share of the free space along a box layout's axis.
    Weight(f64),
    /// Cell region of a grid layout.
    Grid(GridLocation),
}

impl Constraint {
    pub(crate) const fn kind(&self) -> &'static str {
        match self {
            Self::None => "empty",
            Self::Weight(_) => "weight",
            Self::Grid(_) => "grid location",
        }
    }
}

impl From<f64> for Constraint {
    fn from(weight: f64) -> Self {
        Self::Weight(weight)
    }
}

impl From<GridLocation> for Constraint {
    fn from(location: GridLocation) -> Self {
        Self::Grid(location)
    }
}

impl From<Option<f64>> for Constraint {
    fn from(weight: Option<f64>) -> Self {
        weight.map_or(Self::None, Self::Weight)
    }
}

/// Placement of a widget inside a grid cell larger than itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Stretch to the cell size.
    #[default]
    Fill,
    /// Center inside the cell.
    Center,
    /// Left or top edge.
    Near,
    /// Right or bottom edge.
    Far,
}

impl Alignment {
    /// Offset and extent of a widget of natural `extent` in a cell of
    /// `cell` along one axis. The extent is clamped to the cell first.
    #[must_use]
    pub fn place(self, extent: i32, cell: i32) -> (i32, i32) {
        let extent = extent.min(cell);
        match self {
            Self::Fill => (0, cell),
            Self::Near => (0, extent),
            Self::Center => ((cell - extent) / 2, extent),
            Self::Far => (cell - extent, extent),
        }
    }
}

/// What a layout manager sees of its container.
#[derive(Debug, Clone, Default)]
pub struct LayoutTarget {
    pub size: Size,
    pub insets: Insets,
    pub children: Vec<WidgetRef>,
}

impl LayoutTarget {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            insets: Insets::default(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    #[must_use]
    pub fn child(mut self, widget: WidgetRef) -> Self {
        self.children.push(widget);
        self
    }
}

/// Arranges the children of a container.
///
/// Implementations may cache tables derived from widget sizes; the cache is
/// dropped by [`LayoutManager::invalidate`] and by any method that changes
/// the layout's configuration.
pub trait LayoutManager: fmt::Debug + Send {
    /// Register `widget` with its placement value.
    ///
    /// Returns [`LayoutError::InvalidConstraint`] if the constraint is not the
    /// kind this layout understands; nothing is registered in that case.
    fn add_widget(&mut self, widget: &WidgetRef, constraint: Constraint) -> Result<(), LayoutError>;

    fn remove_widget(&mut self, widget: &WidgetRef);

    fn minimum_size(&mut self, target: &LayoutTarget) -> Result<Size, LayoutError>;

    fn preferred_size(&mut self, target: &LayoutTarget) -> Result<Size, LayoutError>;

    /// Assign position and size to every visible child.
    fn lay_out(&mut self, target: &LayoutTarget) -> Result<(), LayoutError>;

    /// Re-place children vertically for paginated output and return the
    /// total height consumed.
    fn layout_print(&mut self, target: &LayoutTarget, page_height: i32) -> Result<i32, LayoutError>;

    /// Discard cached tables; the container changed.
    fn invalidate(&mut self) {}
}

impl<L: LayoutManager + ?Sized> LayoutManager for Box<L> {
    fn add_widget(&mut self, widget: &WidgetRef, constraint: Constraint) -> Result<(), LayoutError> {
        (**self).add_widget(widget, constraint)
    }

    fn remove_widget(&mut self, widget: &WidgetRef) {
        (**self).remove_widget(widget);
    }

    fn minimum_size(&mut self, target: &LayoutTarget) -> Result<Size, LayoutError> {
        (**self).minimum_size(target)
    }

    fn preferred_size(&mut self, target: &LayoutTarget) -> Result<Size, LayoutError> {
        (**self).preferred_size(target)
    }

    fn lay_out(&mut self, target: &LayoutTarget) -> Result<(), LayoutError> {
        (**self).lay_out(target)
    }

    fn layout_print(&mut self, target: &LayoutTarget, page_height: i32) -> Result<i32, LayoutError> {
        (**self).layout_print(target, page_height)
    }

    fn invalidate(&mut self) {
        (**self).invalidate();
    }
}

/// Round-half-up share of `available` for one weighted track.
pub(crate) fn proportional_share(available: i32, weight: f64, total_weight: f64) -> i32 {
    if available <= 0 || total_weight <= 0.0 {
        return 0;
    }
    let share = (f64::from(available) * weight / total_weight + 0.5).floor();
    #[allow(clippy::cast_possible_truncation)]
    let share = share as i32;
    share.max(0)
}

/// Natural extent needed by the weighted tracks together.
///
/// The track with the largest size/weight ratio decides the scale; the
/// result is what every weighted track would need if they all got at least
/// their natural size at that scale. Only that one track is checked.
pub(crate) fn weighted_estimate(items: impl IntoIterator<Item = (i32, f64)>) -> i32 {
    let mut total_weight = 0.0;
    let mut worst_ratio = 0.0;
    let mut worst_size = 0;
    let mut worst_weight = 0.0;

    for (size, weight) in items {
        if weight <= 0.0 {
            continue;
        }
        total_weight += weight;
        let ratio = f64::from(size) / weight;
        if ratio > worst_ratio {
            worst_ratio = ratio;
            worst_size = size;
            worst_weight = weight;
        }
    }

    if total_weight > 0.0 && worst_size > 0 && worst_weight > 0.0 {
        #[allow(clippy::cast_possible_truncation)]
        let estimate = (f64::from(worst_size) * total_weight / worst_weight) as i32;
        estimate
    } else {
        0
    }
}

/// Total gap space between `count` tracks.
pub(crate) fn gaps(count: usize, gap: i32) -> i32 {
    if count > 1 {
        i32::try_from(count - 1).unwrap_or(i32::MAX).saturating_mul(gap)
    } else {
        0
    }
}

/// Natural extent of a run of tracks: fixed tracks plus weighted estimate
/// plus gaps.
pub(crate) fn natural_extent(naturals: &[i32], weights: &[f64], gap: i32) -> i32 {
    let fixed: i32 = naturals
        .iter()
        .zip(weights)
        .filter(|&(_, &w)| w <= 0.0)
        .map(|(&n, _)| n)
        .sum();
    let estimate = weighted_estimate(naturals.iter().copied().zip(weights.iter().copied()));
    fixed + gaps(naturals.len(), gap) + estimate
}

/// Final extents of a run of tracks sharing `available` space.
///
/// Zero-weight tracks keep their natural extent; the rest of the space,
/// after gaps, is divided among weighted tracks by weight.
pub(crate) fn resolve_tracks(available: i32, naturals: &[i32], weights: &[f64], gap: i32) -> Tracks {
    let mut remaining = available - gaps(naturals.len(), gap);
    let mut total_weight = 0.0;
    for (&natural, &weight) in naturals.iter().zip(weights) {
        if weight <= 0.0 {
            remaining -= natural;
        } else {
            total_weight += weight;
        }
    }

    naturals
        .iter()
        .zip(weights)
        .map(|(&natural, &weight)| {
            if weight <= 0.0 {
                natural
            } else {
                proportional_share(remaining, weight, total_weight)
            }
        })
        .collect()
}

/// Reject page heights that cannot hold anything.
pub(crate) fn validate_page_height(page_height: i32) -> Result<i32, LayoutError> {
    if page_height <= 0 {
        return Err(LayoutError::InvalidPageHeight(page_height));
    }
    Ok(page_height)
}

/// Walks down a stack of pages while items are placed top to bottom.
#[derive(Debug, Clone)]
pub(crate) struct Paginator {
    page_height: i32,
    page_bottom: i32,
    page_is_empty: bool,
    /// Bottom edge of the last placed item.
    end: Option<i32>,
}

impl Paginator {
    pub(crate) fn new(page_height: i32) -> Result<Self, LayoutError> {
        let page_height = validate_page_height(page_height)?;
        Ok(Self {
            page_height,
            page_bottom: page_height,
            page_is_empty: true,
            end: None,
        })
    }

    /// Where an item of `extent` that would start at `cursor` goes.
    ///
    /// Items that would cross the current page's bottom edge start at the
    /// top of the next page, unless nothing has been placed on the current
    /// page yet (an item taller than a page has to start somewhere). A
    /// cursor already past the bottom edge (a trailing gap) also moves the
    /// item to the next page top; the gap is not carried over. Only an item
    /// overflowing from an earlier page keeps the top occupied.
    pub(crate) fn place(&mut self, cursor: i32, extent: i32) -> i32 {
        let mut start = cursor;
        while start > self.page_bottom {
            let top = self.page_bottom;
            self.page_bottom += self.page_height;
            let overflowing = self.end.is_some_and(|end| end > top);
            start = match self.end {
                Some(end) if end <= top => top,
                _ => cursor,
            };
            self.page_is_empty = !overflowing;
        }
        if start + extent > self.page_bottom && !self.page_is_empty {
            start = self.page_bottom;
            self.page_bottom += self.page_height;
            log::trace!("page break at {start}");
        }
        self.page_is_empty = false;
        self.end = Some(start + extent);
        start
    }
}
