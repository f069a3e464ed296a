//! Centered row of equally sized command buttons.

use crate::error::LayoutError;
use crate::geometry::{Rect, Size};
use crate::sync::write_recover;
use crate::widget::{WidgetRef, measure};

use super::{Constraint, DEFAULT_GAP, DEFAULT_MARGIN, LayoutManager, LayoutTarget, gaps, validate_page_height};

/// Gives every visible child the size of the largest one and centers the
/// resulting row inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonLayout {
    gap: i32,
    hmargin: i32,
    vmargin: i32,
}

impl Default for ButtonLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonLayout {
    /// 5 pixel gap, 5 pixel horizontal and vertical margins.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gap: DEFAULT_GAP,
            hmargin: DEFAULT_MARGIN,
            vmargin: DEFAULT_MARGIN,
        }
    }

    #[must_use]
    pub const fn with_gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }

    /// Space left of the first and right of the last button.
    #[must_use]
    pub const fn with_hmargin(mut self, hmargin: i32) -> Self {
        self.hmargin = hmargin;
        self
    }

    /// Space above and below the row.
    #[must_use]
    pub const fn with_vmargin(mut self, vmargin: i32) -> Self {
        self.vmargin = vmargin;
        self
    }

    #[must_use]
    pub const fn gap(&self) -> i32 {
        self.gap
    }

    pub fn set_gap(&mut self, gap: i32) {
        self.gap = gap;
    }

    #[must_use]
    pub const fn hmargin(&self) -> i32 {
        self.hmargin
    }

    pub fn set_hmargin(&mut self, hmargin: i32) {
        self.hmargin = hmargin;
    }

    #[must_use]
    pub const fn vmargin(&self) -> i32 {
        self.vmargin
    }

    pub fn set_vmargin(&mut self, vmargin: i32) {
        self.vmargin = vmargin;
    }

    /// Visible children and the common cell size.
    fn row<'a>(target: &'a LayoutTarget) -> (Vec<&'a WidgetRef>, Size) {
        let mut cell = Size::zero();
        let mut visible = Vec::with_capacity(target.children.len());
        for widget in &target.children {
            let m = measure(widget);
            if m.visible {
                cell = cell.union(&m.preferred);
                visible.push(widget);
            }
        }
        (visible, cell)
    }

    fn row_width(&self, count: usize, cell: Size) -> i32 {
        let count_i = i32::try_from(count).unwrap_or(i32::MAX);
        cell.width.saturating_mul(count_i) + gaps(count, self.gap)
    }

    fn size_of(&self, target: &LayoutTarget) -> Size {
        let (visible, cell) = Self::row(target);
        let insets = target.insets;
        Size::new(
            self.row_width(visible.len(), cell) + 2 * self.hmargin + insets.horizontal(),
            cell.height + 2 * self.vmargin + insets.vertical(),
        )
    }
}

impl LayoutManager for ButtonLayout {
    fn add_widget(&mut self, _widget: &WidgetRef, constraint: Constraint) -> Result<(), LayoutError> {
        match constraint {
            Constraint::None => Ok(()),
            other => {
                log::warn!("button layout rejected a {} constraint", other.kind());
                Err(LayoutError::InvalidConstraint {
                    layout: "button layout",
                    found: other.kind(),
                })
            }
        }
    }

    fn remove_widget(&mut self, _widget: &WidgetRef) {}

    fn minimum_size(&mut self, target: &LayoutTarget) -> Result<Size, LayoutError> {
        Ok(self.size_of(target))
    }

    fn preferred_size(&mut self, target: &LayoutTarget) -> Result<Size, LayoutError> {
        Ok(self.size_of(target))
    }

    fn lay_out(&mut self, target: &LayoutTarget) -> Result<(), LayoutError> {
        let (visible, cell) = Self::row(target);
        let insets = target.insets;
        let extra_w = target.size.width
            - (insets.horizontal() + 2 * self.hmargin)
            - self.row_width(visible.len(), cell);
        let extra_h = target.size.height - (insets.vertical() + 2 * self.vmargin) - cell.height;

        log::debug!(
            "button layout: {} buttons of {}x{} in {}x{}",
            visible.len(),
            cell.width,
            cell.height,
            target.size.width,
            target.size.height
        );

        let mut x = insets.left + self.hmargin + extra_w / 2;
        let y = insets.top + self.vmargin + extra_h / 2;
        for widget in visible {
            write_recover(widget).set_bounds(Rect::new(x, y, cell.width, cell.height));
            x += cell.width + self.gap;
        }
        Ok(())
    }

    fn layout_print(&mut self, target: &LayoutTarget, page_height: i32) -> Result<i32, LayoutError> {
        validate_page_height(page_height)?;
        self.lay_out(target)?;
        Ok(self.size_of(target).height)
    }
}
