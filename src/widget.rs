//! Opaque widget handles as seen by layout managers.
//!
//! The layout core knows nothing about any toolkit. A widget only has to
//! report its sizes and visibility and accept new bounds. Widgets are owned
//! by the surrounding UI and shared with containers as [`WidgetRef`]; two
//! handles refer to the same widget iff they point at the same allocation,
//! which is what grid spans rely on.

use std::fmt;
use std::sync::{Arc, RwLock};

use unicode_width::UnicodeWidthStr;

use crate::geometry::{Rect, Size};
use crate::sync::read_recover;

/// Capability a layout manager needs from a child.
pub trait Widget: fmt::Debug + Send + Sync {
    /// Natural (unconstrained, ideal) size.
    fn preferred_size(&self) -> Size;

    /// Smallest acceptable size. Defaults to the natural size.
    fn minimum_size(&self) -> Size {
        self.preferred_size()
    }

    /// Invisible widgets take no space and are never moved.
    fn is_visible(&self) -> bool {
        true
    }

    /// Current position and size.
    fn bounds(&self) -> Rect;

    fn set_bounds(&mut self, bounds: Rect);
}

/// Shared, externally owned widget.
pub type WidgetRef = Arc<RwLock<dyn Widget>>;

/// Wrap a widget into a shareable handle.
#[must_use]
pub fn shared<W: Widget + 'static>(widget: W) -> WidgetRef {
    Arc::new(RwLock::new(widget))
}

/// Identity of a widget handle, usable as a map key.
///
/// Two keys are equal iff they were taken from handles to the same widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetKey(usize);

impl WidgetKey {
    #[must_use]
    pub fn of(widget: &WidgetRef) -> Self {
        Self(Arc::as_ptr(widget).cast::<()>() as usize)
    }
}

/// Reference equality of two optional grid cells.
pub(crate) fn same_widget(a: Option<&WidgetRef>, b: Option<&WidgetRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

/// Sizes and visibility read under one lock acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Measured {
    pub visible: bool,
    pub preferred: Size,
    pub minimum: Size,
    pub bounds: Rect,
}

pub(crate) fn measure(widget: &WidgetRef) -> Measured {
    let guard = read_recover(widget);
    Measured {
        visible: guard.is_visible(),
        preferred: guard.preferred_size(),
        minimum: guard.minimum_size(),
        bounds: guard.bounds(),
    }
}

/// Invisible spacer with a fixed natural size.
///
/// Added with weight 0 to a box layout it reserves exactly its size; added
/// with a positive weight its size is ignored and it soaks up its share of
/// the free space.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filler {
    size: Size,
    bounds: Rect,
    visible: bool,
}

impl Filler {
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            bounds: Rect::default(),
            visible: true,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Widget for Filler {
    fn preferred_size(&self) -> Size {
        self.size
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

/// Single-line text measured in terminal cells.
///
/// The natural width is the display width of the text (wide characters
/// count as two cells) plus horizontal padding on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    padding: Size,
    bounds: Rect,
    visible: bool,
}

impl Label {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            padding: Size::zero(),
            bounds: Rect::default(),
            visible: true,
        }
    }

    /// Padding added on each side (left/right and top/bottom).
    #[must_use]
    pub fn padding(mut self, horizontal: i32, vertical: i32) -> Self {
        self.padding = Size::new(horizontal, vertical);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Widget for Label {
    fn preferred_size(&self) -> Size {
        let cells = i32::try_from(self.text.width()).unwrap_or(i32::MAX);
        Size::new(
            cells.saturating_add(self.padding.width * 2),
            1 + self.padding.height * 2,
        )
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_key_identity() {
        let a = shared(Filler::new(1, 1));
        let b = shared(Filler::new(1, 1));
        let a2 = Arc::clone(&a);

        assert_eq!(WidgetKey::of(&a), WidgetKey::of(&a2));
        assert_ne!(WidgetKey::of(&a), WidgetKey::of(&b));
        assert!(same_widget(Some(&a), Some(&a2)));
        assert!(!same_widget(Some(&a), Some(&b)));
        assert!(!same_widget(Some(&a), None));
        assert!(!same_widget(None, None));
    }

    #[test]
    fn test_filler_reports_fixed_size() {
        let filler = Filler::new(12, 3);
        assert_eq!(filler.preferred_size(), Size::new(12, 3));
        assert_eq!(filler.minimum_size(), Size::new(12, 3));
        assert!(filler.is_visible());
    }

    #[test]
    fn test_label_measures_display_width() {
        assert_eq!(Label::new("Title").preferred_size(), Size::new(5, 1));
        // CJK characters occupy two cells each.
        assert_eq!(Label::new("日本").preferred_size(), Size::new(4, 1));
        assert_eq!(
            Label::new("OK").padding(2, 1).preferred_size(),
            Size::new(6, 3)
        );
    }

    #[test]
    fn test_measure_reads_everything() {
        let mut label = Label::new("abc");
        label.set_visible(false);
        label.set_bounds(Rect::new(1, 1, 3, 1));
        let handle = shared(label);

        let m = measure(&handle);
        assert!(!m.visible);
        assert_eq!(m.preferred, Size::new(3, 1));
        assert_eq!(m.minimum, Size::new(3, 1));
        assert_eq!(m.bounds, Rect::new(1, 1, 3, 1));
    }
}
