//! A widget that owns children and delegates their placement to a layout
//! manager.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::LayoutError;
use crate::geometry::{Insets, Size};
use crate::layout::{Constraint, LayoutManager, LayoutTarget};
use crate::sync::lock_recover_debug;
use crate::widget::WidgetRef;

/// Ordered children, insets, a size and one layout manager.
///
/// The children, size, insets and layout all live behind the container's
/// tree lock. Every entry point takes `&self` and holds that lock for its
/// whole duration, so a container shared between threads (for example
/// through an `Arc`) never runs a layout pass interleaved with a resize or
/// a child change.
///
/// ```rust
/// use videostore::container::Container;
/// use videostore::geometry::Size;
/// use videostore::layout::{Axis, BoxLayout, Constraint};
/// use videostore::widget::{shared, Filler};
///
/// let panel = Container::new(BoxLayout::new(Axis::Vertical));
/// panel.add(&shared(Filler::new(40, 10)), Constraint::None).unwrap();
/// let size = panel.preferred_size().unwrap();
/// panel.set_size(size);
/// panel.lay_out().unwrap();
/// ```
#[derive(Debug)]
pub struct Container<L = Box<dyn LayoutManager>> {
    tree: Mutex<Tree<L>>,
}

#[derive(Debug)]
struct Tree<L> {
    target: LayoutTarget,
    layout: L,
}

impl<L: LayoutManager> Container<L> {
    #[must_use]
    pub fn new(layout: L) -> Self {
        Self {
            tree: Mutex::new(Tree {
                target: LayoutTarget::default(),
                layout,
            }),
        }
    }

    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.tree_mut().target.insets = insets;
        self
    }

    fn tree_mut(&mut self) -> &mut Tree<L> {
        self.tree.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` on the layout manager under the tree lock.
    ///
    /// `f` must not call back into this container.
    pub fn with_layout<R>(&self, f: impl FnOnce(&L) -> R) -> R {
        let tree = lock_recover_debug(&self.tree, "Container::with_layout");
        f(&tree.layout)
    }

    /// Mutable access to the layout manager, e.g. to change grid weights.
    ///
    /// Exclusive access to the container already rules out a concurrent
    /// layout pass, so no lock is taken.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.tree_mut().layout
    }

    /// Handles to the children, in insertion order.
    #[must_use]
    pub fn children(&self) -> Vec<WidgetRef> {
        lock_recover_debug(&self.tree, "Container::children").target.children.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock_recover_debug(&self.tree, "Container::len").target.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn size(&self) -> Size {
        lock_recover_debug(&self.tree, "Container::size").target.size
    }

    /// Resize the container; cached layout tables are discarded.
    pub fn set_size(&self, size: Size) {
        let mut tree = lock_recover_debug(&self.tree, "Container::set_size");
        tree.target.size = size;
        tree.layout.invalidate();
    }

    #[must_use]
    pub fn insets(&self) -> Insets {
        lock_recover_debug(&self.tree, "Container::insets").target.insets
    }

    pub fn set_insets(&self, insets: Insets) {
        let mut tree = lock_recover_debug(&self.tree, "Container::set_insets");
        tree.target.insets = insets;
        tree.layout.invalidate();
    }

    /// Append `widget` and register it with the layout.
    ///
    /// If the layout rejects the constraint the child list is unchanged.
    pub fn add(&self, widget: &WidgetRef, constraint: impl Into<Constraint>) -> Result<(), LayoutError> {
        let mut tree = lock_recover_debug(&self.tree, "Container::add");
        tree.layout.add_widget(widget, constraint.into())?;
        tree.target.children.push(Arc::clone(widget));
        Ok(())
    }

    /// Remove `widget`; returns whether it was a child.
    pub fn remove(&self, widget: &WidgetRef) -> bool {
        let mut tree = lock_recover_debug(&self.tree, "Container::remove");
        let Some(index) = tree
            .target
            .children
            .iter()
            .position(|child| Arc::ptr_eq(child, widget))
        else {
            return false;
        };
        tree.target.children.remove(index);
        tree.layout.remove_widget(widget);
        true
    }

    /// Tell the layout that children changed size or visibility.
    pub fn invalidate(&self) {
        lock_recover_debug(&self.tree, "Container::invalidate").layout.invalidate();
    }

    pub fn minimum_size(&self) -> Result<Size, LayoutError> {
        let mut tree = lock_recover_debug(&self.tree, "Container::minimum_size");
        let Tree { target, layout } = &mut *tree;
        layout.minimum_size(target)
    }

    pub fn preferred_size(&self) -> Result<Size, LayoutError> {
        let mut tree = lock_recover_debug(&self.tree, "Container::preferred_size");
        let Tree { target, layout } = &mut *tree;
        layout.preferred_size(target)
    }

    /// Write bounds of every visible child.
    pub fn lay_out(&self) -> Result<(), LayoutError> {
        let mut tree = lock_recover_debug(&self.tree, "Container::lay_out");
        let Tree { target, layout } = &mut *tree;
        layout.lay_out(target)
    }

    /// Re-place children for pages of `page_height`; returns the height used.
    pub fn layout_print(&self, page_height: i32) -> Result<i32, LayoutError> {
        let mut tree = lock_recover_debug(&self.tree, "Container::layout_print");
        let Tree { target, layout } = &mut *tree;
        layout.layout_print(target, page_height)
    }
}

impl Container {
    /// Container over a boxed layout chosen at runtime.
    #[must_use]
    pub fn boxed(layout: impl LayoutManager + 'static) -> Self {
        Self::new(Box::new(layout))
    }
}
