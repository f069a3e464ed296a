//! # videostore
//!
//! Layout managers for form-style screens and the record store of a small
//! video rental inventory.
//!
//! ## Quick Start
//!
//! ```rust
//! use videostore::prelude::*;
//!
//! let title = shared(Label::new("Title"));
//! let field = shared(Filler::new(20, 1));
//!
//! let row = Container::new(BoxLayout::new(Axis::Horizontal).with_gap(1));
//! row.add(&title, Constraint::None).unwrap();
//! row.add(&field, 1.0).unwrap();
//! row.set_size(Size::new(60, 3));
//! row.lay_out().unwrap();
//!
//! let mut store = VideoStore::new();
//! let video = store.create_video();
//! store.add(video);
//! ```
//!
//! ## Core Concepts
//!
//! - **Widget**: anything with a natural size and bounds, shared as [`WidgetRef`]
//! - **LayoutManager**: assigns bounds to a container's children
//! - **Container**: children + insets + size + one layout manager
//! - **VideoStore**: ordered records loaded from and saved to a flat file

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod container;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod record;
pub mod record_io;
pub mod store;
pub mod sync;
pub mod widget;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::container::Container;
    pub use crate::error::{LayoutError, MalformedReason, StoreError};
    pub use crate::geometry::{Insets, Margins, Point, Rect, Size};
    pub use crate::layout::{
        Alignment, Axis, BoxLayout, ButtonLayout, Constraint, GridLayout, GridLocation,
        LayoutManager, LayoutTarget,
    };
    pub use crate::logging::StoreLogger;
    pub use crate::record::{IdSequence, Video};
    pub use crate::record_io::{VideoReader, VideoWriter};
    pub use crate::store::VideoStore;
    pub use crate::widget::{Filler, Label, Widget, WidgetRef, shared};
}

// Re-export key types at crate root
pub use container::Container;
pub use error::{LayoutError, StoreError};
pub use layout::{Alignment, Axis, BoxLayout, ButtonLayout, Constraint, GridLayout, GridLocation, LayoutManager};
pub use record::Video;
pub use store::VideoStore;
pub use widget::{Widget, WidgetRef};
