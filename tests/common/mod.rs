//! Common test utilities and logging infrastructure
//!
//! Import this module in integration tests:
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=videostore::layout=trace` - Per-child placement records
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use videostore::geometry::{Rect, Size};
use videostore::record::Video;
use videostore::sync::read_recover;
use videostore::widget::{Widget, WidgetRef, shared};

static INIT: Once = Once::new();

/// Initialize test logging. Idempotent.
///
/// Library code logs through `log`; the subscriber picks those records up
/// through its `log` bridge.
pub fn init_test_logging() {
    init_test_logging_with_filter("videostore=debug,test=info");
}

/// Initialize test logging with a custom default filter.
pub fn init_test_logging_with_filter(filter: &str) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_test_writer()
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true)
                    .compact(),
            )
            .try_init()
            .ok();
    });
}

/// A test span guard that logs entry and exit.
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Widget with fixed natural and minimum sizes that records its bounds.
#[derive(Debug, Clone)]
pub struct TestWidget {
    pub preferred: Size,
    pub minimum: Size,
    pub visible: bool,
    pub bounds: Rect,
}

impl Widget for TestWidget {
    fn preferred_size(&self) -> Size {
        self.preferred
    }

    fn minimum_size(&self) -> Size {
        self.minimum
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

/// Visible widget whose natural and minimum size are `width` x `height`.
pub fn widget(width: i32, height: i32) -> WidgetRef {
    shared(TestWidget {
        preferred: Size::new(width, height),
        minimum: Size::new(width, height),
        visible: true,
        bounds: Rect::default(),
    })
}

pub fn bounds(widget: &WidgetRef) -> Rect {
    read_recover(widget).bounds()
}

pub fn sample_videos() -> Vec<Video> {
    vec![
        Video::new("V100", "Casablanca", 2.99, 1942, "PG", false),
        Video::new("V101", "Heat", 1.5, 1995, "R", false),
        Video::new("V102", "", 0.0, 2024, "", true),
        Video::new("V103", "Spirited Away", 3.25, 2001, "PG", true),
    ]
}

/// Fresh path in the system temp directory, unique per call.
pub fn temp_path(stem: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("videostore-{stem}-{}-{n}.txt", std::process::id()))
}
