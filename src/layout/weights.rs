//! Per-widget weights of a linear layout.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::LayoutError;
use crate::widget::{WidgetKey, WidgetRef};

/// Check that a weight is finite and non-negative.
pub(crate) fn validate_weight(weight: f64) -> Result<f64, LayoutError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(weight)
    } else {
        Err(LayoutError::InvalidWeight(weight))
    }
}

/// Association from widget identity to weight.
///
/// Each entry holds a handle to its widget, so a key cannot be reused by
/// another widget while the entry exists. Widgets that were never inserted
/// have no entry; callers decide whether that means 0 or a configuration
/// error.
#[derive(Debug, Clone, Default)]
pub struct WeightTable {
    weights: HashMap<WidgetKey, (WidgetRef, f64)>,
}

impl WeightTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the weight of `widget`.
    pub fn insert(&mut self, widget: &WidgetRef, weight: f64) -> Result<(), LayoutError> {
        let weight = validate_weight(weight)?;
        self.weights
            .insert(WidgetKey::of(widget), (Arc::clone(widget), weight));
        Ok(())
    }

    /// Remove `widget`, returning its weight if it was registered.
    pub fn remove(&mut self, widget: &WidgetRef) -> Option<f64> {
        self.weights
            .remove(&WidgetKey::of(widget))
            .map(|(_, weight)| weight)
    }

    #[must_use]
    pub fn get(&self, widget: &WidgetRef) -> Option<f64> {
        self.weights
            .get(&WidgetKey::of(widget))
            .map(|&(_, weight)| weight)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
