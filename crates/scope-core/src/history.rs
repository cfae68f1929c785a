//! Append-only metric time series keyed by name.

use serde::Serialize;
use std::collections::BTreeMap;

/// Ordered history of every metric observed so far.
///
/// Each series is indexed by phase-completion count: one value is appended
/// per phase end at which the metric was present. Series are never removed
/// or reordered for the lifetime of the owning hook, so the key set only
/// grows and each series is a faithful time axis.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricHistory {
    series: BTreeMap<String, Vec<f64>>,
}

impl MetricHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one observation to the named series, creating it on first use.
    pub fn append(&mut self, name: impl Into<String>, value: f64) {
        self.series.entry(name.into()).or_default().push(value);
    }

    /// Values recorded so far for `name`, oldest first.
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Number of distinct metrics observed.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Iterates over `(name, values)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.series
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}
