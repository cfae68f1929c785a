// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralScope — Licensed under AGPL-3.0-or-later.

//! Phase-end hook that accumulates metrics and streams learning curves.

use crate::client::{CurvePlot, CurveSink, VisdomClient, VisdomSettings};
use scope_core::{
    always_primary, MeterValue, MetricHistory, PhaseSnapshot, PrimaryGate, Result, TrainerHook,
};
use std::sync::Arc;
use tracing::info;

/// Hook that records per-phase scalars and plots them to Visdom.
///
/// Every phase end appends to the metric history; only evaluation phases on
/// the primary replica trigger a plot submission. Secondary replicas keep
/// accumulating locally but never transmit, so a window is written to by
/// exactly one process.
pub struct VisdomHook {
    settings: VisdomSettings,
    history: MetricHistory,
    sink: Arc<dyn CurveSink>,
    primary: PrimaryGate,
}

impl VisdomHook {
    /// Connects to the configured Visdom server.
    ///
    /// Fails fast with [`scope_core::ScopeError::BackendUnavailable`] when
    /// the backend cannot be initialised.
    pub fn new(settings: VisdomSettings) -> Result<Self> {
        let client = VisdomClient::connect(&settings)?;
        Ok(Self::with_sink(settings, Arc::new(client), always_primary()))
    }

    /// Builds a hook around an explicit sink and primary gate.
    pub fn with_sink(settings: VisdomSettings, sink: Arc<dyn CurveSink>, primary: PrimaryGate) -> Self {
        Self {
            settings,
            history: MetricHistory::new(),
            sink,
            primary,
        }
    }

    /// Replaces the primary gate, e.g. with one derived from a
    /// [`scope_core::ReplicaContext`].
    pub fn with_gate(mut self, primary: PrimaryGate) -> Self {
        self.primary = primary;
        self
    }

    /// Metric history accumulated so far.
    pub fn history(&self) -> &MetricHistory {
        &self.history
    }

    /// Window title: dataset, model, and depth, with the configured suffix.
    ///
    /// The dataset split is chosen by the snapshot's train flag, which the
    /// trainer sources independently of the phase label used for metric
    /// keys.
    fn curve_title(&self, snapshot: &PhaseSnapshot) -> String {
        let dataset = snapshot.task.dataset(snapshot.train);
        let mut title = format!(
            "{}-{}-{}",
            dataset.name, snapshot.task.model.name, snapshot.task.model.depth
        );
        title.push_str(&self.settings.title_suffix);
        title
    }
}

impl TrainerHook for VisdomHook {
    fn name(&self) -> &str {
        "visdom"
    }

    fn on_phase_end(&mut self, snapshot: &PhaseSnapshot) -> Result<()> {
        let batches = snapshot.batches();
        if batches == 0 {
            return Ok(());
        }

        let label = snapshot.phase_label.as_str();

        // Mean per-sample loss for the phase.
        let total: f64 = snapshot.losses.iter().sum();
        let loss = total / (batches * snapshot.batchsize_per_replica) as f64;
        self.history.append(format!("{label}_loss"), loss);

        self.history.append(
            format!("{label}_learning_rate"),
            snapshot.optimizer.learning_rate()?,
        );

        for meter in &snapshot.meters {
            match &meter.value {
                MeterValue::Scalar(value) => {
                    self.history
                        .append(format!("{label}_{}", meter.name), *value);
                }
                MeterValue::Nested(_) => {
                    for (key, value) in meter.flattened() {
                        self.history.append(format!("{label}_{key}"), value);
                    }
                }
            }
        }

        let title = self.curve_title(snapshot);

        if !snapshot.train && (self.primary)() {
            info!(window = %title, "plotting learning curves to visdom");
            let plot = CurvePlot::from_history(&self.history, title.clone(), title);
            self.sink.post_curves(&plot)?;
        }

        Ok(())
    }
}
