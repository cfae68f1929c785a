// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralScope — Licensed under AGPL-3.0-or-later.

//! Read-only view of the trainer state handed to hooks.

use crate::error::ScopeError;
use crate::meters::MeterReading;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Optimizer settings exposed to hooks as a flat scalar map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSnapshot {
    settings: BTreeMap<String, f64>,
}

impl OptimizerSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one optimizer setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: f64) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.settings.get(key).copied()
    }

    /// Current learning rate, looked up under the `"lr"` key.
    ///
    /// An absent key is an error for the caller to propagate, never a
    /// silent default.
    pub fn learning_rate(&self) -> Result<f64, ScopeError> {
        self.get("lr").ok_or(ScopeError::MissingField("lr"))
    }
}

/// Display name of one dataset split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
}

impl DatasetConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Display name and depth of the model under training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    pub depth: u32,
}

impl ModelConfig {
    pub fn new(name: impl Into<String>, depth: u32) -> Self {
        Self {
            name: name.into(),
            depth,
        }
    }
}

/// Task-level configuration consumed only for display titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub dataset_train: DatasetConfig,
    pub dataset_test: DatasetConfig,
    pub model: ModelConfig,
}

impl TaskConfig {
    pub fn new(
        dataset_train: DatasetConfig,
        dataset_test: DatasetConfig,
        model: ModelConfig,
    ) -> Self {
        Self {
            dataset_train,
            dataset_test,
            model,
        }
    }

    /// Split selected by the train flag, not by the phase label.
    pub fn dataset(&self, train: bool) -> &DatasetConfig {
        if train {
            &self.dataset_train
        } else {
            &self.dataset_test
        }
    }
}

/// Snapshot of one completed (or in-flight) phase.
///
/// `phase_label` prefixes metric keys; `train` drives title construction and
/// the plot trigger. The two are sourced independently by the trainer and
/// are expected to agree, but nothing here enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSnapshot {
    pub phase_label: String,
    pub train: bool,
    pub losses: Vec<f64>,
    pub batchsize_per_replica: usize,
    pub optimizer: OptimizerSnapshot,
    pub meters: Vec<MeterReading>,
    pub task: TaskConfig,
}

impl PhaseSnapshot {
    pub fn new(phase_label: impl Into<String>, train: bool, task: TaskConfig) -> Self {
        Self {
            phase_label: phase_label.into(),
            train,
            losses: Vec::new(),
            batchsize_per_replica: 1,
            optimizer: OptimizerSnapshot::new(),
            meters: Vec::new(),
            task,
        }
    }

    pub fn with_losses(mut self, losses: Vec<f64>) -> Self {
        self.losses = losses;
        self
    }

    pub fn with_batchsize_per_replica(mut self, batchsize: usize) -> Self {
        self.batchsize_per_replica = batchsize;
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerSnapshot) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_meter(mut self, meter: MeterReading) -> Self {
        self.meters.push(meter);
        self
    }

    /// Number of batches recorded for the phase.
    pub fn batches(&self) -> usize {
        self.losses.len()
    }
}
