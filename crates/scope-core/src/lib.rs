// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralScope — Licensed under AGPL-3.0-or-later.

//! Hook interface and metric bookkeeping shared by SpiralScope backends.

pub mod error;
pub mod history;
pub mod hooks;
pub mod meters;
pub mod replica;
pub mod state;

pub use error::ScopeError;
pub use history::MetricHistory;
pub use hooks::{HookRegistry, LoopEvent, TrainerHook};
pub use meters::{MeterReading, MeterValue};
pub use replica::{always_primary, PrimaryGate, ReplicaContext};
pub use state::{DatasetConfig, ModelConfig, OptimizerSnapshot, PhaseSnapshot, TaskConfig};

/// Result alias used across SpiralScope crates.
pub type Result<T> = std::result::Result<T, ScopeError>;
