// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralScope — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Replica identity for multi-process training runs.
//!
//! Network side effects (plot submissions) must happen on exactly one
//! replica. Rather than consulting a process-global rank lookup, hooks take
//! an injected gate so they stay testable without a distributed runtime.

use std::sync::Arc;
use thiserror::Error;

/// Predicate deciding whether the current replica performs I/O side effects.
pub type PrimaryGate = Arc<dyn Fn() -> bool + Send + Sync>;

/// Gate that always allows side effects; the single-process default.
pub fn always_primary() -> PrimaryGate {
    Arc::new(|| true)
}

/// Errors produced when describing a replica.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ReplicaError {
    #[error("world size must be positive, got {0}")]
    EmptyWorldSize(usize),
    #[error("rank {rank} is out of bounds for world size {world_size}")]
    RankOutOfBounds { rank: usize, world_size: usize },
}

/// Position of this process within the set of training replicas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicaContext {
    rank: usize,
    world_size: usize,
}

impl ReplicaContext {
    pub fn new(rank: usize, world_size: usize) -> Result<Self, ReplicaError> {
        if world_size == 0 {
            return Err(ReplicaError::EmptyWorldSize(world_size));
        }
        if rank >= world_size {
            return Err(ReplicaError::RankOutOfBounds { rank, world_size });
        }
        Ok(Self { rank, world_size })
    }

    /// Context for a run without replication: rank 0 of 1.
    pub fn single_process() -> Self {
        Self {
            rank: 0,
            world_size: 1,
        }
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn world_size(&self) -> usize {
        self.world_size
    }

    /// Whether this replica is the one responsible for side effects.
    pub fn is_primary(&self) -> bool {
        self.rank == 0
    }

    /// Converts this context into the gate form hooks consume.
    pub fn into_gate(self) -> PrimaryGate {
        Arc::new(move || self.is_primary())
    }
}
