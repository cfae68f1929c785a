// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralScope — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

use thiserror::Error;

/// Unified error type surfaced by SpiralScope hooks and backends.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// A required field was absent from the phase snapshot.
    #[error("missing field `{0}` on phase snapshot")]
    MissingField(&'static str),
    /// The plotting backend could not be initialised.
    #[error("plotting backend unavailable: {0}")]
    BackendUnavailable(String),
    /// The plotting backend rejected or failed a request.
    #[error("transport error: {0}")]
    Transport(String),
    /// A payload could not be serialised.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
