// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralScope — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Visdom backend for SpiralScope: a phase-end hook that streams the
//! accumulated metric history to a Visdom server as live learning curves.
//!
//! The HTTP client is gated behind the `visdom` feature (enabled by
//! default). Without it the hook still compiles but construction reports the
//! backend as unavailable.

pub mod client;
pub mod hook;

pub use client::{CurvePlot, CurveSink, CurveTrace, VisdomClient, VisdomSettings, DEFAULT_PORT};
pub use hook::VisdomHook;
