// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralScope — Licensed under AGPL-3.0-or-later.
// Unauthorized derivative works or closed redistribution prohibited under AGPL §13.

//! Blocking Visdom client and the sink seam hooks talk to.

use scope_core::{MetricHistory, Result, ScopeError};
use serde::Serialize;
#[cfg(feature = "visdom")]
use std::time::Duration;

/// Default port the Visdom server listens on.
pub const DEFAULT_PORT: u16 = 8097;

#[cfg(feature = "visdom")]
const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
#[cfg(feature = "visdom")]
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection target and display options for a Visdom server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisdomSettings {
    /// Server hostname or address, without scheme.
    pub server: String,
    pub port: u16,
    /// Visdom environment the plots land in.
    pub env: String,
    /// Appended verbatim to every window title.
    pub title_suffix: String,
}

impl VisdomSettings {
    pub fn new(server: impl Into<String>, port: u16) -> Self {
        Self {
            server: server.into(),
            port,
            env: "main".to_string(),
            title_suffix: String::new(),
        }
    }

    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = env.into();
        self
    }

    pub fn with_title_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.title_suffix = suffix.into();
        self
    }
}

/// One line trace: a metric's full time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveTrace {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
}

impl CurveTrace {
    fn from_series(name: &str, values: &[f64]) -> Self {
        Self {
            name: name.to_string(),
            x: (1..=values.len()).map(|i| i as f64).collect(),
            y: values.to_vec(),
            kind: "scatter",
            mode: "lines",
        }
    }
}

/// A full plot submission: every accumulated series, one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePlot {
    /// Window identifier; resubmitting to the same window updates it in place.
    pub window: String,
    pub title: String,
    pub traces: Vec<CurveTrace>,
}

impl CurvePlot {
    /// Builds one trace per series in `history`, x-indexed from 1.
    pub fn from_history(
        history: &MetricHistory,
        window: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            window: window.into(),
            title: title.into(),
            traces: history
                .iter()
                .map(|(name, values)| CurveTrace::from_series(name, values))
                .collect(),
        }
    }
}

/// Destination for curve plots.
///
/// `VisdomClient` is the production implementation; tests substitute a
/// recording sink.
pub trait CurveSink: Send + Sync {
    fn post_curves(&self, plot: &CurvePlot) -> Result<()>;
}

/// Blocking HTTP client for a Visdom server.
#[cfg(feature = "visdom")]
#[derive(Debug)]
pub struct VisdomClient {
    agent: ureq::Agent,
    endpoint: String,
    env: String,
}

#[cfg(feature = "visdom")]
impl VisdomClient {
    /// Connects to the configured server.
    ///
    /// Backend availability is checked here, never deferred to the first
    /// plot submission.
    pub fn connect(settings: &VisdomSettings) -> Result<Self> {
        if settings.server.trim().is_empty() {
            return Err(ScopeError::BackendUnavailable(
                "empty Visdom server address".to_string(),
            ));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .build();

        Ok(Self {
            agent,
            endpoint: format!("http://{}:{}/events", settings.server, settings.port),
            env: settings.env.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(feature = "visdom")]
impl CurveSink for VisdomClient {
    fn post_curves(&self, plot: &CurvePlot) -> Result<()> {
        let traces = serde_json::to_value(&plot.traces)?;
        let payload = serde_json::json!({
            "data": traces,
            "win": plot.window,
            "eid": self.env,
            "layout": { "title": plot.title },
            "opts": { "title": plot.title },
        });

        self.agent
            .post(&self.endpoint)
            .set("content-type", "application/json")
            .send_json(payload)
            .map_err(|err| ScopeError::Transport(err.to_string()))?;
        Ok(())
    }
}

/// Stub compiled when the `visdom` feature is disabled.
#[cfg(not(feature = "visdom"))]
pub struct VisdomClient {
    _private: (),
}

#[cfg(not(feature = "visdom"))]
impl VisdomClient {
    pub fn connect(settings: &VisdomSettings) -> Result<Self> {
        let _ = settings;
        Err(ScopeError::BackendUnavailable(
            "scope-visdom was built without the `visdom` feature".to_string(),
        ))
    }
}

#[cfg(not(feature = "visdom"))]
impl CurveSink for VisdomClient {
    fn post_curves(&self, plot: &CurvePlot) -> Result<()> {
        let _ = plot;
        Err(ScopeError::BackendUnavailable(
            "scope-visdom was built without the `visdom` feature".to_string(),
        ))
    }
}
