// SPDX-License-Identifier: AGPL-3.0-or-later
// © 2025 Ryo ∴ SpiralArchitect (kishkavsesvit@icloud.com)
// Part of SpiralScope — Licensed under AGPL-3.0-or-later.

//! Trainer hook interface and dispatch.

use crate::state::PhaseSnapshot;
use crate::Result;

/// Callbacks a training loop fires at well-defined points.
///
/// Every method has a default no-op body; implementors override only the
/// events they care about. Callbacks run inline on the training thread and
/// are never invoked concurrently with themselves.
pub trait TrainerHook: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Training run is about to start.
    fn on_start(&mut self) -> Result<()> {
        Ok(())
    }

    /// A phase is about to begin.
    fn on_phase_start(&mut self, snapshot: &PhaseSnapshot) -> Result<()> {
        let _ = snapshot;
        Ok(())
    }

    /// A sample batch was drawn from the loader.
    fn on_sample(&mut self, snapshot: &PhaseSnapshot) -> Result<()> {
        let _ = snapshot;
        Ok(())
    }

    /// The forward pass for a batch completed.
    fn on_forward(&mut self, snapshot: &PhaseSnapshot) -> Result<()> {
        let _ = snapshot;
        Ok(())
    }

    /// The loss for a batch was computed.
    fn on_loss(&mut self, snapshot: &PhaseSnapshot) -> Result<()> {
        let _ = snapshot;
        Ok(())
    }

    /// The backward pass for a batch completed.
    fn on_backward(&mut self, snapshot: &PhaseSnapshot) -> Result<()> {
        let _ = snapshot;
        Ok(())
    }

    /// The optimizer applied an update.
    fn on_update(&mut self, snapshot: &PhaseSnapshot) -> Result<()> {
        let _ = snapshot;
        Ok(())
    }

    /// A phase finished; `snapshot` carries its losses and meter readings.
    fn on_phase_end(&mut self, snapshot: &PhaseSnapshot) -> Result<()> {
        let _ = snapshot;
        Ok(())
    }

    /// Training run ended.
    fn on_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// One training-loop event, as dispatched to registered hooks.
#[derive(Clone, Copy)]
pub enum LoopEvent<'a> {
    Start,
    PhaseStart(&'a PhaseSnapshot),
    Sample(&'a PhaseSnapshot),
    Forward(&'a PhaseSnapshot),
    Loss(&'a PhaseSnapshot),
    Backward(&'a PhaseSnapshot),
    Update(&'a PhaseSnapshot),
    PhaseEnd(&'a PhaseSnapshot),
    End,
}

/// Ordered collection of hooks sharing one dispatch point.
///
/// Hooks run in registration order. Dispatch stops at the first error, so a
/// failing hook prevents later hooks from observing the event; whether that
/// aborts the surrounding loop is the caller's policy.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn TrainerHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn TrainerHook>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Forwards `event` to every registered hook.
    pub fn dispatch(&mut self, event: LoopEvent<'_>) -> Result<()> {
        for hook in &mut self.hooks {
            match event {
                LoopEvent::Start => hook.on_start()?,
                LoopEvent::PhaseStart(snapshot) => hook.on_phase_start(snapshot)?,
                LoopEvent::Sample(snapshot) => hook.on_sample(snapshot)?,
                LoopEvent::Forward(snapshot) => hook.on_forward(snapshot)?,
                LoopEvent::Loss(snapshot) => hook.on_loss(snapshot)?,
                LoopEvent::Backward(snapshot) => hook.on_backward(snapshot)?,
                LoopEvent::Update(snapshot) => hook.on_update(snapshot)?,
                LoopEvent::PhaseEnd(snapshot) => hook.on_phase_end(snapshot)?,
                LoopEvent::End => hook.on_end()?,
            }
        }
        Ok(())
    }
}
