//! Step observer trait for monitoring cloth simulation progress.

use crate::spring::SpringKind;

/// Trait for observing the stages of each physics step.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after gravity and wind have been accumulated.
    fn on_forces(&mut self) {}

    /// Called after all particles have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each relaxation pass over the spring network.
    fn on_relaxation_pass(&mut self, _pass: usize) {}

    /// Called when a spring breaks during relaxation.
    fn on_spring_torn(&mut self, _spring: usize, _kind: SpringKind) {}

    /// Called after the collision stage with the number of contacts resolved.
    fn on_collisions(&mut self, _contacts: usize) {}

    /// Called when a fixed step is fully complete.
    fn on_step_complete(&mut self) {}

    /// Called once per real frame after the mesh is rebuilt.
    fn on_frame_complete(&mut self, _steps: usize) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
