//! Error types for cloth construction.
//!
//! Only construction-time validation fails. Once a simulation exists, every
//! numerical edge case is absorbed inside the step.

use thiserror::Error;

/// Errors returned by the cloth API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
}

/// The argument that was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    /// Grid must be at least 2x2.
    #[error("grid must be at least 2x2 (got {width}x{height})")]
    GridDimensions { width: usize, height: usize },
    /// Cloth width and height must be positive and finite.
    #[error("cloth dimensions must be positive and finite")]
    ClothDimensions,
    /// Mass must be positive and finite.
    #[error("particle mass must be positive and finite")]
    Mass,
    /// Fixed time step must be positive and finite.
    #[error("fixed time step must be positive and finite")]
    TimeStep,
    /// Collider radius must be positive and finite.
    #[error("collider radius must be positive and finite")]
    Radius,
    /// Spring stiffness must lie in (0, 1].
    #[error("spring stiffness must be in (0, 1]")]
    Stiffness,
    /// Damping must lie in (0, 1].
    #[error("damping must be in (0, 1]")]
    Damping,
    /// Gravity must be finite.
    #[error("gravity must be finite")]
    Gravity,
    /// Tear threshold must be finite and greater than 1.
    #[error("tear threshold must be finite and greater than 1")]
    TearThreshold,
    /// Bounce, friction and restitution must lie in [0, 1]; ground height must be finite.
    #[error("contact coefficients must be in [0, 1]")]
    Contact,
    /// Drag must be non-negative; turbulence, wobble and base direction must be finite.
    #[error("wind parameters must be finite with non-negative drag and a non-zero base direction")]
    Wind,
    /// Sweep speed and offset must be non-negative, range positive, all finite.
    #[error("sweep parameters must be finite with a positive range")]
    Sweep,
}
