//! Tearable cloth simulation with Verlet integration.
//!
//! `clothy` simulates a rectangular sheet of particles joined by structural,
//! shear and bend springs. It advances in fixed steps under gravity and
//! turbulent wind, relaxes the springs Jakobsen-style, tears springs that
//! stretch too far, and pushes the cloth out of spheres and the ground. Each
//! frame it produces an interleaved vertex buffer and a triangle index buffer
//! ready for a renderer.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity
//! - **Spring network**: Structural, shear and bend springs with mass-weighted relaxation
//! - **Tearing**: Springs break past a stretch threshold; the pointer rips particles out
//! - **Wind**: Quadratic drag toward a turbulent, slowly wobbling air stream
//! - **Collision**: Moving sphere colliders plus a ground plane
//! - **Modes**: Tear, collision and flag scenarios with reset-then-configure switching
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments (disable `std`)
//!
//! # Example
//!
//! ```
//! use clothy::{ClothConfig, ClothSimulation, SimulationMode};
//!
//! let config = ClothConfig::new()
//!     .with_grid(10, 10, 4.0f32, 4.0)
//!     .with_mode(SimulationMode::Tear)
//!     .with_seed(7);
//! let mut cloth = ClothSimulation::new(config).unwrap();
//! cloth.update(1.0 / 60.0);
//! assert_eq!(cloth.mesh().vertex_count(), 100);
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod float;
pub mod vec;
pub mod particle;
pub mod spring;
pub mod grid;
pub mod collider;
pub mod wind;
pub mod sweep;
pub mod solver;
pub mod timestep;
pub mod mesh;
pub mod mode;
pub mod simulation;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use particle::Particle;
pub use spring::{Spring, SpringKind, RelaxOutcome};
pub use grid::{ClothGrid, GridConfig};
pub use collider::{SphereCollider, GroundPlane, ContactParams};
pub use wind::{Wind, WindParams};
pub use sweep::{ColliderSweep, SweepParams, SweepPhase};
pub use timestep::FixedTimestep;
pub use mesh::{MeshBuffers, VERTEX_STRIDE};
pub use mode::{SimulationMode, ModeSetup, PinPattern};
pub use simulation::ClothSimulation;
pub use config::{ClothConfig, SolverConfig};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::{ClothError, InvalidArgument};
