//! Configuration types for the cloth solver and simulation.

use crate::collider::{ContactParams, GroundPlane};
use crate::error::{ClothError, InvalidArgument};
use crate::float::Float;
use crate::grid::GridConfig;
use crate::mode::SimulationMode;
use crate::sweep::SweepParams;
use crate::wind::WindParams;

/// Interactive range for gravity (vertical acceleration).
pub const GRAVITY_RANGE: (f32, f32) = (-20.0, 0.0);
/// Interactive range for the Verlet damping factor.
pub const DAMPING_RANGE: (f32, f32) = (0.9, 1.0);
/// Interactive range for wind strength.
pub const WIND_STRENGTH_RANGE: (f32, f32) = (0.0, 15.0);
/// Interactive range for the tear threshold.
pub const TEAR_THRESHOLD_RANGE: (f32, f32) = (1.5, 5.0);

/// Clamp `value` to an `(min, max)` range given in `f32`.
pub(crate) fn clamp_to<F: Float>(value: F, range: (f32, f32)) -> F {
    value.clamp(F::from_f32(range.0), F::from_f32(range.1))
}

/// Per-step physics parameters.
///
/// # Builder Pattern
/// ```
/// use clothy::config::SolverConfig;
///
/// let config: SolverConfig<f32> = SolverConfig::new()
///     .with_relaxation_passes(5)
///     .with_gravity(-9.81)
///     .with_damping(0.99)
///     .with_tear_threshold(2.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig<F: Float> {
    /// Spring relaxation passes per fixed step. Default: 3.
    pub relaxation_passes: usize,
    /// Vertical acceleration. Default: -9.81.
    pub gravity: F,
    /// Verlet velocity retention per step, in (0, 1]. Default: 0.99.
    pub damping: F,
    /// Stretch ratio past which a spring tears. Default: 2.0.
    pub tear_threshold: F,
    /// Sphere contact response.
    pub contact: ContactParams<F>,
    /// Floor below the cloth.
    pub ground: GroundPlane<F>,
}

impl<F: Float> SolverConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SolverConfig {
            relaxation_passes: 3,
            gravity: F::from_f32(-9.81),
            damping: F::from_f32(0.99),
            tear_threshold: F::two(),
            contact: ContactParams::default(),
            ground: GroundPlane::default(),
        }
    }

    /// Set the number of relaxation passes (at least 1).
    pub fn with_relaxation_passes(mut self, passes: usize) -> Self {
        self.relaxation_passes = passes.max(1);
        self
    }

    /// Set the vertical gravity acceleration.
    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Set the tear threshold.
    pub fn with_tear_threshold(mut self, tear_threshold: F) -> Self {
        self.tear_threshold = tear_threshold;
        self
    }

    pub fn with_contact(mut self, contact: ContactParams<F>) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_ground(mut self, ground: GroundPlane<F>) -> Self {
        self.ground = ground;
        self
    }

    /// Reject values the solver cannot stay finite with.
    pub fn validate(&self) -> Result<(), ClothError> {
        if !self.gravity.is_finite() {
            return Err(InvalidArgument::Gravity.into());
        }
        if !self.damping.is_finite() || self.damping <= F::zero() || self.damping > F::one() {
            return Err(InvalidArgument::Damping.into());
        }
        if !self.tear_threshold.is_finite() || self.tear_threshold <= F::one() {
            return Err(InvalidArgument::TearThreshold.into());
        }
        let unit = |v: F| v.is_finite() && v >= F::zero() && v <= F::one();
        let contact = &self.contact;
        if !unit(contact.bounce)
            || !unit(contact.friction)
            || !unit(self.ground.restitution)
            || !self.ground.height.is_finite()
        {
            return Err(InvalidArgument::Contact.into());
        }
        Ok(())
    }
}

impl<F: Float> Default for SolverConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to build a [`ClothSimulation`](crate::ClothSimulation).
#[derive(Clone, Debug, PartialEq)]
pub struct ClothConfig<F: Float> {
    pub grid: GridConfig<F>,
    pub solver: SolverConfig<F>,
    pub wind: WindParams<F>,
    pub sweep: SweepParams<F>,
    /// Physics step length. Default: 1/60 s.
    pub fixed_dt: F,
    /// Pick radius used by pointer tearing. Default: 0.08.
    pub tear_radius: F,
    /// Mode entered at construction. Default: [`SimulationMode::Tear`].
    pub mode: SimulationMode,
    /// Turbulence seed. `None` draws from OS entropy when the `std`
    /// feature is on, and uses a fixed seed otherwise.
    pub seed: Option<u64>,
}

impl<F: Float> ClothConfig<F> {
    pub fn new() -> Self {
        ClothConfig {
            grid: GridConfig::default(),
            solver: SolverConfig::new(),
            wind: WindParams::default(),
            sweep: SweepParams::default(),
            fixed_dt: F::one() / F::from_f32(60.0),
            tear_radius: F::from_f32(0.08),
            mode: SimulationMode::Tear,
            seed: None,
        }
    }

    /// Grid resolution and world-space size of the cloth.
    pub fn with_grid(mut self, width: usize, height: usize, cloth_width: F, cloth_height: F) -> Self {
        self.grid.width = width;
        self.grid.height = height;
        self.grid.cloth_width = cloth_width;
        self.grid.cloth_height = cloth_height;
        self
    }

    pub fn with_grid_config(mut self, grid: GridConfig<F>) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.grid.particle_mass = mass;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig<F>) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_wind(mut self, wind: WindParams<F>) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_sweep(mut self, sweep: SweepParams<F>) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_fixed_dt(mut self, fixed_dt: F) -> Self {
        self.fixed_dt = fixed_dt;
        self
    }

    pub fn with_tear_radius(mut self, tear_radius: F) -> Self {
        self.tear_radius = tear_radius;
        self
    }

    pub fn with_mode(mut self, mode: SimulationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Make turbulence reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        self.grid.validate()?;
        self.solver.validate()?;
        self.wind.validate()?;
        self.sweep.validate()?;
        if !self.fixed_dt.is_finite() || self.fixed_dt <= F::zero() {
            return Err(InvalidArgument::TimeStep.into());
        }
        if !self.tear_radius.is_finite() || self.tear_radius < F::zero() {
            return Err(InvalidArgument::Radius.into());
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_interactive_setup() {
        let config: ClothConfig<f32> = ClothConfig::new();
        assert_eq!(config.grid.width, 25);
        assert_eq!(config.solver.relaxation_passes, 3);
        assert!((config.fixed_dt - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!(config.mode, SimulationMode::Tear);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn relaxation_passes_at_least_one() {
        let solver: SolverConfig<f32> = SolverConfig::new().with_relaxation_passes(0);
        assert_eq!(solver.relaxation_passes, 1);
    }

    #[test]
    fn validate_rejects_bad_step() {
        let config: ClothConfig<f32> = ClothConfig::new().with_fixed_dt(0.0);
        assert_eq!(
            config.validate().unwrap_err(),
            ClothError::InvalidArgument(InvalidArgument::TimeStep)
        );
    }

    fn solver_error(solver: SolverConfig<f32>) -> ClothError {
        ClothConfig::new().with_solver(solver).validate().unwrap_err()
    }

    #[test]
    fn validate_rejects_unstable_solver() {
        let err = |arg| ClothError::InvalidArgument(arg);
        assert_eq!(solver_error(SolverConfig::new().with_damping(1.5)), err(InvalidArgument::Damping));
        assert_eq!(solver_error(SolverConfig::new().with_damping(0.0)), err(InvalidArgument::Damping));
        assert_eq!(solver_error(SolverConfig::new().with_damping(f32::NAN)), err(InvalidArgument::Damping));
        assert_eq!(solver_error(SolverConfig::new().with_gravity(f32::INFINITY)), err(InvalidArgument::Gravity));
        assert_eq!(
            solver_error(SolverConfig::new().with_tear_threshold(1.0)),
            err(InvalidArgument::TearThreshold)
        );
        assert_eq!(
            solver_error(SolverConfig::new().with_tear_threshold(f32::NAN)),
            err(InvalidArgument::TearThreshold)
        );
    }

    #[test]
    fn validate_rejects_bad_contact() {
        let bouncy = ContactParams { bounce: 1.5, friction: 0.9 };
        assert_eq!(
            solver_error(SolverConfig::new().with_contact(bouncy)),
            ClothError::InvalidArgument(InvalidArgument::Contact)
        );
        let floor = GroundPlane { height: f32::NAN, restitution: 0.4 };
        assert_eq!(
            solver_error(SolverConfig::new().with_ground(floor)),
            ClothError::InvalidArgument(InvalidArgument::Contact)
        );
    }

    #[test]
    fn validate_rejects_bad_wind_and_sweep() {
        let wind = WindParams { drag: -0.1, ..WindParams::default() };
        assert_eq!(
            ClothConfig::<f32>::new().with_wind(wind).validate().unwrap_err(),
            ClothError::InvalidArgument(InvalidArgument::Wind)
        );
        let still = WindParams { base_direction: crate::vec::Vec3::zero(), ..WindParams::default() };
        assert!(ClothConfig::<f32>::new().with_wind(still).validate().is_err());

        let sweep = SweepParams { range: 0.0, ..SweepParams::default() };
        assert_eq!(
            ClothConfig::<f32>::new().with_sweep(sweep).validate().unwrap_err(),
            ClothError::InvalidArgument(InvalidArgument::Sweep)
        );
    }

    #[test]
    fn clamp_to_range() {
        assert_eq!(clamp_to(-30.0f32, GRAVITY_RANGE), -20.0);
        assert_eq!(clamp_to(1.2f32, DAMPING_RANGE), 1.0);
        assert_eq!(clamp_to(3.0f64, TEAR_THRESHOLD_RANGE), 3.0);
    }
}
