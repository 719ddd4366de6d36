//! Cloth grid with structural, shear, and bend springs.

use crate::error::{ClothError, InvalidArgument};
use crate::float::Float;
use crate::particle::Particle;
use crate::spring::{Spring, SpringKind};
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Dimensions and material of a cloth grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig<F: Float> {
    /// Particles per row. At least 2.
    pub width: usize,
    /// Particles per column. At least 2.
    pub height: usize,
    /// World-space extent along X, centred on the origin.
    pub cloth_width: F,
    /// World-space extent along Y, from 0 upward.
    pub cloth_height: F,
    pub particle_mass: F,
    pub structural_stiffness: F,
    pub shear_stiffness: F,
    pub bend_stiffness: F,
}

impl<F: Float> GridConfig<F> {
    pub fn new(width: usize, height: usize, cloth_width: F, cloth_height: F) -> Self {
        GridConfig {
            width,
            height,
            cloth_width,
            cloth_height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        if self.width < 2 || self.height < 2 {
            return Err(InvalidArgument::GridDimensions {
                width: self.width,
                height: self.height,
            }
            .into());
        }
        let positive = |v: F| v.is_finite() && v > F::zero();
        if !positive(self.cloth_width) || !positive(self.cloth_height) {
            return Err(InvalidArgument::ClothDimensions.into());
        }
        if !positive(self.particle_mass) {
            return Err(InvalidArgument::Mass.into());
        }
        let unit = |v: F| positive(v) && v <= F::one();
        if !unit(self.structural_stiffness) || !unit(self.shear_stiffness) || !unit(self.bend_stiffness) {
            return Err(InvalidArgument::Stiffness.into());
        }
        Ok(())
    }
}

impl<F: Float> Default for GridConfig<F> {
    fn default() -> Self {
        GridConfig {
            width: 25,
            height: 25,
            cloth_width: F::from_f32(4.0),
            cloth_height: F::from_f32(4.0),
            particle_mass: F::one(),
            structural_stiffness: F::from_f32(0.7),
            shear_stiffness: F::from_f32(0.3),
            bend_stiffness: F::from_f32(0.15),
        }
    }
}

/// A cloth sheet: particles in row-major order plus the springs between them.
///
/// Particle `(x, y)` has index `y * width + x`. Row `height - 1` is the top
/// edge. Neither particles nor springs are ever removed, so indices stay
/// valid for the lifetime of the grid.
#[derive(Clone, Debug)]
pub struct ClothGrid<F: Float> {
    pub(crate) particles: AllocVec<Particle<F>>,
    pub(crate) springs: AllocVec<Spring<F>>,
    width: usize,
    height: usize,
}

impl<F: Float> ClothGrid<F> {
    /// Build an unpinned grid in the `z = 0` plane spanning
    /// `[-cloth_width/2, cloth_width/2] × [0, cloth_height]`.
    ///
    /// Every spring's rest length is the exact distance between its endpoints
    /// at construction, so the undeformed sheet is the rest state.
    pub fn new(config: &GridConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let width = config.width;
        let height = config.height;
        let mut particles = AllocVec::with_capacity(width * height);

        let last_col = F::from_usize(width - 1);
        let last_row = F::from_usize(height - 1);
        for y in 0..height {
            for x in 0..width {
                let px = F::from_usize(x) / last_col * config.cloth_width
                    - config.cloth_width * F::half();
                let py = F::from_usize(y) / last_row * config.cloth_height;
                particles.push(Particle::new(Vec3::new(px, py, F::zero()), config.particle_mass));
            }
        }

        let mut springs = AllocVec::new();
        let index = |x: usize, y: usize| y * width + x;
        let mut link = |a: usize, b: usize, stiffness: F, kind: SpringKind| {
            springs.push(Spring::from_particles(a, b, &particles, stiffness, kind));
        };

        for y in 0..height {
            for x in 0..width {
                let current = index(x, y);

                // Structural: right and up
                if x + 1 < width {
                    link(current, index(x + 1, y), config.structural_stiffness, SpringKind::Structural);
                }
                if y + 1 < height {
                    link(current, index(x, y + 1), config.structural_stiffness, SpringKind::Structural);
                }

                // Shear: both diagonals
                if x + 1 < width && y + 1 < height {
                    link(current, index(x + 1, y + 1), config.shear_stiffness, SpringKind::Shear);
                }
                if x > 0 && y + 1 < height {
                    link(current, index(x - 1, y + 1), config.shear_stiffness, SpringKind::Shear);
                }

                // Bend: skip-one horizontal and vertical
                if x + 2 < width {
                    link(current, index(x + 2, y), config.bend_stiffness, SpringKind::Bend);
                }
                if y + 2 < height {
                    link(current, index(x, y + 2), config.bend_stiffness, SpringKind::Bend);
                }
            }
        }

        Ok(ClothGrid { particles, springs, width, height })
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Inverse of [`index`](Self::index).
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    pub fn pin(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.particles[idx].pin();
    }

    pub fn unpin(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.particles[idx].unpin();
    }

    pub fn clear_pins(&mut self) {
        for p in self.particles.iter_mut() {
            p.unpin();
        }
    }

    pub fn pin_top_row(&mut self) {
        let top = self.height - 1;
        for x in 0..self.width {
            self.pin(x, top);
        }
    }

    pub fn pin_top_corners(&mut self) {
        let top = self.height - 1;
        self.pin(0, top);
        self.pin(self.width - 1, top);
    }

    /// Deactivate every active particle strictly within `radius` of `point`,
    /// together with every spring touching it. Returns how many particles were
    /// deactivated; a second call over the same region returns 0.
    pub fn tear_at(&mut self, point: Vec3<F>, radius: F) -> usize {
        let mut removed = 0;
        for i in 0..self.particles.len() {
            let p = &self.particles[i];
            if !p.active || p.pos.distance(point) >= radius {
                continue;
            }
            self.particles[i].deactivate();
            for spring in self.springs.iter_mut().filter(|s| s.touches(i)) {
                spring.active = false;
            }
            removed += 1;
        }
        removed
    }

    /// Indices of the springs with `index` as an endpoint.
    pub fn springs_touching(&self, index: usize) -> AllocVec<usize> {
        self.springs
            .iter()
            .enumerate()
            .filter(|(_, s)| s.touches(index))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    pub fn position_at(&self, x: usize, y: usize) -> Vec3<F> {
        self.particles[self.index(x, y)].pos
    }

    pub fn particle(&self, index: usize) -> &Particle<F> { &self.particles[index] }
    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn spring(&self, index: usize) -> &Spring<F> { &self.springs[index] }
    pub fn springs(&self) -> &[Spring<F>] { &self.springs }
    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }

    pub fn active_particle_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    pub fn active_spring_count(&self) -> usize {
        self.springs.iter().filter(|s| s.active).count()
    }

    pub fn torn_spring_count(&self) -> usize {
        self.spring_count() - self.active_spring_count()
    }

    pub fn pinned_count(&self) -> usize {
        self.particles.iter().filter(|p| p.pinned).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GridConfig<f32> {
        GridConfig::new(4, 3, 3.0, 2.0)
    }

    #[test]
    fn correct_particle_count() {
        let grid = ClothGrid::new(&test_config()).unwrap();
        assert_eq!(grid.particle_count(), 12); // 4 * 3
    }

    #[test]
    fn spring_count_by_kind() {
        let grid = ClothGrid::new(&test_config()).unwrap(); // 4 wide, 3 tall
        let count = |kind: SpringKind| grid.springs().iter().filter(|s| s.kind == kind).count();
        // Horizontal: (4-1)*3 = 9, vertical: 4*(3-1) = 8
        assert_eq!(count(SpringKind::Structural), 17);
        // (4-1)*(3-1)*2 = 12
        assert_eq!(count(SpringKind::Shear), 12);
        // Horizontal: (4-2)*3 = 6, vertical: 4*(3-2) = 4
        assert_eq!(count(SpringKind::Bend), 10);
        assert_eq!(grid.spring_count(), 39);
    }

    #[test]
    fn layout_spans_cloth_extent() {
        let grid = ClothGrid::new(&test_config()).unwrap();
        let bl = grid.position_at(0, 0);
        let tr = grid.position_at(3, 2);
        assert!((bl.x + 1.5).abs() < 1e-6 && bl.y.abs() < 1e-6);
        assert!((tr.x - 1.5).abs() < 1e-6 && (tr.y - 2.0).abs() < 1e-6);
        assert!(grid.particles().iter().all(|p| p.pos.z == 0.0));
    }

    #[test]
    fn stiffness_orders_by_kind() {
        let grid = ClothGrid::new(&test_config()).unwrap();
        let stiffness = |kind: SpringKind| grid.springs().iter().find(|s| s.kind == kind).unwrap().stiffness;
        assert!(stiffness(SpringKind::Structural) > stiffness(SpringKind::Shear));
        assert!(stiffness(SpringKind::Shear) > stiffness(SpringKind::Bend));
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let err = ClothGrid::new(&GridConfig::<f32>::new(1, 5, 1.0, 1.0)).unwrap_err();
        assert_eq!(err, ClothError::InvalidArgument(InvalidArgument::GridDimensions { width: 1, height: 5 }));
        assert!(ClothGrid::new(&GridConfig::<f32>::new(5, 5, 0.0, 1.0)).is_err());
        assert!(ClothGrid::new(&GridConfig::<f32>::new(5, 5, 1.0, f32::NAN)).is_err());
        let mut massless = GridConfig::<f32>::new(5, 5, 1.0, 1.0);
        massless.particle_mass = 0.0;
        assert_eq!(
            ClothGrid::new(&massless).unwrap_err(),
            ClothError::InvalidArgument(InvalidArgument::Mass)
        );
    }

    #[test]
    fn rejects_stiffness_outside_unit_interval() {
        let stiff = |set: fn(&mut GridConfig<f32>)| {
            let mut config = GridConfig::<f32>::new(5, 5, 1.0, 1.0);
            set(&mut config);
            ClothGrid::new(&config).unwrap_err()
        };
        let expected = ClothError::InvalidArgument(InvalidArgument::Stiffness);
        assert_eq!(stiff(|c| c.structural_stiffness = 1.5), expected);
        assert_eq!(stiff(|c| c.shear_stiffness = 0.0), expected);
        assert_eq!(stiff(|c| c.bend_stiffness = f32::NAN), expected);

        let mut rigid = GridConfig::<f32>::new(5, 5, 1.0, 1.0);
        rigid.structural_stiffness = 1.0;
        assert!(ClothGrid::new(&rigid).is_ok());
    }

    #[test]
    fn coords_inverts_index() {
        let grid = ClothGrid::new(&test_config()).unwrap();
        for i in 0..grid.particle_count() {
            let (x, y) = grid.coords(i);
            assert_eq!(grid.index(x, y), i);
        }
    }

    #[test]
    fn pin_patterns() {
        let mut grid = ClothGrid::new(&test_config()).unwrap();
        assert_eq!(grid.pinned_count(), 0);
        grid.pin_top_row();
        assert_eq!(grid.pinned_count(), 4);
        assert!((0..4).all(|x| grid.particle(grid.index(x, 2)).pinned));
        grid.clear_pins();
        grid.pin_top_corners();
        assert_eq!(grid.pinned_count(), 2);
        assert!(grid.particle(grid.index(0, 2)).pinned);
        assert!(grid.particle(grid.index(3, 2)).pinned);
    }

    #[test]
    fn tear_at_deactivates_particle_and_springs() {
        let mut grid = ClothGrid::new(&test_config()).unwrap();
        let target = grid.index(1, 1);
        let point = grid.position_at(1, 1);
        assert_eq!(grid.tear_at(point, 0.1), 1);
        assert!(!grid.particle(target).active);
        for s in grid.springs_touching(target) {
            assert!(!grid.spring(s).active);
        }
        assert_eq!(grid.tear_at(point, 0.1), 0, "tearing is idempotent");
    }
}
