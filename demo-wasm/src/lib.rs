use clothy::{ClothConfig, ClothSimulation, SimulationMode, Vec3};
use wasm_bindgen::prelude::*;

fn mode_from_index(index: u8) -> SimulationMode {
    match index {
        1 => SimulationMode::Collision,
        2 => SimulationMode::Flag,
        _ => SimulationMode::Tear,
    }
}

fn mode_index(mode: SimulationMode) -> u8 {
    match mode {
        SimulationMode::Tear => 0,
        SimulationMode::Collision => 1,
        SimulationMode::Flag => 2,
    }
}

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    sim: ClothSimulation<f32>,
}

#[wasm_bindgen]
impl ClothDemo {
    /// Build a `width` x `height` particle sheet, 4 x 4 world units.
    ///
    /// The page passes a seed (e.g. from `Date.now()`) since there is no OS
    /// entropy in the browser build.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, seed: u64) -> Result<ClothDemo, JsError> {
        let config = ClothConfig::new()
            .with_grid(width, height, 4.0, 4.0)
            .with_seed(seed);
        let sim = ClothSimulation::new(config)?;
        Ok(ClothDemo { sim })
    }

    /// 0 = tear, 1 = collision, 2 = flag. Unknown values select tear.
    pub fn set_mode(&mut self, mode: u8) {
        self.sim.set_mode(mode_from_index(mode));
    }

    pub fn mode(&self) -> u8 {
        mode_index(self.sim.mode())
    }

    pub fn reset(&mut self) {
        self.sim.reset();
    }

    pub fn update(&mut self, dt: f32) {
        self.sim.update(dt);
    }

    /// Pointer ray hit on the cloth; tears when `tearing` is set.
    pub fn pointer(&mut self, x: f32, y: f32, z: f32, tearing: bool) -> usize {
        self.sim.handle_pointer(Vec3::new(x, y, z), tearing)
    }

    /// Interleaved `[px, py, pz, nx, ny, nz, u, v]` per vertex.
    pub fn vertices(&self) -> Vec<f32> {
        self.sim.vertices().to_vec()
    }

    pub fn indices(&self) -> Vec<u32> {
        self.sim.indices().to_vec()
    }

    /// Flat `[cx, cy, cz, r, ...]` per sphere.
    pub fn colliders(&self) -> Vec<f32> {
        let colliders = self.sim.colliders();
        let mut out = Vec::with_capacity(colliders.len() * 4);
        for c in colliders {
            out.extend_from_slice(&[c.center.x, c.center.y, c.center.z, c.radius]);
        }
        out
    }

    pub fn vertex_count(&self) -> usize {
        self.sim.mesh().vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.sim.mesh().triangle_count()
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.sim.set_gravity(gravity);
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.sim.set_damping(damping);
    }

    pub fn set_wind_strength(&mut self, strength: f32) {
        self.sim.set_wind_strength(strength);
    }

    pub fn set_wind_direction(&mut self, x: f32, y: f32, z: f32) {
        self.sim.set_wind_direction(Vec3::new(x, y, z));
    }

    pub fn set_tear_threshold(&mut self, threshold: f32) {
        self.sim.set_tear_threshold(threshold);
    }

    pub fn gravity(&self) -> f32 {
        self.sim.gravity()
    }
    pub fn damping(&self) -> f32 {
        self.sim.damping()
    }
    pub fn wind_strength(&self) -> f32 {
        self.sim.wind_strength()
    }
    pub fn tear_threshold(&self) -> f32 {
        self.sim.tear_threshold()
    }
}
