use wasm_bindgen::prelude::*;

/// Last-step timings and counters. All zeros while perf metrics are off.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) forces_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) collisions_ms: f64,
    pub(super) pairs_tested: u32,
    pub(super) contacts: u32,
    pub(super) impulses: u32,
    pub(super) springs_skipped: u32,
    pub(super) wall_contacts: u32,
    pub(super) bodies: u32,
    pub(super) springs: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn forces_ms(&self) -> f64 { self.forces_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn collisions_ms(&self) -> f64 { self.collisions_ms }
    #[wasm_bindgen(getter)]
    pub fn pairs_tested(&self) -> u32 { self.pairs_tested }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn impulses(&self) -> u32 { self.impulses }
    #[wasm_bindgen(getter)]
    pub fn springs_skipped(&self) -> u32 { self.springs_skipped }
    #[wasm_bindgen(getter)]
    pub fn wall_contacts(&self) -> u32 { self.wall_contacts }
    #[wasm_bindgen(getter)]
    pub fn bodies(&self) -> u32 { self.bodies }
    #[wasm_bindgen(getter)]
    pub fn springs(&self) -> u32 { self.springs }
}
