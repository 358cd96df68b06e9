use wasm_bindgen::prelude::*;

/// Snapshot of the last tick's cost. All zeros while metrics are disabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(crate) tick_ms: f64,
    pub(crate) handlers_ms: f64,
    pub(crate) integrate_ms: f64,

    pub(crate) handlers_invoked: u32,
    pub(crate) handlers_pruned: u32,
    pub(crate) handlers_added: u32,
    pub(crate) bodies_integrated: u32,
    pub(crate) bodies_pruned: u32,

    pub(crate) narrow_phase_tests: u32,
    pub(crate) broad_phase_rejects: u32,
    pub(crate) collision_events: u32,

    pub(crate) body_count: u32,
    pub(crate) handler_count: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn handlers_ms(&self) -> f64 { self.handlers_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn handlers_invoked(&self) -> u32 { self.handlers_invoked }
    #[wasm_bindgen(getter)]
    pub fn handlers_pruned(&self) -> u32 { self.handlers_pruned }
    #[wasm_bindgen(getter)]
    pub fn handlers_added(&self) -> u32 { self.handlers_added }
    #[wasm_bindgen(getter)]
    pub fn bodies_integrated(&self) -> u32 { self.bodies_integrated }
    #[wasm_bindgen(getter)]
    pub fn bodies_pruned(&self) -> u32 { self.bodies_pruned }
    #[wasm_bindgen(getter)]
    pub fn narrow_phase_tests(&self) -> u32 { self.narrow_phase_tests }
    #[wasm_bindgen(getter)]
    pub fn broad_phase_rejects(&self) -> u32 { self.broad_phase_rejects }
    #[wasm_bindgen(getter)]
    pub fn collision_events(&self) -> u32 { self.collision_events }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn handler_count(&self) -> u32 { self.handler_count }
}
