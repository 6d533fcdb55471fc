use wasm_bindgen::prelude::*;

use crate::core::Vec2;
use crate::domain::error::PhysicsError;
use crate::rigid_body::{BodyHandle, RigidBody};

use super::commands::{
    DEFAULT_BODY_MASS, DEFAULT_BOX_SIZE, DEFAULT_CIRCLE_RADIUS, DEFAULT_PENDULUM_BOB_MASS,
    DEFAULT_PENDULUM_LENGTH, DEFAULT_PENDULUM_PIVOT, DEFAULT_SOFT_BODY_MASS,
    DEFAULT_SOFT_BODY_ORIGIN, DEFAULT_SOFT_BODY_SIDE, DEFAULT_SOFT_BODY_SPACING, DEFAULT_SPAWN,
    DEFAULT_SPRING_ANCHORS,
};
use super::perf_stats::PerfStats;
use super::WorldCore;

fn to_js(err: PhysicsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Ids created by `addSpring`
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct SpringSpawnIds {
    spring: u32,
    anchor1: u32,
    anchor2: u32,
}

#[wasm_bindgen]
impl SpringSpawnIds {
    #[wasm_bindgen(getter)]
    pub fn spring(&self) -> u32 { self.spring }
    #[wasm_bindgen(getter)]
    pub fn anchor1(&self) -> u32 { self.anchor1 }
    #[wasm_bindgen(getter)]
    pub fn anchor2(&self) -> u32 { self.anchor2 }
}

/// Ids created by `addPendulum`
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct PendulumSpawn {
    anchor: u32,
    bob: u32,
    spring: u32,
}

#[wasm_bindgen]
impl PendulumSpawn {
    #[wasm_bindgen(getter)]
    pub fn anchor(&self) -> u32 { self.anchor }
    #[wasm_bindgen(getter)]
    pub fn bob(&self) -> u32 { self.bob }
    #[wasm_bindgen(getter)]
    pub fn spring(&self) -> u32 { self.spring }
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

impl World {
    fn handle(&self, id: u32) -> Result<BodyHandle, JsValue> {
        self.core.bodies().handle(id).map_err(to_js)
    }

    fn body_field(&self, id: u32, f: impl FnOnce(&RigidBody) -> f32) -> Result<f32, JsValue> {
        let handle = self.handle(id)?;
        self.core.body(handle).map(f).map_err(to_js)
    }

    /// Direct access for native hosts and tests
    pub fn core(&self) -> &WorldCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut WorldCore {
        &mut self.core
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl World {
    /// Create an empty world with default parameters
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: WorldCore::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter, js_name = bodyCount)]
    pub fn body_count(&self) -> usize { self.core.body_count() }

    #[wasm_bindgen(getter, js_name = springCount)]
    pub fn spring_count(&self) -> usize { self.core.spring_count() }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === PARAMETERS ===

    #[wasm_bindgen(js_name = setParameter)]
    pub fn set_parameter(&mut self, name: &str, value: f32) -> Result<(), JsValue> {
        self.core.set_parameter(name, value).map_err(to_js)
    }

    #[wasm_bindgen(js_name = getParameter)]
    pub fn get_parameter(&self, name: &str) -> Result<f32, JsValue> {
        self.core.get_parameter(name).map_err(to_js)
    }

    #[wasm_bindgen(js_name = paramsJson)]
    pub fn params_json(&self) -> String {
        self.core.params_json()
    }

    #[wasm_bindgen(js_name = loadParamsJson)]
    pub fn load_params_json(&mut self, json: String) -> Result<(), JsValue> {
        self.core.load_params_json(&json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = setBounds)]
    pub fn set_bounds(&mut self, left: f32, right: f32, bottom: f32, top: f32) -> Result<(), JsValue> {
        self.core.set_bounds(left, right, bottom, top).map_err(to_js)
    }

    // === BODIES & SPRINGS ===

    /// Returns the body id. Omitted arguments use the host defaults.
    #[wasm_bindgen(js_name = addCircle)]
    pub fn add_circle(
        &mut self,
        x: Option<f32>,
        y: Option<f32>,
        radius: Option<f32>,
        mass: Option<f32>,
    ) -> Result<u32, JsValue> {
        let pos = Vec2::new(x.unwrap_or(DEFAULT_SPAWN.x), y.unwrap_or(DEFAULT_SPAWN.y));
        self.core
            .add_circle(pos, radius.unwrap_or(DEFAULT_CIRCLE_RADIUS), mass.unwrap_or(DEFAULT_BODY_MASS))
            .map(|h| h.id())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = addRectangle)]
    pub fn add_rectangle(
        &mut self,
        x: Option<f32>,
        y: Option<f32>,
        width: Option<f32>,
        height: Option<f32>,
        mass: Option<f32>,
    ) -> Result<u32, JsValue> {
        let pos = Vec2::new(x.unwrap_or(DEFAULT_SPAWN.x), y.unwrap_or(DEFAULT_SPAWN.y));
        self.core
            .add_rectangle(
                pos,
                width.unwrap_or(DEFAULT_BOX_SIZE),
                height.unwrap_or(DEFAULT_BOX_SIZE),
                mass.unwrap_or(DEFAULT_BODY_MASS),
            )
            .map(|h| h.id())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = addStaticRectangle)]
    pub fn add_static_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<u32, JsValue> {
        self.core
            .add_static_rectangle(Vec2::new(x, y), width, height)
            .map(|h| h.id())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = addSpring)]
    pub fn add_spring(
        &mut self,
        x1: Option<f32>,
        y1: Option<f32>,
        x2: Option<f32>,
        y2: Option<f32>,
        rest_length: Option<f32>,
        stiffness: Option<f32>,
    ) -> Result<SpringSpawnIds, JsValue> {
        let [d1, d2] = DEFAULT_SPRING_ANCHORS;
        let p1 = Vec2::new(x1.unwrap_or(d1.x), y1.unwrap_or(d1.y));
        let p2 = Vec2::new(x2.unwrap_or(d2.x), y2.unwrap_or(d2.y));
        let spawn = self
            .core
            .add_spring(p1, p2, rest_length, stiffness)
            .map_err(to_js)?;
        Ok(SpringSpawnIds {
            spring: spawn.spring.id(),
            anchor1: spawn.anchor1.id(),
            anchor2: spawn.anchor2.id(),
        })
    }

    /// Spring between two existing bodies; returns the spring id
    pub fn connect(
        &mut self,
        a: u32,
        b: u32,
        rest_length: Option<f32>,
        stiffness: Option<f32>,
    ) -> Result<u32, JsValue> {
        let (a, b) = (self.handle(a)?, self.handle(b)?);
        self.core
            .connect(a, b, rest_length, stiffness)
            .map(|h| h.id())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = addPendulum)]
    pub fn add_pendulum(
        &mut self,
        x: Option<f32>,
        y: Option<f32>,
        length: Option<f32>,
        bob_mass: Option<f32>,
    ) -> Result<PendulumSpawn, JsValue> {
        let pivot = Vec2::new(
            x.unwrap_or(DEFAULT_PENDULUM_PIVOT.x),
            y.unwrap_or(DEFAULT_PENDULUM_PIVOT.y),
        );
        let p = self
            .core
            .add_pendulum(
                pivot,
                length.unwrap_or(DEFAULT_PENDULUM_LENGTH),
                bob_mass.unwrap_or(DEFAULT_PENDULUM_BOB_MASS),
            )
            .map_err(to_js)?;
        Ok(PendulumSpawn {
            anchor: p.anchor.id(),
            bob: p.bob.id(),
            spring: p.spring.id(),
        })
    }

    /// Returns the ids of the hanging links, top to bottom
    #[wasm_bindgen(js_name = addSpringChain)]
    pub fn add_spring_chain(
        &mut self,
        x: f32,
        y: f32,
        links: u32,
        link_length: f32,
        link_mass: f32,
    ) -> Result<Vec<u32>, JsValue> {
        let chain = self
            .core
            .add_spring_chain(Vec2::new(x, y), links, link_length, link_mass)
            .map_err(to_js)?;
        Ok(chain.links.iter().map(|h| h.id()).collect())
    }

    /// Soft body lattice. Returns JSON with `cols`, `rows`, row-major
    /// `particles` ids and `springs` ids.
    #[wasm_bindgen(js_name = addSoftBody)]
    #[allow(clippy::too_many_arguments)]
    pub fn add_soft_body(
        &mut self,
        x: Option<f32>,
        y: Option<f32>,
        cols: Option<u32>,
        rows: Option<u32>,
        spacing: Option<f32>,
        mass: Option<f32>,
        stiffness: Option<f32>,
    ) -> Result<String, JsValue> {
        let origin = Vec2::new(
            x.unwrap_or(DEFAULT_SOFT_BODY_ORIGIN.x),
            y.unwrap_or(DEFAULT_SOFT_BODY_ORIGIN.y),
        );
        let soft = self
            .core
            .add_soft_body(
                origin,
                cols.unwrap_or(DEFAULT_SOFT_BODY_SIDE),
                rows.unwrap_or(DEFAULT_SOFT_BODY_SIDE),
                spacing.unwrap_or(DEFAULT_SOFT_BODY_SPACING),
                mass.unwrap_or(DEFAULT_SOFT_BODY_MASS),
                stiffness,
            )
            .map_err(to_js)?;
        Ok(soft.to_json())
    }

    #[wasm_bindgen(js_name = populateDemoScene)]
    pub fn populate_demo_scene(&mut self) -> Result<(), JsValue> {
        self.core.populate_demo_scene().map_err(to_js)
    }

    /// Remove every body and spring
    pub fn reset(&mut self) {
        self.core.reset();
    }

    #[wasm_bindgen(js_name = setStatic)]
    pub fn set_static(&mut self, id: u32, is_static: bool) -> Result<(), JsValue> {
        let handle = self.handle(id)?;
        self.core.set_static(handle, is_static).map_err(to_js)
    }

    /// Drag interaction: place the body and zero its velocity
    #[wasm_bindgen(js_name = dragBody)]
    pub fn drag_body(&mut self, id: u32, x: f32, y: f32) -> Result<(), JsValue> {
        let handle = self.handle(id)?;
        self.core.drag_body(handle, Vec2::new(x, y)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = applyImpulse)]
    pub fn apply_impulse(&mut self, id: u32, jx: f32, jy: f32) -> Result<(), JsValue> {
        let handle = self.handle(id)?;
        self.core.apply_impulse(handle, Vec2::new(jx, jy)).map_err(to_js)
    }

    // === STEPPING ===

    /// Advance by `dt` seconds (clamped to maxDt)
    pub fn step(&mut self, dt: f32) {
        self.core.step(dt);
    }

    /// Advance from a `requestAnimationFrame` timestamp; returns the dt used
    #[wasm_bindgen(js_name = stepFrame)]
    pub fn step_frame(&mut self, now_ms: f64) -> f32 {
        self.core.step_frame(now_ms)
    }

    // === READ ACCESSORS ===

    #[wasm_bindgen(js_name = bodyX)]
    pub fn body_x(&self, id: u32) -> Result<f32, JsValue> {
        self.body_field(id, |b| b.pos.x)
    }

    #[wasm_bindgen(js_name = bodyY)]
    pub fn body_y(&self, id: u32) -> Result<f32, JsValue> {
        self.body_field(id, |b| b.pos.y)
    }

    #[wasm_bindgen(js_name = bodyAngle)]
    pub fn body_angle(&self, id: u32) -> Result<f32, JsValue> {
        self.body_field(id, |b| b.angle)
    }

    #[wasm_bindgen(js_name = bodyVx)]
    pub fn body_vx(&self, id: u32) -> Result<f32, JsValue> {
        self.body_field(id, |b| b.velocity.x)
    }

    #[wasm_bindgen(js_name = bodyVy)]
    pub fn body_vy(&self, id: u32) -> Result<f32, JsValue> {
        self.body_field(id, |b| b.velocity.y)
    }

    /// `[x1, y1, x2, y2]` as of the last step
    #[wasm_bindgen(js_name = springEndpoints)]
    pub fn spring_endpoints(&self, id: u32) -> Result<Vec<f32>, JsValue> {
        let handle = self.core.springs().handle(id).map_err(to_js)?;
        let [p1, p2] = self.core.spring(handle).map_err(to_js)?.endpoints;
        Ok(vec![p1.x, p1.y, p2.x, p2.y])
    }

    // === RENDER EXTRACTION ===

    /// Pack all bodies (`BODY_STRIDE` floats each) and return the pointer
    #[wasm_bindgen(js_name = extractBodies)]
    pub fn extract_bodies(&mut self) -> *const f32 {
        self.core.extract_bodies()
    }

    #[wasm_bindgen(js_name = bodiesLen)]
    pub fn bodies_len(&self) -> usize {
        self.core.bodies_len()
    }

    #[wasm_bindgen(js_name = extractSprings)]
    pub fn extract_springs(&mut self) -> *const f32 {
        self.core.extract_springs()
    }

    #[wasm_bindgen(js_name = springsLen)]
    pub fn springs_len(&self) -> usize {
        self.core.springs_len()
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.core.snapshot_json()
    }
}
