//! Recording [`FilterHost`] used by the unit tests.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::host::{Extent, FilterHost, GraphicsDevice, RenderPath, TrackedSource};
use crate::params::KeyUniforms;

#[derive(Debug)]
pub(crate) struct FakeTarget(u32);

#[derive(Debug)]
pub(crate) struct FakeTexture(u32);

#[derive(Clone, Debug, Default)]
pub(crate) struct HostLog {
    pub enters: u32,
    pub leaves: u32,
    pub depth: i32,
    /// Resource calls made without holding the graphics context.
    pub unscoped_calls: u32,

    pub targets_created: u32,
    pub targets_destroyed: u32,
    pub textures_created: u32,
    pub textures_destroyed: u32,
    pub texture_extents: Vec<Extent>,

    pub source_renders: Vec<(Extent, RenderPath)>,
    pub plate_draws: Vec<Extent>,
    pub keyed: Vec<KeyUniforms>,
    pub skips: u32,
}

impl HostLog {
    pub fn live_targets(&self) -> u32 {
        self.targets_created - self.targets_destroyed
    }

    pub fn live_textures(&self) -> u32 {
        self.textures_created - self.textures_destroyed
    }
}

#[derive(Default)]
struct FakeState {
    log: HostLog,
    next_id: u32,
    live: BTreeSet<u32>,
    source: Option<TrackedSource>,

    fail_render_target_alloc: bool,
    fail_texture_alloc: bool,
    fail_bind: bool,
    fail_plate_draw: bool,
    decline_filter: bool,
}

impl FakeState {
    fn resource_call(&mut self) {
        if self.log.depth <= 0 {
            self.log.unscoped_calls += 1;
        }
    }

    fn alloc_id(&mut self) -> u32 {
        self.next_id += 1;
        self.live.insert(self.next_id);
        self.next_id
    }

    fn release_id(&mut self, id: u32) {
        assert!(self.live.remove(&id), "handle {id} destroyed twice");
    }

    fn assert_live(&self, id: u32) {
        assert!(self.live.contains(&id), "handle {id} used after free");
    }
}

/// Clones share state, so a test can keep one clone after moving another
/// into a filter.
#[derive(Clone, Default)]
pub(crate) struct FakeHost {
    state: Rc<RefCell<FakeState>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(width: u32, height: u32) -> Self {
        let host = Self::new();
        host.set_extent(width, height);
        host
    }

    pub fn log(&self) -> HostLog {
        self.state.borrow().log.clone()
    }

    pub fn set_source(&self, source: Option<TrackedSource>) {
        self.state.borrow_mut().source = source;
    }

    pub fn set_extent(&self, width: u32, height: u32) {
        let mut state = self.state.borrow_mut();
        let flags = state.source.map(|s| s.flags).unwrap_or_default();
        let is_parent = state.source.map(|s| s.is_parent).unwrap_or(true);
        state.source = Some(TrackedSource {
            extent: Extent::new(width, height),
            flags,
            is_parent,
        });
    }

    pub fn fail_render_target_alloc(&self, fail: bool) {
        self.state.borrow_mut().fail_render_target_alloc = fail;
    }

    pub fn fail_texture_alloc(&self, fail: bool) {
        self.state.borrow_mut().fail_texture_alloc = fail;
    }

    pub fn fail_bind(&self, fail: bool) {
        self.state.borrow_mut().fail_bind = fail;
    }

    pub fn fail_plate_draw(&self, fail: bool) {
        self.state.borrow_mut().fail_plate_draw = fail;
    }

    pub fn decline_filter(&self, decline: bool) {
        self.state.borrow_mut().decline_filter = decline;
    }
}

impl GraphicsDevice for FakeHost {
    type RenderTarget = FakeTarget;
    type Texture = FakeTexture;

    fn enter_graphics(&mut self) {
        let mut state = self.state.borrow_mut();
        state.log.enters += 1;
        state.log.depth += 1;
    }

    fn leave_graphics(&mut self) {
        let mut state = self.state.borrow_mut();
        state.log.leaves += 1;
        state.log.depth -= 1;
        assert!(state.log.depth >= 0, "leave_graphics without enter");
    }

    fn create_render_target(&mut self) -> Option<FakeTarget> {
        let mut state = self.state.borrow_mut();
        state.resource_call();
        if state.fail_render_target_alloc {
            return None;
        }
        state.log.targets_created += 1;
        Some(FakeTarget(state.alloc_id()))
    }

    fn create_texture(&mut self, extent: Extent) -> Option<FakeTexture> {
        let mut state = self.state.borrow_mut();
        state.resource_call();
        if state.fail_texture_alloc {
            return None;
        }
        state.log.textures_created += 1;
        state.log.texture_extents.push(extent);
        Some(FakeTexture(state.alloc_id()))
    }

    fn destroy_render_target(&mut self, target: FakeTarget) {
        let mut state = self.state.borrow_mut();
        state.resource_call();
        state.release_id(target.0);
        state.log.targets_destroyed += 1;
    }

    fn destroy_texture(&mut self, texture: FakeTexture) {
        let mut state = self.state.borrow_mut();
        state.resource_call();
        state.release_id(texture.0);
        state.log.textures_destroyed += 1;
    }
}

impl FilterHost for FakeHost {
    fn tracked_source(&self) -> Option<TrackedSource> {
        self.state.borrow().source
    }

    fn render_source_into(&mut self, target: &FakeTarget, extent: Extent, path: RenderPath) -> bool {
        let mut state = self.state.borrow_mut();
        state.assert_live(target.0);
        if state.fail_bind {
            return false;
        }
        state.log.source_renders.push((extent, path));
        true
    }

    fn draw_render_target(&mut self, target: &FakeTarget, extent: Extent) -> bool {
        let mut state = self.state.borrow_mut();
        state.assert_live(target.0);
        if state.fail_plate_draw {
            return false;
        }
        state.log.plate_draws.push(extent);
        true
    }

    fn draw_keyed(&mut self, plate: &FakeTarget, uniforms: &KeyUniforms) -> bool {
        let mut state = self.state.borrow_mut();
        state.assert_live(plate.0);
        if state.decline_filter {
            return false;
        }
        state.log.keyed.push(*uniforms);
        true
    }

    fn skip_filter(&mut self) {
        self.state.borrow_mut().log.skips += 1;
    }
}
