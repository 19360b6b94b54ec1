//! The seam between the filter's logic and the host's graphics subsystem.
//!
//! The plugin implements [`FilterHost`] over libobs; tests implement it with a
//! recording fake. Handles are owned values: the filter hands them back to
//! the device to destroy them, so a freed handle cannot be used again.

use std::ops::{Deref, DerefMut};

use crate::params::KeyUniforms;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Subset of the host's source output flags that affect how a source is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceFlags(u32);

impl SourceFlags {
    pub const NONE: Self = Self(0);
    pub const CUSTOM_DRAW: Self = Self(1 << 0);
    pub const ASYNC: Self = Self(1 << 1);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for SourceFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Snapshot of the upstream source the filter draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedSource {
    pub extent: Extent,
    pub flags: SourceFlags,
    /// The target is also the filter's parent, i.e. the filter is first in
    /// its chain.
    pub is_parent: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderPath {
    /// Bare draw of the source's own texture.
    Default,
    /// Full video render, running the source's filter chain.
    Video,
}

impl RenderPath {
    pub fn for_source(source: &TrackedSource) -> Self {
        let custom_draw = source.flags.contains(SourceFlags::CUSTOM_DRAW);
        let is_async = source.flags.contains(SourceFlags::ASYNC);
        if source.is_parent && !custom_draw && !is_async {
            RenderPath::Default
        } else {
            RenderPath::Video
        }
    }
}

/// Resource creation and destruction. All four resource calls must be made
/// between `enter_graphics` and `leave_graphics`; use [`GraphicsScope`].
pub trait GraphicsDevice {
    type RenderTarget;
    type Texture;

    fn enter_graphics(&mut self);
    fn leave_graphics(&mut self);

    /// RGBA colour target without depth/stencil. `None` on allocation failure.
    fn create_render_target(&mut self) -> Option<Self::RenderTarget>;
    /// Dynamic RGBA texture. `None` on allocation failure.
    fn create_texture(&mut self, extent: Extent) -> Option<Self::Texture>;

    fn destroy_render_target(&mut self, target: Self::RenderTarget);
    fn destroy_texture(&mut self, texture: Self::Texture);
}

/// Per-frame host protocol. Callers are already inside the host's render
/// callback, which holds the graphics context.
pub trait FilterHost: GraphicsDevice {
    fn tracked_source(&self) -> Option<TrackedSource>;

    /// Renders the tracked source into `target`, replacing its contents.
    /// Returns `false` if the target could not be bound.
    fn render_source_into(
        &mut self,
        target: &Self::RenderTarget,
        extent: Extent,
        path: RenderPath,
    ) -> bool;

    /// Draws the contents of `target` to the current output.
    fn draw_render_target(&mut self, target: &Self::RenderTarget, extent: Extent) -> bool;

    /// Runs the key effect over the filter input with `plate` as background.
    /// Returns `false` if the host declined to start the filter pass.
    fn draw_keyed(&mut self, plate: &Self::RenderTarget, uniforms: &KeyUniforms) -> bool;

    /// Lets the input pass through this filter unmodified.
    fn skip_filter(&mut self);
}

/// Holds the graphics context for as long as it lives.
pub struct GraphicsScope<'a, D: GraphicsDevice + ?Sized> {
    device: &'a mut D,
}

impl<'a, D: GraphicsDevice + ?Sized> GraphicsScope<'a, D> {
    pub fn enter(device: &'a mut D) -> Self {
        device.enter_graphics();
        Self { device }
    }
}

impl<D: GraphicsDevice + ?Sized> Deref for GraphicsScope<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.device
    }
}

impl<D: GraphicsDevice + ?Sized> DerefMut for GraphicsScope<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.device
    }
}

impl<D: GraphicsDevice + ?Sized> Drop for GraphicsScope<'_, D> {
    fn drop(&mut self) {
        self.device.leave_graphics();
    }
}
