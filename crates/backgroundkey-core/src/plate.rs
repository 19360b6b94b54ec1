//! Offscreen buffers holding the captured background plate.

use crate::host::{Extent, GraphicsDevice, GraphicsScope, TrackedSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeCheck {
    /// No tracked source, or it reports a zero dimension. Skip the frame.
    Invalid,
    /// Buffers already match the source.
    Unchanged,
    /// Buffers were (re)created at the source's extent.
    Reallocated,
    /// The device could not create the buffers. Skip the frame and retry on
    /// the next check.
    AllocationFailed,
}

impl SizeCheck {
    pub fn is_ready(self) -> bool {
        matches!(self, SizeCheck::Unchanged | SizeCheck::Reallocated)
    }
}

struct PlateBuffers<D: GraphicsDevice> {
    target: D::RenderTarget,
    // CPU-mappable mirror of the plate. Allocated and freed with the target,
    // never sampled.
    texture: D::Texture,
}

pub struct BackgroundPlate<D: GraphicsDevice> {
    buffers: Option<PlateBuffers<D>>,
    extent: Extent,
    valid: bool,
    captured: bool,
}

impl<D: GraphicsDevice> Default for BackgroundPlate<D> {
    fn default() -> Self {
        Self {
            buffers: None,
            extent: Extent::default(),
            valid: false,
            captured: false,
        }
    }
}

impl<D: GraphicsDevice> BackgroundPlate<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the buffers sized to `source`. The pair is always freed and
    /// created together.
    pub fn check_size(&mut self, device: &mut D, source: Option<TrackedSource>) -> SizeCheck {
        let Some(source) = source else {
            self.valid = false;
            return SizeCheck::Invalid;
        };
        let extent = source.extent;
        if extent.is_empty() {
            self.valid = false;
            return SizeCheck::Invalid;
        }
        self.valid = true;

        if self.buffers.is_some() && extent == self.extent {
            return SizeCheck::Unchanged;
        }

        let mut gfx = GraphicsScope::enter(device);
        if let Some(old) = self.buffers.take() {
            release(&mut gfx, old);
        }
        self.captured = false;
        self.extent = Extent::default();

        let target = gfx.create_render_target();
        let texture = gfx.create_texture(extent);
        match (target, texture) {
            (Some(target), Some(texture)) => {
                self.buffers = Some(PlateBuffers { target, texture });
                self.extent = extent;
                tracing::info!(width = extent.width, height = extent.height, "background plate allocated");
                SizeCheck::Reallocated
            }
            (target, texture) => {
                if let Some(target) = target {
                    gfx.destroy_render_target(target);
                }
                if let Some(texture) = texture {
                    gfx.destroy_texture(texture);
                }
                tracing::warn!(
                    width = extent.width,
                    height = extent.height,
                    "failed to allocate background plate"
                );
                SizeCheck::AllocationFailed
            }
        }
    }

    pub fn free(&mut self, device: &mut D) {
        let Some(buffers) = self.buffers.take() else {
            return;
        };
        let mut gfx = GraphicsScope::enter(device);
        release(&mut gfx, buffers);
        self.extent = Extent::default();
        self.captured = false;
    }

    pub fn target(&self) -> Option<&D::RenderTarget> {
        self.buffers.as_ref().map(|b| &b.target)
    }

    /// Extent of the allocated buffers; empty when nothing is allocated.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Result of the most recent size check on the tracked source.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_allocated(&self) -> bool {
        self.buffers.is_some()
    }

    /// The buffers hold a rendered frame of the source.
    pub fn is_captured(&self) -> bool {
        self.captured && self.buffers.is_some()
    }

    pub fn mark_captured(&mut self) {
        if self.buffers.is_some() {
            self.captured = true;
        }
    }
}

fn release<D: GraphicsDevice>(gfx: &mut GraphicsScope<'_, D>, buffers: PlateBuffers<D>) {
    gfx.destroy_render_target(buffers.target);
    gfx.destroy_texture(buffers.texture);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FilterHost, SourceFlags};
    use crate::testing::FakeHost;

    fn check(plate: &mut BackgroundPlate<FakeHost>, host: &mut FakeHost) -> SizeCheck {
        let source = host.tracked_source();
        plate.check_size(host, source)
    }

    #[test]
    fn first_check_allocates_at_source_size() {
        let mut host = FakeHost::with_source(1280, 720);
        let mut plate = BackgroundPlate::new();

        assert_eq!(check(&mut plate, &mut host), SizeCheck::Reallocated);
        let log = host.log();
        assert_eq!(log.targets_created, 1);
        assert_eq!(log.textures_created, 1);
        assert_eq!(log.texture_extents, vec![Extent::new(1280, 720)]);
        assert_eq!(plate.extent(), Extent::new(1280, 720));
        assert!(plate.is_valid());
        assert!(!plate.is_captured());
        assert_eq!(log.unscoped_calls, 0);
        assert_eq!(log.depth, 0);
    }

    #[test]
    fn unchanged_size_does_not_reallocate() {
        let mut host = FakeHost::with_source(1920, 1080);
        let mut plate = BackgroundPlate::new();

        check(&mut plate, &mut host);
        let before = host.log();
        assert_eq!(check(&mut plate, &mut host), SizeCheck::Unchanged);
        let after = host.log();

        assert_eq!(after.targets_created, before.targets_created);
        assert_eq!(after.textures_created, before.textures_created);
        assert_eq!(after.enters, before.enters);
    }

    #[test]
    fn resize_frees_once_and_allocates_new_size() {
        let mut host = FakeHost::with_source(1920, 1080);
        let mut plate = BackgroundPlate::new();
        check(&mut plate, &mut host);

        host.set_extent(1280, 720);
        assert_eq!(check(&mut plate, &mut host), SizeCheck::Reallocated);

        let log = host.log();
        assert_eq!(log.targets_destroyed, 1);
        assert_eq!(log.textures_destroyed, 1);
        assert_eq!(log.targets_created, 2);
        assert_eq!(log.textures_created, 2);
        assert_eq!(log.live_targets(), 1);
        assert_eq!(log.live_textures(), 1);
        assert_eq!(log.texture_extents.last(), Some(&Extent::new(1280, 720)));
        assert_eq!(plate.extent(), Extent::new(1280, 720));
        assert_eq!(log.unscoped_calls, 0);
    }

    #[test]
    fn resize_drops_captured_frame() {
        let mut host = FakeHost::with_source(640, 480);
        let mut plate = BackgroundPlate::new();
        check(&mut plate, &mut host);
        plate.mark_captured();
        assert!(plate.is_captured());

        host.set_extent(800, 600);
        check(&mut plate, &mut host);
        assert!(!plate.is_captured());
    }

    #[test]
    fn zero_width_is_invalid_without_touching_the_device() {
        let mut host = FakeHost::with_source(0, 1080);
        let mut plate = BackgroundPlate::new();

        assert_eq!(check(&mut plate, &mut host), SizeCheck::Invalid);
        assert!(!plate.is_valid());
        let log = host.log();
        assert_eq!(log.enters, 0);
        assert_eq!(log.targets_created, 0);
        assert_eq!(log.textures_created, 0);
    }

    #[test]
    fn missing_source_is_invalid() {
        let mut host = FakeHost::new();
        let mut plate = BackgroundPlate::new();
        assert_eq!(check(&mut plate, &mut host), SizeCheck::Invalid);
        assert_eq!(host.log().enters, 0);
    }

    #[test]
    fn invalid_geometry_keeps_existing_buffers() {
        let mut host = FakeHost::with_source(640, 480);
        let mut plate = BackgroundPlate::new();
        check(&mut plate, &mut host);

        host.set_extent(640, 0);
        assert_eq!(check(&mut plate, &mut host), SizeCheck::Invalid);
        assert!(plate.is_allocated());
        assert_eq!(host.log().targets_destroyed, 0);

        host.set_extent(640, 480);
        assert_eq!(check(&mut plate, &mut host), SizeCheck::Unchanged);
        assert!(plate.is_valid());
    }

    #[test]
    fn partial_allocation_is_rolled_back_and_retried() {
        let mut host = FakeHost::with_source(640, 480);
        let mut plate = BackgroundPlate::new();

        host.fail_texture_alloc(true);
        assert_eq!(check(&mut plate, &mut host), SizeCheck::AllocationFailed);
        assert!(plate.target().is_none());
        let log = host.log();
        assert_eq!(log.targets_created, 1);
        assert_eq!(log.targets_destroyed, 1);
        assert_eq!(log.depth, 0);

        host.fail_texture_alloc(false);
        assert_eq!(check(&mut plate, &mut host), SizeCheck::Reallocated);
        assert!(plate.target().is_some());
    }

    #[test]
    fn failed_target_allocation_releases_texture() {
        let mut host = FakeHost::with_source(640, 480);
        let mut plate = BackgroundPlate::new();

        host.fail_render_target_alloc(true);
        assert_eq!(check(&mut plate, &mut host), SizeCheck::AllocationFailed);
        let log = host.log();
        assert_eq!(log.live_textures(), 0);
        assert_eq!(log.live_targets(), 0);
        assert_eq!(plate.extent(), Extent::default());
    }

    #[test]
    fn free_releases_both_buffers_in_one_scope() {
        let mut host = FakeHost::with_source(640, 480);
        let mut plate = BackgroundPlate::new();
        check(&mut plate, &mut host);
        let enters = host.log().enters;

        plate.free(&mut host);
        let log = host.log();
        assert_eq!(log.enters, enters + 1);
        assert_eq!(log.live_targets(), 0);
        assert_eq!(log.live_textures(), 0);
        assert!(!plate.is_allocated());

        plate.free(&mut host);
        assert_eq!(host.log().enters, enters + 1);
    }

    #[test]
    fn source_flags_do_not_affect_sizing() {
        let mut host = FakeHost::new();
        host.set_source(Some(TrackedSource {
            extent: Extent::new(320, 240),
            flags: SourceFlags::ASYNC,
            is_parent: false,
        }));
        let mut plate = BackgroundPlate::new();
        assert_eq!(check(&mut plate, &mut host), SizeCheck::Reallocated);
    }
}
