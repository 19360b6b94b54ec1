use crate::capture::{CaptureState, CaptureTransition};
use crate::host::{FilterHost, RenderPath, TrackedSource};
use crate::params::{KeyParams, KeyUniforms};
use crate::plate::{BackgroundPlate, SizeCheck};
use crate::settings::KeySettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The input was passed through unmodified.
    PassThrough,
    /// A capture-window frame; the plate was shown frozen.
    Captured,
    /// The input was keyed against the plate.
    Keyed,
    /// The host declined the filter pass; nothing was drawn.
    Skipped,
}

/// One background key filter instance attached to a source.
pub struct BackgroundKeyFilter<H: FilterHost> {
    host: H,
    plate: BackgroundPlate<H>,
    capture: CaptureState,
    params: KeyParams,
}

impl<H: FilterHost> BackgroundKeyFilter<H> {
    /// `host` must already own a loaded effect.
    pub fn new(host: H, settings: &KeySettings) -> Self {
        Self {
            host,
            plate: BackgroundPlate::new(),
            capture: CaptureState::Idle,
            params: KeyParams::from_settings(settings),
        }
    }

    pub fn update(&mut self, settings: &KeySettings) {
        self.params = KeyParams::from_settings(settings);
        tracing::debug!(?settings, "settings updated");
    }

    pub fn params(&self) -> &KeyParams {
        &self.params
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture
    }

    pub fn plate(&self) -> &BackgroundPlate<H> {
        &self.plate
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn request_capture(&mut self) {
        self.capture.begin();
        tracing::info!("background capture started");
        self.check_size();
    }

    pub fn tick(&mut self, _seconds: f32) {
        self.check_size();
    }

    pub fn check_size(&mut self) -> SizeCheck {
        let source = self.host.tracked_source();
        self.check_size_for(source)
    }

    fn check_size_for(&mut self, source: Option<TrackedSource>) -> SizeCheck {
        let check = self.plate.check_size(&mut self.host, source);
        if check == SizeCheck::Reallocated && self.capture.is_capturing() && !self.capture.wants_plate() {
            // New buffers are empty.
            tracing::debug!("plate reallocated during capture, taking it again");
            self.capture.retake_plate();
        }
        check
    }

    pub fn render(&mut self) -> RenderOutcome {
        if self.capture.is_capturing() {
            self.render_capture()
        } else {
            self.render_key()
        }
    }

    fn pass_through(&mut self, reason: &'static str) -> RenderOutcome {
        tracing::trace!(reason, "passing source through");
        self.host.skip_filter();
        RenderOutcome::PassThrough
    }

    fn render_capture(&mut self) -> RenderOutcome {
        let source = self.host.tracked_source();
        if !self.check_size_for(source).is_ready() {
            return self.pass_through("no valid source for capture");
        }
        let Some(source) = source else {
            return self.pass_through("no valid source for capture");
        };
        let extent = self.plate.extent();

        if self.capture.wants_plate() {
            let Some(target) = self.plate.target() else {
                return self.pass_through("no plate to capture into");
            };
            let path = RenderPath::for_source(&source);
            if !self.host.render_source_into(target, extent, path) {
                return self.pass_through("plate could not be bound");
            }
            self.plate.mark_captured();
            self.capture.plate_taken();
            tracing::debug!(?path, width = extent.width, height = extent.height, "background plate captured");
        }

        let Some(target) = self.plate.target() else {
            return self.pass_through("no plate to draw");
        };
        if !self.host.draw_render_target(target, extent) {
            return self.pass_through("plate texture unavailable");
        }

        if self.capture.record_frame() == CaptureTransition::Finished {
            tracing::info!("background capture finished");
        }
        RenderOutcome::Captured
    }

    fn render_key(&mut self) -> RenderOutcome {
        let source_ok = self
            .host
            .tracked_source()
            .is_some_and(|s| !s.extent.is_empty());
        if !source_ok || !self.plate.is_valid() {
            return self.pass_through("no valid source");
        }
        if !self.plate.is_captured() {
            return self.pass_through("no background captured");
        }
        let Some(target) = self.plate.target() else {
            return self.pass_through("no background captured");
        };

        let uniforms = KeyUniforms::new(&self.params, self.plate.extent());
        if self.host.draw_keyed(target, &uniforms) {
            RenderOutcome::Keyed
        } else {
            RenderOutcome::Skipped
        }
    }
}

impl<H: FilterHost> Drop for BackgroundKeyFilter<H> {
    fn drop(&mut self) {
        self.capture.cancel();
        self.plate.free(&mut self.host);
    }
}
