//! Background-capture window.
//!
//! A capture request opens a window of counted frames. The first frame that
//! renders successfully becomes the plate; the remaining frames show it
//! frozen so the user can see what was captured.

/// Capture frames counted before returning to keying. The counter is
/// compared before it is incremented, so the window closes on frame
/// `CAPTURE_WINDOW + 2`.
pub const CAPTURE_WINDOW: u32 = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureState {
    /// Keying against the current plate.
    #[default]
    Idle,
    Capturing {
        frames: u32,
        plate_taken: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureTransition {
    Continue,
    Finished,
}

impl CaptureState {
    pub fn is_capturing(&self) -> bool {
        matches!(self, CaptureState::Capturing { .. })
    }

    /// True while capturing and no frame has been taken for the plate yet.
    pub fn wants_plate(&self) -> bool {
        matches!(self, CaptureState::Capturing { plate_taken: false, .. })
    }

    /// Starts (or restarts) a capture window.
    pub fn begin(&mut self) {
        *self = CaptureState::Capturing {
            frames: 0,
            plate_taken: false,
        };
    }

    pub fn plate_taken(&mut self) {
        if let CaptureState::Capturing { plate_taken, .. } = self {
            *plate_taken = true;
        }
    }

    /// Asks for a fresh plate on the next frame. Used when the plate buffers
    /// were recreated mid-window and lost their contents.
    pub fn retake_plate(&mut self) {
        if let CaptureState::Capturing { plate_taken, .. } = self {
            *plate_taken = false;
        }
    }

    /// Counts one rendered capture frame. Frames skipped for lack of a valid
    /// source are not counted.
    pub fn record_frame(&mut self) -> CaptureTransition {
        let CaptureState::Capturing { frames, .. } = self else {
            return CaptureTransition::Finished;
        };

        let seen = *frames;
        *frames += 1;
        if seen > CAPTURE_WINDOW {
            *self = CaptureState::Idle;
            CaptureTransition::Finished
        } else {
            CaptureTransition::Continue
        }
    }

    pub fn cancel(&mut self) {
        *self = CaptureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let state = CaptureState::default();
        assert_eq!(state, CaptureState::Idle);
        assert!(!state.is_capturing());
        assert!(!state.wants_plate());
    }

    #[test]
    fn begin_resets_counter() {
        let mut state = CaptureState::Capturing {
            frames: 12,
            plate_taken: true,
        };
        state.begin();
        assert_eq!(
            state,
            CaptureState::Capturing {
                frames: 0,
                plate_taken: false
            }
        );
        assert!(state.wants_plate());
    }

    #[test]
    fn window_closes_on_thirty_second_frame() {
        let mut state = CaptureState::default();
        state.begin();

        for frame in 1..=31 {
            assert_eq!(state.record_frame(), CaptureTransition::Continue, "frame {frame}");
            assert!(state.is_capturing());
        }
        assert_eq!(
            state,
            CaptureState::Capturing {
                frames: 31,
                plate_taken: false
            }
        );

        assert_eq!(state.record_frame(), CaptureTransition::Finished);
        assert_eq!(state, CaptureState::Idle);
    }

    #[test]
    fn plate_taken_sticks_for_the_window() {
        let mut state = CaptureState::default();
        state.begin();
        state.plate_taken();
        state.record_frame();
        assert!(state.is_capturing());
        assert!(!state.wants_plate());
    }

    #[test]
    fn retake_keeps_the_frame_count() {
        let mut state = CaptureState::default();
        state.begin();
        state.plate_taken();
        state.record_frame();
        state.record_frame();

        state.retake_plate();
        assert_eq!(
            state,
            CaptureState::Capturing {
                frames: 2,
                plate_taken: false
            }
        );

        let mut idle = CaptureState::Idle;
        idle.retake_plate();
        assert_eq!(idle, CaptureState::Idle);
    }

    #[test]
    fn plate_taken_is_ignored_when_idle() {
        let mut state = CaptureState::Idle;
        state.plate_taken();
        assert_eq!(state, CaptureState::Idle);
        assert_eq!(state.record_frame(), CaptureTransition::Finished);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut state = CaptureState::default();
        state.begin();
        state.cancel();
        assert_eq!(state, CaptureState::Idle);
    }
}
