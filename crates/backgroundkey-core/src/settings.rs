//! User-facing filter settings as persisted by the host, with the ranges the
//! property panel exposes.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub const OPACITY_RANGE: IntRange = IntRange { min: 0, max: 100, step: 1 };
pub const CONTRAST_RANGE: FloatRange = FloatRange { min: -1.0, max: 1.0, step: 0.01 };
pub const BRIGHTNESS_RANGE: FloatRange = FloatRange { min: -1.0, max: 1.0, step: 0.01 };
pub const GAMMA_RANGE: FloatRange = FloatRange { min: -1.0, max: 1.0, step: 0.01 };
pub const SIMILARITY_RANGE: IntRange = IntRange { min: 0, max: 1000, step: 1 };
pub const SMOOTHNESS_RANGE: IntRange = IntRange { min: 1, max: 1000, step: 1 };
pub const SPILL_RANGE: IntRange = IntRange { min: 1, max: 1000, step: 1 };

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeySettings {
    /// 0..=100
    pub opacity: i64,
    pub contrast: f64,
    pub brightness: f64,
    pub gamma: f64,

    /// 0..=1000
    pub similarity: i64,
    /// 1..=1000
    pub smoothness: i64,
    /// 1..=1000
    pub spill: i64,
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            opacity: 100,
            contrast: 0.0,
            brightness: 0.0,
            gamma: 0.0,

            similarity: 400,
            smoothness: 80,
            spill: 100,
        }
    }
}
