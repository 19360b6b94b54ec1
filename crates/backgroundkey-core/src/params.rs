use crate::color::{rgba_to_vec4, white_with_opacity};
use crate::host::Extent;
use crate::settings::KeySettings;

/// Settings translated into the numeric ranges the key effect consumes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyParams {
    pub color: [f32; 4],
    pub contrast: f32,
    pub brightness: f32,
    pub gamma: f32,

    pub similarity: f32,
    pub smoothness: f32,
    pub spill: f32,
}

impl KeyParams {
    pub fn from_settings(settings: &KeySettings) -> Self {
        Self {
            color: rgba_to_vec4(white_with_opacity(settings.opacity)),
            contrast: contrast_multiplier(settings.contrast),
            brightness: brightness_offset(settings.brightness),
            gamma: gamma_exponent(settings.gamma),

            similarity: per_mille(settings.similarity),
            smoothness: per_mille(settings.smoothness),
            spill: per_mille(settings.spill),
        }
    }
}

impl Default for KeyParams {
    fn default() -> Self {
        Self::from_settings(&KeySettings::default())
    }
}

pub fn contrast_multiplier(contrast: f64) -> f32 {
    let c = if contrast < 0.0 {
        1.0 / (-contrast + 1.0)
    } else {
        contrast + 1.0
    };
    c as f32
}

pub fn brightness_offset(brightness: f64) -> f32 {
    (brightness * 0.5) as f32
}

// Negative values darken linearly, positive values brighten through the
// reciprocal, so 0 stays neutral.
pub fn gamma_exponent(gamma: f64) -> f32 {
    let g = if gamma < 0.0 {
        -gamma + 1.0
    } else {
        1.0 / (gamma + 1.0)
    };
    g as f32
}

pub fn per_mille(value: i64) -> f32 {
    value as f32 / 1000.0
}

/// The full parameter set bound to the effect for one keyed frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyUniforms {
    pub color: [f32; 4],
    pub contrast: f32,
    pub brightness: f32,
    pub gamma: f32,
    pub pixel_size: [f32; 2],
    pub similarity: f32,
    pub smoothness: f32,
    pub spill: f32,
}

impl KeyUniforms {
    /// `plate` is the background plate's extent, which is authoritative for
    /// the pixel size. Callers guarantee it is non-empty.
    pub fn new(params: &KeyParams, plate: Extent) -> Self {
        Self {
            color: params.color,
            contrast: params.contrast,
            brightness: params.brightness,
            gamma: params.gamma,
            pixel_size: [1.0 / plate.width as f32, 1.0 / plate.height as f32],
            similarity: params.similarity,
            smoothness: params.smoothness,
            spill: params.spill,
        }
    }
}
