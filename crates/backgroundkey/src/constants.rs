pub(crate) static MODULE_NAME: &[u8] = b"BackgroundKey\0";
pub(crate) static MODULE_DESCRIPTION: &[u8] =
    b"Background key filter: removes a captured background plate from a source\0";
pub(crate) static MODULE_AUTHOR: &[u8] = b"BackgroundKey contributors\0";
pub(crate) const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) static FILTER_ID: &[u8] = b"background_key_filter\0";
pub(crate) static FILTER_DISPLAY_NAME: &[u8] = b"Background Key\0";

pub(crate) static SETTING_OPACITY: &[u8] = b"opacity\0";
pub(crate) static SETTING_CONTRAST: &[u8] = b"contrast\0";
pub(crate) static SETTING_BRIGHTNESS: &[u8] = b"brightness\0";
pub(crate) static SETTING_GAMMA: &[u8] = b"gamma\0";
pub(crate) static SETTING_SIMILARITY: &[u8] = b"similarity\0";
pub(crate) static SETTING_SMOOTHNESS: &[u8] = b"smoothness\0";
pub(crate) static SETTING_SPILL: &[u8] = b"spill\0";
pub(crate) static SETTING_CAPTURE_BACKGROUND: &[u8] = b"capture_background\0";

pub(crate) static PROP_OPACITY: &[u8] = b"Opacity\0";
pub(crate) static PROP_CONTRAST: &[u8] = b"Contrast\0";
pub(crate) static PROP_BRIGHTNESS: &[u8] = b"Brightness\0";
pub(crate) static PROP_GAMMA: &[u8] = b"Gamma\0";
pub(crate) static PROP_SIMILARITY: &[u8] = b"Similarity\0";
pub(crate) static PROP_SMOOTHNESS: &[u8] = b"Smoothness\0";
pub(crate) static PROP_SPILL: &[u8] = b"Color spill reduction\0";
pub(crate) static PROP_CAPTURE_BACKGROUND: &[u8] = b"Capture background\0";

pub(crate) static EFFECT_BACKGROUND_KEY: &[u8] = b"background_key_filter.effect\0";
pub(crate) static TECH_DRAW: &[u8] = b"Draw\0";

pub(crate) static PARAM_IMAGE: &[u8] = b"image\0";
pub(crate) static PARAM_COLOR: &[u8] = b"color\0";
pub(crate) static PARAM_CONTRAST: &[u8] = b"contrast\0";
pub(crate) static PARAM_BRIGHTNESS: &[u8] = b"brightness\0";
pub(crate) static PARAM_GAMMA: &[u8] = b"gamma\0";
pub(crate) static PARAM_BACKGROUND: &[u8] = b"background\0";
pub(crate) static PARAM_PIXEL_SIZE: &[u8] = b"pixel_size\0";
pub(crate) static PARAM_SIMILARITY: &[u8] = b"similarity\0";
pub(crate) static PARAM_SMOOTHNESS: &[u8] = b"smoothness\0";
pub(crate) static PARAM_SPILL: &[u8] = b"spill\0";

#[cfg(feature = "perf")]
pub(crate) const PERF_ENV: &str = "BACKGROUNDKEY_PERF";
pub(crate) const LOG_ENV: &str = "BACKGROUNDKEY_LOG";
