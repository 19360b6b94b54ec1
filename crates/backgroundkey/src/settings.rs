use backgroundkey_core::settings::{
    FloatRange, IntRange, KeySettings, BRIGHTNESS_RANGE, CONTRAST_RANGE, GAMMA_RANGE,
    OPACITY_RANGE, SIMILARITY_RANGE, SMOOTHNESS_RANGE, SPILL_RANGE,
};
use obs_sys as obs;

use crate::constants::*;
use crate::util::cstr;

pub(crate) unsafe fn load(settings: *mut obs::obs_data_t) -> KeySettings {
    if settings.is_null() {
        return KeySettings::default();
    }

    KeySettings {
        opacity: obs::obs_data_get_int(settings, cstr(SETTING_OPACITY)),
        contrast: obs::obs_data_get_double(settings, cstr(SETTING_CONTRAST)),
        brightness: obs::obs_data_get_double(settings, cstr(SETTING_BRIGHTNESS)),
        gamma: obs::obs_data_get_double(settings, cstr(SETTING_GAMMA)),

        similarity: obs::obs_data_get_int(settings, cstr(SETTING_SIMILARITY)),
        smoothness: obs::obs_data_get_int(settings, cstr(SETTING_SMOOTHNESS)),
        spill: obs::obs_data_get_int(settings, cstr(SETTING_SPILL)),
    }
}

pub(crate) unsafe fn set_defaults(settings: *mut obs::obs_data_t) {
    if settings.is_null() {
        return;
    }
    let d = KeySettings::default();

    obs::obs_data_set_default_int(settings, cstr(SETTING_OPACITY), d.opacity);
    obs::obs_data_set_default_double(settings, cstr(SETTING_CONTRAST), d.contrast);
    obs::obs_data_set_default_double(settings, cstr(SETTING_BRIGHTNESS), d.brightness);
    obs::obs_data_set_default_double(settings, cstr(SETTING_GAMMA), d.gamma);
    obs::obs_data_set_default_int(settings, cstr(SETTING_SIMILARITY), d.similarity);
    obs::obs_data_set_default_int(settings, cstr(SETTING_SMOOTHNESS), d.smoothness);
    obs::obs_data_set_default_int(settings, cstr(SETTING_SPILL), d.spill);
}

unsafe fn add_int_slider(
    props: *mut obs::obs_properties_t,
    name: &'static [u8],
    label: &'static [u8],
    range: IntRange,
) {
    obs::obs_properties_add_int_slider(
        props,
        cstr(name),
        cstr(label),
        range.min as i32,
        range.max as i32,
        range.step as i32,
    );
}

unsafe fn add_float_slider(
    props: *mut obs::obs_properties_t,
    name: &'static [u8],
    label: &'static [u8],
    range: FloatRange,
) {
    obs::obs_properties_add_float_slider(props, cstr(name), cstr(label), range.min, range.max, range.step);
}

/// `on_capture` runs when the user presses the capture button; libobs passes
/// it the filter instance as `data`.
pub(crate) unsafe fn get_properties(on_capture: obs::obs_property_clicked_t) -> *mut obs::obs_properties_t {
    let props = obs::obs_properties_create();
    if props.is_null() {
        return props;
    }

    obs::obs_properties_add_button(
        props,
        cstr(SETTING_CAPTURE_BACKGROUND),
        cstr(PROP_CAPTURE_BACKGROUND),
        on_capture,
    );

    // Keying
    add_int_slider(props, SETTING_SIMILARITY, PROP_SIMILARITY, SIMILARITY_RANGE);
    add_int_slider(props, SETTING_SMOOTHNESS, PROP_SMOOTHNESS, SMOOTHNESS_RANGE);
    add_int_slider(props, SETTING_SPILL, PROP_SPILL, SPILL_RANGE);

    // Color correction
    add_int_slider(props, SETTING_OPACITY, PROP_OPACITY, OPACITY_RANGE);
    add_float_slider(props, SETTING_CONTRAST, PROP_CONTRAST, CONTRAST_RANGE);
    add_float_slider(props, SETTING_BRIGHTNESS, PROP_BRIGHTNESS, BRIGHTNESS_RANGE);
    add_float_slider(props, SETTING_GAMMA, PROP_GAMMA, GAMMA_RANGE);

    props
}
