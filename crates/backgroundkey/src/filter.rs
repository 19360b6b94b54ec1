use std::ffi::c_void;
use std::os::raw::c_char;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use backgroundkey_core::BackgroundKeyFilter;
use obs_sys as obs;

use crate::constants::*;
use crate::graphics::ObsHost;
use crate::perf::RenderPerf;
use crate::settings;
use crate::util::cstr;

struct FilterState {
    filter: BackgroundKeyFilter<ObsHost>,
    perf: RenderPerf,
}

/// Instance data handed to libobs.
///
/// The capture button fires on the UI thread. It only raises a flag that the
/// next `video_tick` consumes, so no graphics work happens while the UI
/// thread holds the state lock.
struct BackgroundKeySource {
    state: Mutex<FilterState>,
    capture_requested: AtomicBool,
}

impl BackgroundKeySource {
    fn lock(&self) -> MutexGuard<'_, FilterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) unsafe fn register_sources() {
    let mut info: obs::obs_source_info = std::mem::zeroed();
    info.id = cstr(FILTER_ID);
    info.type_ = obs::obs_source_type_OBS_SOURCE_TYPE_FILTER;
    info.output_flags = obs::OBS_SOURCE_VIDEO;

    info.get_name = Some(background_key_get_name);
    info.create = Some(background_key_create);
    info.destroy = Some(background_key_destroy);
    info.update = Some(background_key_update);
    info.get_defaults = Some(background_key_get_defaults);
    info.get_properties = Some(background_key_get_properties);
    info.video_tick = Some(background_key_video_tick);
    info.video_render = Some(background_key_video_render);

    obs::obs_register_source_s(
        &info as *const obs::obs_source_info,
        std::mem::size_of::<obs::obs_source_info>() as obs::size_t,
    );
}

unsafe extern "C" fn background_key_get_name(_type_data: *mut c_void) -> *const c_char {
    FILTER_DISPLAY_NAME.as_ptr().cast()
}

unsafe extern "C" fn background_key_create(
    settings_data: *mut obs::obs_data_t,
    source: *mut obs::obs_source_t,
) -> *mut c_void {
    let settings = settings::load(settings_data);

    let host = match ObsHost::new(source) {
        Ok(host) => host,
        Err(err) => {
            tracing::error!(%err, "background key filter unavailable");
            return std::ptr::null_mut();
        }
    };

    let data = Box::new(BackgroundKeySource {
        state: Mutex::new(FilterState {
            filter: BackgroundKeyFilter::new(host, &settings),
            perf: RenderPerf::new(),
        }),
        capture_requested: AtomicBool::new(false),
    });
    Box::into_raw(data).cast()
}

unsafe extern "C" fn background_key_destroy(data: *mut c_void) {
    if data.is_null() {
        return;
    }
    drop(Box::from_raw(data.cast::<BackgroundKeySource>()));
}

unsafe extern "C" fn background_key_update(data: *mut c_void, settings_data: *mut obs::obs_data_t) {
    if data.is_null() {
        return;
    }
    let source = &*data.cast::<BackgroundKeySource>();
    let settings = settings::load(settings_data);
    source.lock().filter.update(&settings);
}

unsafe extern "C" fn background_key_get_defaults(settings_data: *mut obs::obs_data_t) {
    settings::set_defaults(settings_data);
}

unsafe extern "C" fn background_key_get_properties(_data: *mut c_void) -> *mut obs::obs_properties_t {
    settings::get_properties(Some(background_key_capture_clicked))
}

unsafe extern "C" fn background_key_capture_clicked(
    _props: *mut obs::obs_properties_t,
    _property: *mut obs::obs_property_t,
    data: *mut c_void,
) -> bool {
    if data.is_null() {
        return false;
    }
    let source = &*data.cast::<BackgroundKeySource>();
    source.capture_requested.store(true, Ordering::Release);
    true
}

unsafe extern "C" fn background_key_video_tick(data: *mut c_void, seconds: f32) {
    if data.is_null() {
        return;
    }
    let source = &*data.cast::<BackgroundKeySource>();
    let mut state = source.lock();
    if source.capture_requested.swap(false, Ordering::Acquire) {
        state.filter.request_capture();
    } else {
        state.filter.tick(seconds);
    }
}

unsafe extern "C" fn background_key_video_render(data: *mut c_void, _effect: *mut obs::gs_effect_t) {
    if data.is_null() {
        return;
    }
    let source = &*data.cast::<BackgroundKeySource>();
    let mut state = source.lock();

    let t = state.perf.start();
    let outcome = state.filter.render();
    state.perf.record(outcome, t);
}
