use std::os::raw::c_char;
use std::ptr::NonNull;

use backgroundkey_core::{
    Extent, FilterHost, GraphicsDevice, KeyError, KeyUniforms, RenderPath, SourceFlags,
    TrackedSource,
};
use obs_sys as obs;

use crate::constants::*;
use crate::util::{cstr, display, owned_string};

pub(crate) struct TexRender(NonNull<obs::gs_texrender_t>);

impl TexRender {
    fn as_ptr(&self) -> *mut obs::gs_texrender_t {
        self.0.as_ptr()
    }
}

pub(crate) struct Texture(NonNull<obs::gs_texture_t>);

/// Holds the graphics context until dropped.
struct GraphicsContext;

impl GraphicsContext {
    unsafe fn enter() -> Self {
        obs::obs_enter_graphics();
        GraphicsContext
    }
}

impl Drop for GraphicsContext {
    fn drop(&mut self) {
        unsafe { obs::obs_leave_graphics() };
    }
}

/// The compiled key effect and its parameter handles. Missing parameters
/// stay null and are skipped when binding.
struct KeyEffect {
    effect: *mut obs::gs_effect_t,

    color: *mut obs::gs_eparam_t,
    contrast: *mut obs::gs_eparam_t,
    brightness: *mut obs::gs_eparam_t,
    gamma: *mut obs::gs_eparam_t,
    background: *mut obs::gs_eparam_t,
    pixel_size: *mut obs::gs_eparam_t,
    similarity: *mut obs::gs_eparam_t,
    smoothness: *mut obs::gs_eparam_t,
    spill: *mut obs::gs_eparam_t,
}

impl KeyEffect {
    // Must be called while in graphics context.
    unsafe fn load() -> Result<Self, KeyError> {
        let effect = load_effect(EFFECT_BACKGROUND_KEY)?;
        let param = |name: &'static [u8]| {
            let p = obs::gs_effect_get_param_by_name(effect, cstr(name));
            if p.is_null() {
                tracing::warn!(param = %display(name), "key effect parameter not found");
            }
            p
        };

        Ok(Self {
            effect,
            color: param(PARAM_COLOR),
            contrast: param(PARAM_CONTRAST),
            brightness: param(PARAM_BRIGHTNESS),
            gamma: param(PARAM_GAMMA),
            background: param(PARAM_BACKGROUND),
            pixel_size: param(PARAM_PIXEL_SIZE),
            similarity: param(PARAM_SIMILARITY),
            smoothness: param(PARAM_SMOOTHNESS),
            spill: param(PARAM_SPILL),
        })
    }

    unsafe fn bind(&self, background: *mut obs::gs_texture_t, u: &KeyUniforms) {
        set_vec4_param(self.color, u.color);
        set_float_param(self.contrast, u.contrast);
        set_float_param(self.brightness, u.brightness);
        set_float_param(self.gamma, u.gamma);
        set_texture_param(self.background, background);
        set_vec2_param(self.pixel_size, u.pixel_size[0], u.pixel_size[1]);
        set_float_param(self.similarity, u.similarity);
        set_float_param(self.smoothness, u.smoothness);
        set_float_param(self.spill, u.spill);
    }
}

impl Drop for KeyEffect {
    fn drop(&mut self) {
        if self.effect.is_null() {
            return;
        }
        unsafe {
            let _gfx = GraphicsContext::enter();
            obs::gs_effect_destroy(self.effect);
        }
        self.effect = std::ptr::null_mut();
    }
}

/// libobs side of the filter: the source the filter is attached to and the
/// key effect.
pub(crate) struct ObsHost {
    source: *mut obs::obs_source_t,
    effect: KeyEffect,
}

impl ObsHost {
    /// `source` is the filter's own context and must outlive the host.
    pub(crate) unsafe fn new(source: *mut obs::obs_source_t) -> Result<Self, KeyError> {
        let effect = {
            let _gfx = GraphicsContext::enter();
            KeyEffect::load()?
        };
        Ok(Self { source, effect })
    }
}

impl GraphicsDevice for ObsHost {
    type RenderTarget = TexRender;
    type Texture = Texture;

    fn enter_graphics(&mut self) {
        unsafe { obs::obs_enter_graphics() };
    }

    fn leave_graphics(&mut self) {
        unsafe { obs::obs_leave_graphics() };
    }

    fn create_render_target(&mut self) -> Option<TexRender> {
        let tr = unsafe {
            obs::gs_texrender_create(obs::gs_color_format_GS_RGBA, obs::gs_zstencil_format_GS_ZS_NONE)
        };
        NonNull::new(tr).map(TexRender)
    }

    fn create_texture(&mut self, extent: Extent) -> Option<Texture> {
        let tex = unsafe {
            obs::gs_texture_create(
                extent.width,
                extent.height,
                obs::gs_color_format_GS_RGBA,
                1,
                std::ptr::null_mut(),
                obs::GS_DYNAMIC,
            )
        };
        NonNull::new(tex).map(Texture)
    }

    fn destroy_render_target(&mut self, target: TexRender) {
        unsafe { obs::gs_texrender_destroy(target.as_ptr()) };
    }

    fn destroy_texture(&mut self, texture: Texture) {
        unsafe { obs::gs_texture_destroy(texture.0.as_ptr()) };
    }
}

impl FilterHost for ObsHost {
    fn tracked_source(&self) -> Option<TrackedSource> {
        unsafe {
            let target = obs::obs_filter_get_target(self.source);
            if target.is_null() {
                return None;
            }
            let parent = obs::obs_filter_get_parent(self.source);

            let raw = obs::obs_source_get_output_flags(target);
            let mut flags = SourceFlags::NONE;
            if raw & obs::OBS_SOURCE_CUSTOM_DRAW != 0 {
                flags = flags | SourceFlags::CUSTOM_DRAW;
            }
            if raw & obs::OBS_SOURCE_ASYNC != 0 {
                flags = flags | SourceFlags::ASYNC;
            }

            Some(TrackedSource {
                extent: Extent::new(
                    obs::obs_source_get_base_width(target),
                    obs::obs_source_get_base_height(target),
                ),
                flags,
                is_parent: !parent.is_null() && target == parent,
            })
        }
    }

    fn render_source_into(&mut self, target: &TexRender, extent: Extent, path: RenderPath) -> bool {
        unsafe {
            let source = obs::obs_filter_get_target(self.source);
            if source.is_null() {
                return false;
            }
            render_source_to_texrender(target.as_ptr(), extent, source, path)
        }
    }

    fn draw_render_target(&mut self, target: &TexRender, extent: Extent) -> bool {
        unsafe {
            let tex = obs::gs_texrender_get_texture(target.as_ptr());
            if tex.is_null() {
                return false;
            }
            let effect = obs::obs_get_base_effect(obs::obs_base_effect_OBS_EFFECT_DEFAULT);
            let image = obs::gs_effect_get_param_by_name(effect, cstr(PARAM_IMAGE));
            set_texture_param(image, tex);
            while obs::gs_effect_loop(effect, cstr(TECH_DRAW)) {
                obs::gs_draw_sprite(tex, 0, extent.width, extent.height);
            }
            true
        }
    }

    fn draw_keyed(&mut self, plate: &TexRender, uniforms: &KeyUniforms) -> bool {
        unsafe {
            if !obs::obs_source_process_filter_begin(
                self.source,
                obs::gs_color_format_GS_RGBA,
                obs::obs_allow_direct_render_OBS_ALLOW_DIRECT_RENDERING,
            ) {
                return false;
            }

            let background = obs::gs_texrender_get_texture(plate.as_ptr());
            self.effect.bind(background, uniforms);

            obs::obs_source_process_filter_tech_end(
                self.source,
                self.effect.effect,
                0,
                0,
                cstr(TECH_DRAW),
            );
            true
        }
    }

    fn skip_filter(&mut self) {
        unsafe { obs::obs_source_skip_video_filter(self.source) };
    }
}

unsafe fn load_effect(file: &'static [u8]) -> Result<*mut obs::gs_effect_t, KeyError> {
    // obs_module_file is a macro; use the underlying exported function.
    let module = obs::obs_current_module();
    if module.is_null() {
        return Err(KeyError::ModuleUnavailable);
    }

    let path = obs::obs_find_module_file(module, cstr(file));
    if path.is_null() {
        return Err(KeyError::EffectNotFound { file: display(file) });
    }
    let path_text = owned_string(path);

    let mut error: *mut c_char = std::ptr::null_mut();
    let effect = obs::gs_effect_create_from_file(path, &mut error);
    let message = if error.is_null() {
        None
    } else {
        let m = owned_string(error);
        obs::bfree(error.cast());
        Some(m)
    };
    obs::bfree(path.cast());

    if effect.is_null() {
        return Err(KeyError::EffectLoad {
            path: path_text,
            message: message.unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    if let Some(message) = message {
        tracing::warn!(path = %path_text, %message, "key effect compiled with warnings");
    }
    tracing::debug!(path = %path_text, "key effect loaded");
    Ok(effect)
}

// Must be called while in graphics context.
unsafe fn render_source_to_texrender(
    texrender: *mut obs::gs_texrender_t,
    extent: Extent,
    source: *mut obs::obs_source_t,
    path: RenderPath,
) -> bool {
    obs::gs_texrender_reset(texrender);

    let clear_color: obs::vec4 = std::mem::zeroed();
    let (cx, cy) = (extent.width, extent.height);

    obs::gs_blend_state_push();
    obs::gs_blend_function(obs::gs_blend_type_GS_BLEND_ONE, obs::gs_blend_type_GS_BLEND_ZERO);

    let ok = if obs::gs_texrender_begin(texrender, cx, cy) {
        obs::gs_clear(obs::GS_CLEAR_COLOR as u32, &clear_color, 0.0, 0);
        obs::gs_ortho(0.0, cx as f32, 0.0, cy as f32, -100.0, 100.0);
        match path {
            RenderPath::Default => obs::obs_source_default_render(source),
            RenderPath::Video => obs::obs_source_video_render(source),
        }
        obs::gs_texrender_end(texrender);
        true
    } else {
        false
    };

    obs::gs_blend_state_pop();
    ok
}

unsafe fn set_vec2_param(param: *mut obs::gs_eparam_t, x: f32, y: f32) {
    if param.is_null() {
        return;
    }
    let v = [x, y];
    obs::gs_effect_set_val(param, v.as_ptr().cast(), std::mem::size_of_val(&v) as obs::size_t);
}

unsafe fn set_vec4_param(param: *mut obs::gs_eparam_t, v: [f32; 4]) {
    if param.is_null() {
        return;
    }
    obs::gs_effect_set_val(param, v.as_ptr().cast(), std::mem::size_of_val(&v) as obs::size_t);
}

unsafe fn set_float_param(param: *mut obs::gs_eparam_t, v: f32) {
    if param.is_null() {
        return;
    }
    obs::gs_effect_set_float(param, v);
}

unsafe fn set_texture_param(param: *mut obs::gs_eparam_t, tex: *mut obs::gs_texture_t) {
    if param.is_null() {
        return;
    }
    obs::gs_effect_set_texture(param, tex);
}
