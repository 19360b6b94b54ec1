use std::env;
use std::path::{Path, PathBuf};

// Only the parts of libobs the filter plugin touches; keeps bindgen output
// (and build time) small.
const ALLOW_FUNCTIONS: &[&str] = &[
  "blog",
  "bfree",
  "obs_current_module",
  "obs_find_module_file",
  "obs_register_source_s",
  "obs_enter_graphics",
  "obs_leave_graphics",
  "obs_get_base_effect",
  "obs_filter_get_target",
  "obs_filter_get_parent",
  "obs_source_.*",
  "obs_data_.*",
  "obs_properties_.*",
  "obs_property_.*",
  "gs_.*",
];

const ALLOW_TYPES: &[&str] = &["obs_source_info", "obs_module_t", "vec2", "vec4"];

const ALLOW_VARS: &[&str] = &[
  "LIBOBS_API_.*",
  "LOG_.*",
  "OBS_SOURCE_.*",
  "GS_.*",
];

fn main() {
  println!("cargo:rerun-if-env-changed=OBS_APP_BUNDLE");
  println!("cargo:rerun-if-env-changed=BINDGEN_EXTRA_CLANG_ARGS");
  println!("cargo:rerun-if-env-changed=OBS_SYS_HEADERS");
  println!("cargo:rerun-if-changed=wrapper.h");
  println!("cargo:rerun-if-changed=include/obsconfig.h");

  let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set"));
  let obs_root = obs_headers_root(&manifest_dir);

  let libobs_include = obs_root.join("libobs");
  if !libobs_include.join("obs-module.h").exists() {
    panic!(
      "obs-sys: libobs headers not found under {}.\n  \
      Run `git submodule update --init vendor/obs-studio` or set \
      OBS_SYS_HEADERS=/path/to/obs-studio.",
      obs_root.display()
    );
  }

  for header in ["obs-module.h", "obs.h", "obs-source.h", "graphics/graphics.h"] {
    println!("cargo:rerun-if-changed={}", libobs_include.join(header).display());
  }

  generate_bindings(&manifest_dir, &libobs_include);

  let target = env::var("TARGET").unwrap_or_default();
  if target.contains("apple-darwin") {
    link_macos_obs_app();
  }
}

fn obs_headers_root(manifest_dir: &Path) -> PathBuf {
  if let Some(p) = env::var_os("OBS_SYS_HEADERS") {
    return PathBuf::from(p);
  }
  manifest_dir
    .ancestors()
    .nth(2)
    .expect("expected crates/obs-sys to be nested under the workspace root")
    .join("vendor/obs-studio")
}

fn generate_bindings(manifest_dir: &Path, libobs_include: &Path) {
  let wrapper = manifest_dir.join("wrapper.h");

  let mut builder = bindgen::Builder::default()
    .header(wrapper.to_string_lossy().to_string())
    .clang_arg(format!("-I{}", manifest_dir.join("include").display()))
    .clang_arg(format!("-I{}", libobs_include.display()))
    .clang_arg("-std=c11")
    .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
    .derive_default(true)
    .layout_tests(false)
    .generate_comments(false);

  for f in ALLOW_FUNCTIONS {
    builder = builder.allowlist_function(f);
  }
  for t in ALLOW_TYPES {
    builder = builder.allowlist_type(t);
  }
  for v in ALLOW_VARS {
    builder = builder.allowlist_var(v);
  }

  if let Ok(extra) = env::var("BINDGEN_EXTRA_CLANG_ARGS") {
    for arg in extra.split_whitespace() {
      builder = builder.clang_arg(arg);
    }
  }

  let out_path = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR must be set")).join("bindings.rs");
  builder
    .generate()
    .expect("obs-sys: bindgen failed")
    .write_to_file(&out_path)
    .expect("obs-sys: failed to write bindings");
}

fn link_macos_obs_app() {
  let bundle = env::var_os("OBS_APP_BUNDLE")
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from("/Applications/OBS.app"));

  let frameworks_dir = bundle.join("Contents/Frameworks");
  if !frameworks_dir.join("libobs.framework").is_dir() {
    println!(
      "cargo:warning=obs-sys: libobs.framework not found under {}; set OBS_APP_BUNDLE to link against an installed OBS.",
      frameworks_dir.display()
    );
    return;
  }

  println!("cargo:rustc-link-search=framework={}", frameworks_dir.display());
  println!("cargo:rustc-link-lib=framework=libobs");
  println!("cargo:rustc-link-arg=-Wl,-rpath,{}", frameworks_dir.display());
}
