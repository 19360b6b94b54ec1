use std::env;

fn main() {
    // On macOS libobs is resolved from the running OBS process when the plugin
    // is loaded, so leave its symbols undefined at link time.
    if env::var("TARGET").unwrap_or_default().contains("apple-darwin") {
        println!("cargo:rustc-link-arg=-Wl,-undefined,dynamic_lookup");
    }
}
