use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // The binary looks for config.json next to itself first
    copy_config();
}

/// Copies config.json to the target directory, if the project has one.
fn copy_config() {
    let out_dir = env::var("OUT_DIR").unwrap();
    // OUT_DIR is something like target/release/build/ocr-region-debug-xxx/out
    // Go up 3 levels: out -> hash -> build -> release
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .nth(3)
        .expect("Could not find target directory");

    let config_src = Path::new("config.json");

    if config_src.exists() {
        let _ = fs::copy(config_src, target_dir.join("config.json"));
        println!("cargo:rerun-if-changed=config.json");
    }
}
