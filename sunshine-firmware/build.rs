//! Build script for sunshine-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Records the build time so the clock starts near the real time

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    write_build_time(&out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &PathBuf) {
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Write `BUILD_EPOCH_MS`, the UTC build time in Unix milliseconds
fn write_build_time(out_dir: &PathBuf) {
    let now = chrono::Utc::now().timestamp_millis();
    let mut f = File::create(out_dir.join("build_time.rs")).unwrap();
    writeln!(f, "pub const BUILD_EPOCH_MS: i64 = {};", now).unwrap();
}
