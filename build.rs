//! Build script for the Umami Workbench
//!
//! Increments build number on each recompilation and embeds build metadata.

use std::fs;
use std::path::Path;

fn main() {
    // Only rerun when src/ files change (not on every cargo build)
    println!("cargo:rerun-if-changed=src");

    // Persisted counter, next to Cargo.toml
    let build_number_path = Path::new("build_number.txt");

    // A missing or unreadable counter restarts at 0
    let current_build: u64 = if build_number_path.exists() {
        fs::read_to_string(build_number_path)
            .unwrap_or_else(|_| "0".to_string())
            .trim()
            .parse()
            .unwrap_or(0)
    } else {
        0
    };

    let new_build = current_build + 1;

    // Persist the new number for the next build
    fs::write(build_number_path, new_build.to_string())
        .expect("Failed to write build number file");

    // UTC, second precision
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    // Embedded at compile time, read back by build_info.rs
    println!("cargo:rustc-env=UMAMI_BUILD_NUMBER={}", new_build);
    println!("cargo:rustc-env=UMAMI_BUILD_TIMESTAMP={}", timestamp);

    // Show in the cargo build log
    println!("cargo:warning=Umami Build #{} at {}", new_build, timestamp);
}
