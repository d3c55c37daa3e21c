//! Build script that probes for OpenCV and prints installation hints.
//!
//! The `opencv` crate finds the system library through pkg-config; a missing
//! library otherwise surfaces as an opaque binding generation failure.

use std::process::Command;

/// pkg-config module names OpenCV has shipped under
const OPENCV_MODULES: [&str; 2] = ["opencv4", "opencv"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    if pkg_config_version(&["--version"]).is_none() {
        println!("cargo:warning=pkg-config not found. It is required to locate OpenCV.");
        println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
        println!("cargo:warning=On macOS: brew install pkg-config");
        return;
    }

    let found = OPENCV_MODULES
        .iter()
        .find_map(|module| pkg_config_version(&["--modversion", module]));

    match found {
        Some(version) => println!("cargo:warning=Found OpenCV version: {version}"),
        None => {
            println!("cargo:warning=OpenCV not found via pkg-config. Make sure OpenCV is installed.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev");
            println!("cargo:warning=On macOS: brew install opencv");
        }
    }
}

fn pkg_config_version(args: &[&str]) -> Option<String> {
    let output = Command::new("pkg-config").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
