//! Best-effort interactive display of the written chart

use std::path::Path;
use std::process::{Command, Stdio};

/// Hand the image to the platform's default viewer
///
/// Never fails the run: a missing display or opener is only logged.
pub fn show(path: &Path) {
    if !display_available() {
        log::info!("No display available, not opening {:?}", path);
        return;
    }

    let mut command = opener(path);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    match command.spawn() {
        Ok(_) => log::debug!("Opened {:?} in the image viewer", path),
        Err(e) => log::warn!("Could not open {:?} in an image viewer: {}", path, e),
    }
}

#[cfg(any(target_os = "macos", windows))]
fn display_available() -> bool {
    true
}

#[cfg(not(any(target_os = "macos", windows)))]
fn display_available() -> bool {
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}

#[cfg(target_os = "macos")]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(windows)]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", windows)))]
fn opener(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}
