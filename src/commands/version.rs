//! Version command implementation

use crate::config::{CONFIG_ENV, CONFIG_FILE_NAME};
use crate::error::Result;
use crate::platform::Layout;

/// Run version command
pub fn run() -> Result<()> {
    println!("rigger {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!("  Host layout: {}", Layout::current());
    println!();
    println!("Configuration:");
    println!("  <project>/{CONFIG_FILE_NAME}, or the file named by {CONFIG_ENV}");

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
