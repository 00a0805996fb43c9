//! Presentation of command results
//!
//! Reports print either as styled text for people or as JSON for scripts.
//! Step-by-step progress lives in [`crate::progress`].

pub mod display;

use serde::Serialize;

use crate::error::Result;

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
