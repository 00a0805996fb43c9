//! Command implementations for the rigger CLI

pub mod completions;
pub mod deploy;
pub mod helpers;
pub mod inspect;
pub mod version;
