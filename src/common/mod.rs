//! Common utilities shared across rigger modules

pub mod fs;
pub mod process;
