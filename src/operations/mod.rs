//! High-level operations behind the commands
//!
//! - DeployOperation: the full convergence pipeline
//! - InspectOperation: read-only report on an installation

pub mod deploy;
pub mod inspect;

pub use deploy::{DeployOperation, DeployOptions, DeployReport};
pub use inspect::{InspectOperation, InspectReport};
