//! tplguard policy library entry.
//!
//! This crate wires policy configuration, the policy file loader, and the two
//! decision engines into a [`SandboxRuntime`] the template evaluator consults
//! before every method call and property read.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod policy;
pub mod runtime;

pub use policy::{LegacyPolicy, PolicyBuilder, PolicyConfiguration, Preset, StrictPolicy};
pub use runtime::{SandboxConfig, SandboxRuntime};
