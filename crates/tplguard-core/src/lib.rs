//! tplguard core: the primitives every template sandbox policy is built on.
//!
//! This crate defines member-name normalization, runtime type identity for
//! sandboxed values, declared capability markers, the access decision types,
//! and the [`SecurityPolicy`] seam the expression evaluator calls. It carries
//! no configuration or policy data of its own.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every denial surfaces as a `SandboxError` the render must propagate.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod access;
pub mod capability;
pub mod error;
pub mod name;
pub mod object;

pub use access::{Decision, Denial, DenyReason, MemberAccess, MemberKind, PolicyMode, SecurityPolicy};
pub use capability::{Capability, CapabilityProbe, Classification};
/// Shared result type.
pub use error::{Result, SandboxError};
pub use name::{normalize, NormalizedName};
pub use object::{is_engine_internal, is_instance_of, type_of, CompiledTemplate, Markup, Sandboxed, TypeKey};
