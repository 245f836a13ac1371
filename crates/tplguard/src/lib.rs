//! Top-level facade crate for tplguard.
//!
//! Re-exports core types and the policy library so template engines can depend
//! on a single crate.

pub mod core {
    pub use tplguard_core::*;
}

pub mod policy {
    pub use tplguard_policy::*;
}

pub use tplguard_core::{MemberAccess, Sandboxed, SandboxError, SecurityPolicy};
pub use tplguard_policy::SandboxRuntime;
