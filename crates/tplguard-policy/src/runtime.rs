//! Active sandbox for a render configuration.
//!
//! Holds exactly one policy strategy behind `Arc<dyn SecurityPolicy>`. Build it
//! once when the template subsystem starts, then clone it into every render;
//! clones share the same immutable configuration.

use std::path::Path;
use std::sync::Arc;

use tplguard_core::access::{Decision, MemberAccess, PolicyMode, SecurityPolicy};
use tplguard_core::error::Result;
use tplguard_core::object::Sandboxed;

use crate::config::{self, TypeRegistry};
use crate::policy::{LegacyPolicy, PolicyConfiguration, StrictPolicy};

/// Everything needed to build a [`SandboxRuntime`].
#[derive(Debug, Clone, Default)]
pub struct SandboxConfig {
    pub mode: PolicyMode,
    pub policy: PolicyConfiguration,
}

#[derive(Clone)]
pub struct SandboxRuntime {
    policy: Arc<dyn SecurityPolicy>,
}

impl SandboxRuntime {
    pub fn new(cfg: SandboxConfig) -> Self {
        let policy: Arc<dyn SecurityPolicy> = match cfg.mode {
            PolicyMode::Strict => Arc::new(StrictPolicy::new(cfg.policy)),
            PolicyMode::Legacy => {
                tracing::warn!("legacy sandbox policy active: unlisted members are allowed");
                Arc::new(LegacyPolicy::new(cfg.policy))
            }
        };
        tracing::info!(mode = cfg.mode.as_str(), "template sandbox ready");
        Self { policy }
    }

    pub fn strict(policy: PolicyConfiguration) -> Self {
        Self::new(SandboxConfig {
            mode: PolicyMode::Strict,
            policy,
        })
    }

    pub fn legacy(policy: PolicyConfiguration) -> Self {
        Self::new(SandboxConfig {
            mode: PolicyMode::Legacy,
            policy,
        })
    }

    /// Use a host-provided strategy.
    pub fn with_policy(policy: Arc<dyn SecurityPolicy>) -> Self {
        tracing::info!(mode = policy.mode().as_str(), "template sandbox ready (custom policy)");
        Self { policy }
    }

    /// Load a policy file and build the runtime from it.
    pub fn from_file(path: impl AsRef<Path>, registry: &TypeRegistry) -> Result<Self> {
        Ok(Self::new(config::load_from_file(path, registry)?))
    }

    pub fn policy(&self) -> Arc<dyn SecurityPolicy> {
        Arc::clone(&self.policy)
    }

    pub fn check(&self, access: &MemberAccess<'_>) -> Result<()> {
        access.check(self.policy.as_ref())
    }
}

impl SecurityPolicy for SandboxRuntime {
    fn mode(&self) -> PolicyMode {
        self.policy.mode()
    }

    fn decide_method(&self, target: &dyn Sandboxed, method: &str) -> Decision {
        self.policy.decide_method(target, method)
    }

    fn decide_property(&self, target: &dyn Sandboxed, property: &str) -> Decision {
        self.policy.decide_property(target, property)
    }

    fn check_method_allowed(&self, target: &dyn Sandboxed, method: &str) -> Result<()> {
        self.policy.check_method_allowed(target, method)
    }

    fn check_property_allowed(&self, target: &dyn Sandboxed, property: &str) -> Result<()> {
        self.policy.check_property_allowed(target, property)
    }
}
