//! Default-allow engine, kept for existing deployments.
//!
//! Only explicitly blocked (type, method) pairs, blocked types, blocked names,
//! and blocked properties are denied. Everything else passes.

use tplguard_core::access::{Decision, Denial, DenyReason, MemberKind, PolicyMode, SecurityPolicy};
use tplguard_core::name::normalize;
use tplguard_core::object::{is_engine_internal, Sandboxed};

use super::configuration::PolicyConfiguration;

#[derive(Debug, Clone)]
pub struct LegacyPolicy {
    cfg: PolicyConfiguration,
}

impl LegacyPolicy {
    pub fn new(cfg: PolicyConfiguration) -> Self {
        Self { cfg }
    }

    pub fn configuration(&self) -> &PolicyConfiguration {
        &self.cfg
    }
}

impl SecurityPolicy for LegacyPolicy {
    fn mode(&self) -> PolicyMode {
        PolicyMode::Legacy
    }

    fn decide_method(&self, target: &dyn Sandboxed, method: &str) -> Decision {
        if is_engine_internal(target) {
            return Decision::Allowed;
        }

        let name = normalize(method);

        let reason = if self.cfg.is_blocked_for_type(target, &name) {
            DenyReason::BlockedForType
        } else if self.cfg.is_blocked_type(target) {
            DenyReason::BlockedType
        } else if self.cfg.is_blocked_name(&name) {
            DenyReason::BlockedName
        } else {
            return Decision::Allowed;
        };

        Decision::Denied(Denial::new(target, method, MemberKind::Method, reason))
    }

    fn decide_property(&self, target: &dyn Sandboxed, property: &str) -> Decision {
        if self.cfg.is_blocked_property(&normalize(property)) {
            return Decision::Denied(Denial::new(
                target,
                property,
                MemberKind::Property,
                DenyReason::BlockedProperty,
            ));
        }
        Decision::Allowed
    }
}
