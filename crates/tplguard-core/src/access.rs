//! Member access requests, decisions, and the policy seam the evaluator calls.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SandboxError};
use crate::object::{type_of, Sandboxed};

/// What kind of dereference the template attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    Property,
}

impl MemberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Method => "method",
            MemberKind::Property => "property",
        }
    }
}

/// Which policy strategy is active for a render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    /// Default-deny: allow-list first, then block-list veto.
    #[default]
    Strict,
    /// Default-allow: block-lists only. Kept for compatibility.
    Legacy,
}

impl PolicyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyMode::Strict => "strict",
            PolicyMode::Legacy => "legacy",
        }
    }
}

/// Why an access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Nothing in the allow phase admitted the member.
    NotAllowListed,
    /// The (type, member) pair is blocked.
    BlockedForType,
    /// Every method of the type is blocked.
    BlockedType,
    /// The member name is blocked for all objects.
    BlockedName,
    /// The property name is blocked.
    BlockedProperty,
}

impl DenyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DenyReason::NotAllowListed => "not_allow_listed",
            DenyReason::BlockedForType => "blocked_for_type",
            DenyReason::BlockedType => "blocked_type",
            DenyReason::BlockedName => "blocked_name",
            DenyReason::BlockedProperty => "blocked_property",
        }
    }
}

/// Details of a denied access. Holds names only, never object state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub type_name: &'static str,
    /// Member name exactly as requested (not normalized).
    pub member: String,
    pub kind: MemberKind,
    pub reason: DenyReason,
}

impl Denial {
    pub fn new(target: &dyn Sandboxed, member: &str, kind: MemberKind, reason: DenyReason) -> Self {
        Self {
            type_name: type_of(target).name(),
            member: member.to_string(),
            kind,
            reason,
        }
    }
}

impl From<Denial> for SandboxError {
    fn from(d: Denial) -> Self {
        let type_name = d.type_name.to_string();
        match (d.kind, d.reason) {
            (MemberKind::Property, _) => SandboxError::PropertyNotAllowed {
                type_name,
                property: d.member,
            },
            (MemberKind::Method, DenyReason::BlockedType) => SandboxError::TypeNotAllowed {
                type_name,
                method: d.member,
            },
            (MemberKind::Method, _) => SandboxError::MethodNotAllowed {
                type_name,
                method: d.member,
            },
        }
    }
}

/// Outcome of a policy check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Decision {
    Allowed,
    Denied(Denial),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Decision::Allowed => None,
            Decision::Denied(d) => Some(d),
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied(d) => Err(d.into()),
        }
    }
}

/// Decision function consumed by the expression evaluator on every member
/// dereference reached through template syntax.
///
/// Implementations are pure reads of immutable configuration and must be safe
/// to share across concurrent renders.
pub trait SecurityPolicy: Send + Sync {
    fn mode(&self) -> PolicyMode;

    fn decide_method(&self, target: &dyn Sandboxed, method: &str) -> Decision;

    fn decide_property(&self, target: &dyn Sandboxed, property: &str) -> Decision;

    /// Fails with `MethodNotAllowed`/`TypeNotAllowed` when the call is denied.
    fn check_method_allowed(&self, target: &dyn Sandboxed, method: &str) -> Result<()> {
        let decision = self.decide_method(target, method);
        log_denial(self.mode(), &decision);
        decision.into_result()
    }

    /// Fails with `PropertyNotAllowed` when the read is denied.
    fn check_property_allowed(&self, target: &dyn Sandboxed, property: &str) -> Result<()> {
        let decision = self.decide_property(target, property);
        log_denial(self.mode(), &decision);
        decision.into_result()
    }
}

fn log_denial(mode: PolicyMode, decision: &Decision) {
    if let Decision::Denied(d) = decision {
        tracing::warn!(
            mode = mode.as_str(),
            type_name = d.type_name,
            member = %d.member,
            kind = d.kind.as_str(),
            reason = d.reason.as_str(),
            "sandbox denied template member access"
        );
    }
}

/// One member dereference attempted by a template. Lives for a single check.
#[derive(Clone, Copy)]
pub struct MemberAccess<'a> {
    pub target: &'a dyn Sandboxed,
    pub member: &'a str,
    pub kind: MemberKind,
}

impl<'a> MemberAccess<'a> {
    pub fn method(target: &'a dyn Sandboxed, member: &'a str) -> Self {
        Self {
            target,
            member,
            kind: MemberKind::Method,
        }
    }

    pub fn property(target: &'a dyn Sandboxed, member: &'a str) -> Self {
        Self {
            target,
            member,
            kind: MemberKind::Property,
        }
    }

    pub fn decide(&self, policy: &dyn SecurityPolicy) -> Decision {
        match self.kind {
            MemberKind::Method => policy.decide_method(self.target, self.member),
            MemberKind::Property => policy.decide_property(self.target, self.member),
        }
    }

    pub fn check(&self, policy: &dyn SecurityPolicy) -> Result<()> {
        match self.kind {
            MemberKind::Method => policy.check_method_allowed(self.target, self.member),
            MemberKind::Property => policy.check_property_allowed(self.target, self.member),
        }
    }
}

impl fmt::Debug for MemberAccess<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberAccess")
            .field("type", &type_of(self.target))
            .field("member", &self.member)
            .field("kind", &self.kind)
            .finish()
    }
}
