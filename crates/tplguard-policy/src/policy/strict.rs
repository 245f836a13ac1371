//! Default-deny engine.
//!
//! Two phases. The allow phase rejects anything not admitted by a trusted
//! type, a declared capability, or the generic allow-list. The block phase can
//! only narrow what the allow phase admitted.

use tplguard_core::access::{Decision, Denial, DenyReason, MemberKind, PolicyMode, SecurityPolicy};
use tplguard_core::capability::CapabilityProbe;
use tplguard_core::name::{normalize, NormalizedName};
use tplguard_core::object::{is_engine_internal, Sandboxed};

use super::configuration::PolicyConfiguration;

#[derive(Debug, Clone)]
pub struct StrictPolicy {
    cfg: PolicyConfiguration,
}

impl StrictPolicy {
    pub fn new(cfg: PolicyConfiguration) -> Self {
        if cfg.has_legacy_rules() {
            tracing::warn!("blocked types/properties are ignored by the strict policy");
        }
        Self { cfg }
    }

    pub fn configuration(&self) -> &PolicyConfiguration {
        &self.cfg
    }

    fn admitted(&self, target: &dyn Sandboxed, name: &NormalizedName) -> bool {
        self.cfg.is_trusted(target)
            || CapabilityProbe::admits(target, name)
            || self.cfg.is_allowed_name(name)
    }

    fn vetoed(&self, target: &dyn Sandboxed, name: &NormalizedName) -> Option<DenyReason> {
        if self.cfg.is_blocked_for_type(target, name) {
            return Some(DenyReason::BlockedForType);
        }
        if self.cfg.is_blocked_name(name) {
            return Some(DenyReason::BlockedName);
        }
        None
    }
}

impl SecurityPolicy for StrictPolicy {
    fn mode(&self) -> PolicyMode {
        PolicyMode::Strict
    }

    fn decide_method(&self, target: &dyn Sandboxed, method: &str) -> Decision {
        if is_engine_internal(target) {
            return Decision::Allowed;
        }

        let name = normalize(method);

        if !self.admitted(target, &name) {
            return Decision::Denied(Denial::new(
                target,
                method,
                MemberKind::Method,
                DenyReason::NotAllowListed,
            ));
        }

        match self.vetoed(target, &name) {
            Some(reason) => {
                Decision::Denied(Denial::new(target, method, MemberKind::Method, reason))
            }
            None => Decision::Allowed,
        }
    }

    /// Properties are not restricted in strict mode. This mirrors the behavior
    /// the policy was modeled on and is flagged for review in DESIGN.md.
    fn decide_property(&self, _target: &dyn Sandboxed, _property: &str) -> Decision {
        Decision::Allowed
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tplguard_core::capability::Capability;
    use tplguard_core::error::SandboxError;
    use tplguard_core::object::{Markup, TypeKey};

    trait Collection {}

    struct Items;
    struct File;
    struct Plain;
    struct Page;
    struct Open;

    impl Sandboxed for Items {
        fn conforms_to(&self) -> Vec<TypeKey> {
            vec![TypeKey::of::<dyn Collection>()]
        }
    }
    impl Sandboxed for File {}
    impl Sandboxed for Plain {}
    impl Sandboxed for Page {
        fn capability(&self) -> Capability {
            Capability::Methods(&["title", "url"])
        }
    }
    impl Sandboxed for Open {
        fn capability(&self) -> Capability {
            Capability::Any
        }
    }

    fn policy() -> StrictPolicy {
        let cfg = PolicyConfiguration::builder()
            .trust::<dyn Collection>()
            .trust::<File>()
            .allow_method("__toString")
            .block_methods(["__call", "bindEvent", "title"])
            .block_methods_for::<File, _, _>(["fromUrl", "fromFile"])
            .build()
            .unwrap();
        StrictPolicy::new(cfg)
    }

    #[test]
    fn trusted_collection_member_is_allowed() {
        assert!(policy().decide_method(&Items, "count").is_allowed());
    }

    #[test]
    fn unknown_object_is_denied_before_block_phase() {
        let d = policy().decide_method(&Plain, "__call");
        assert_eq!(d.denial().unwrap().reason, DenyReason::NotAllowListed);

        let d = policy().decide_method(&Plain, "save");
        assert_eq!(d.denial().unwrap().reason, DenyReason::NotAllowListed);
    }

    #[test]
    fn generic_allow_list_applies_to_any_object() {
        assert!(policy().decide_method(&Plain, "__TOSTRING").is_allowed());
    }

    #[test]
    fn block_for_type_overrides_trust() {
        let err = policy().check_method_allowed(&File, "fromUrl").unwrap_err();
        assert_eq!(
            err,
            SandboxError::MethodNotAllowed {
                type_name: "File".into(),
                method: "fromUrl".into(),
            }
        );
        assert!(policy().decide_method(&File, "getPath").is_allowed());
    }

    #[test]
    fn explicit_list_admits_only_declared_names() {
        assert!(policy().decide_method(&Page, "URL").is_allowed());
        assert!(!policy().decide_method(&Page, "delete").is_allowed());
        // declared, but vetoed by the generic block-list
        let d = policy().decide_method(&Page, "title");
        assert_eq!(d.denial().unwrap().reason, DenyReason::BlockedName);
    }

    #[test]
    fn wildcard_admits_anything_not_vetoed() {
        assert!(policy().decide_method(&Open, "anythingGoes").is_allowed());
        let d = policy().decide_method(&Open, "__Call");
        assert_eq!(d.denial().unwrap().reason, DenyReason::BlockedName);
    }

    #[test]
    fn markup_is_never_checked() {
        let html = Markup::new("<p>x</p>");
        assert!(policy().decide_method(&html, "__call").is_allowed());
    }

    #[test]
    fn properties_are_unrestricted() {
        assert!(policy().check_property_allowed(&Plain, "password").is_ok());
    }
}
