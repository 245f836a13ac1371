//! Decision vectors for both engines, driven by `tests/vectors/decisions.json`
//! against the policies in `tests/vectors/{strict,legacy}.yaml`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::fs;

use serde::Deserialize;
use tplguard_core::{MemberAccess, SecurityPolicy};
use tplguard_policy::SandboxRuntime;

#[derive(Debug, Deserialize)]
struct DecisionVector {
    description: String,
    policy: String,
    target: String,
    kind: String,
    member: String,
    expect: String,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

fn runtime(name: &str) -> SandboxRuntime {
    SandboxRuntime::from_file(format!("tests/vectors/{name}.yaml"), &common::registry())
        .unwrap_or_else(|e| panic!("policy {name} failed to load: {e}"))
}

#[test]
fn decision_vectors() {
    let raw = fs::read_to_string("tests/vectors/decisions.json").unwrap();
    let vectors: Vec<DecisionVector> = serde_json::from_str(&raw).unwrap();
    assert!(!vectors.is_empty());

    let strict = runtime("strict");
    let legacy = runtime("legacy");

    for v in &vectors {
        let policy: &dyn SecurityPolicy = match v.policy.as_str() {
            "strict" => &strict,
            "legacy" => &legacy,
            other => panic!("unknown policy {other}"),
        };
        let target = common::target(&v.target);
        let access = match v.kind.as_str() {
            "method" => MemberAccess::method(target.as_ref(), &v.member),
            "property" => MemberAccess::property(target.as_ref(), &v.member),
            other => panic!("unknown kind {other}"),
        };
        let label = format!("{} ({} {}.{})", v.description, v.policy, v.target, v.member);

        let decision = access.decide(policy);
        let result = access.check(policy);

        match v.expect.as_str() {
            "allow" => {
                assert!(decision.is_allowed(), "{label}: expected allow, got {decision:?}");
                assert!(result.is_ok(), "{label}");
            }
            "deny" => {
                let denial = decision
                    .denial()
                    .unwrap_or_else(|| panic!("{label}: expected deny"));
                assert_eq!(Some(denial.reason.as_str()), v.reason.as_deref(), "{label}");
                assert_eq!(denial.member, v.member, "{label}: member must not be normalized");
                assert_eq!(denial.type_name, v.target, "{label}");

                let err = result.expect_err(&label);
                assert_eq!(Some(err.client_code().as_str()), v.code.as_deref(), "{label}");
                assert!(err.is_security_violation());
                assert_eq!(err.member(), Some(v.member.as_str()));
            }
            other => panic!("unknown expectation {other}"),
        }
    }
}

#[test]
fn scenario_file_from_url_error_payload() {
    let strict = runtime("strict");
    let err = strict
        .check_method_allowed(&common::File, "fromUrl")
        .unwrap_err();
    assert_eq!(
        err,
        tplguard_core::SandboxError::MethodNotAllowed {
            type_name: "File".into(),
            method: "fromUrl".into(),
        }
    );
}
