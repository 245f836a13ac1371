//! Named rule bundles a policy file can pull in with `presets: [...]`.

use serde::Deserialize;
use tplguard_core::access::PolicyMode;

use super::configuration::PolicyBuilder;

/// Members that render an object as text.
pub const CMS_ALLOWED_METHODS: &[&str] = &["__toString", "toHtml"];

pub const CMS_BLOCKED_METHODS: &[&str] = &[
    // magic dispatch
    "__call",
    "__callStatic",
    "__get",
    "__set",
    "__isset",
    "__unset",
    "__invoke",
    // dynamic extension
    "addDynamicMethod",
    "addDynamicProperty",
    "extend",
    "extendClassWith",
    "implementClassWith",
    "getClassMethods",
    // events
    "bindEvent",
    "bindEventOnce",
    "unbindEvent",
    "fireEvent",
    // template engine internals
    "getTwig",
    "setTwig",
    "getLoader",
    "setLoader",
    // persistence and mutation
    "insert",
    "update",
    "delete",
    "forceDelete",
    "save",
    "saveQuietly",
    "push",
    "truncate",
    "fill",
    "forceFill",
    "write",
    "put",
    "setAttribute",
];

pub const CMS_BLOCKED_PROPERTIES: &[&str] = &[
    "password",
    "persist_code",
    "reset_password_code",
    "activation_code",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Cms,
}

impl Preset {
    /// Add the bundle's rules. Property rules only apply to the legacy engine.
    pub fn apply(self, mode: PolicyMode, builder: PolicyBuilder) -> PolicyBuilder {
        match self {
            Preset::Cms => {
                let builder = builder
                    .allow_methods(CMS_ALLOWED_METHODS)
                    .block_methods(CMS_BLOCKED_METHODS);
                match mode {
                    PolicyMode::Legacy => builder.block_properties(CMS_BLOCKED_PROPERTIES),
                    PolicyMode::Strict => builder,
                }
            }
        }
    }
}
