//! Immutable policy data shared by both engines.
//!
//! A [`PolicyConfiguration`] is assembled once through [`PolicyBuilder`] (or the
//! policy file loader) and never mutated afterwards. All member names are stored
//! normalized; all type sets are keyed by [`TypeKey`] and matched with
//! is-instance-of semantics.

use std::collections::{HashMap, HashSet};

use tplguard_core::error::{Result, SandboxError};
use tplguard_core::name::{normalize, NormalizedName};
use tplguard_core::object::{type_of, Sandboxed, TypeKey};

#[derive(Debug, Clone, Default)]
pub struct PolicyConfiguration {
    trusted_types: HashSet<TypeKey>,
    allowed_member_names: HashSet<NormalizedName>,
    blocked_member_names: HashSet<NormalizedName>,
    blocked_by_type: HashMap<TypeKey, HashSet<NormalizedName>>,
    // legacy engine only
    blocked_types: HashSet<TypeKey>,
    blocked_property_names: HashSet<NormalizedName>,
}

impl PolicyConfiguration {
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Instance of any trusted type.
    pub fn is_trusted(&self, target: &dyn Sandboxed) -> bool {
        any_in_lineage(target, |k| self.trusted_types.contains(k))
    }

    /// Instance of a type that blocks `name` specifically.
    pub fn is_blocked_for_type(&self, target: &dyn Sandboxed, name: &NormalizedName) -> bool {
        any_in_lineage(target, |k| {
            self.blocked_by_type
                .get(k)
                .is_some_and(|names| names.contains(name))
        })
    }

    /// Instance of a type whose every method is blocked.
    pub fn is_blocked_type(&self, target: &dyn Sandboxed) -> bool {
        any_in_lineage(target, |k| self.blocked_types.contains(k))
    }

    pub fn is_allowed_name(&self, name: &NormalizedName) -> bool {
        self.allowed_member_names.contains(name)
    }

    pub fn is_blocked_name(&self, name: &NormalizedName) -> bool {
        self.blocked_member_names.contains(name)
    }

    pub fn is_blocked_property(&self, name: &NormalizedName) -> bool {
        self.blocked_property_names.contains(name)
    }

    /// True when legacy-only data is present (ignored by the strict engine).
    pub fn has_legacy_rules(&self) -> bool {
        !self.blocked_types.is_empty() || !self.blocked_property_names.is_empty()
    }

    pub fn trusted_types(&self) -> impl Iterator<Item = &TypeKey> {
        self.trusted_types.iter()
    }

    pub fn allowed_member_names(&self) -> impl Iterator<Item = &NormalizedName> {
        self.allowed_member_names.iter()
    }

    pub fn blocked_member_names(&self) -> impl Iterator<Item = &NormalizedName> {
        self.blocked_member_names.iter()
    }

    pub fn blocked_types(&self) -> impl Iterator<Item = &TypeKey> {
        self.blocked_types.iter()
    }
}

fn any_in_lineage(target: &dyn Sandboxed, mut pred: impl FnMut(&TypeKey) -> bool) -> bool {
    pred(&type_of(target)) || target.conforms_to().iter().any(pred)
}

/// Assembles a [`PolicyConfiguration`]. This is the only mutation point.
#[derive(Debug, Default)]
pub struct PolicyBuilder {
    cfg: PolicyConfiguration,
}

impl PolicyBuilder {
    /// Trust every member of `T` (subject to the block phase).
    pub fn trust<T: ?Sized + 'static>(self) -> Self {
        self.trust_key(TypeKey::of::<T>())
    }

    pub fn trust_key(mut self, key: TypeKey) -> Self {
        self.cfg.trusted_types.insert(key);
        self
    }

    pub fn allow_method(mut self, name: &str) -> Self {
        self.cfg.allowed_member_names.insert(normalize(name));
        self
    }

    pub fn allow_methods<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().fold(self, |b, n| b.allow_method(n.as_ref()))
    }

    pub fn block_method(mut self, name: &str) -> Self {
        self.cfg.blocked_member_names.insert(normalize(name));
        self
    }

    pub fn block_methods<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().fold(self, |b, n| b.block_method(n.as_ref()))
    }

    /// Block `names` on instances of `T`, even when `T` is otherwise trusted.
    pub fn block_methods_for<T, I, S>(self, names: I) -> Self
    where
        T: ?Sized + 'static,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.block_methods_for_key(TypeKey::of::<T>(), names)
    }

    pub fn block_methods_for_key<I, S>(mut self, key: TypeKey, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.cfg
            .blocked_by_type
            .entry(key)
            .or_default()
            .extend(names.into_iter().map(|n| normalize(n.as_ref())));
        self
    }

    /// Block every method of `T` (legacy engine).
    pub fn block_type<T: ?Sized + 'static>(self) -> Self {
        self.block_type_key(TypeKey::of::<T>())
    }

    pub fn block_type_key(mut self, key: TypeKey) -> Self {
        self.cfg.blocked_types.insert(key);
        self
    }

    /// Block a property read (legacy engine).
    pub fn block_property(mut self, name: &str) -> Self {
        self.cfg.blocked_property_names.insert(normalize(name));
        self
    }

    pub fn block_properties<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().fold(self, |b, n| b.block_property(n.as_ref()))
    }

    /// Union another configuration into this one.
    pub fn merge(mut self, other: PolicyConfiguration) -> Self {
        let cfg = &mut self.cfg;
        cfg.trusted_types.extend(other.trusted_types);
        cfg.allowed_member_names.extend(other.allowed_member_names);
        cfg.blocked_member_names.extend(other.blocked_member_names);
        for (key, names) in other.blocked_by_type {
            cfg.blocked_by_type.entry(key).or_default().extend(names);
        }
        cfg.blocked_types.extend(other.blocked_types);
        cfg.blocked_property_names.extend(other.blocked_property_names);
        self
    }

    pub fn build(self) -> Result<PolicyConfiguration> {
        let cfg = self.cfg;
        let all_names = cfg
            .allowed_member_names
            .iter()
            .chain(&cfg.blocked_member_names)
            .chain(&cfg.blocked_property_names)
            .chain(cfg.blocked_by_type.values().flatten());
        for name in all_names {
            validate_member_name(name.as_str())?;
        }
        Ok(cfg)
    }
}

/// Member names must be non-empty and free of whitespace.
pub fn validate_member_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SandboxError::InvalidConfig("member name must not be empty".into()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(SandboxError::InvalidConfig(format!(
            "member name must not contain whitespace: {name:?}"
        )));
    }
    Ok(())
}
