//! Runtime type identity for values reachable from template code.
//!
//! Policies never compare type name strings. Every value exposes a
//! [`TypeKey`] (backed by `TypeId`) for its concrete type, and may declare
//! further keys it is an instance of, such as a parent model type or a trait
//! object standing in for an interface.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::capability::Capability;

/// Identity of a concrete type or of a trait-object "interface".
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for `T`. Works for trait objects too: `TypeKey::of::<dyn Paginator>()`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_name(std::any::type_name::<T>()),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Diagnostic name. Never used for matching.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// "app::models::File" -> "File". Trait objects and generic types keep their
// full path.
fn short_name(full: &'static str) -> &'static str {
    if full.contains('<') || full.starts_with("dyn ") {
        return full;
    }
    full.rsplit_once("::").map_or(full, |(_, last)| last)
}

/// Concrete runtime type of a value. Implemented for every `'static` type.
pub trait RuntimeType {
    fn runtime_type(&self) -> TypeKey;
}

impl<T: Any> RuntimeType for T {
    fn runtime_type(&self) -> TypeKey {
        TypeKey::of::<T>()
    }
}

/// A value the expression evaluator may dereference from template code.
///
/// Implementing this trait does not grant anything by itself. Access is still
/// decided by the active policy; the trait only lets the value describe its
/// type lineage and opt into a declared [`Capability`].
pub trait Sandboxed: RuntimeType + Send + Sync {
    /// Types this value is an instance of besides its concrete type.
    fn conforms_to(&self) -> Vec<TypeKey> {
        Vec::new()
    }

    /// Declared sandbox capability of the type.
    fn capability(&self) -> Capability {
        Capability::None
    }
}

/// Concrete runtime type of a sandboxed value.
pub fn type_of(target: &dyn Sandboxed) -> TypeKey {
    RuntimeType::runtime_type(target)
}

/// is-instance-of check: concrete type match or declared conformance.
pub fn is_instance_of(target: &dyn Sandboxed, key: &TypeKey) -> bool {
    type_of(target) == *key || target.conforms_to().iter().any(|k| k == key)
}

/// Rendered output already marked safe by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Sandboxed for Markup {}

/// Handle to a compiled template exposed to template code (`include`, `block`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    name: String,
}

impl CompiledTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Sandboxed for CompiledTemplate {}

/// Engine-owned wrappers bypass member checks; they are not user data.
pub fn is_engine_internal(target: &dyn Sandboxed) -> bool {
    let ty = type_of(target);
    ty == TypeKey::of::<Markup>() || ty == TypeKey::of::<CompiledTemplate>()
}
