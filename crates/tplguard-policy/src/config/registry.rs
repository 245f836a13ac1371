//! Name -> type resolution for policy files.
//!
//! The host registers the types a policy file may mention. Names are resolved
//! once at load time; decisions only ever see [`TypeKey`]s.

use std::collections::HashMap;

use tplguard_core::error::{Result, SandboxError};
use tplguard_core::object::TypeKey;

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    by_name: HashMap<String, TypeKey>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` (a concrete type or `dyn Trait`) under `name`.
    pub fn register<T: ?Sized + 'static>(self, name: &str) -> Self {
        self.register_key(name, TypeKey::of::<T>())
    }

    pub fn register_key(mut self, name: &str, key: TypeKey) -> Self {
        if let Some(prev) = self.by_name.insert(name.to_string(), key) {
            if prev != key {
                tracing::warn!(name, previous = %prev, now = %key, "type registry entry replaced");
            }
        }
        self
    }

    pub fn resolve(&self, name: &str) -> Result<TypeKey> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SandboxError::UnknownType(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    trait Paginator {}
    struct File;

    #[test]
    fn resolves_registered_names_only() {
        let reg = TypeRegistry::new()
            .register::<File>("File")
            .register::<dyn Paginator>("Paginator");
        assert_eq!(reg.resolve("File").unwrap(), TypeKey::of::<File>());
        assert_eq!(reg.resolve("Paginator").unwrap(), TypeKey::of::<dyn Paginator>());
        assert_eq!(reg.len(), 2);

        let err = reg.resolve("file").unwrap_err();
        assert_eq!(err.client_code().as_str(), "UNKNOWN_TYPE");
    }
}
