//! Declared sandbox capabilities and the probe that reads them.
//!
//! A type opts into broader access by returning a [`Capability`] from
//! [`Sandboxed::capability`]. The sandbox never infers callability from the
//! mere existence of a method.

use std::collections::BTreeSet;

use crate::name::{eq_normalized, normalize, NormalizedName};
use crate::object::Sandboxed;

/// Type-level sandbox contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capability {
    /// No declaration; the policy decides alone.
    #[default]
    None,
    /// Exactly these member names may be called from templates.
    Methods(&'static [&'static str]),
    /// Any member name may be called.
    Any,
}

/// Result of probing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    None,
    ExplicitList(BTreeSet<NormalizedName>),
    Wildcard,
}

impl Classification {
    /// True when the classification alone admits `name`.
    pub fn admits(&self, name: &NormalizedName) -> bool {
        match self {
            Classification::None => false,
            Classification::ExplicitList(names) => names.contains(name),
            Classification::Wildcard => true,
        }
    }
}

/// Reads capability declarations off sandboxed values.
pub struct CapabilityProbe;

impl CapabilityProbe {
    pub fn classify(target: &dyn Sandboxed) -> Classification {
        match target.capability() {
            Capability::Any => Classification::Wildcard,
            Capability::Methods(names) => {
                Classification::ExplicitList(names.iter().map(|n| normalize(n)).collect())
            }
            Capability::None => Classification::None,
        }
    }

    /// Non-allocating variant of `classify(target).admits(name)`.
    pub fn admits(target: &dyn Sandboxed, name: &NormalizedName) -> bool {
        match target.capability() {
            Capability::Any => true,
            Capability::Methods(names) => names.iter().any(|n| eq_normalized(n, name)),
            Capability::None => false,
        }
    }
}
