use std::collections::BTreeMap;

use serde::Deserialize;
use tplguard_core::access::PolicyMode;
use tplguard_core::error::{Result, SandboxError};

use super::registry::TypeRegistry;
use crate::policy::configuration::validate_member_name;
use crate::policy::{PolicyConfiguration, Preset};
use crate::runtime::SandboxConfig;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    pub version: u32,

    #[serde(default)]
    pub mode: PolicyMode,

    /// Rule bundles merged before the explicit lists.
    #[serde(default)]
    pub presets: Vec<Preset>,

    #[serde(default)]
    pub trusted_types: Vec<String>,

    #[serde(default)]
    pub allowed_methods: Vec<String>,

    #[serde(default)]
    pub blocked_methods: Vec<String>,

    /// type name -> method names
    #[serde(default)]
    pub blocked_by_type: BTreeMap<String, Vec<String>>,

    /// Legacy mode only.
    #[serde(default)]
    pub blocked_types: Vec<String>,

    /// Legacy mode only.
    #[serde(default)]
    pub blocked_properties: Vec<String>,
}

impl PolicyFile {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SandboxError::UnsupportedVersion);
        }

        let names = self
            .allowed_methods
            .iter()
            .chain(&self.blocked_methods)
            .chain(&self.blocked_properties)
            .chain(self.blocked_by_type.values().flatten());
        for name in names {
            validate_member_name(name)?;
        }

        for (ty, methods) in &self.blocked_by_type {
            if methods.is_empty() {
                return Err(SandboxError::InvalidConfig(format!(
                    "blocked_by_type.{ty} must list at least one method"
                )));
            }
        }

        if self.mode == PolicyMode::Strict {
            if !self.blocked_types.is_empty() {
                return Err(SandboxError::InvalidConfig(
                    "blocked_types is only valid with mode: legacy".into(),
                ));
            }
            if !self.blocked_properties.is_empty() {
                return Err(SandboxError::InvalidConfig(
                    "blocked_properties is only valid with mode: legacy".into(),
                ));
            }
        }

        Ok(())
    }

    /// Resolve type names and compile the lists. Call after `validate`.
    pub fn compile(&self, registry: &TypeRegistry) -> Result<SandboxConfig> {
        let mut builder = PolicyConfiguration::builder();

        for preset in &self.presets {
            builder = preset.apply(self.mode, builder);
        }

        for name in &self.trusted_types {
            builder = builder.trust_key(registry.resolve(name)?);
        }
        for (ty, methods) in &self.blocked_by_type {
            builder = builder.block_methods_for_key(registry.resolve(ty)?, methods);
        }
        for name in &self.blocked_types {
            builder = builder.block_type_key(registry.resolve(name)?);
        }

        let policy = builder
            .allow_methods(&self.allowed_methods)
            .block_methods(&self.blocked_methods)
            .block_properties(&self.blocked_properties)
            .build()?;

        Ok(SandboxConfig {
            mode: self.mode,
            policy,
        })
    }
}
