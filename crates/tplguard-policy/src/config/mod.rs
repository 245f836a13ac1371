//! Policy file loader (strict parsing).
//!
//! The hosting application loads its policy once at template subsystem
//! start-up. YAML is the primary format; JSON is accepted for hosts that
//! already carry their settings as JSON.

pub mod registry;
pub mod schema;

use std::fs;
use std::path::Path;

use tplguard_core::error::{Result, SandboxError};

use crate::runtime::SandboxConfig;

pub use registry::TypeRegistry;
pub use schema::PolicyFile;

pub fn load_from_file(path: impl AsRef<Path>, registry: &TypeRegistry) -> Result<SandboxConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        SandboxError::Internal(format!("read policy file {} failed: {e}", path.display()))
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_from_json_str(&s, registry),
        _ => load_from_str(&s, registry),
    }
}

pub fn load_from_str(s: &str, registry: &TypeRegistry) -> Result<SandboxConfig> {
    let file: PolicyFile = serde_yaml::from_str(s)
        .map_err(|e| SandboxError::InvalidConfig(format!("invalid yaml: {e}")))?;
    finish(file, registry)
}

pub fn load_from_json_str(s: &str, registry: &TypeRegistry) -> Result<SandboxConfig> {
    let file: PolicyFile = serde_json::from_str(s)
        .map_err(|e| SandboxError::InvalidConfig(format!("invalid json: {e}")))?;
    finish(file, registry)
}

fn finish(file: PolicyFile, registry: &TypeRegistry) -> Result<SandboxConfig> {
    file.validate()?;
    let cfg = file.compile(registry)?;
    tracing::debug!(
        mode = cfg.mode.as_str(),
        presets = file.presets.len(),
        trusted_types = file.trusted_types.len(),
        "policy file loaded"
    );
    Ok(cfg)
}
