//! Policy layer (configuration, presets, and both decision engines).
//!
//! Configuration is compiled once into fast lookup sets; the engines are pure
//! reads over it and are selected per render configuration through
//! [`SecurityPolicy`](tplguard_core::SecurityPolicy).

pub mod configuration;
pub mod legacy;
pub mod presets;
pub mod strict;

pub use configuration::{PolicyBuilder, PolicyConfiguration};
pub use legacy::LegacyPolicy;
pub use presets::Preset;
pub use strict::StrictPolicy;
