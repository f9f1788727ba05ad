//! Toolchain registry

use rel_core::error::{Result, ToolchainError};
use rel_core::toolchain::Toolchain;

use crate::cargo::CargoToolchain;
use crate::go::GoToolchain;

/// Ordered list of toolchains to probe
pub struct ToolchainRegistry {
    toolchains: Vec<Box<dyn Toolchain>>,
}

impl ToolchainRegistry {
    /// Registry with all built-in toolchains in default order
    pub fn new() -> Self {
        Self {
            toolchains: vec![Box::new(CargoToolchain::new()), Box::new(GoToolchain::new())],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            toolchains: Vec::new(),
        }
    }

    /// Registry holding the named toolchains in the given order
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut registry = Self::empty();
        for name in names {
            let toolchain: Box<dyn Toolchain> = match name.as_ref() {
                "cargo" => Box::new(CargoToolchain::new()),
                "go" => Box::new(GoToolchain::new()),
                other => return Err(ToolchainError::UnknownToolchain(other.to_string()).into()),
            };
            registry.toolchains.push(toolchain);
        }
        Ok(registry)
    }

    /// All toolchains in probing order
    pub fn all(&self) -> &[Box<dyn Toolchain>] {
        &self.toolchains
    }

    /// Toolchain names in probing order
    pub fn names(&self) -> Vec<&'static str> {
        self.toolchains.iter().map(|t| t.name()).collect()
    }
}

impl Default for ToolchainRegistry {
    fn default() -> Self {
        Self::new()
    }
}
