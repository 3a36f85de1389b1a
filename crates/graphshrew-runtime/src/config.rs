//! Runtime configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming the compiled mappings module used by tests.
pub const MAPPINGS_WASM_ENV: &str = "GRAPHSHREW_MAPPINGS_WASM";

/// Names and engine switches used when loading a mapping module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Exported linear memory
    pub memory_export: String,
    /// Exported arena allocator, `(size: u32) -> ptr`
    pub allocate_export: String,
    /// Export the start section is rewritten into
    pub start_export: String,
    /// Link imports the host does not provide as traps instead of failing
    /// instantiation
    pub trap_unknown_imports: bool,
    /// Canonicalize NaNs produced by float operations
    pub nan_canonicalization: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            memory_export: "memory".to_string(),
            allocate_export: "memory.allocate".to_string(),
            start_export: "__start".to_string(),
            trap_unknown_imports: false,
            nan_canonicalization: true,
        }
    }
}

impl RuntimeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing runtime config")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading runtime config {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing runtime config")
    }

    pub(crate) fn engine_config(&self) -> wasmtime::Config {
        let mut config = wasmtime::Config::default();
        config.cranelift_nan_canonicalization(self.nan_canonicalization);
        config
    }
}

/// Path of the mappings module from [`MAPPINGS_WASM_ENV`], if set.
pub fn mappings_wasm_path() -> Option<PathBuf> {
    std::env::var_os(MAPPINGS_WASM_ENV).map(PathBuf::from)
}
