//! Compiling mapping modules
//!
//! Mapping modules are compiled with a start section that already calls
//! host imports (for instance `bigInt.pow` while building constants), and
//! those imports need the module's exported memory and allocator, which do
//! not exist until instantiation has finished. Before compiling, the start
//! section is rewritten into a plain export that the runtime invokes once the
//! codec is bound.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use wasmtime::{Engine, Module};

use crate::config::RuntimeConfig;

/// Default name of the export the start section is rewritten into.
pub const START_EXPORT: &str = "__start";

/// Rewrite the start section of `wasm` into an export named `__start`.
///
/// A module without a start section is returned unchanged.
pub fn patch_start(wasm: &[u8]) -> Result<Vec<u8>> {
    Ok(rewrite_start(wasm, START_EXPORT)?.unwrap_or_else(|| wasm.to_vec()))
}

/// Rewrite the start section into an export named `export`, or `None` if
/// the module has no start section.
pub fn rewrite_start(wasm: &[u8], export: &str) -> Result<Option<Vec<u8>>> {
    let text = wasmprinter::print_bytes(wasm).context("disassembling guest module")?;

    let mut found = false;
    let mut patched = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed = line.trim();
        if !found && trimmed.starts_with("(start ") && trimmed.ends_with(')') {
            let func = trimmed["(start ".len()..trimmed.len() - 1].trim();
            patched.push_str(&format!("  (export \"{}\" (func {}))", export, func));
            found = true;
        } else {
            patched.push_str(line);
        }
        patched.push('\n');
    }

    if !found {
        return Ok(None);
    }
    log::debug!("rewrote start section into export {}", export);
    let wasm = wat::parse_str(&patched).context("reassembling patched guest module")?;
    Ok(Some(wasm))
}

/// A compiled mapping module, ready to be instantiated any number of times.
#[derive(Clone)]
pub struct GuestModule {
    pub(crate) engine: Engine,
    pub(crate) module: Module,
    pub(crate) has_start: bool,
    pub(crate) config: RuntimeConfig,
}

impl GuestModule {
    /// Compile a module from binary or text format with the default config.
    pub fn compile(wasm: &[u8]) -> Result<Self> {
        Self::compile_with_config(wasm, RuntimeConfig::default())
    }

    pub fn compile_with_config(wasm: &[u8], config: RuntimeConfig) -> Result<Self> {
        let binary = if wasm.starts_with(b"\0asm") {
            wasm.to_vec()
        } else {
            let text = std::str::from_utf8(wasm).context("guest module is neither wasm nor text")?;
            wat::parse_str(text).context("parsing guest module text")?
        };

        let (binary, has_start) = match rewrite_start(&binary, &config.start_export)? {
            Some(patched) => (patched, true),
            None => (binary, false),
        };

        let engine = Engine::new(&config.engine_config())
            .map_err(|e| anyhow!("Failed to create engine: {:?}", e))?;
        let module = Module::new(&engine, &binary).context("compiling guest module")?;
        log::info!(
            "compiled guest module ({} bytes, start section: {})",
            binary.len(),
            has_start
        );

        Ok(GuestModule {
            engine,
            module,
            has_start,
            config,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_config(path, RuntimeConfig::default())
    }

    pub fn from_file_with_config(path: impl AsRef<Path>, config: RuntimeConfig) -> Result<Self> {
        let path = path.as_ref();
        let wasm = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        Self::compile_with_config(&wasm, config)
            .with_context(|| format!("loading guest module {}", path.display()))
    }

    pub fn has_start(&self) -> bool {
        self.has_start
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn exports(&self) -> impl Iterator<Item = &str> {
        self.module.exports().map(|export| export.name())
    }
}
