//! Line coverage collected from `env.trace` calls
//!
//! Instrumented mapping sources call `trace(file, 2, from_line, to_line, ..)`
//! at the start of each covered block. The report follows the coveralls
//! source file format: one entry per source file with a digest of its
//! contents and a hit count per line, `null` for lines that cannot be hit.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub source_digest: String,
    pub coverage: Vec<Option<u64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub service_name: String,
    pub source_files: Vec<SourceFile>,
}

impl CoverageReport {
    pub fn new(service_name: impl Into<String>) -> Self {
        CoverageReport {
            service_name: service_name.into(),
            source_files: Vec::new(),
        }
    }

    /// Register a source file; `instrumented[i]` tells whether line `i` can
    /// be hit.
    pub fn add_file(&mut self, name: impl Into<String>, source: &[u8], instrumented: &[bool]) {
        self.source_files.push(SourceFile {
            name: name.into(),
            source_digest: hex::encode(Sha256::digest(source)),
            coverage: instrumented
                .iter()
                .map(|&line| if line { Some(0) } else { None })
                .collect(),
        });
    }

    pub fn add_source_file(&mut self, path: impl AsRef<Path>, instrumented: &[bool]) -> Result<()> {
        let path = path.as_ref();
        let source = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        self.add_file(path.display().to_string(), &source, instrumented);
        Ok(())
    }

    /// Count one hit on every line in `from..=to` of `file`. The range must
    /// lie within the lines registered for the file.
    pub fn record(&mut self, file: &str, from: u32, to: u32) -> Result<()> {
        if from > to {
            return Err(anyhow!("empty line range {}..{} in {}", from, to, file));
        }
        let source = self
            .source_files
            .iter_mut()
            .find(|source| source.name == file)
            .ok_or_else(|| anyhow!("Could not find coverage entry for {}", file))?;
        let lines = source
            .coverage
            .get_mut(from as usize..=to as usize)
            .ok_or_else(|| anyhow!("line {} outside {}", to, file))?;
        for hits in lines {
            *hits = Some(hits.unwrap_or(0) + 1);
        }
        Ok(())
    }

    pub fn hits(&self, file: &str, line: usize) -> Option<u64> {
        self.source_files
            .iter()
            .find(|source| source.name == file)?
            .coverage
            .get(line)
            .copied()
            .flatten()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("serializing coverage report")
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("writing coverage report {}", path.display()))
    }
}
