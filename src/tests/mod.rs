//! End-to-end test suite
//!
//! Every test instantiates the guest from [`guest::mappings_wat`], compiled
//! once per process, and talks to it through [`Mappings`].

use anyhow::Result;
use graphshrew_dex::Mappings;
use graphshrew_runtime::{GuestModule, RuntimeConfig};
use graphshrew_support::ethereum::{Address, Hash};
use once_cell::sync::OnceCell;


#[cfg(test)]
pub mod deposit_test;
#[cfg(test)]
pub mod entity_test;
#[cfg(test)]
pub mod order_test;
#[cfg(test)]
pub mod runtime_test;

static MODULE: OnceCell<GuestModule> = OnceCell::new();

/// Test configuration and utilities
pub struct TestConfig {
    pub runtime: RuntimeConfig,
}

impl TestConfig {
    pub fn new() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
        }
    }

    /// The mappings guest, compiled on first use with the first caller's
    /// runtime config.
    pub fn module(&self) -> Result<&'static GuestModule> {
        MODULE.get_or_try_init(|| {
            GuestModule::compile_with_config(guest::mappings_wat().as_bytes(), self.runtime.clone())
        })
    }

    /// A fresh instance of the mappings guest with an empty store.
    pub fn create_mappings(&self) -> Result<Mappings> {
        Mappings::instantiate(self.module()?)
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
pub fn mappings() -> Mappings {
    init_logger();
    TestConfig::new().create_mappings().unwrap()
}

pub fn address(byte: u8) -> Address {
    [byte; 20]
}

pub fn hash(byte: u8) -> Hash {
    [byte; 32]
}

/// `0x`-prefixed hex of `len` copies of `byte`.
pub fn hex(byte: u8, len: usize) -> String {
    format!("0x{}", format!("{:02x}", byte).repeat(len))
}
