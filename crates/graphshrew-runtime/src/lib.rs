//! wasmtime host for blockchain-event mapping modules
//!
//! Loads a compiled mapping module, links the host imports it expects
//! (`env`, `index` and `ethereum` namespaces), and lets tests feed it events
//! and inspect the entities it stores.
//!
//! - [`module`]: compiling and start-section patching ([`GuestModule`])
//! - [`runtime`]: an initialized instance ([`MappingRuntime`])
//! - [`harness`]: record-level API driven by a schema ([`Harness`])
//! - [`abi`]: guest memory layouts
//! - [`imports`], [`host`], [`context`]: the host import surface
//! - [`store`]: the in-memory entity store
//! - [`coverage`]: line coverage from `env.trace`
//! - [`config`]: [`RuntimeConfig`]

pub mod abi;
pub mod config;
pub mod context;
pub mod coverage;
pub mod harness;
pub mod host;
pub mod imports;
pub mod module;
pub mod runtime;
pub mod store;

#[cfg(test)]
pub mod tests;

pub use abi::{Abi, Pointer};
pub use config::RuntimeConfig;
pub use coverage::CoverageReport;
pub use harness::Harness;
pub use host::CallHandler;
pub use module::{patch_start, GuestModule};
pub use runtime::{MappingRuntime, State};
pub use store::EntityStore;
