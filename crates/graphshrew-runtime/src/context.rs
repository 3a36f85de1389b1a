//! Mutable host state shared by the imports of one runtime

use graphshrew_support::error::{Error, Result};
use graphshrew_support::ethereum::{Call, Value};

use crate::coverage::CoverageReport;
use crate::host::CallHandler;
use crate::store::EntityStore;

/// State the host imports read and mutate while a handler runs
#[derive(Default)]
pub struct HostContext {
    pub store: EntityStore,
    pub call_handler: Option<CallHandler>,
    pub coverage: Option<CoverageReport>,
}

impl HostContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch a guest contract call to the installed handler.
    pub fn call(&mut self, call: &Call) -> Result<Option<Vec<Value>>> {
        match self.call_handler.as_mut() {
            Some(handler) => handler(call),
            None => Err(Error::UnexpectedCall {
                contract: call.contract_name.clone(),
                function: call.function_name.clone(),
            }),
        }
    }

    /// Record a trace emitted by an instrumented guest.
    pub fn trace(&mut self, message: &str, args: &[f64]) -> anyhow::Result<()> {
        match self.coverage.as_mut() {
            Some(report) if args.len() == 2 => report.record(message, args[0] as u32, args[1] as u32),
            _ => {
                log::debug!(target: crate::host::GUEST_LOG_TARGET, "trace: {} {:?}", message, args);
                Ok(())
            }
        }
    }
}
