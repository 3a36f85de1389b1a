//! An instantiated mapping module and the host state it runs against

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use graphshrew_support::entity::Entity;
use graphshrew_support::error::Error;
use graphshrew_support::ethereum::{Call, Event, Value};
use wasmtime::{Instance, Linker, Store, StoreLimits, StoreLimitsBuilder};

use crate::abi::{Abi, Pointer};
use crate::config::RuntimeConfig;
use crate::context::HostContext;
use crate::coverage::CoverageReport;
use crate::imports::setup_linker;
use crate::module::GuestModule;

pub(crate) fn lock_err<T>(err: std::sync::PoisonError<T>) -> anyhow::Error {
    anyhow!("Mutex lock error: {}", err)
}

/// Per-instance store data
pub struct State {
    limits: StoreLimits,
    pub(crate) abi: Option<Abi>,
}

impl State {
    pub fn new() -> Self {
        State {
            limits: StoreLimitsBuilder::new()
                .memories(usize::MAX)
                .tables(usize::MAX)
                .instances(usize::MAX)
                .build(),
            abi: None,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// A mapping module that has been instantiated, bound to its memory and
/// allocator, and initialized.
///
/// The only way to get one is through [`MappingRuntime::instantiate`] (or
/// [`MappingRuntime::load`]), which runs the module's start function exactly
/// once before returning.
pub struct MappingRuntime {
    store: Store<State>,
    instance: Instance,
    abi: Abi,
    context: Arc<Mutex<HostContext>>,
}

impl MappingRuntime {
    /// Compile and instantiate the module at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::instantiate(&GuestModule::from_file(path)?)
    }

    pub fn load_with_config(path: impl AsRef<Path>, config: RuntimeConfig) -> Result<Self> {
        Self::instantiate(&GuestModule::from_file_with_config(path, config)?)
    }

    pub fn instantiate(module: &GuestModule) -> Result<Self> {
        let config = &module.config;
        let context = Arc::new(Mutex::new(HostContext::new()));

        let mut store = Store::new(&module.engine, State::new());
        store.limiter(|state| &mut state.limits);

        let mut linker = Linker::<State>::new(&module.engine);
        setup_linker(context.clone(), &mut linker).context("Failed to setup host imports")?;
        if config.trap_unknown_imports {
            linker.define_unknown_imports_as_traps(&module.module)?;
        }

        let instance = linker
            .instantiate(&mut store, &module.module)
            .context("Failed to instantiate guest module")?;

        let memory = instance
            .get_memory(&mut store, &config.memory_export)
            .ok_or_else(|| anyhow!("guest module does not export memory '{}'", config.memory_export))?;
        let allocator = instance
            .get_typed_func::<u32, u32>(&mut store, &config.allocate_export)
            .with_context(|| format!("guest module allocator '{}'", config.allocate_export))?;
        let abi = Abi::new(memory, allocator);
        store.data_mut().abi = Some(abi.clone());

        if module.has_start {
            let start = instance
                .get_typed_func::<(), ()>(&mut store, &config.start_export)
                .with_context(|| format!("guest module start export '{}'", config.start_export))?;
            start
                .call(&mut store, ())
                .context("running guest module start function")?;
            log::debug!("ran guest start function");
        }

        Ok(MappingRuntime {
            store,
            instance,
            abi,
            context,
        })
    }

    fn context(&self) -> Result<MutexGuard<'_, HostContext>> {
        self.context.lock().map_err(lock_err)
    }

    /// Write `event` into guest memory and run the export `handler` on it.
    pub fn handle_event(&mut self, handler: &str, event: &Event) -> Result<()> {
        let func = self
            .instance
            .get_typed_func::<u32, ()>(&mut self.store, handler)
            .with_context(|| format!("guest module has no handler '{}'", handler))?;
        let ptr = self
            .abi
            .write_event(&mut self.store, event)
            .with_context(|| format!("encoding event for {}", handler))?;
        log::debug!("invoking {} with event at {:#x}", handler, ptr);
        func.call(&mut self.store, ptr)
            .with_context(|| format!("running handler {}", handler))
    }

    /// Call an exported `(i32) -> ()` function with a raw argument.
    pub fn call_export(&mut self, name: &str, arg: u32) -> Result<()> {
        let func = self
            .instance
            .get_typed_func::<u32, ()>(&mut self.store, name)
            .with_context(|| format!("guest module has no export '{}'", name))?;
        func.call(&mut self.store, arg)
            .with_context(|| format!("running {}", name))
    }

    pub fn get_entity(&self, entity_type: &str, id: &str) -> Result<Option<Entity>> {
        Ok(self.context()?.store.get(entity_type, id))
    }

    pub fn set_entity(&mut self, entity_type: &str, id: &str, entity: Entity) -> Result<()> {
        self.context()?.store.set(entity_type, id, entity);
        Ok(())
    }

    pub fn remove_entity(&mut self, entity_type: &str, id: &str) -> Result<Option<Entity>> {
        Ok(self.context()?.store.remove(entity_type, id))
    }

    pub fn entity_ids(&self, entity_type: &str) -> Result<Vec<String>> {
        Ok(self.context()?.store.ids(entity_type))
    }

    /// Install the handler answering `ethereum.call`, replacing any previous one.
    pub fn set_call_handler<F>(&mut self, handler: F) -> Result<()>
    where
        F: FnMut(&Call) -> std::result::Result<Option<Vec<Value>>, Error> + Send + 'static,
    {
        self.context()?.call_handler = Some(Box::new(handler));
        log::debug!("installed ethereum call handler");
        Ok(())
    }

    pub fn clear_call_handler(&mut self) -> Result<()> {
        self.context()?.call_handler = None;
        Ok(())
    }

    /// Start recording `env.trace` line hits into `report`.
    pub fn enable_coverage(&mut self, report: CoverageReport) -> Result<()> {
        self.context()?.coverage = Some(report);
        Ok(())
    }

    pub fn take_coverage(&mut self) -> Result<Option<CoverageReport>> {
        Ok(self.context()?.coverage.take())
    }

    pub fn abi(&self) -> &Abi {
        &self.abi
    }

    pub fn store(&self) -> &Store<State> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store<State> {
        &mut self.store
    }

    /// Encode an event without running a handler.
    pub fn write_event(&mut self, event: &Event) -> Result<Pointer> {
        Ok(self.abi.write_event(&mut self.store, event)?)
    }
}
