//! Record-level test API over a [`MappingRuntime`]

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use graphshrew_support::data::Record;
use graphshrew_support::definition::Schema;
use graphshrew_support::entities::{from_data, to_data};
use graphshrew_support::error::Error;
use graphshrew_support::ethereum::{Call, Value};
use graphshrew_support::events::{to_event, Metadata};

use crate::module::GuestModule;
use crate::runtime::MappingRuntime;

/// Drives a mapping module with native records, converting them through
/// the event and entity definitions of a [`Schema`].
pub struct Harness {
    runtime: MappingRuntime,
    schema: Arc<Schema>,
}

impl Harness {
    pub fn load(path: impl AsRef<Path>, schema: Arc<Schema>) -> Result<Self> {
        Ok(Harness {
            runtime: MappingRuntime::load(path)?,
            schema,
        })
    }

    pub fn instantiate(module: &GuestModule, schema: Arc<Schema>) -> Result<Self> {
        Ok(Harness {
            runtime: MappingRuntime::instantiate(module)?,
            schema,
        })
    }

    /// Run the export `handler` (`on<Event>`) on an `<Event>` built from
    /// `record` and `metadata`.
    pub fn invoke(&mut self, handler: &str, record: &Record, metadata: &Metadata) -> Result<()> {
        let event_name = handler
            .strip_prefix("on")
            .ok_or_else(|| anyhow!("handler '{}' does not name an event", handler))?;
        let definition = self.schema.event(event_name)?;
        let event = to_event(definition, record, metadata)
            .with_context(|| format!("building {} event", event_name))?;
        self.runtime.handle_event(handler, &event)
    }

    /// Run the handler for the event named `event_name`.
    pub fn invoke_event(&mut self, event_name: &str, record: &Record, metadata: &Metadata) -> Result<()> {
        let handler = self.schema.event(event_name)?.handler_name();
        self.invoke(&handler, record, metadata)
    }

    pub fn get_entity(&self, entity_type: &str, id: &str) -> Result<Option<Record>> {
        let definition = self.schema.entity(entity_type)?;
        self.runtime
            .get_entity(entity_type, id)?
            .map(|entity| {
                to_data(definition, &entity)
                    .with_context(|| format!("reading {} {}", entity_type, id))
            })
            .transpose()
    }

    pub fn set_entity(&mut self, entity_type: &str, id: &str, record: &Record) -> Result<()> {
        let definition = self.schema.entity(entity_type)?;
        let entity = from_data(definition, record)
            .with_context(|| format!("building {} {}", entity_type, id))?;
        self.runtime.set_entity(entity_type, id, entity)
    }

    pub fn remove_entity(&mut self, entity_type: &str, id: &str) -> Result<()> {
        self.runtime.remove_entity(entity_type, id)?;
        Ok(())
    }

    pub fn entity_ids(&self, entity_type: &str) -> Result<Vec<String>> {
        self.runtime.entity_ids(entity_type)
    }

    pub fn set_call_handler<F>(&mut self, handler: F) -> Result<()>
    where
        F: FnMut(&Call) -> std::result::Result<Option<Vec<Value>>, Error> + Send + 'static,
    {
        self.runtime.set_call_handler(handler)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn runtime(&self) -> &MappingRuntime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut MappingRuntime {
        &mut self.runtime
    }
}
