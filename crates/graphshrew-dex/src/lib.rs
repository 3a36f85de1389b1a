//! BatchExchange schema and typed mappings wrapper
//!
//! Test suites for the BatchExchange mappings module build on [`Mappings`]:
//! each contract event becomes an `on<Event>` call, and entities are read
//! and written as records shaped by [`SCHEMA`].

pub mod mappings;
pub mod schema;

pub use mappings::{active_trade, batch_id_to_epoch, epoch_to_batch_id, DexEvent, Mappings, BATCH_TIME};
pub use schema::{schema, SCHEMA};
