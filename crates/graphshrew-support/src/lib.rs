//! Support library for testing blockchain-event mapping modules
//!
//! This crate holds the host-independent half of the mapping test harness:
//! the value types a mapping module exchanges with its host, and the typed
//! definitions that let tests describe events and entities as plain records.
//!
//! # Architecture
//!
//! ## Guest Values
//! - [`int`]: arbitrary-precision integers as little-endian two's complement
//! - [`ethereum`]: events, blocks, transactions, calls and tagged ABI values
//! - [`entity`]: store values and entities
//!
//! ## Records and Definitions
//! - [`data`]: native records ([`data::Record`]) built with [`record!`]
//! - [`definition`]: entity and event definitions collected in a [`definition::Schema`]
//! - [`entities`]: entity ⇄ record coercion
//! - [`events`]: record + [`events::Metadata`] → event
//!
//! ## Utilities
//! - [`convert`]: `0x` hex helpers
//! - [`error`]: the shared [`error::Error`] type
//!
//! # Usage
//!
//! ```
//! use graphshrew_support::definition::EntityDefinition;
//! use graphshrew_support::entity::StoreValueKind;
//! use graphshrew_support::{entities, record};
//!
//! let user = EntityDefinition::new("User")
//!     .field("id", StoreValueKind::String)
//!     .field("createEpoch", StoreValueKind::BigInt);
//! let data = record! { "id" => "1", "createEpoch" => 300u64 };
//! let entity = entities::from_data(&user, &data).unwrap();
//! assert_eq!(entities::to_data(&user, &entity).unwrap(), data);
//! ```

pub mod convert;
pub mod data;
pub mod definition;
pub mod entities;
pub mod entity;
pub mod error;
pub mod ethereum;
pub mod events;
pub mod int;
pub mod macros;

pub use data::{Data, Record};
pub use error::{Error, Result};
