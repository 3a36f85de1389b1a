//! Graphshrew end-to-end tests
//!
//! Drives the BatchExchange schema and [`graphshrew_dex::Mappings`] against
//! a hand-written mappings module (see [`tests::guest`]) through the full
//! host import surface.

pub mod tests;

pub use tests::TestConfig;
