//! Typed entry points into the BatchExchange mappings module
//!
//! [`Mappings`] wraps a [`Harness`] bound to [`SCHEMA`](crate::schema::SCHEMA)
//! and names one method per contract event. The compiled module is cached
//! process-wide so every test gets a fresh instance without recompiling.

use std::fmt;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use graphshrew_runtime::config::{mappings_wasm_path, MAPPINGS_WASM_ENV};
use graphshrew_runtime::{GuestModule, Harness};
use graphshrew_support::data::{Data, Record};
use graphshrew_support::error::Error;
use graphshrew_support::ethereum::{Call, Value};
use graphshrew_support::events::Metadata;
use num_bigint::BigInt;
use once_cell::sync::OnceCell;

use crate::schema::schema;

/// Length of a batch auction in seconds.
pub const BATCH_TIME: u64 = 300;

static MODULE: OnceCell<GuestModule> = OnceCell::new();

/// Events emitted by the BatchExchange contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DexEvent {
    Deposit,
    OrderCancellation,
    OrderDeletion,
    OrderPlacement,
    SolutionSubmission,
    TokenListing,
    Trade,
    TradeReversion,
    Withdraw,
    WithdrawRequest,
}

impl DexEvent {
    pub const ALL: [DexEvent; 10] = [
        DexEvent::Deposit,
        DexEvent::OrderCancellation,
        DexEvent::OrderDeletion,
        DexEvent::OrderPlacement,
        DexEvent::SolutionSubmission,
        DexEvent::TokenListing,
        DexEvent::Trade,
        DexEvent::TradeReversion,
        DexEvent::Withdraw,
        DexEvent::WithdrawRequest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DexEvent::Deposit => "Deposit",
            DexEvent::OrderCancellation => "OrderCancellation",
            DexEvent::OrderDeletion => "OrderDeletion",
            DexEvent::OrderPlacement => "OrderPlacement",
            DexEvent::SolutionSubmission => "SolutionSubmission",
            DexEvent::TokenListing => "TokenListing",
            DexEvent::Trade => "Trade",
            DexEvent::TradeReversion => "TradeReversion",
            DexEvent::Withdraw => "Withdraw",
            DexEvent::WithdrawRequest => "WithdrawRequest",
        }
    }

    pub fn handler(self) -> String {
        format!("on{}", self.name())
    }
}

impl fmt::Display for DexEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn batch_id_to_epoch(batch_id: &BigInt) -> BigInt {
    batch_id * BATCH_TIME
}

/// Batch containing `epoch`, rounding down.
pub fn epoch_to_batch_id(epoch: &BigInt) -> BigInt {
    epoch / BATCH_TIME
}

fn is_active_in(trade: &Record, batch_id: &BigInt) -> bool {
    let in_batch = trade
        .get("tradeBatchId")
        .and_then(Data::as_big_int)
        .map_or(false, |id| &id == batch_id);
    let reverted = trade.get("revertEpoch").map_or(false, |epoch| !epoch.is_null());
    in_batch && !reverted
}

/// The trade of `trades` executed in `batch_id` that has not been reverted.
///
/// At most one trade per order survives a batch, so the first match is the
/// active one.
pub fn active_trade<'a>(trades: &'a [Record], batch_id: &BigInt) -> Option<&'a Record> {
    trades.iter().find(|trade| is_active_in(trade, batch_id))
}

pub struct Mappings {
    harness: Harness,
}

impl Mappings {
    /// Instantiate the module named by the `GRAPHSHREW_MAPPINGS_WASM`
    /// environment variable, compiling it on first use.
    pub fn load() -> Result<Self> {
        let module = MODULE.get_or_try_init(|| {
            let path = mappings_wasm_path()
                .ok_or_else(|| anyhow!("{} is not set", MAPPINGS_WASM_ENV))?;
            GuestModule::from_file(path)
        })?;
        Self::instantiate(module)
    }

    /// Compile and instantiate the module at `path`, bypassing the cache.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::instantiate(&GuestModule::from_file(path)?)
    }

    pub fn instantiate(module: &GuestModule) -> Result<Self> {
        Ok(Mappings {
            harness: Harness::instantiate(module, schema())?,
        })
    }

    pub fn handle(&mut self, event: DexEvent, record: &Record, metadata: &Metadata) -> Result<()> {
        log::debug!("dispatching {} to {}", event, event.handler());
        self.harness.invoke(&event.handler(), record, metadata)
    }

    pub fn on_deposit(&mut self, record: &Record, metadata: &Metadata) -> Result<()> {
        self.handle(DexEvent::Deposit, record, metadata)
    }

    pub fn on_order_cancellation(&mut self, record: &Record, metadata: &Metadata) -> Result<()> {
        self.handle(DexEvent::OrderCancellation, record, metadata)
    }

    pub fn on_order_deletion(&mut self, record: &Record, metadata: &Metadata) -> Result<()> {
        self.handle(DexEvent::OrderDeletion, record, metadata)
    }

    pub fn on_order_placement(&mut self, record: &Record, metadata: &Metadata) -> Result<()> {
        self.handle(DexEvent::OrderPlacement, record, metadata)
    }

    pub fn on_solution_submission(&mut self, record: &Record, metadata: &Metadata) -> Result<()> {
        self.handle(DexEvent::SolutionSubmission, record, metadata)
    }

    pub fn on_token_listing(&mut self, record: &Record, metadata: &Metadata) -> Result<()> {
        self.handle(DexEvent::TokenListing, record, metadata)
    }

    pub fn on_trade(&mut self, record: &Record, metadata: &Metadata) -> Result<()> {
        self.handle(DexEvent::Trade, record, metadata)
    }

    pub fn on_trade_reversion(&mut self, record: &Record, metadata: &Metadata) -> Result<()> {
        self.handle(DexEvent::TradeReversion, record, metadata)
    }

    pub fn on_withdraw(&mut self, record: &Record, metadata: &Metadata) -> Result<()> {
        self.handle(DexEvent::Withdraw, record, metadata)
    }

    pub fn on_withdraw_request(&mut self, record: &Record, metadata: &Metadata) -> Result<()> {
        self.handle(DexEvent::WithdrawRequest, record, metadata)
    }

    pub fn get_entity(&self, entity_type: &str, id: &str) -> Result<Option<Record>> {
        self.harness.get_entity(entity_type, id)
    }

    pub fn set_entity(&mut self, entity_type: &str, id: &str, record: &Record) -> Result<()> {
        self.harness.set_entity(entity_type, id, record)
    }

    pub fn remove_entity(&mut self, entity_type: &str, id: &str) -> Result<()> {
        self.harness.remove_entity(entity_type, id)
    }

    pub fn entity_ids(&self, entity_type: &str) -> Result<Vec<String>> {
        self.harness.entity_ids(entity_type)
    }

    /// Stored trades of `order_id`, ordered by id.
    pub fn trades_of(&self, order_id: &str) -> Result<Vec<Record>> {
        let mut trades = Vec::new();
        for id in self.entity_ids("Trade")? {
            let trade = self
                .get_entity("Trade", &id)?
                .with_context(|| format!("trade {} vanished", id))?;
            if trade.get("order").and_then(Data::as_str) == Some(order_id) {
                trades.push(trade);
            }
        }
        Ok(trades)
    }

    /// The non-reverted trade of `order_id` in `batch_id`.
    pub fn active_trade(&self, order_id: &str, batch_id: &BigInt) -> Result<Option<Record>> {
        let trades = self.trades_of(order_id)?;
        Ok(active_trade(&trades, batch_id).cloned())
    }

    pub fn set_call_handler<F>(&mut self, handler: F) -> Result<()>
    where
        F: FnMut(&Call) -> std::result::Result<Option<Vec<Value>>, Error> + Send + 'static,
    {
        self.harness.set_call_handler(handler)
    }

    pub fn harness(&self) -> &Harness {
        &self.harness
    }

    pub fn harness_mut(&mut self) -> &mut Harness {
        &mut self.harness
    }
}
