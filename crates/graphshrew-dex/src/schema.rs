//! BatchExchange event and entity definitions

use std::sync::Arc;

use graphshrew_support::definition::{EntityDefinition, EventDefinition, Schema};
use graphshrew_support::entity::StoreValueKind;
use graphshrew_support::ethereum::ValueKind::{Address, Uint};
use once_cell::sync::Lazy;

pub static SCHEMA: Lazy<Arc<Schema>> = Lazy::new(|| Arc::new(build()));

/// The shared BatchExchange schema.
pub fn schema() -> Arc<Schema> {
    SCHEMA.clone()
}

fn build() -> Schema {
    let schema = events().into_iter().fold(Schema::new(), Schema::with_event);
    entities().into_iter().fold(schema, Schema::with_entity)
}

fn trade_event(name: &str) -> EventDefinition {
    EventDefinition::new(name)
        .param("owner", Address)
        .param("orderId", Uint)
        .param("sellToken", Uint)
        .param("buyToken", Uint)
        .param("executedSellAmount", Uint)
        .param("executedBuyAmount", Uint)
}

fn order_event(name: &str) -> EventDefinition {
    EventDefinition::new(name)
        .param("owner", Address)
        .param("index", Uint)
}

fn events() -> Vec<EventDefinition> {
    vec![
        EventDefinition::new("Deposit")
            .param("user", Address)
            .param("token", Address)
            .param("amount", Uint)
            .param("batchId", Uint),
        order_event("OrderCancellation"),
        order_event("OrderDeletion"),
        EventDefinition::new("OrderPlacement")
            .param("owner", Address)
            .param("index", Uint)
            .param("buyToken", Uint)
            .param("sellToken", Uint)
            .param("validFrom", Uint)
            .param("validUntil", Uint)
            .param("priceNumerator", Uint)
            .param("priceDenominator", Uint),
        EventDefinition::new("SolutionSubmission")
            .param("submitter", Address)
            .param("utility", Uint)
            .param("disregardedUtility", Uint)
            .param("burntFees", Uint)
            .param("lastAuctionBurntFees", Uint)
            .array("prices", Uint)
            .array("tokenIdsForPrice", Uint),
        EventDefinition::new("TokenListing")
            .param("token", Address)
            .param("id", Uint),
        trade_event("Trade"),
        trade_event("TradeReversion"),
        EventDefinition::new("Withdraw")
            .param("user", Address)
            .param("token", Address)
            .param("amount", Uint),
        EventDefinition::new("WithdrawRequest")
            .param("user", Address)
            .param("token", Address)
            .param("amount", Uint)
            .param("batchId", Uint),
    ]
}

fn entities() -> Vec<EntityDefinition> {
    use StoreValueKind::{BigInt, Bytes, Int, String};

    vec![
        EntityDefinition::new("Batch")
            .field("id", String)
            .field("startEpoch", BigInt)
            .field("endEpoch", BigInt)
            .field("solution", String)
            .field("firstSolutionEpoch", BigInt)
            .optional("lastRevertEpoch", BigInt)
            .field("txHash", Bytes),
        EntityDefinition::new("Deposit")
            .field("id", String)
            .field("user", String)
            .field("tokenAddress", Bytes)
            .field("amount", BigInt)
            .field("batchId", BigInt)
            .field("createEpoch", BigInt)
            .field("txHash", Bytes),
        EntityDefinition::new("Order")
            .field("id", String)
            .field("owner", String)
            .field("orderId", Int)
            .field("fromBatchId", BigInt)
            .field("fromEpoch", BigInt)
            .field("untilBatchId", BigInt)
            .field("untilEpoch", BigInt)
            .field("buyToken", String)
            .field("sellToken", String)
            .field("priceNumerator", BigInt)
            .field("priceDenominator", BigInt)
            .field("maxSellAmount", BigInt)
            .field("minReceiveAmount", BigInt)
            .field("soldVolume", BigInt)
            .field("boughtVolume", BigInt)
            .field("createEpoch", BigInt)
            .optional("cancelEpoch", BigInt)
            .optional("deleteEpoch", BigInt)
            .field("txHash", Bytes)
            .field("txLogIndex", BigInt),
        EntityDefinition::new("Price")
            .field("id", String)
            .field("token", String)
            .field("batchId", BigInt)
            .field("priceInOwlNumerator", BigInt)
            .field("priceInOwlDenominator", BigInt)
            .field("volume", BigInt)
            .field("createEpoch", BigInt)
            .field("txHash", Bytes),
        EntityDefinition::new("Solution")
            .field("id", String)
            .field("batch", String)
            .optional("solver", String)
            .optional("feeReward", BigInt)
            .optional("objectiveValue", BigInt)
            .array("trades", String)
            .field("createEpoch", BigInt)
            .optional("revertEpoch", BigInt)
            .field("txHash", Bytes)
            .field("txLogIndex", BigInt),
        EntityDefinition::new("Stats")
            .field("id", String)
            .field("volumeInOwl", BigInt)
            .field("utilityInOwl", BigInt)
            .field("owlBurnt", BigInt)
            .field("settledBatchCount", Int)
            .field("settledTradeCount", Int)
            .field("listedTokens", Int),
        EntityDefinition::new("Token")
            .field("id", String)
            .field("address", Bytes)
            .field("fromBatchId", BigInt)
            .optional("symbol", String)
            .optional("decimals", BigInt)
            .optional("name", String)
            .field("sellVolume", BigInt)
            .field("createEpoch", BigInt)
            .field("txHash", Bytes),
        EntityDefinition::new("Trade")
            .field("id", String)
            .field("order", String)
            .field("owner", String)
            .field("sellVolume", BigInt)
            .field("buyVolume", BigInt)
            .field("tradeBatchId", BigInt)
            .field("tradeEpoch", BigInt)
            .field("buyToken", String)
            .field("sellToken", String)
            .field("createEpoch", BigInt)
            .optional("revertEpoch", BigInt)
            .field("txHash", Bytes)
            .field("txLogIndex", BigInt),
        EntityDefinition::new("User")
            .field("id", String)
            .field("fromBatchId", BigInt)
            .field("createEpoch", BigInt)
            .field("txHash", Bytes),
        EntityDefinition::new("Withdraw")
            .field("id", String)
            .field("user", String)
            .field("tokenAddress", Bytes)
            .field("amount", BigInt)
            .field("createEpoch", BigInt)
            .field("createBatchId", BigInt)
            .field("txHash", Bytes),
        EntityDefinition::new("WithdrawRequest")
            .field("id", String)
            .field("user", String)
            .field("tokenAddress", Bytes)
            .field("amount", BigInt)
            .field("withdrawableFromBatchId", BigInt)
            .field("createEpoch", BigInt)
            .field("createBatchId", BigInt)
            .field("txHash", Bytes),
    ]
}
