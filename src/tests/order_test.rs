//! Order lifecycle, trade reversion and solution stats

use graphshrew_dex::{batch_id_to_epoch, BATCH_TIME};
use graphshrew_support::data::{Data, Record};
use graphshrew_support::events::Metadata;
use graphshrew_support::record;
use num_bigint::BigInt;

use super::{hex, mappings};

const ORDER_INDEX: i32 = 1337;

fn owner() -> String {
    hex(0x13, 20)
}

fn order_id() -> String {
    format!("{}-{}", owner(), ORDER_INDEX)
}

fn order() -> Record {
    let e18 = BigInt::from(10u64.pow(18));
    record! {
        "id" => order_id(),
        "owner" => owner(),
        "orderId" => ORDER_INDEX,
        "fromBatchId" => 0u64,
        "fromEpoch" => 0u64,
        "untilBatchId" => 42u64,
        "untilEpoch" => 42u64 * BATCH_TIME,
        "buyToken" => "1",
        "sellToken" => "0",
        "priceNumerator" => &e18 * 200000,
        "priceDenominator" => &e18 * 1000,
        "maxSellAmount" => &e18 * 200000,
        "minReceiveAmount" => &e18 * 1000,
        "soldVolume" => 0u64,
        "boughtVolume" => 0u64,
        "createEpoch" => 0u64,
        "cancelEpoch" => Data::Null,
        "deleteEpoch" => Data::Null,
        "txHash" => Data::bytes(hex(0, 32)),
        "txLogIndex" => 0u64,
    }
}

fn order_event() -> Record {
    record! { "owner" => owner(), "index" => ORDER_INDEX }
}

#[test]
fn test_order_cancellation_sets_cancel_epoch() {
    let mut mappings = mappings();
    mappings.set_entity("Order", &order_id(), &order()).unwrap();
    mappings
        .on_order_cancellation(&order_event(), &Metadata::default().timestamp(4242))
        .unwrap();

    let stored = mappings.get_entity("Order", &order_id()).unwrap().unwrap();
    let mut expected = order();
    expected.insert("cancelEpoch".to_string(), Data::big(4242));
    assert_eq!(stored, expected);
}

#[test]
fn test_order_deletion_sets_delete_epoch() {
    let mut mappings = mappings();
    mappings.set_entity("Order", &order_id(), &order()).unwrap();
    mappings
        .on_order_deletion(&order_event(), &Metadata::default().timestamp(9000))
        .unwrap();

    let stored = mappings.get_entity("Order", &order_id()).unwrap().unwrap();
    assert_eq!(stored["deleteEpoch"], Data::big(9000));
    assert_eq!(stored["cancelEpoch"], Data::Null);
}

#[test]
fn test_cancelling_unknown_order_aborts() {
    let mut mappings = mappings();
    let err = mappings
        .on_order_cancellation(&order_event(), &Metadata::default())
        .unwrap_err();
    assert!(
        format!("{:#}", err)
            .contains("aborted \"order not found\" at src/mappings/orders.ts, line 12, column 5"),
        "{:#}",
        err
    );
}

fn price(token: &str, batch_id: u64) -> Record {
    record! {
        "id" => format!("{}-{}", token, batch_id),
        "token" => token,
        "batchId" => batch_id,
        "priceInOwlNumerator" => 1u64,
        "priceInOwlDenominator" => 1u64,
        "volume" => 0u64,
        "createEpoch" => batch_id * BATCH_TIME,
        "txHash" => Data::bytes(hex(1, 32)),
    }
}

#[test]
fn test_trade_reversion_removes_price_of_solved_batch() {
    let mut mappings = mappings();
    for batch_id in [9, 10] {
        let price = price("0", batch_id);
        mappings
            .set_entity("Price", &format!("0-{}", batch_id), &price)
            .unwrap();
    }

    let reversion = record! {
        "owner" => owner(),
        "orderId" => ORDER_INDEX,
        "sellToken" => 0,
        "buyToken" => 1,
        "executedSellAmount" => 100u64,
        "executedBuyAmount" => 5u64,
    };
    mappings
        .on_trade_reversion(&reversion, &Metadata::default().timestamp(10 * 300 + 42))
        .unwrap();

    assert_eq!(mappings.entity_ids("Price").unwrap(), vec!["0-10".to_string()]);
}

fn trade(id: &str, batch_id: u64, revert_epoch: Option<u64>) -> Record {
    record! {
        "id" => id,
        "order" => order_id(),
        "owner" => owner(),
        "sellVolume" => 100u64,
        "buyVolume" => 5u64,
        "tradeBatchId" => batch_id,
        "tradeEpoch" => batch_id_to_epoch(&BigInt::from(batch_id + 1)),
        "buyToken" => "1",
        "sellToken" => "0",
        "createEpoch" => (batch_id + 1) * BATCH_TIME,
        "revertEpoch" => revert_epoch,
        "txHash" => Data::bytes(hex(1, 32)),
        "txLogIndex" => 1u64,
    }
}

#[test]
fn test_active_trade_with_single_candidate() {
    let mut mappings = mappings();
    mappings.set_entity("Trade", "a", &trade("a", 9, None)).unwrap();

    let active = mappings.active_trade(&order_id(), &BigInt::from(9)).unwrap().unwrap();
    assert_eq!(active["id"], Data::from("a"));
}

#[test]
fn test_active_trade_ignores_reverted() {
    let mut mappings = mappings();
    mappings.set_entity("Trade", "a", &trade("a", 9, Some(3001))).unwrap();
    mappings.set_entity("Trade", "b", &trade("b", 9, None)).unwrap();
    mappings.set_entity("Trade", "c", &trade("c", 10, None)).unwrap();

    let active = mappings.active_trade(&order_id(), &BigInt::from(9)).unwrap().unwrap();
    assert_eq!(active["id"], Data::from("b"));
    assert_eq!(mappings.active_trade("0x00-0", &BigInt::from(9)).unwrap(), None);
}

#[test]
fn test_solution_submissions_accumulate_stats() {
    let mut mappings = mappings();
    for (utility, burnt) in [(100u64, 7u64), (50, 3)] {
        let submission = record! {
            "submitter" => hex(0x50, 20),
            "utility" => utility,
            "disregardedUtility" => 0u64,
            "burntFees" => burnt,
            "lastAuctionBurntFees" => 0u64,
            "prices" => vec![1u64, 2u64],
            "tokenIdsForPrice" => vec![0, 1],
        };
        mappings
            .on_solution_submission(&submission, &Metadata::default().timestamp(3000))
            .unwrap();
    }

    assert_eq!(
        mappings.get_entity("Stats", "latest").unwrap().unwrap(),
        record! {
            "id" => "latest",
            "volumeInOwl" => 0u64,
            "utilityInOwl" => 150u64,
            "owlBurnt" => 10u64,
            "settledBatchCount" => 2,
            "settledTradeCount" => 0,
            "listedTokens" => 0,
        }
    );
}
