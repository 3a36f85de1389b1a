//! Start-once semantics, guest logging and ABI errors surfaced to tests

use graphshrew_dex::{DexEvent, Mappings};
use graphshrew_runtime::config::MAPPINGS_WASM_ENV;
use graphshrew_support::events::Metadata;
use graphshrew_support::record;

use super::guest::{mappings_wat, START_COUNTER};
use super::{hex, init_logger, mappings, TestConfig};

#[test]
fn test_start_runs_once_per_instance() {
    let mut mappings = mappings();
    let deposit = record! {
        "user" => hex(1, 20),
        "token" => hex(2, 20),
        "amount" => 1u64,
        "batchId" => 0,
    };
    for timestamp in [300, 600, 900] {
        mappings
            .on_deposit(&deposit, &Metadata::default().timestamp(timestamp))
            .unwrap();
    }

    let runtime = mappings.harness().runtime();
    assert_eq!(runtime.abi().read_word(runtime.store(), START_COUNTER).unwrap(), 1);

    let fresh = TestConfig::new().create_mappings().unwrap();
    let runtime = fresh.harness().runtime();
    assert_eq!(runtime.abi().read_word(runtime.store(), START_COUNTER).unwrap(), 1);
}

#[test]
fn test_critical_log_fails_handler() {
    let mut mappings = mappings();
    let withdraw = record! { "user" => hex(1, 20), "token" => hex(2, 20), "amount" => 1u64 };
    let err = mappings.on_withdraw(&withdraw, &Metadata::default()).unwrap_err();
    assert!(
        format!("{:#}", err).contains("critical guest log: withdrawals are not indexed"),
        "{:#}",
        err
    );
}

#[test]
fn test_handler_not_exported() {
    let mut mappings = mappings();
    let placement = record! {
        "owner" => hex(1, 20),
        "index" => 0,
        "buyToken" => 0,
        "sellToken" => 1,
        "validFrom" => 0,
        "validUntil" => 10,
        "priceNumerator" => 1,
        "priceDenominator" => 1,
    };
    let err = mappings
        .handle(DexEvent::OrderPlacement, &placement, &Metadata::default())
        .unwrap_err();
    assert!(format!("{:#}", err).contains("onOrderPlacement"), "{:#}", err);
}

#[test]
fn test_invalid_store_value_discriminant() {
    let mut mappings = mappings();
    let err = mappings
        .harness_mut()
        .runtime_mut()
        .call_export("writeTaggedUser", 42)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("invalid store value 42"), "{:#}", err);
    assert!(mappings.entity_ids("User").unwrap().is_empty());
}

#[test]
fn test_big_decimal_store_value() {
    let mut mappings = mappings();
    let err = mappings
        .harness_mut()
        .runtime_mut()
        .call_export("writeTaggedUser", 2)
        .unwrap_err();
    assert!(
        format!("{:#}", err).contains("big decimal values not supported"),
        "{:#}",
        err
    );
}

#[test]
fn test_null_string_store_value() {
    let mut mappings = mappings();
    let err = mappings
        .harness_mut()
        .runtime_mut()
        .call_export("writeTaggedUser", 0)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("unexpected null string pointer"), "{:#}", err);
}

#[test]
fn test_entity_from_guest_checked_against_definition() {
    let mut mappings = mappings();
    mappings
        .harness_mut()
        .runtime_mut()
        .call_export("writeTaggedUser", 5)
        .unwrap();
    let err = mappings.get_entity("User", "latest").unwrap_err();
    assert!(format!("{:#}", err).contains("expected String store value but got Null"), "{:#}", err);
}

#[test]
fn test_mappings_loaded_from_environment() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mappings.wat");
    std::fs::write(&path, mappings_wat()).unwrap();
    // the only test touching this variable
    std::env::set_var(MAPPINGS_WASM_ENV, &path);

    let mut mappings = Mappings::load().unwrap();
    let deposit = record! {
        "user" => hex(1, 20),
        "token" => hex(2, 20),
        "amount" => 1u64,
        "batchId" => 0,
    };
    mappings
        .on_deposit(&deposit, &Metadata::default().timestamp(300))
        .unwrap();
    assert_eq!(mappings.entity_ids("User").unwrap(), vec![hex(1, 20)]);

    // cached after the first load
    std::fs::remove_file(&path).unwrap();
    assert!(Mappings::load().unwrap().entity_ids("User").unwrap().is_empty());
    assert!(Mappings::load_from(&path).is_err());
}
