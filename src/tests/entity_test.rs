//! Entity records through the schema and the host store

use graphshrew_support::data::Data;
use graphshrew_support::record;

use super::{hex, mappings};

#[test]
fn test_user_round_trip() {
    let mut mappings = mappings();
    let user = record! {
        "id" => "1",
        "fromBatchId" => 0u64,
        "createEpoch" => 0u64,
        "txHash" => Data::bytes(hex(0, 32)),
    };
    mappings.set_entity("User", "1", &user).unwrap();
    assert_eq!(mappings.get_entity("User", "1").unwrap(), Some(user));
}

#[test]
fn test_bytes_read_back_lowercase() {
    let mut mappings = mappings();
    let user = record! {
        "id" => "1",
        "fromBatchId" => 0u64,
        "createEpoch" => 0u64,
        "txHash" => Data::Bytes(format!("0x{}", "AB".repeat(32))),
    };
    mappings.set_entity("User", "1", &user).unwrap();

    let stored = mappings.get_entity("User", "1").unwrap().unwrap();
    match &stored["txHash"] {
        Data::Bytes(hex) => assert_eq!(hex, &format!("0x{}", "ab".repeat(32))),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(stored, user);
}

#[test]
fn test_missing_entity() {
    let mappings = mappings();
    assert_eq!(mappings.get_entity("User", "nobody").unwrap(), None);
    assert!(mappings.entity_ids("User").unwrap().is_empty());
}

#[test]
fn test_remove_entity() {
    let mut mappings = mappings();
    let stats = record! {
        "id" => "latest",
        "volumeInOwl" => 0u64,
        "utilityInOwl" => 0u64,
        "owlBurnt" => 0u64,
        "settledBatchCount" => 0,
        "settledTradeCount" => 0,
        "listedTokens" => 2,
    };
    mappings.set_entity("Stats", "latest", &stats).unwrap();
    assert_eq!(mappings.entity_ids("Stats").unwrap(), vec!["latest".to_string()]);

    mappings.remove_entity("Stats", "latest").unwrap();
    assert_eq!(mappings.get_entity("Stats", "latest").unwrap(), None);
    mappings.remove_entity("Stats", "latest").unwrap();
}

#[test]
fn test_set_entity_checks_fields() {
    let mut mappings = mappings();

    let missing = record! { "id" => "1", "fromBatchId" => 0u64, "createEpoch" => 0u64 };
    let err = mappings.set_entity("User", "1", &missing).unwrap_err();
    assert!(format!("{:#}", err).contains("record missing 'txHash' field"), "{:#}", err);

    let extra = record! {
        "id" => "1",
        "fromBatchId" => 0u64,
        "createEpoch" => 0u64,
        "txHash" => Data::bytes(hex(0, 32)),
        "nickname" => "satoshi",
    };
    let err = mappings.set_entity("User", "1", &extra).unwrap_err();
    assert!(format!("{:#}", err).contains("unexpected 'nickname' field"), "{:#}", err);

    let mistyped = record! {
        "id" => "1",
        "fromBatchId" => 0,
        "createEpoch" => 0u64,
        "txHash" => Data::bytes(hex(0, 32)),
    };
    let err = mappings.set_entity("User", "1", &mistyped).unwrap_err();
    assert!(
        format!("{:#}", err).contains("expected BigInt store value but got Int"),
        "{:#}",
        err
    );
}

#[test]
fn test_unknown_entity_type() {
    let mappings = mappings();
    let err = mappings.get_entity("Fill", "1").unwrap_err();
    assert!(format!("{:#}", err).contains("unknown entity definition 'Fill'"));
}
