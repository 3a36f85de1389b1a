//! `onDeposit` registers the depositing user

use graphshrew_support::data::{Data, Record};
use graphshrew_support::events::Metadata;
use graphshrew_support::record;

use super::{hash, hex, mappings};

fn deposit(user: u8) -> Record {
    record! {
        "user" => hex(user, 20),
        "token" => hex(1, 20),
        "amount" => 100u64,
        "batchId" => 10,
    }
}

#[test]
fn test_deposit_with_only_timestamp() {
    let mut mappings = mappings();
    mappings
        .on_deposit(&deposit(0x13), &Metadata::default().timestamp(10 * 300 + 42))
        .unwrap();

    let id = hex(0x13, 20);
    let user = mappings.get_entity("User", &id).unwrap().unwrap();
    assert_eq!(
        user,
        record! {
            "id" => id.as_str(),
            "fromBatchId" => 10u64,
            "createEpoch" => 3042u64,
            "txHash" => Data::bytes(hex(0, 32)),
        }
    );
}

#[test]
fn test_deposit_tx_hash_is_lowercase_hex() {
    let mut mappings = mappings();
    let metadata = Metadata::default().timestamp(300).tx_hash(hash(0xab));
    mappings.on_deposit(&deposit(0x13), &metadata).unwrap();

    let user = mappings.get_entity("User", &hex(0x13, 20)).unwrap().unwrap();
    assert_eq!(user["txHash"], Data::Bytes(format!("0x{}", "ab".repeat(32))));
}

#[test]
fn test_deposit_with_hex_metadata() {
    let mut mappings = mappings();
    let metadata = Metadata::default()
        .timestamp(300)
        .tx_hash_hex(&hex(0xCD, 32))
        .unwrap();
    mappings.on_deposit(&deposit(0x13), &metadata).unwrap();

    let user = mappings.get_entity("User", &hex(0x13, 20)).unwrap().unwrap();
    assert_eq!(user["txHash"], Data::bytes(hex(0xcd, 32)));
    assert!(Metadata::default().tx_hash_hex(&hex(0xCD, 31)).is_err());
}

#[test]
fn test_second_deposit_keeps_user() {
    let mut mappings = mappings();
    mappings
        .on_deposit(&deposit(0x13), &Metadata::default().timestamp(600))
        .unwrap();
    mappings
        .on_deposit(&deposit(0x13), &Metadata::default().timestamp(9000).tx_hash(hash(2)))
        .unwrap();
    mappings
        .on_deposit(&deposit(0x14), &Metadata::default().timestamp(9000))
        .unwrap();

    let first = mappings.get_entity("User", &hex(0x13, 20)).unwrap().unwrap();
    assert_eq!(first["createEpoch"], Data::big(600));
    assert_eq!(first["fromBatchId"], Data::big(2));
    assert_eq!(mappings.entity_ids("User").unwrap().len(), 2);
}

#[test]
fn test_deposit_requires_every_parameter() {
    let mut mappings = mappings();
    let mut record = deposit(0x13);
    record.remove("batchId");
    let err = mappings.on_deposit(&record, &Metadata::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("record missing 'batchId' field"), "{:#}", err);
}

#[test]
fn test_deposit_rejects_short_address() {
    let mut mappings = mappings();
    let mut record = deposit(0x13);
    record.insert("user".to_string(), Data::from("0x1234"));
    assert!(mappings.on_deposit(&record, &Metadata::default()).is_err());
    assert!(mappings.entity_ids("User").unwrap().is_empty());
}
