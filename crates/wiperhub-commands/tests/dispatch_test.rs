//! Dispatch router tests.
//!
//! Tests intent-to-record creation: field echo, pending status, validation
//! rejection before any store write, and duplicate submissions producing
//! distinct records.

use std::sync::Arc;

use wiperhub_commands::{
    CommandStatus, CommandStore, DispatchRouter, Protocol, ValidationError, WipeIntent,
    WipeRequest, WipeSpeed, WiperTarget,
};
use wiperhub_storage::MemoryBackend;

fn harness() -> (Arc<CommandStore>, DispatchRouter) {
    let store = Arc::new(CommandStore::new(Arc::new(MemoryBackend::default())));
    let router = DispatchRouter::new(store.clone());
    (store, router)
}

fn request(protocol: &str, wiper: &str, speed: &str, cycles: i64) -> WipeRequest {
    WipeRequest {
        protocol: protocol.to_string(),
        wiper_type: wiper.to_string(),
        speed: speed.to_string(),
        cycles,
    }
}

#[tokio::test]
async fn test_dispatch_creates_one_pending_record_echoing_the_intent() {
    let (store, router) = harness();
    let intent = WipeIntent::validate(&request("CAN", "front", "fast", 3)).unwrap();

    let records = router.dispatch(&intent).await.unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.protocol, Protocol::Can);
    assert_eq!(record.wiper, WiperTarget::Front);
    assert_eq!(record.speed, WipeSpeed::Fast);
    assert_eq!(record.cycles, 3);
    assert_eq!(record.status, CommandStatus::Pending);

    // And it is durably in the log.
    let loaded = store.get(&record.id).await.unwrap();
    assert_eq!(&loaded, record);
}

#[tokio::test]
async fn test_both_target_is_one_unit_of_work() {
    let (_, router) = harness();
    let intent = WipeIntent::validate(&request("LIN", "both", "normal", 2)).unwrap();

    let records = router.dispatch(&intent).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].wiper, WiperTarget::Both);
}

#[tokio::test]
async fn test_invalid_cycles_rejected_before_any_record_exists() {
    let (store, router) = harness();

    for cycles in [0, 6, -1, 100] {
        let err = WipeIntent::validate(&request("CAN", "front", "normal", cycles)).unwrap_err();
        assert_eq!(err, ValidationError::Cycles(cycles));
    }

    // Validation is pure: nothing was written. Dispatch a valid intent and
    // confirm the log holds exactly that one record.
    let intent = WipeIntent::validate(&request("CAN", "front", "normal", 1)).unwrap();
    router.dispatch(&intent).await.unwrap();
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_submissions_create_distinct_records() {
    // No idempotency key: resubmitting the same intent is a new record.
    let (store, router) = harness();
    let intent = WipeIntent::validate(&request("LIN", "back", "fast", 4)).unwrap();

    let first = router.dispatch(&intent).await.unwrap();
    let second = router.dispatch(&intent).await.unwrap();

    assert_ne!(first[0].id, second[0].id);
    assert_eq!(store.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_dispatched_records_are_visible_to_their_protocol_only() {
    let (store, router) = harness();

    let can = WipeIntent::validate(&request("CAN", "front", "normal", 1)).unwrap();
    let lin = WipeIntent::validate(&request("LIN", "back", "normal", 1)).unwrap();
    router.dispatch(&can).await.unwrap();
    router.dispatch(&lin).await.unwrap();

    let can_pending = store.pending_for(Protocol::Can).await.unwrap();
    let lin_pending = store.pending_for(Protocol::Lin).await.unwrap();

    assert_eq!(can_pending.len(), 1);
    assert_eq!(can_pending[0].protocol, Protocol::Can);
    assert_eq!(lin_pending.len(), 1);
    assert_eq!(lin_pending[0].protocol, Protocol::Lin);
}
