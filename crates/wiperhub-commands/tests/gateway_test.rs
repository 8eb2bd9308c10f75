//! Poll gateway tests.
//!
//! Tests the consumer-facing surface: protocol isolation, FIFO delivery,
//! at-least-once visibility, and outcome reporting with terminal-state
//! conflict semantics.

use std::sync::Arc;

use wiperhub_commands::{
    CommandRecord, CommandStatus, CommandStore, GatewayError, Outcome, PollGateway, Protocol,
    WipeSpeed, WiperTarget,
};
use wiperhub_storage::MemoryBackend;

fn harness() -> (Arc<CommandStore>, PollGateway) {
    let store = Arc::new(CommandStore::new(Arc::new(MemoryBackend::default())));
    let gateway = PollGateway::new(store.clone());
    (store, gateway)
}

async fn seed(store: &CommandStore, protocol: Protocol) -> CommandRecord {
    let record = CommandRecord::new(protocol, WiperTarget::Front, WipeSpeed::Fast, 3);
    store.append(&record).await.unwrap();
    record
}

#[tokio::test]
async fn test_fetch_pending_empty() {
    let (_, gateway) = harness();
    assert!(gateway.fetch_pending(Protocol::Can).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_protocols_are_never_cross_visible() {
    let (store, gateway) = harness();
    let can = seed(&store, Protocol::Can).await;
    let lin = seed(&store, Protocol::Lin).await;

    let can_pending = gateway.fetch_pending(Protocol::Can).await.unwrap();
    assert_eq!(can_pending.len(), 1);
    assert_eq!(can_pending[0].id, can.id);

    let lin_pending = gateway.fetch_pending(Protocol::Lin).await.unwrap();
    assert_eq!(lin_pending.len(), 1);
    assert_eq!(lin_pending[0].id, lin.id);
}

#[tokio::test]
async fn test_fetch_is_non_destructive_at_least_once() {
    // Two polls without an outcome report both see the record: delivery
    // is at-least-once, and the controller dedupes by id.
    let (store, gateway) = harness();
    let record = seed(&store, Protocol::Can).await;

    let first_poll = gateway.fetch_pending(Protocol::Can).await.unwrap();
    let second_poll = gateway.fetch_pending(Protocol::Can).await.unwrap();

    assert_eq!(first_poll[0].id, record.id);
    assert_eq!(second_poll[0].id, record.id);
}

#[tokio::test]
async fn test_full_command_lifecycle() {
    // Submit, poll, complete, poll again, re-complete.
    let (store, gateway) = harness();
    let record = seed(&store, Protocol::Can).await;

    let pending = gateway.fetch_pending(Protocol::Can).await.unwrap();
    assert!(pending.iter().any(|r| r.id == record.id));

    let updated = gateway
        .report_outcome(&record.id, Outcome::Completed)
        .await
        .unwrap();
    assert_eq!(updated.status, CommandStatus::Completed);

    let pending = gateway.fetch_pending(Protocol::Can).await.unwrap();
    assert!(pending.is_empty());

    let err = gateway
        .report_outcome(&record.id, Outcome::Completed)
        .await
        .unwrap_err();
    match err {
        GatewayError::AlreadyTerminal { id, status } => {
            assert_eq!(id, record.id);
            assert_eq!(status, CommandStatus::Completed);
        }
        other => panic!("expected AlreadyTerminal, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ignored_outcome() {
    // Automatic mode supersession: the controller declines the command.
    let (store, gateway) = harness();
    let record = seed(&store, Protocol::Lin).await;

    let updated = gateway
        .report_outcome(&record.id, Outcome::Ignored)
        .await
        .unwrap();
    assert_eq!(updated.status, CommandStatus::Ignored);

    assert!(gateway.fetch_pending(Protocol::Lin).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_report_outcome_unknown_id() {
    let (_, gateway) = harness();

    let err = gateway
        .report_outcome("no-such-command", Outcome::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
}

#[tokio::test]
async fn test_conflicting_outcomes_keep_the_first() {
    let (store, gateway) = harness();
    let record = seed(&store, Protocol::Can).await;

    gateway
        .report_outcome(&record.id, Outcome::Ignored)
        .await
        .unwrap();

    let err = gateway
        .report_outcome(&record.id, Outcome::Completed)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GatewayError::AlreadyTerminal {
            status: CommandStatus::Ignored,
            ..
        }
    ));

    assert_eq!(
        store.get(&record.id).await.unwrap().status,
        CommandStatus::Ignored
    );
}
