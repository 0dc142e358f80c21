//! In-memory integration tests for fetching, merging and moving cards.

use caseboard::board::services::BoardServiceError;
use caseboard::task::{
    domain::{TaskPatch, TaskStatus},
    ports::LocalTaskStore,
    services::{MutationOutcome, TransitionError, TransitionRequest},
};
use rstest::rstest;

use super::helpers::{BoardHarness, column_ids, id, manual_task, service_request};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_merges_both_stores_by_status() {
    let harness = BoardHarness::new(
        vec![service_request("r1", "pending")],
        vec![manual_task("manual_1", TaskStatus::Completed)],
    );

    let board = harness.board.refresh().await.expect("refresh");

    assert_eq!(column_ids(&board, TaskStatus::Pending), vec!["r1"]);
    assert!(column_ids(&board, TaskStatus::InProgress).is_empty());
    assert_eq!(column_ids(&board, TaskStatus::Completed), vec!["manual_1"]);
    assert!(column_ids(&board, TaskStatus::PickedUp).is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn backend_record_without_status_shows_as_pending() {
    let harness = BoardHarness::new(vec![service_request("r7", "")], Vec::new());

    let board = harness.board.refresh().await.expect("refresh");

    assert_eq!(column_ids(&board, TaskStatus::Pending), vec!["r7"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dragging_local_card_writes_only_the_local_store() {
    let harness = BoardHarness::new(
        vec![service_request("r1", "pending")],
        vec![manual_task("manual_1", TaskStatus::Completed)],
    );
    harness.board.refresh().await.expect("refresh");

    let outcome = harness
        .board
        .move_task(&TransitionRequest::new(
            id("manual_1"),
            TaskStatus::Completed,
            TaskStatus::Pending,
        ))
        .await
        .expect("move");

    assert_eq!(outcome, MutationOutcome::AppliedLocally);
    assert!(harness.api.updates().is_empty());
    assert_eq!(harness.api.fetch_count(), 1);
    let stored = harness.store.load().await.expect("load");
    assert_eq!(
        stored.first().and_then(|task| task.status().known()),
        Some(TaskStatus::Pending)
    );
    let board = harness.board.board().await.expect("board");
    assert_eq!(column_ids(&board, TaskStatus::Pending), vec!["r1", "manual_1"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dragging_remote_card_sends_one_update_and_refetches() {
    let harness = BoardHarness::new(
        vec![service_request("r1", "pending")],
        vec![manual_task("manual_1", TaskStatus::Completed)],
    );
    harness.board.refresh().await.expect("refresh");

    let outcome = harness
        .board
        .move_task(&TransitionRequest::new(
            id("r1"),
            TaskStatus::Pending,
            TaskStatus::InProgress,
        ))
        .await
        .expect("move");

    assert_eq!(outcome, MutationOutcome::SubmittedRemotely);
    let updates = harness.api.updates();
    assert_eq!(updates.len(), 1);
    assert!(
        updates
            .iter()
            .all(|update| update.patch == TaskPatch::Status(TaskStatus::InProgress))
    );
    assert_eq!(harness.store.save_count(), 0);
    assert_eq!(harness.api.fetch_count(), 2);
    let board = harness.board.board().await.expect("board");
    assert_eq!(column_ids(&board, TaskStatus::InProgress), vec!["r1"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_remote_move_changes_nothing_until_next_successful_fetch() {
    let harness = BoardHarness::new(vec![service_request("r1", "pending")], Vec::new());
    let before = harness.board.refresh().await.expect("refresh");
    harness.api.fail_updates("maintenance").expect("inject failure");

    let result = harness
        .board
        .move_task(&TransitionRequest::new(
            id("r1"),
            TaskStatus::Pending,
            TaskStatus::Completed,
        ))
        .await;

    assert!(matches!(
        result,
        Err(BoardServiceError::Transition(TransitionError::Remote(_)))
    ));
    assert_eq!(harness.board.board().await.expect("board"), before);
    assert_eq!(harness.store.save_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreachable_backend_still_shows_local_tasks() {
    let harness = BoardHarness::new(
        vec![service_request("r1", "pending")],
        vec![manual_task("manual_1", TaskStatus::InProgress)],
    );
    harness.api.fail_fetches("connection refused").expect("inject failure");

    let refreshed = harness.board.refresh().await;
    let board = harness.board.board().await.expect("board");

    assert!(matches!(refreshed, Err(BoardServiceError::Remote(_))));
    assert_eq!(board.total(), 1);
    assert_eq!(column_ids(&board, TaskStatus::InProgress), vec!["manual_1"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archived_and_unknown_requests_are_hidden_from_columns() {
    let harness = BoardHarness::new(
        vec![
            service_request("r1", "archived"),
            service_request("r2", "awaiting_parts"),
            service_request("r3", "picked_up"),
        ],
        Vec::new(),
    );

    let board = harness.board.refresh().await.expect("refresh");

    assert_eq!(board.total(), 1);
    assert_eq!(board.hidden_count(), 2);
    assert_eq!(column_ids(&board, TaskStatus::PickedUp), vec!["r3"]);
}
