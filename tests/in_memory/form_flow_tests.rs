//! In-memory integration tests for creating and editing tasks.

use caseboard::task::{
    domain::{Price, Provenance, TaskPatch, TaskStatus, Urgency},
    ports::LocalTaskStore,
    services::{FormMode, FormSession, FormSubmission, MutationOutcome, TaskForm},
};
use rstest::rstest;

use super::helpers::{BoardHarness, column_ids, id, manual_task, service_request};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_joins_pending_column_next_to_backend_requests() {
    let harness = BoardHarness::new(vec![service_request("r1", "pending")], Vec::new());
    harness.board.refresh().await.expect("refresh");
    let mut session = FormSession::new();
    session.open_create();
    session.draft_mut().name = "C".to_owned();
    session.draft_mut().device_type = "ssd".to_owned();

    let submission = harness.board.submit(&mut session).await.expect("submit");

    let FormSubmission::Created(created) = submission else {
        panic!("expected a created task");
    };
    assert_eq!(created.provenance(), Provenance::Local);
    assert_eq!(created.fields().urgency, Urgency::Medium);
    assert_eq!(created.fields().price, None);
    assert_eq!(session.mode(), &FormMode::Closed);
    let board = harness.board.board().await.expect("board");
    assert_eq!(
        column_ids(&board, TaskStatus::Pending),
        vec!["r1".to_owned(), created.id().to_string()]
    );
    assert!(harness.api.updates().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_local_task_keeps_its_column() {
    let harness = BoardHarness::new(Vec::new(), vec![manual_task("manual_1", TaskStatus::Completed)]);
    let (original, _) = harness.board.locate(&id("manual_1")).await.expect("locate");
    let mut form = TaskForm::from_task(&original);
    form.problem_description = "bad sectors".to_owned();

    let (edited, outcome) = harness
        .board
        .edit_task(&id("manual_1"), &form)
        .await
        .expect("edit");

    assert_eq!(outcome, MutationOutcome::AppliedLocally);
    assert_eq!(edited.status().known(), Some(TaskStatus::Completed));
    let stored = harness.store.load().await.expect("load");
    assert_eq!(stored, vec![edited]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_backend_request_goes_to_the_backend_only() {
    let harness = BoardHarness::new(vec![service_request("r1", "in_progress")], Vec::new());
    harness.board.refresh().await.expect("refresh");
    let (original, _) = harness.board.locate(&id("r1")).await.expect("locate");
    let mut session = FormSession::new();
    session.open_edit(original);
    session.draft_mut().price = "240".to_owned();

    let submission = harness.board.submit(&mut session).await.expect("submit");

    assert!(submission.requires_refetch());
    assert_eq!(harness.store.save_count(), 0);
    let updates = harness.api.updates();
    assert_eq!(updates.len(), 1);
    assert!(updates.iter().all(|update| matches!(update.patch, TaskPatch::Fields(_))));
    let (refetched, status) = harness.board.locate(&id("r1")).await.expect("locate");
    assert_eq!(status, TaskStatus::InProgress);
    assert_eq!(refetched.fields().price.map(Price::amount), Some(240.0));
}
