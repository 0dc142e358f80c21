//! Then steps for board transition BDD scenarios.

use super::world::{BoardWorld, run_async};
use caseboard::task::{
    domain::{Provenance, TaskId, TaskPatch, TaskStatus},
    ports::LocalTaskStore,
    services::MutationOutcome,
};
use rstest_bdd_macros::then;

fn column_ids(world: &BoardWorld, raw_status: &str) -> Result<Vec<String>, eyre::Report> {
    let status = TaskStatus::try_from(raw_status)?;
    let board = run_async(world.loaded()?.board.board())?;
    let column = board
        .column(status)
        .ok_or_else(|| eyre::eyre!("board has no column for {status}"))?;
    Ok(column
        .tasks()
        .iter()
        .map(|task| task.id().to_string())
        .collect())
}

#[then(r#"column "{status}" lists "{ids}""#)]
fn column_lists(world: &BoardWorld, status: String, ids: String) -> Result<(), eyre::Report> {
    let expected: Vec<String> = ids.split(',').map(|id| id.trim().to_owned()).collect();
    let actual = column_ids(world, &status)?;
    eyre::ensure!(
        actual == expected,
        "column {status}: expected {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"column "{status}" is empty"#)]
fn column_is_empty(world: &BoardWorld, status: String) -> Result<(), eyre::Report> {
    let actual = column_ids(world, &status)?;
    eyre::ensure!(actual.is_empty(), "column {status} should be empty, found {actual:?}");
    Ok(())
}

#[then(r#"the local task "{id}" has status "{status}""#)]
fn local_task_has_status(world: &BoardWorld, id: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let task_id = TaskId::parse(&id)?;
    let stored = run_async(world.loaded()?.store.load())?;
    let task = stored
        .iter()
        .find(|task| task.id() == &task_id)
        .ok_or_else(|| eyre::eyre!("local store has no task {id}"))?;
    eyre::ensure!(
        task.status().known() == Some(expected),
        "expected {id} to be {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then("the backend received {count:usize} updates")]
fn backend_received_updates(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let updates = world.loaded()?.api.updates();
    eyre::ensure!(
        updates.len() == count,
        "expected {count} backend updates, found {}",
        updates.len()
    );
    Ok(())
}

#[then(r#"the last backend update set status "{status}""#)]
fn last_update_set_status(world: &BoardWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let updates = world.loaded()?.api.updates();
    let last = updates
        .last()
        .ok_or_else(|| eyre::eyre!("backend received no updates"))?;
    eyre::ensure!(
        last.patch == TaskPatch::Status(expected),
        "expected a status update to {expected}, got {:?}",
        last.patch
    );
    Ok(())
}

#[then("the local store was not written")]
fn local_store_not_written(world: &BoardWorld) -> Result<(), eyre::Report> {
    let saves = world.loaded()?.store.save_count();
    eyre::ensure!(saves == 0, "expected no local writes, found {saves}");
    Ok(())
}

#[then("the move reported no change")]
fn move_reported_no_change(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_move.as_ref() {
        Some(Ok(MutationOutcome::Unchanged)) => Ok(()),
        other => Err(eyre::eyre!("expected an unchanged outcome, got {other:?}")),
    }
}

#[then("the move fails")]
fn move_fails(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_move.as_ref() {
        Some(Err(_)) => Ok(()),
        other => Err(eyre::eyre!("expected the move to fail, got {other:?}")),
    }
}

#[then(r#"the new task is local and pending with urgency "{urgency}" and no price"#)]
fn new_task_is_local_pending(world: &BoardWorld, urgency: String) -> Result<(), eyre::Report> {
    let task = world
        .last_created
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no task was created"))?;
    eyre::ensure!(task.provenance() == Provenance::Local, "task should be local");
    eyre::ensure!(
        task.status().known() == Some(TaskStatus::Pending),
        "task should be pending, found {}",
        task.status()
    );
    eyre::ensure!(
        task.fields().urgency.as_str() == urgency,
        "expected urgency {urgency}, found {}",
        task.fields().urgency
    );
    eyre::ensure!(task.fields().price.is_none(), "task should have no price");
    Ok(())
}
