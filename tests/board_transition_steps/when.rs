//! When steps for board transition BDD scenarios.

use super::world::{BoardWorld, run_async};
use caseboard::task::{
    domain::{TaskId, TaskStatus},
    services::{FormSession, FormSubmission, TransitionRequest},
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#""{id}" is moved from "{from}" to "{to}""#)]
fn card_is_moved(
    world: &mut BoardWorld,
    id: String,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    let request = TransitionRequest::new(
        TaskId::parse(&id)?,
        TaskStatus::try_from(from.as_str())?,
        TaskStatus::try_from(to.as_str())?,
    );
    let result = run_async(world.loaded()?.board.move_task(&request));
    world.last_move = Some(result);
    Ok(())
}

#[when(r#"a task is created with name "{name}" and device "{device}""#)]
fn task_is_created(world: &mut BoardWorld, name: String, device: String) -> Result<(), eyre::Report> {
    let mut session = FormSession::new();
    session.open_create();
    session.draft_mut().name = name;
    session.draft_mut().device_type = device;

    let submission =
        run_async(world.loaded()?.board.submit(&mut session)).wrap_err("submit create form")?;
    match submission {
        FormSubmission::Created(task) => {
            world.last_created = Some(task);
            Ok(())
        }
        other @ FormSubmission::Edited { .. } => {
            Err(eyre::eyre!("expected a created task, got {other:?}"))
        }
    }
}
