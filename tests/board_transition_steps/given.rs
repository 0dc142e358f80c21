//! Given steps for board transition BDD scenarios.

use super::world::{BoardWorld, build_board, run_async, seeded_task};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a service request "{id}" in "{status}""#)]
fn service_request(world: &mut BoardWorld, id: String, status: String) -> Result<(), eyre::Report> {
    world.remote_seed.push(seeded_task(&id, &status)?);
    Ok(())
}

#[given(r#"a local task "{id}" in "{status}""#)]
fn local_task(world: &mut BoardWorld, id: String, status: String) -> Result<(), eyre::Report> {
    world.local_seed.push(seeded_task(&id, &status)?);
    Ok(())
}

#[given("the board is loaded")]
fn board_is_loaded(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let loaded = build_board(
        std::mem::take(&mut world.remote_seed),
        std::mem::take(&mut world.local_seed),
    );
    run_async(loaded.board.refresh()).wrap_err("initial board fetch")?;
    world.loaded = Some(loaded);
    Ok(())
}

#[given("the backend rejects updates")]
fn backend_rejects_updates(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world
        .loaded()?
        .api
        .fail_updates("scheduled maintenance")
        .wrap_err("inject update failure")?;
    Ok(())
}
