//! Command-line front end for the repair operations board.
//!
//! Usage:
//!
//! ```text
//! caseboard [--config <path>] [--offline] show
//! caseboard view <task-id>
//! caseboard move <task-id> <status>
//! caseboard create --name <name> --device <device> [details]
//! caseboard edit <task-id> [--name <name>] [--device <device>] [details]
//! ```
//!
//! Logging is off unless `RUST_LOG` is set.

mod cli;
mod render;


use caseboard::board::services::BoardService;
use caseboard::config::BoardConfig;
use caseboard::task::{
    adapters::{
        file::FileLocalTaskStore, http::HttpServiceRequestApi, memory::InMemoryServiceRequestApi,
    },
    domain::{TaskId, TaskStatus},
    ports::{LocalTaskStore, ServiceRequestApi},
    services::{MutationOutcome, TaskForm},
};
use clap::Parser;
use cli::{Cli, Command};
use eyre::{Result, WrapErr};
use mockable::{Clock, DefaultClock};
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = BoardConfig::load(cli.config.as_deref())
        .wrap_err("failed to load configuration")?
        .with_backend_url(cli.backend_url.clone());
    let layout = config.layout().wrap_err("invalid board columns")?;
    let store = Arc::new(FileLocalTaskStore::new(
        config.store_dir()?,
        &config.store.key,
    ));
    let clock = Arc::new(DefaultClock);

    if cli.offline {
        let api = Arc::new(InMemoryServiceRequestApi::new());
        run(cli.command, &BoardService::new(api, store, clock, layout)).await
    } else {
        let api = Arc::new(HttpServiceRequestApi::new(
            &config.backend.base_url,
            config.backend.timeout(),
        ));
        run(cli.command, &BoardService::new(api, store, clock, layout)).await
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

async fn run<A, S, C>(command: Command, service: &BoardService<A, S, C>) -> Result<()>
where
    A: ServiceRequestApi,
    S: LocalTaskStore,
    C: Clock + Send + Sync,
{
    load_board(service).await?;
    let mut out = io::stdout().lock();
    match command {
        Command::Show => {
            let board = service.board().await?;
            let rendered = render::board(&board, DefaultClock.utc())?;
            write!(out, "{rendered}")?;
        }
        Command::View { task_id } => {
            let id = TaskId::parse(&task_id)?;
            let board = service.board().await?;
            let (task, status) = board
                .locate(&id)
                .ok_or_else(|| eyre::eyre!("task {id} is not on the board"))?;
            let label = board
                .column(status)
                .map_or(status.as_str(), |column| column.spec().label());
            writeln!(out, "{}", render::detail(task, label)?)?;
        }
        Command::Move { task_id, status } => {
            let id = TaskId::parse(&task_id)?;
            let to = TaskStatus::try_from(status.as_str())?;
            let outcome = service
                .move_task_to(&id, to)
                .await
                .wrap_err_with(|| format!("failed to move {id} to {to}"))?;
            writeln!(out, "{}", describe(&id, outcome))?;
        }
        Command::Create(args) => {
            let mut form = TaskForm {
                name: args.name,
                device_type: args.device,
                ..TaskForm::default()
            };
            args.details.apply(&mut form);
            let task = service.create_task(&form).await?;
            writeln!(out, "created {} ({})", task.id(), task.case_id())?;
        }
        Command::Edit(args) => {
            let id = TaskId::parse(&args.task_id)?;
            let (original, _) = service.locate(&id).await?;
            let mut form = TaskForm::from_task(&original);
            args.apply(&mut form);
            let (_, outcome) = service
                .edit_task(&id, &form)
                .await
                .wrap_err_with(|| format!("failed to edit {id}"))?;
            writeln!(out, "{}", describe(&id, outcome))?;
        }
    }
    Ok(())
}

/// Fetches service requests, falling back to local tasks when the backend
/// is unreachable.
async fn load_board<A, S, C>(service: &BoardService<A, S, C>) -> io::Result<()>
where
    A: ServiceRequestApi,
    S: LocalTaskStore,
    C: Clock + Send + Sync,
{
    if let Err(err) = service.refresh().await {
        writeln!(
            io::stderr().lock(),
            "warning: service requests unavailable ({err}); showing local tasks only"
        )?;
    }
    Ok(())
}

fn describe(id: &TaskId, outcome: MutationOutcome) -> String {
    match outcome {
        MutationOutcome::Unchanged => format!("{id}: already there, nothing to do"),
        MutationOutcome::AppliedLocally => format!("{id}: updated"),
        MutationOutcome::LocalTaskMissing => format!("{id}: no longer exists, nothing updated"),
        MutationOutcome::SubmittedRemotely => format!("{id}: sent to backend"),
    }
}
