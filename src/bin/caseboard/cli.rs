//! Argument parsing.

use caseboard::config::BACKEND_URL_ENV;
use caseboard::task::services::TaskForm;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Device-repair operations board.
#[derive(Debug, Parser)]
#[command(name = "caseboard", version, about)]
pub struct Cli {
    /// Configuration file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Service request backend URL, overriding the configuration file.
    #[arg(long, global = true, env = BACKEND_URL_ENV)]
    pub backend_url: Option<String>,

    /// Use an empty in-memory backend instead of the HTTP API.
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the board.
    Show,
    /// Show every detail of one task.
    View {
        /// Task identifier as shown on the board.
        task_id: String,
    },
    /// Move a task to another column.
    Move {
        /// Task identifier as shown on the board.
        task_id: String,
        /// Destination status, e.g. `in_progress`.
        status: String,
    },
    /// Create a local task.
    Create(CreateArgs),
    /// Edit an existing task.
    Edit(EditArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Customer name.
    #[arg(long)]
    pub name: String,

    /// Device type: hdd, ssd, raid, usb, sd or other.
    #[arg(long)]
    pub device: String,

    #[command(flatten)]
    pub details: DetailArgs,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Task identifier as shown on the board.
    pub task_id: String,

    /// Customer name.
    #[arg(long)]
    pub name: Option<String>,

    /// Device type: hdd, ssd, raid, usb, sd or other.
    #[arg(long)]
    pub device: Option<String>,

    #[command(flatten)]
    pub details: DetailArgs,
}

impl EditArgs {
    /// Overlays the given flags onto a prefilled form.
    pub fn apply(self, form: &mut TaskForm) {
        overlay(&mut form.name, self.name);
        overlay(&mut form.device_type, self.device);
        self.details.apply(form);
    }
}

/// Optional task fields shared by `create` and `edit`.
#[derive(Debug, Default, Args)]
pub struct DetailArgs {
    /// Customer phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Customer email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Reported problem.
    #[arg(long)]
    pub problem: Option<String>,

    /// Urgency: low, medium, high or critical.
    #[arg(long)]
    pub urgency: Option<String>,

    /// Quoted price.
    #[arg(long)]
    pub price: Option<String>,

    /// Work start date, YYYY-MM-DD.
    #[arg(long)]
    pub started: Option<String>,

    /// Work completion date, YYYY-MM-DD.
    #[arg(long)]
    pub completed: Option<String>,
}

impl DetailArgs {
    /// Overlays the given flags; an empty value clears the field.
    pub fn apply(self, form: &mut TaskForm) {
        overlay(&mut form.phone, self.phone);
        overlay(&mut form.email, self.email);
        overlay(&mut form.problem_description, self.problem);
        overlay(&mut form.urgency, self.urgency);
        overlay(&mut form.price, self.price);
        overlay(&mut form.started_at, self.started);
        overlay(&mut form.completed_at, self.completed);
    }
}

fn overlay(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}
