//! Text rendering of the board.

use caseboard::board::domain::{Board, BoardColumn, CardAge};
use caseboard::task::domain::{Provenance, Task};
use chrono::{DateTime, Utc};
use minijinja::Environment;
use serde::Serialize;

const PLACEHOLDER: &str = "-";

const BOARD_TEMPLATE: &str = r"
{%- for column in columns %}
== {{ column.label }} ({{ column.count }}) ==
{%- for card in column.cards %}
  [{{ card.case_id }}] {{ card.urgency | upper }} {{ card.name }} / {{ card.device }}
{%- if card.problem %}: {{ card.problem }}{% endif %} ({{ card.age }}) {{ card.id }}
{%- if card.local %} *{% endif %}{% for flag in card.flags %} [{{ flag }}]{% endfor %}
{%- else %}
  (empty)
{%- endfor %}
{% endfor %}
{%- if hidden_count > 0 %}
{{ hidden_count }} task(s) not shown: archived or unknown status
{% endif -%}
";

const DETAIL_TEMPLATE: &str = r"
{{- case_id }} ({{ status }})
Customer:  {{ name }}
Email:     {{ email }}
Phone:     {{ phone }}
Device:    {{ device }}
Urgency:   {{ urgency }}
Price:     {{ price }}
Started:   {{ started }}
Completed: {{ completed }}
Created:   {{ created }}
{%- if problem %}
Problem:
  {{ problem | indent(2) }}
{%- endif %}
Edit with: caseboard edit {{ id }}
";

#[derive(Debug, Serialize)]
struct BoardView {
    columns: Vec<ColumnView>,
    hidden_count: usize,
}

#[derive(Debug, Serialize)]
struct ColumnView {
    label: String,
    count: usize,
    cards: Vec<CardView>,
}

#[derive(Debug, Serialize)]
struct CardView {
    id: String,
    case_id: String,
    urgency: &'static str,
    name: String,
    device: String,
    problem: String,
    age: String,
    local: bool,
    flags: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct DetailView {
    id: String,
    case_id: String,
    status: String,
    name: String,
    email: String,
    phone: String,
    device: String,
    urgency: String,
    price: String,
    started: String,
    completed: String,
    created: String,
    problem: String,
}

/// Renders `board` as plain text, with card ages relative to `now`.
pub fn board(board: &Board, now: DateTime<Utc>) -> Result<String, minijinja::Error> {
    let view = BoardView {
        columns: board
            .columns()
            .iter()
            .map(|column| column_view(column, now))
            .collect(),
        hidden_count: board.hidden_count(),
    };
    Environment::new().render_str(BOARD_TEMPLATE, view)
}

fn column_view(column: &BoardColumn, now: DateTime<Utc>) -> ColumnView {
    ColumnView {
        label: column.spec().label().to_owned(),
        count: column.count(),
        cards: column.tasks().iter().map(|task| card_view(task, now)).collect(),
    }
}

fn card_view(task: &Task, now: DateTime<Utc>) -> CardView {
    let fields = task.fields();
    let flags = [
        ("phone", fields.phone.is_some()),
        ("email", fields.email.is_some()),
        ("price", fields.price.is_some()),
    ]
    .into_iter()
    .filter_map(|(flag, present)| present.then_some(flag))
    .collect();
    CardView {
        id: task.id().to_string(),
        case_id: placeholder_if_empty(task.case_id().as_str()),
        urgency: fields.urgency.as_str(),
        name: fields.name.clone(),
        device: placeholder_if_empty(fields.device_type_value().unwrap_or_default()),
        problem: fields
            .problem_description
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_owned(),
        age: task.created_at().map_or_else(
            || PLACEHOLDER.to_owned(),
            |at| CardAge::between(at, now).to_string(),
        ),
        local: task.provenance() == Provenance::Local,
        flags,
    }
}

/// Renders every field of `task`; `status` is the heading of its column.
pub fn detail(task: &Task, status: &str) -> Result<String, minijinja::Error> {
    let fields = task.fields();
    let view = DetailView {
        id: task.id().to_string(),
        case_id: placeholder_if_empty(task.case_id().as_str()),
        status: status.to_owned(),
        name: placeholder_if_empty(&fields.name),
        email: placeholder_if_empty(fields.email.as_deref().unwrap_or_default()),
        phone: placeholder_if_empty(fields.phone.as_deref().unwrap_or_default()),
        device: placeholder_if_empty(fields.device_type_value().unwrap_or_default()),
        urgency: fields.urgency_value().to_owned(),
        price: optional(fields.price),
        started: optional(fields.started_at),
        completed: optional(fields.completed_at),
        created: task.created_at().map_or_else(
            || PLACEHOLDER.to_owned(),
            |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ),
        problem: fields.problem_description.trim().to_owned(),
    };
    Environment::new().render_str(DETAIL_TEMPLATE, view)
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_owned(), |inner| inner.to_string())
}

fn placeholder_if_empty(value: &str) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_owned()
    } else {
        value.to_owned()
    }
}
