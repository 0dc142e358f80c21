//! Unit tests for the JSON record boundary.

use crate::task::{
    adapters::records::{TaskRecord, patch_body},
    domain::{
        DeviceType, Price, Provenance, RecordedStatus, TaskDomainError, TaskFields, TaskPatch,
        TaskStatus, Urgency,
    },
};
use chrono::NaiveDate;
use rstest::rstest;
use serde_json::json;

use super::fixtures::local_task;

fn record(value: serde_json::Value) -> TaskRecord {
    serde_json::from_value(value).expect("record should deserialize")
}

#[rstest]
fn backend_record_with_numeric_id_becomes_remote_task() {
    let task = record(json!({
        "id": 17,
        "case_id": "SR-17",
        "name": "Ada",
        "device_type": "raid",
        "urgency": "high",
        "price": 250,
        "started_at": "2024-04-01T10:00:00",
        "created_at": "2024-04-01T09:30:00Z",
        "status": "in_progress"
    }))
    .into_remote_task()
    .expect("valid remote record");

    assert_eq!(task.provenance(), Provenance::Remote);
    assert_eq!(task.id().as_str(), "17");
    assert_eq!(task.case_id().as_str(), "SR-17");
    assert_eq!(task.status(), &RecordedStatus::Known(TaskStatus::InProgress));
    assert_eq!(task.fields().device_type, Some(DeviceType::Raid));
    assert_eq!(task.fields().urgency, Urgency::High);
    assert_eq!(task.fields().price.map(Price::amount), Some(250.0));
    assert_eq!(task.fields().started_at, NaiveDate::from_ymd_opt(2024, 4, 1));
    assert!(task.created_at().is_some());
}

#[rstest]
fn sparse_record_reads_defaults() {
    let task = record(json!({ "id": "abc" }))
        .into_remote_task()
        .expect("valid remote record");

    assert_eq!(task.status(), &RecordedStatus::Known(TaskStatus::Pending));
    assert_eq!(task.fields(), &TaskFields::default());
    assert!(task.case_id().is_empty());
    assert_eq!(task.created_at(), None);
}

#[rstest]
fn unknown_status_and_garbage_fields_are_tolerated() {
    let task = record(json!({
        "id": "x1",
        "status": "waiting_parts",
        "price": "call us",
        "urgency": "yesterday",
        "completed_at": "soon",
        "phone": "   "
    }))
    .into_remote_task()
    .expect("valid remote record");

    assert_eq!(
        task.status(),
        &RecordedStatus::Unrecognized("waiting_parts".to_owned())
    );
    assert_eq!(task.fields().price, None);
    assert_eq!(task.fields().urgency, Urgency::Medium);
    assert_eq!(task.fields().completed_at, None);
    assert_eq!(task.fields().phone, None);
}

#[rstest]
fn backend_record_with_local_prefix_is_rejected() {
    let result = record(json!({ "id": "manual_99" })).into_remote_task();
    assert_eq!(
        result,
        Err(TaskDomainError::ReservedRemoteId("manual_99".to_owned()))
    );
}

#[rstest]
fn local_record_requires_local_prefix() {
    let result = record(json!({ "id": "99" })).into_local_task();
    assert_eq!(result, Err(TaskDomainError::NotALocalId("99".to_owned())));
}

#[rstest]
fn written_record_reads_back_as_same_local_task() {
    let original = local_task("manual_1700000000000", "DL2024001", TaskStatus::Completed);
    let encoded = serde_json::to_value(TaskRecord::from_task(&original)).expect("serializes");

    assert_eq!(encoded["id"], json!("manual_1700000000000"));
    assert_eq!(encoded["status"], json!("completed"));
    assert_eq!(encoded["device_type"], json!("ssd"));

    let decoded = record(encoded).into_local_task().expect("valid local record");
    assert_eq!(decoded, original);
}

#[rstest]
fn status_patch_body_carries_only_status() {
    assert_eq!(
        patch_body(&TaskPatch::Status(TaskStatus::PickedUp)),
        json!({ "status": "picked_up" })
    );
}

#[rstest]
fn field_patch_body_nulls_cleared_fields_and_omits_status() {
    let fields = TaskFields::new("Grace").with_device_type(DeviceType::Usb);
    let body = patch_body(&TaskPatch::Fields(fields));

    assert_eq!(body["name"], json!("Grace"));
    assert_eq!(body["device_type"], json!("usb"));
    assert_eq!(body["urgency"], json!("medium"));
    assert_eq!(body["price"], serde_json::Value::Null);
    assert_eq!(body["email"], serde_json::Value::Null);
    assert!(body.get("status").is_none());
    assert!(body.get("id").is_none());
}

#[rstest]
fn unknown_device_and_urgency_are_written_back_verbatim() {
    let mut task = record(json!({
        "id": "manual_1700000000000",
        "name": "Ada",
        "device_type": "Floppy",
        "urgency": "asap",
        "status": "pending"
    }))
    .into_local_task()
    .expect("valid local record");

    assert_eq!(task.fields().device_type, Some(DeviceType::Other));
    assert_eq!(task.fields().urgency, Urgency::Medium);

    task.apply(TaskPatch::Status(TaskStatus::InProgress));
    let rewritten = TaskRecord::from_task(&task);

    assert_eq!(rewritten.device_type.as_deref(), Some("Floppy"));
    assert_eq!(rewritten.urgency.as_deref(), Some("asap"));
    assert_eq!(rewritten.status.as_deref(), Some("in_progress"));
}

#[rstest]
fn field_patch_body_keeps_unrecognized_values() {
    let task = record(json!({ "id": "r1", "device_type": "tape", "urgency": "whenever" }))
        .into_remote_task()
        .expect("valid remote record");

    let body = patch_body(&TaskPatch::Fields(task.fields().clone()));

    assert_eq!(body["device_type"], json!("tape"));
    assert_eq!(body["urgency"], json!("whenever"));
}
