//! The client pipeline data model.
//!
//! One [`ClientRecord`] row tracks a person through the placement pipeline:
//! passport, interview, offer letter, advance payment, medical, government
//! clearances (MOFA / VFS / Takamual), visa, agreement, and final settlement
//! & travel. Every stage status is an unconstrained string with a per-column
//! default; nothing enforces stage ordering, so a record may hold
//! `visa_status = "approved"` next to `interview_status = "pending"`.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PayloadError;

/// Columns writable from external payloads, in schema order.
///
/// This whitelist is the sole input-validation mechanism for client
/// payloads: keys outside it are silently dropped, and no external string
/// ever becomes a SQL identifier.
pub const CLIENT_COLUMNS: [&str; 58] = [
    "name",
    "phone",
    "district",
    "job_role",
    "country",
    "passport_no",
    "passport_submit_date",
    "passport_submitted_by",
    "passport_fee",
    "passport_payment_mode",
    "passport_payment_status",
    "passport_payment_date",
    "passport_payment_reference",
    "interview_date",
    "interview_time",
    "interview_location",
    "interview_status",
    "interview_reschedule_date",
    "interview_remarks",
    "offer_letter_status",
    "offer_letter_date",
    "offer_letter_reference",
    "employer_company",
    "offered_salary",
    "contract_duration",
    "advance_payment",
    "advance_payment_mode",
    "advance_payment_status",
    "advance_payment_date",
    "advance_payment_time",
    "advance_payment_reference",
    "medical_status",
    "medical_date",
    "medical_report_no",
    "mofa_status",
    "mofa_number",
    "mofa_date",
    "vfs_status",
    "vfs_appointment_date",
    "vfs_reference_no",
    "takamual_status",
    "takamual_date",
    "takamual_certificate_no",
    "visa_status",
    "visa_number",
    "visa_expiry_date",
    "agreement_process",
    "agreement_date",
    "agreement_number",
    "client_signed",
    "witness_name",
    "full_payment",
    "full_payment_mode",
    "full_payment_date",
    "flying_date",
    "flight_details",
    "ticket_status",
    "remarks",
];

/// Monetary columns, coerced to a decimal amount instead of a string.
pub const MONEY_COLUMNS: [&str; 3] = ["advance_payment", "full_payment", "passport_fee"];

/// A whitelisted column paired with its coerced value.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientField {
    pub column: &'static str,
    pub value: FieldValue,
}

/// Coerced payload value for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Amount(f64),
}

/// One row of the `clients` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ClientRecord {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub district: String,
    pub job_role: String,
    pub country: String,
    pub passport_no: String,
    pub passport_submit_date: String,
    pub passport_submitted_by: String,
    pub passport_fee: f64,
    pub passport_payment_mode: String,
    pub passport_payment_status: String,
    pub passport_payment_date: String,
    pub passport_payment_reference: String,
    pub interview_date: String,
    pub interview_time: String,
    pub interview_location: String,
    pub interview_status: String,
    pub interview_reschedule_date: String,
    pub interview_remarks: String,
    pub offer_letter_status: String,
    pub offer_letter_date: String,
    pub offer_letter_reference: String,
    pub employer_company: String,
    pub offered_salary: String,
    pub contract_duration: String,
    pub advance_payment: f64,
    pub advance_payment_mode: String,
    pub advance_payment_status: String,
    pub advance_payment_date: String,
    pub advance_payment_time: String,
    pub advance_payment_reference: String,
    pub medical_status: String,
    pub medical_date: String,
    pub medical_report_no: String,
    pub mofa_status: String,
    pub mofa_number: String,
    pub mofa_date: String,
    pub vfs_status: String,
    pub vfs_appointment_date: String,
    pub vfs_reference_no: String,
    pub takamual_status: String,
    pub takamual_date: String,
    pub takamual_certificate_no: String,
    pub visa_status: String,
    pub visa_number: String,
    pub visa_expiry_date: String,
    pub agreement_process: String,
    pub agreement_date: String,
    pub agreement_number: String,
    pub client_signed: String,
    pub witness_name: String,
    pub full_payment: f64,
    pub full_payment_mode: String,
    pub full_payment_date: String,
    pub flying_date: String,
    pub flight_details: String,
    pub ticket_status: String,
    pub remarks: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Collect whitelisted fields for an INSERT.
///
/// JSON `null` values are skipped entirely, leaving the column on its
/// schema default. An empty result means the payload had nothing usable.
pub fn collect_for_create(payload: &Map<String, Value>) -> Result<Vec<ClientField>, PayloadError> {
    let mut fields = Vec::new();
    for column in CLIENT_COLUMNS {
        match payload.get(column) {
            None | Some(Value::Null) => {}
            Some(value) => fields.push(coerce(column, value)?),
        }
    }
    Ok(fields)
}

/// Collect whitelisted fields for an UPDATE.
///
/// Unlike create, a JSON `null` counts as present and resets the column to
/// its empty default; omitted keys are left untouched by the caller.
pub fn collect_for_update(payload: &Map<String, Value>) -> Result<Vec<ClientField>, PayloadError> {
    let mut fields = Vec::new();
    for column in CLIENT_COLUMNS {
        if let Some(value) = payload.get(column) {
            fields.push(coerce(column, value)?);
        }
    }
    Ok(fields)
}

fn coerce(column: &'static str, value: &Value) -> Result<ClientField, PayloadError> {
    let value = if MONEY_COLUMNS.contains(&column) {
        FieldValue::Amount(coerce_amount(column, value)?)
    } else {
        FieldValue::Text(coerce_text(value))
    };
    Ok(ClientField { column, value })
}

fn coerce_amount(column: &'static str, value: &Value) -> Result<f64, PayloadError> {
    match value {
        Value::Null => Ok(0.0),
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s.trim().parse().map_err(|_| PayloadError::InvalidAmount {
            column,
            value: s.clone(),
        }),
        other => Err(PayloadError::InvalidAmount {
            column,
            value: other.to_string(),
        }),
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn unknown_keys_are_dropped_without_error() {
        let fields = collect_for_create(&payload(json!({
            "name": "Ravi",
            "not_a_column": "ignored",
            "id": 42,
        })))
        .unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].column, "name");
    }

    #[test]
    fn create_skips_null_values() {
        let fields = collect_for_create(&payload(json!({
            "name": "Ravi",
            "district": null,
        })))
        .unwrap();
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn update_resets_null_values_to_defaults() {
        let fields = collect_for_update(&payload(json!({
            "district": null,
            "advance_payment": null,
        })))
        .unwrap();
        assert_eq!(fields.len(), 2);
        assert!(
            fields
                .iter()
                .any(|f| f.column == "district" && f.value == FieldValue::Text(String::new()))
        );
        assert!(
            fields
                .iter()
                .any(|f| f.column == "advance_payment" && f.value == FieldValue::Amount(0.0))
        );
    }

    #[test]
    fn money_columns_accept_numbers_and_numeric_strings() {
        let fields = collect_for_create(&payload(json!({
            "passport_fee": 1500,
            "advance_payment": "250.50",
            "full_payment": "",
        })))
        .unwrap();
        assert!(
            fields
                .iter()
                .any(|f| f.column == "passport_fee" && f.value == FieldValue::Amount(1500.0))
        );
        assert!(
            fields
                .iter()
                .any(|f| f.column == "advance_payment" && f.value == FieldValue::Amount(250.5))
        );
        assert!(
            fields
                .iter()
                .any(|f| f.column == "full_payment" && f.value == FieldValue::Amount(0.0))
        );
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let err = collect_for_create(&payload(json!({ "passport_fee": "lots" }))).unwrap_err();
        assert!(err.to_string().contains("passport_fee"));
    }

    #[test]
    fn text_columns_stringify_scalars() {
        let fields = collect_for_create(&payload(json!({
            "phone": 9999999999u64,
            "remarks": "ok",
        })))
        .unwrap();
        assert!(
            fields
                .iter()
                .any(|f| f.column == "phone" && f.value == FieldValue::Text("9999999999".into()))
        );
    }

    #[test]
    fn whitelist_and_money_columns_are_consistent() {
        for column in MONEY_COLUMNS {
            assert!(CLIENT_COLUMNS.contains(&column));
        }
        assert!(!CLIENT_COLUMNS.contains(&"id"));
        assert!(!CLIENT_COLUMNS.contains(&"created_at"));
        assert!(!CLIENT_COLUMNS.contains(&"updated_at"));
    }
}
