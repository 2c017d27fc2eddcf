//! Trait-level battery over the SQLite backend: admin self-healing,
//! whitelist-driven CRUD, and the dashboard aggregates.

use serde_json::{Value, json};

use passage_core::{ClientField, client, credentials};
use passage_store::admin::{self, CredentialError};
use passage_store::{SqliteStore, Store};

async fn fresh_store() -> SqliteStore {
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    store.init_schema().await.unwrap();
    store
}

fn create_fields(value: Value) -> Vec<ClientField> {
    client::collect_for_create(value.as_object().unwrap()).unwrap()
}

fn update_fields(value: Value) -> Vec<ClientField> {
    client::collect_for_update(value.as_object().unwrap()).unwrap()
}

#[tokio::test]
async fn init_schema_is_idempotent() {
    let store = fresh_store().await;
    store.init_schema().await.unwrap();
    store.init_schema().await.unwrap();
}

#[tokio::test]
async fn ensure_admin_creates_default_account_once() {
    let store = fresh_store().await;
    admin::ensure_admin(&store).await.unwrap();
    admin::ensure_admin(&store).await.unwrap();

    let account = store.find_admin().await.unwrap().unwrap();
    assert_eq!(account.username, "admin");
    assert_eq!(account.password, credentials::digest("admin123"));

    // Still exactly one row: the default username resolves to the same id.
    let by_name = store.find_admin_by_username("admin").await.unwrap().unwrap();
    assert_eq!(by_name.id, account.id);
}

#[tokio::test]
async fn ensure_admin_repairs_plaintext_password() {
    let store = fresh_store().await;
    store.insert_admin("admin", "admin123").await.unwrap();

    admin::ensure_admin(&store).await.unwrap();

    let account = store.find_admin().await.unwrap().unwrap();
    assert_eq!(account.password.len(), 64);
    assert!(credentials::verify("admin123", &account.password));
}

#[tokio::test]
async fn ensure_admin_repairs_known_bad_digest() {
    let store = fresh_store().await;
    store
        .insert_admin("admin", credentials::LEGACY_BAD_DIGEST)
        .await
        .unwrap();

    admin::ensure_admin(&store).await.unwrap();

    let account = store.find_admin().await.unwrap().unwrap();
    assert_eq!(account.password, credentials::digest("admin123"));
}

#[tokio::test]
async fn ensure_admin_leaves_custom_credentials_alone() {
    let store = fresh_store().await;
    store
        .insert_admin("operator", &credentials::digest("hunter2hunter2"))
        .await
        .unwrap();

    admin::ensure_admin(&store).await.unwrap();

    let account = store.find_admin().await.unwrap().unwrap();
    assert_eq!(account.username, "operator");
    assert!(credentials::verify("hunter2hunter2", &account.password));
}

#[tokio::test]
async fn change_credentials_validates_and_applies() {
    let store = fresh_store().await;
    admin::ensure_admin(&store).await.unwrap();

    let err = admin::change_credentials(&store, "", "ops", "secret99")
        .await
        .unwrap_err();
    assert!(matches!(err, CredentialError::Validation(_)));

    let err = admin::change_credentials(&store, "admin123", "ab", "secret99")
        .await
        .unwrap_err();
    assert!(matches!(err, CredentialError::Validation(_)));

    let err = admin::change_credentials(&store, "admin123", "ops-admin", "short")
        .await
        .unwrap_err();
    assert!(matches!(err, CredentialError::Validation(_)));

    let err = admin::change_credentials(&store, "wrong-pass", "ops-admin", "secret99")
        .await
        .unwrap_err();
    assert!(matches!(err, CredentialError::InvalidCredential));

    let username = admin::change_credentials(&store, "admin123", "ops-admin", "secret99")
        .await
        .unwrap();
    assert_eq!(username, "ops-admin");

    let account = store.find_admin().await.unwrap().unwrap();
    assert_eq!(account.username, "ops-admin");
    assert!(credentials::verify("secret99", &account.password));
    assert!(!credentials::verify("admin123", &account.password));
}

#[tokio::test]
async fn insert_applies_schema_defaults() {
    let store = fresh_store().await;
    let id = store
        .insert_client(&create_fields(json!({"name": "Ravi", "phone": "9999999999"})))
        .await
        .unwrap();

    let record = store.get_client(id).await.unwrap().unwrap();
    assert_eq!(record.name, "Ravi");
    assert_eq!(record.phone, "9999999999");
    assert_eq!(record.interview_status, "pending");
    assert_eq!(record.passport_submitted_by, "self");
    assert_eq!(record.mofa_status, "not_applied");
    assert_eq!(record.takamual_status, "not_required");
    assert_eq!(record.agreement_process, "not_created");
    assert_eq!(record.client_signed, "no");
    assert_eq!(record.ticket_status, "not_booked");
    assert_eq!(record.passport_fee, 0.0);
    assert_eq!(record.advance_payment, 0.0);
    assert_eq!(record.full_payment, 0.0);
}

#[tokio::test]
async fn partial_update_preserves_untouched_fields() {
    let store = fresh_store().await;
    let id = store
        .insert_client(&create_fields(json!({"name": "A", "phone": "1"})))
        .await
        .unwrap();

    store
        .update_client(id, &update_fields(json!({"visa_status": "approved"})))
        .await
        .unwrap();

    let record = store.get_client(id).await.unwrap().unwrap();
    assert_eq!(record.name, "A");
    assert_eq!(record.phone, "1");
    assert_eq!(record.visa_status, "approved");
    assert!(record.updated_at >= record.created_at);
}

#[tokio::test]
async fn empty_update_only_refreshes_timestamp() {
    let store = fresh_store().await;
    let id = store
        .insert_client(&create_fields(json!({"name": "A", "phone": "1"})))
        .await
        .unwrap();

    store.update_client(id, &[]).await.unwrap();

    let record = store.get_client(id).await.unwrap().unwrap();
    assert_eq!(record.name, "A");
}

#[tokio::test]
async fn update_and_delete_of_missing_id_are_no_ops() {
    let store = fresh_store().await;
    store
        .update_client(424242, &update_fields(json!({"name": "ghost"})))
        .await
        .unwrap();
    store.delete_client(424242).await.unwrap();
    assert!(store.get_client(424242).await.unwrap().is_none());
}

#[tokio::test]
async fn listing_returns_newest_first() {
    let store = fresh_store().await;
    let mut ids = Vec::new();
    for name in ["first", "second", "third"] {
        ids.push(
            store
                .insert_client(&create_fields(json!({"name": name, "phone": "1"})))
                .await
                .unwrap(),
        );
    }

    let listed: Vec<i64> = store
        .list_clients()
        .await
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn delete_removes_only_the_target_row() {
    let store = fresh_store().await;
    let keep = store
        .insert_client(&create_fields(json!({"name": "keep", "phone": "1"})))
        .await
        .unwrap();
    let drop = store
        .insert_client(&create_fields(json!({"name": "drop", "phone": "2"})))
        .await
        .unwrap();

    store.delete_client(drop).await.unwrap();

    assert!(store.get_client(drop).await.unwrap().is_none());
    assert!(store.get_client(keep).await.unwrap().is_some());
}

#[tokio::test]
async fn stats_on_empty_repository_are_all_zero() {
    let store = fresh_store().await;
    store
        .insert_client(&create_fields(json!({"name": "gone", "phone": "1"})))
        .await
        .unwrap();
    store.clear_clients().await.unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_clients, 0);
    assert_eq!(stats.interview_pending, 0);
    assert_eq!(stats.interview_passed, 0);
    assert_eq!(stats.visa_approved, 0);
    assert_eq!(stats.visa_processing, 0);
    assert_eq!(stats.total_advance, 0.0);
    assert_eq!(stats.total_full_payment, 0.0);
    assert_eq!(stats.total_passport_fee, 0.0);
    assert_eq!(stats.total_revenue, 0.0);
    assert_eq!(stats.ready_to_fly, 0);
}

#[tokio::test]
async fn stats_counts_and_sums_match_the_pipeline() {
    let store = fresh_store().await;

    // Interview scheduled, fee paid through the agency.
    store
        .insert_client(&create_fields(json!({
            "name": "Asha", "phone": "1",
            "interview_status": "scheduled",
            "passport_submitted_by": "agency",
            "passport_fee": 100,
            "advance_payment": 200,
        })))
        .await
        .unwrap();
    // Passed interview, visa still in process.
    store
        .insert_client(&create_fields(json!({
            "name": "Binod", "phone": "2",
            "interview_status": "passed",
            "visa_status": "applied",
            "passport_fee": 50,
            "full_payment": 300,
        })))
        .await
        .unwrap();
    // Approved visa with a flying date.
    store
        .insert_client(&create_fields(json!({
            "name": "Chitra", "phone": "3",
            "interview_status": "selected",
            "visa_status": "approved",
            "flying_date": "2025-01-15",
        })))
        .await
        .unwrap();
    // Approved visa, not yet booked.
    store
        .insert_client(&create_fields(json!({
            "name": "Deepa", "phone": "4",
            "visa_status": "approved",
        })))
        .await
        .unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_clients, 4);
    // Deepa's interview_status defaulted to pending; Asha's is scheduled.
    assert_eq!(stats.interview_pending, 2);
    assert_eq!(stats.interview_passed, 2);
    assert_eq!(stats.visa_approved, 2);
    assert_eq!(stats.visa_processing, 1);
    assert_eq!(stats.total_advance, 200.0);
    assert_eq!(stats.total_full_payment, 300.0);
    // Only the agency-submitted passport fee counts.
    assert_eq!(stats.total_passport_fee, 100.0);
    assert_eq!(
        stats.total_revenue,
        stats.total_advance + stats.total_full_payment + stats.total_passport_fee
    );
    assert_eq!(stats.ready_to_fly, 1);
}

#[tokio::test]
async fn connect_dispatches_sqlite_for_plain_urls() {
    let store = passage_store::connect("sqlite::memory:").await.unwrap();
    assert_eq!(store.backend(), "sqlite");
}
