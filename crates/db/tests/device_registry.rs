//! Integration tests for `DeviceRepo`: registration upsert semantics and
//! lost-mode transitions.

use chrono::Utc;
use sqlx::PgPool;

use beacon_db::models::device::DeviceRegistration;
use beacon_db::repositories::DeviceRepo;

fn registration(device_id: &str, owner_uid: &str, token: &str) -> DeviceRegistration {
    DeviceRegistration {
        device_id: device_id.to_string(),
        owner_uid: owner_uid.to_string(),
        device_name: "Pixel 8".to_string(),
        fcm_token: token.to_string(),
        platform: "android".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_registration_initializes_defaults(pool: PgPool) {
    let device = DeviceRepo::upsert(&pool, &registration("dev-1", "alice", "tok-1"))
        .await
        .unwrap();

    assert_eq!(device.device_id, "dev-1");
    assert_eq!(device.owner_uid, "alice");
    assert_eq!(device.status, "ACTIVE");
    assert!(!device.lost_mode_enabled);
    assert_eq!(device.lost_mode_enabled_at, None);
    assert_eq!(device.push_token(), Some("tok-1"));
    assert!(device.last_location_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn re_registration_updates_profile_but_preserves_state(pool: PgPool) {
    DeviceRepo::upsert(&pool, &registration("dev-1", "alice", "tok-1"))
        .await
        .unwrap();

    // Put the device into lost mode between the two registrations.
    let marked = DeviceRepo::mark_lost(&pool, "dev-1", "alice", Utc::now())
        .await
        .unwrap();
    assert!(marked);

    let mut second = registration("dev-1", "alice", "tok-2");
    second.device_name = "Pixel 8 Pro".to_string();
    let device = DeviceRepo::upsert(&pool, &second).await.unwrap();

    // Profile and token refreshed.
    assert_eq!(device.device_name, "Pixel 8 Pro");
    assert_eq!(device.push_token(), Some("tok-2"));
    // Lost-mode state untouched by re-registration.
    assert_eq!(device.status, "LOST");
    assert!(device.lost_mode_enabled);
    assert!(device.lost_mode_enabled_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_lost_and_found_flip_the_documented_columns(pool: PgPool) {
    DeviceRepo::upsert(&pool, &registration("dev-1", "alice", "tok-1"))
        .await
        .unwrap();

    let now = Utc::now();
    assert!(DeviceRepo::mark_lost(&pool, "dev-1", "alice", now).await.unwrap());

    let lost = DeviceRepo::find_by_id(&pool, "dev-1").await.unwrap().unwrap();
    assert_eq!(lost.status, "LOST");
    assert!(lost.lost_mode_enabled);
    assert_eq!(lost.lost_mode_enabled_by_uid.as_deref(), Some("alice"));
    assert!(lost.lost_mode_enabled_at.is_some());
    assert_eq!(lost.lost_mode_disabled_at, None);

    let later = Utc::now();
    assert!(DeviceRepo::mark_found(&pool, "dev-1", later).await.unwrap());

    let found = DeviceRepo::find_by_id(&pool, "dev-1").await.unwrap().unwrap();
    assert_eq!(found.status, "ACTIVE");
    assert!(!found.lost_mode_enabled);
    assert!(found.lost_mode_disabled_at.is_some());
    // enabled_at/enabled_by are history, not cleared on recovery.
    assert!(found.lost_mode_enabled_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn transitions_on_unknown_device_report_no_rows(pool: PgPool) {
    assert!(!DeviceRepo::mark_lost(&pool, "ghost", "alice", Utc::now()).await.unwrap());
    assert!(!DeviceRepo::mark_found(&pool, "ghost", Utc::now()).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_for_owner_only_returns_that_owners_devices(pool: PgPool) {
    DeviceRepo::upsert(&pool, &registration("dev-1", "alice", "tok-1"))
        .await
        .unwrap();
    DeviceRepo::upsert(&pool, &registration("dev-2", "alice", "tok-2"))
        .await
        .unwrap();
    DeviceRepo::upsert(&pool, &registration("dev-3", "bob", "tok-3"))
        .await
        .unwrap();

    let devices = DeviceRepo::list_for_owner(&pool, "alice").await.unwrap();
    assert_eq!(devices.len(), 2);
    assert!(devices.iter().all(|d| d.owner_uid == "alice"));
}
