use std::cmp::Ordering;

use djsportscli::sync::{SecondPrecision, SyncComparator, SyncState, SyncStatus, classify};

fn status(local: &str, cloud: Option<&str>) -> SyncStatus {
    SyncStatus {
        has_cloud_data: cloud.is_some(),
        last_cloud_sync: cloud.map(|s| s.to_string()),
        last_local_change: local.to_string(),
        device_name: "Couch Laptop".to_string(),
        cloud_device_name: cloud.map(|_| "Stadium PC".to_string()),
    }
}

#[test]
fn test_second_precision_ignores_subsecond_skew() {
    let cmp = SecondPrecision;

    assert_eq!(
        cmp.compare("2026-08-25T12:00:00.123Z", "2026-08-25T12:00:00.987Z"),
        Ordering::Equal
    );
}

#[test]
fn test_second_precision_orders_across_seconds() {
    let cmp = SecondPrecision;

    assert_eq!(
        cmp.compare("2026-08-25T12:00:01Z", "2026-08-25T12:00:00Z"),
        Ordering::Greater
    );
    assert_eq!(
        cmp.compare("2026-08-25T11:59:59Z", "2026-08-25T12:00:00Z"),
        Ordering::Less
    );
}

#[test]
fn test_second_precision_handles_offsets() {
    let cmp = SecondPrecision;

    // Same instant expressed in different zones
    assert_eq!(
        cmp.compare("2026-08-25T14:00:00+02:00", "2026-08-25T12:00:00Z"),
        Ordering::Equal
    );
}

#[test]
fn test_unparseable_timestamp_sorts_as_oldest() {
    let cmp = SecondPrecision;

    assert_eq!(
        cmp.compare("not-a-timestamp", "2026-08-25T12:00:00Z"),
        Ordering::Less
    );
}

#[test]
fn test_classify_no_cloud_data() {
    let status = status("2026-08-25T12:00:00Z", None);
    assert_eq!(classify(&status, &SecondPrecision), SyncState::NoCloudData);
}

#[test]
fn test_classify_backup_needed_when_local_newer() {
    let status = status("2026-08-25T12:05:00Z", Some("2026-08-25T12:00:00Z"));
    assert_eq!(classify(&status, &SecondPrecision), SyncState::BackupNeeded);
}

#[test]
fn test_classify_restore_available_when_cloud_newer() {
    let status = status("2026-08-25T12:00:00Z", Some("2026-08-25T12:05:00Z"));
    assert_eq!(
        classify(&status, &SecondPrecision),
        SyncState::RestoreAvailable
    );
}

#[test]
fn test_classify_in_sync_at_second_precision() {
    let status = status("2026-08-25T12:00:00.250Z", Some("2026-08-25T12:00:00.750Z"));
    assert_eq!(classify(&status, &SecondPrecision), SyncState::InSync);
}
