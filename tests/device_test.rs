use djsportscli::management::{CachedDevice, DeviceCacheManager, select_device};
use djsportscli::types::Device;

fn device(id: Option<&str>, name: &str, kind: &str, is_active: bool) -> Device {
    Device {
        id: id.map(|s| s.to_string()),
        name: name.to_string(),
        kind: kind.to_string(),
        is_active,
        volume_percent: Some(50),
    }
}

fn cached(id: &str) -> CachedDevice {
    CachedDevice {
        id: id.to_string(),
        name: "Cached".to_string(),
        kind: "Computer".to_string(),
        is_active: false,
        cached_at: 0,
    }
}

#[test]
fn test_cached_device_wins_when_still_listed() {
    let devices = vec![
        device(Some("d1"), "Active Computer", "Computer", true),
        device(Some("d2"), "Phone", "Smartphone", false),
    ];

    let selected = select_device(&devices, Some(&cached("d2"))).unwrap();
    assert_eq!(selected.id.as_deref(), Some("d2"));
}

#[test]
fn test_cached_device_is_ignored_when_gone() {
    let devices = vec![device(Some("d1"), "Laptop", "Computer", false)];

    let selected = select_device(&devices, Some(&cached("gone"))).unwrap();
    assert_eq!(selected.id.as_deref(), Some("d1"));
}

#[test]
fn test_active_computer_preferred_over_inactive_computer() {
    let devices = vec![
        device(Some("d1"), "Idle Laptop", "Computer", false),
        device(Some("d2"), "Stadium PC", "Computer", true),
    ];

    let selected = select_device(&devices, None).unwrap();
    assert_eq!(selected.id.as_deref(), Some("d2"));
}

#[test]
fn test_any_computer_preferred_over_active_phone() {
    let devices = vec![
        device(Some("d1"), "Phone", "Smartphone", true),
        device(Some("d2"), "Laptop", "Computer", false),
    ];

    let selected = select_device(&devices, None).unwrap();
    assert_eq!(selected.id.as_deref(), Some("d2"));
}

#[test]
fn test_active_device_preferred_over_first_listed() {
    let devices = vec![
        device(Some("d1"), "Speaker", "Speaker", false),
        device(Some("d2"), "Phone", "Smartphone", true),
    ];

    let selected = select_device(&devices, None).unwrap();
    assert_eq!(selected.id.as_deref(), Some("d2"));
}

#[test]
fn test_falls_back_to_first_device() {
    let devices = vec![
        device(Some("d1"), "Speaker", "Speaker", false),
        device(Some("d2"), "TV", "TV", false),
    ];

    let selected = select_device(&devices, None).unwrap();
    assert_eq!(selected.id.as_deref(), Some("d1"));
}

#[test]
fn test_devices_without_id_are_skipped() {
    let devices = vec![
        device(None, "Ghost", "Computer", true),
        device(Some("d2"), "Phone", "Smartphone", false),
    ];

    let selected = select_device(&devices, None).unwrap();
    assert_eq!(selected.id.as_deref(), Some("d2"));
}

#[test]
fn test_get_any_reports_the_record_without_an_age_gate() {
    let mut cache = DeviceCacheManager::new();
    assert!(cache.get_any().is_none());

    cache.cache(&device(Some("d1"), "Laptop", "Computer", true));
    assert_eq!(cache.get_any().map(|d| d.id.as_str()), Some("d1"));

    cache.clear();
    assert!(cache.get_any().is_none());
}

// An ancient cached record (cached_at 0) still wins selection when the
// device is listed; only the lookup shortcut requires freshness.
#[test]
fn test_expired_cached_record_still_guides_selection() {
    let devices = vec![
        device(Some("d1"), "Active Computer", "Computer", true),
        device(Some("d2"), "Phone", "Smartphone", false),
    ];

    let stale = cached("d2");
    assert_eq!(stale.cached_at, 0);

    let selected = select_device(&devices, Some(&stale)).unwrap();
    assert_eq!(selected.id.as_deref(), Some("d2"));
}

#[test]
fn test_no_usable_devices() {
    assert!(select_device(&[], None).is_none());

    let unusable = vec![device(None, "Ghost", "Computer", true)];
    assert!(select_device(&unusable, None).is_none());
}
