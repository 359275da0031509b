use std::time::{Duration, Instant};

use djsportscli::cache::{ContainerSnapshot, TrackPosition, TrackPositionCache};

fn snapshot(id: &str, tracks: &[&str]) -> ContainerSnapshot {
    ContainerSnapshot {
        id: id.to_string(),
        uri: format!("spotify:playlist:{}", id),
        track_keys: tracks.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn test_lookup_after_rebuild() {
    let mut cache = TrackPositionCache::new();
    cache.rebuild(&[snapshot("p1", &["t1", "t2", "t3"])]);

    assert_eq!(
        cache.lookup("t2"),
        Some(&TrackPosition {
            container_id: "p1".to_string(),
            container_uri: "spotify:playlist:p1".to_string(),
            position: 1,
        })
    );
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_unknown_key_misses() {
    let mut cache = TrackPositionCache::new();
    cache.rebuild(&[snapshot("p1", &["t1"])]);

    assert_eq!(cache.lookup("t9"), None);
}

#[test]
fn test_never_rebuilt_cache_misses_everything() {
    let cache = TrackPositionCache::new();
    assert!(!cache.is_fresh());
    assert_eq!(cache.lookup("t1"), None);
}

#[test]
fn test_rebuild_replaces_previous_entries() {
    let mut cache = TrackPositionCache::new();
    cache.rebuild(&[snapshot("p1", &["t1", "t2"])]);
    cache.rebuild(&[snapshot("p2", &["t2"])]);

    // t1 only existed in the previous snapshot
    assert_eq!(cache.lookup("t1"), None);

    let position = cache.lookup("t2").unwrap();
    assert_eq!(position.container_id, "p2");
    assert_eq!(position.position, 0);
}

#[test]
fn test_duplicate_track_keeps_last_container() {
    let mut cache = TrackPositionCache::new();
    cache.rebuild(&[
        snapshot("p1", &["t1", "shared"]),
        snapshot("p2", &["shared", "t3"]),
    ]);

    let position = cache.lookup("shared").unwrap();
    assert_eq!(position.container_id, "p2");
    assert_eq!(position.position, 0);
}

#[test]
fn test_stale_cache_reports_misses() {
    let window = Duration::from_secs(300);
    let mut cache = TrackPositionCache::with_freshness_window(window);

    let built = Instant::now();
    cache.rebuild_at(&[snapshot("p1", &["t1"])], built);

    // Within the window the entry resolves
    assert!(cache.lookup_at("t1", built + Duration::from_secs(299)).is_some());

    // Beyond the window every lookup misses, entries included
    assert_eq!(cache.lookup_at("t1", built + Duration::from_secs(301)), None);
}

#[test]
fn test_rebuild_restores_freshness() {
    let window = Duration::from_secs(300);
    let mut cache = TrackPositionCache::with_freshness_window(window);

    let built = Instant::now();
    cache.rebuild_at(&[snapshot("p1", &["t1"])], built);

    let later = built + Duration::from_secs(400);
    assert_eq!(cache.lookup_at("t1", later), None);

    cache.rebuild_at(&[snapshot("p1", &["t1"])], later);
    assert!(cache.lookup_at("t1", later).is_some());
}

#[test]
fn test_clear_empties_the_cache() {
    let mut cache = TrackPositionCache::new();
    cache.rebuild(&[snapshot("p1", &["t1"])]);
    assert!(!cache.is_empty());

    cache.clear();
    assert!(cache.is_empty());
    assert!(!cache.is_fresh());
    assert_eq!(cache.lookup("t1"), None);
}
