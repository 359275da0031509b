use std::cmp::Ordering;

use chrono::DateTime;

use super::{SyncState, SyncStatus};

/// Orders two ISO-8601 timestamps to decide the sync direction.
///
/// Pluggable so the precision of the comparison can change without touching
/// the classification logic.
pub trait SyncComparator {
    fn compare(&self, local: &str, cloud: &str) -> Ordering;
}

/// Compares timestamps truncated to whole seconds.
///
/// Sub-second differences are deliberately invisible: the two sides stamp
/// their timestamps independently, and millisecond skew between them would
/// otherwise flag a backup or restore right after a successful sync.
/// Unparseable timestamps sort as the epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondPrecision;

impl SecondPrecision {
    fn seconds(value: &str) -> i64 {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.timestamp())
            .unwrap_or(0)
    }
}

impl SyncComparator for SecondPrecision {
    fn compare(&self, local: &str, cloud: &str) -> Ordering {
        Self::seconds(local).cmp(&Self::seconds(cloud))
    }
}

/// Classifies a status readout into the action it calls for.
pub fn classify(status: &SyncStatus, comparator: &dyn SyncComparator) -> SyncState {
    let Some(cloud) = status
        .last_cloud_sync
        .as_deref()
        .filter(|_| status.has_cloud_data)
    else {
        return SyncState::NoCloudData;
    };

    match comparator.compare(&status.last_local_change, cloud) {
        Ordering::Greater => SyncState::BackupNeeded,
        Ordering::Less => SyncState::RestoreAvailable,
        Ordering::Equal => SyncState::InSync,
    }
}
