// Shared test helpers for store setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use recording_store::{Recording, RecordingStore};

static NEXT_STORE: AtomicUsize = AtomicUsize::new(0);

/// Creates an empty in-memory store that no other test shares.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_store() -> RecordingStore {
    let id = NEXT_STORE.fetch_add(1, Ordering::Relaxed);
    RecordingStore::open_in_memory(&format!("it-{}-{id}", std::process::id()), 2)
        .await
        .expect("Failed to create test store")
}

/// Opens (or reopens) a file-backed store.
#[allow(dead_code)]
pub async fn create_test_store_with_path(db_path: &Path) -> RecordingStore {
    RecordingStore::open_path(db_path, 2)
        .await
        .expect("Failed to open test store")
}

/// Creates a recording with every field populated.
#[allow(dead_code)]
pub fn create_test_recording(uuid: &str, schedule_id: &str, created_at: i64) -> Recording {
    Recording {
        video_width: Some(1280),
        video_height: Some(720),
        schedule_id: Some(schedule_id.to_string()),
        title: Some(format!("Evening news {uuid}")),
        duration: Some(600.0),
        thumbnail_width: Some(160),
        thumbnail_height: Some(90),
        thumbnail_data: Some(vec![0x89, 0x50, 0x4e, 0x47]),
        frame_rate: Some(25.0),
        file_size: Some(52_428_800),
        digest: Some(format!("md5-{uuid}")),
        cloud_sync_task_id: None,
        cloud_sync_status: Some("pending".to_string()),
        cloud_storage_provider: Some("gcs".to_string()),
        cloud_storage_provider_id: None,
        path: None,
        mime_type: Some("video/mp4".to_string()),
        ..Recording::new(uuid, created_at)
    }
}

/// Inserts `count` recordings for `schedule_id` with consecutive timestamps.
#[allow(dead_code)]
pub async fn seed_schedule(store: &RecordingStore, schedule_id: &str, count: usize, start: i64) {
    let recordings: Vec<Recording> = (0..count)
        .map(|i| {
            create_test_recording(
                &format!("{schedule_id}-{i}"),
                schedule_id,
                start + i as i64,
            )
        })
        .collect();
    store
        .create_many(&recordings)
        .await
        .expect("Failed to seed recordings");
}
