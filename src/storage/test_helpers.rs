//! Shared test helpers for storage module tests.
//!
//! Every store is a fresh named in-memory database, so tests never see each
//! other's rows even when they run in parallel.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::models::Recording;

use super::store::RecordingStore;

static NEXT_STORE: AtomicUsize = AtomicUsize::new(0);

/// Creates an empty, migrated in-memory store.
pub async fn create_test_store() -> RecordingStore {
    let id = NEXT_STORE.fetch_add(1, Ordering::Relaxed);
    RecordingStore::open_in_memory(&format!("unit-{}-{id}", std::process::id()), 2)
        .await
        .expect("Failed to create test store")
}

/// Creates a recording with every column populated.
///
/// `path` points at a file that does not exist, so deleting the record never
/// touches the filesystem unless a test overrides it.
pub fn sample_recording(uuid: &str, schedule_id: &str, created_at: i64) -> Recording {
    Recording {
        video_width: Some(1920),
        video_height: Some(1080),
        schedule_id: Some(schedule_id.to_string()),
        title: Some(format!("Recording {uuid}")),
        duration: Some(42.5),
        thumbnail_width: Some(320),
        thumbnail_height: Some(180),
        thumbnail_data: Some(vec![0xff, 0xd8, 0xff, 0xe0]),
        frame_rate: Some(29.97),
        file_size: Some(1_048_576),
        digest: Some(format!("sha256-{uuid}")),
        cloud_sync_task_id: Some(format!("task-{uuid}")),
        cloud_sync_status: Some("pending".to_string()),
        cloud_storage_provider: Some("s3".to_string()),
        cloud_storage_provider_id: None,
        path: Some(format!("/nonexistent/recordings/{uuid}.mp4")),
        mime_type: Some("video/mp4".to_string()),
        ..Recording::new(uuid, created_at)
    }
}
