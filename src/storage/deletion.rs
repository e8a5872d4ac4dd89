//! File-aware recording deletion.
//!
//! A recording row points at a media file on local disk through `path`.
//! Deleting a recording here removes the row and then the file, and reports
//! how many recordings remain for the schedule the caller is looking at.

use std::io::ErrorKind;

use log::{debug, error, warn};
use sqlx::{QueryBuilder, Sqlite};

use crate::error_handling::StoreError;

use super::schedules::count_for_schedule;
use super::store::RecordingStore;

/// Removes a recording's media file.
///
/// The row is already gone when this runs, so a failure is logged and
/// otherwise ignored. Returns whether the file was removed.
async fn remove_recording_file(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("Removed recording file {path}");
            true
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Recording file {path} was already missing");
            false
        }
        Err(e) => {
            error!("Failed to remove recording file {path}: {e}");
            false
        }
    }
}

async fn remove_recording_files(paths: &[String]) {
    for path in paths {
        remove_recording_file(path).await;
    }
}

impl RecordingStore {
    /// Deletes one recording and its media file.
    ///
    /// Returns the number of recordings still belonging to `schedule_id`.
    /// An unknown uuid deletes nothing and still returns the count. The file
    /// is removed only after the row deletion has committed; failing to
    /// remove it is logged and does not fail the call.
    pub async fn delete_recording(
        &self,
        uuid: &str,
        schedule_id: &str,
    ) -> Result<usize, StoreError> {
        let mut tx = self.begin_write().await?;

        let path: Option<Option<String>> =
            sqlx::query_scalar("SELECT path FROM recordings WHERE uuid = ?")
                .bind(uuid)
                .fetch_optional(&mut *tx)
                .await?;

        if path.is_some() {
            sqlx::query("DELETE FROM recordings WHERE uuid = ?")
                .bind(uuid)
                .execute(&mut *tx)
                .await?;
        }
        let remaining = count_for_schedule(&mut *tx, schedule_id).await?;
        tx.commit().await?;

        match path {
            Some(path) => {
                debug!("Deleted recording {uuid}, {remaining} left for schedule {schedule_id}");
                self.notify_subscribers().await;
                if let Some(path) = path {
                    remove_recording_file(&path).await;
                }
            }
            None => debug!("Recording {uuid} not found, nothing deleted"),
        }
        Ok(remaining)
    }

    /// Deletes every listed recording and its media file.
    ///
    /// Unknown uuids are skipped. Returns the number of recordings still
    /// belonging to `schedule_id`. All rows are removed in one transaction,
    /// then every file is attempted; removal failures are only logged.
    pub async fn delete_recordings(
        &self,
        uuids: &[String],
        schedule_id: &str,
    ) -> Result<usize, StoreError> {
        let mut tx = self.begin_write().await?;

        let mut paths = Vec::new();
        let mut deleted = 0;
        if !uuids.is_empty() {
            let mut select = QueryBuilder::<Sqlite>::new("SELECT path FROM recordings WHERE uuid IN (");
            let mut separated = select.separated(", ");
            for uuid in uuids {
                separated.push_bind(uuid.clone());
            }
            separated.push_unseparated(")");
            let found: Vec<Option<String>> = select
                .build_query_scalar()
                .fetch_all(&mut *tx)
                .await?;
            paths.extend(found.into_iter().flatten());

            let mut delete = QueryBuilder::<Sqlite>::new("DELETE FROM recordings WHERE uuid IN (");
            let mut separated = delete.separated(", ");
            for uuid in uuids {
                separated.push_bind(uuid.clone());
            }
            separated.push_unseparated(")");
            deleted = delete.build().execute(&mut *tx).await?.rows_affected();
        }
        let remaining = count_for_schedule(&mut *tx, schedule_id).await?;
        tx.commit().await?;

        debug!("Deleted {deleted} recordings, {remaining} left for schedule {schedule_id}");
        if deleted > 0 {
            self.notify_subscribers().await;
        }
        remove_recording_files(&paths).await;
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::{create_test_store, sample_recording};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_remove_missing_file_is_not_removed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.mp4");
        assert!(!remove_recording_file(path.to_str().unwrap()).await);
        assert!(!remove_recording_file("").await);

        std::fs::write(&path, b"media").unwrap();
        assert!(remove_recording_file(path.to_str().unwrap()).await);
    }

    #[tokio::test]
    async fn test_unremovable_file_still_reports_remaining() {
        // A directory cannot be removed with remove_file.
        let dir = TempDir::new().unwrap();
        let store = create_test_store().await;
        let mut recording = sample_recording("rec-1", "sched-1", 1);
        recording.path = Some(dir.path().to_string_lossy().to_string());
        store.create(&recording).await.unwrap();
        store
            .create(&sample_recording("rec-2", "sched-1", 2))
            .await
            .unwrap();

        let remaining = store.delete_recording("rec-1", "sched-1").await.unwrap();
        assert_eq!(remaining, 1);
        assert!(store.find("rec-1").await.unwrap().is_none());
        assert!(dir.path().exists());
    }

    #[tokio::test]
    async fn test_delete_recording_removes_row_and_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("rec-1.mp4");
        std::fs::write(&file, b"media").unwrap();

        let store = create_test_store().await;
        let mut recording = sample_recording("rec-1", "sched-1", 1);
        recording.path = Some(file.to_string_lossy().to_string());
        store.create(&recording).await.unwrap();
        store
            .create(&sample_recording("rec-2", "sched-1", 2))
            .await
            .unwrap();

        let remaining = store.delete_recording("rec-1", "sched-1").await.unwrap();
        assert_eq!(remaining, 1);
        assert!(!file.exists());
        assert!(store.find("rec-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_recording_unknown_uuid_reports_count() {
        let store = create_test_store().await;
        store
            .create(&sample_recording("rec-1", "sched-1", 1))
            .await
            .unwrap();
        let remaining = store.delete_recording("nope", "sched-1").await.unwrap();
        assert_eq!(remaining, 1);
    }

    #[tokio::test]
    async fn test_delete_recordings_removes_listed_only() {
        let dir = TempDir::new().unwrap();
        let store = create_test_store().await;
        let mut files = Vec::new();
        for i in 0..3 {
            let file = dir.path().join(format!("rec-{i}.mp4"));
            std::fs::write(&file, b"media").unwrap();
            let mut recording = sample_recording(&format!("rec-{i}"), "sched-1", i);
            recording.path = Some(file.to_string_lossy().to_string());
            store.create(&recording).await.unwrap();
            files.push(file);
        }

        let remaining = store
            .delete_recordings(
                &["rec-0".to_string(), "rec-2".to_string(), "nope".to_string()],
                "sched-1",
            )
            .await
            .unwrap();
        assert_eq!(remaining, 1);
        assert!(!files[0].exists());
        assert!(files[1].exists());
        assert!(!files[2].exists());
    }

    #[tokio::test]
    async fn test_delete_recordings_empty_list() {
        let store = create_test_store().await;
        store
            .create(&sample_recording("rec-1", "sched-1", 1))
            .await
            .unwrap();
        assert_eq!(store.delete_recordings(&[], "sched-1").await.unwrap(), 1);
    }
}
