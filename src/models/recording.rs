//! The persisted recording record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error_handling::ValidationError;

/// One recorded media asset and its synchronization state.
///
/// Maps directly to the `recordings` table. `created_at` is stored as
/// milliseconds since Unix epoch. Every other column is nullable, so absent
/// values are `None` rather than a zero sentinel.
///
/// JSON uses camelCase keys (`createdAt`, `cloudSyncStatus`, ...) and encodes
/// `thumbnailData` as base64 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub uuid: String,
    pub created_at: i64,
    pub video_width: Option<u32>,
    pub video_height: Option<u32>,
    pub schedule_id: Option<String>,
    pub title: Option<String>,
    /// Seconds.
    pub duration: Option<f64>,
    pub thumbnail_width: Option<u32>,
    pub thumbnail_height: Option<u32>,
    #[serde(default, with = "super::thumbnail::base64_bytes")]
    pub thumbnail_data: Option<Vec<u8>>,
    /// Frames per second.
    pub frame_rate: Option<f64>,
    /// Bytes.
    pub file_size: Option<i64>,
    pub digest: Option<String>,
    pub cloud_sync_task_id: Option<String>,
    /// Free-form status code written by the cloud-sync process.
    pub cloud_sync_status: Option<String>,
    pub cloud_storage_provider: Option<String>,
    pub cloud_storage_provider_id: Option<String>,
    /// Local media file. Removed from disk by `delete_recording`.
    pub path: Option<String>,
    pub mime_type: Option<String>,
}

impl Recording {
    /// Creates a recording with only its identity and creation time set.
    pub fn new(uuid: impl Into<String>, created_at: i64) -> Self {
        Self {
            uuid: uuid.into(),
            created_at,
            video_width: None,
            video_height: None,
            schedule_id: None,
            title: None,
            duration: None,
            thumbnail_width: None,
            thumbnail_height: None,
            thumbnail_data: None,
            frame_rate: None,
            file_size: None,
            digest: None,
            cloud_sync_task_id: None,
            cloud_sync_status: None,
            cloud_storage_provider: None,
            cloud_storage_provider_id: None,
            path: None,
            mime_type: None,
        }
    }

    /// Creates a recording stamped with the current time.
    pub fn new_now(uuid: impl Into<String>) -> Self {
        Self::new(uuid, Utc::now().timestamp_millis())
    }

    /// `created_at` as a UTC timestamp, if it is in chrono's representable range.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    /// Checks the schema invariants.
    ///
    /// Dimensions cannot be negative by type. `cloud_sync_status` and
    /// `cloud_storage_provider` are deliberately not checked against any list.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uuid.trim().is_empty() {
            return Err(ValidationError::EmptyUuid);
        }
        if let Some(duration) = self.duration {
            if !duration.is_finite() || duration < 0.0 {
                return Err(ValidationError::NegativeDuration(duration));
            }
        }
        if let Some(frame_rate) = self.frame_rate {
            if !frame_rate.is_finite() || frame_rate <= 0.0 {
                return Err(ValidationError::InvalidFrameRate(frame_rate));
            }
        }
        if let Some(file_size) = self.file_size {
            if file_size < 0 {
                return Err(ValidationError::NegativeFileSize(file_size));
            }
        }
        Ok(())
    }
}
