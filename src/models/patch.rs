//! Partial updates to a recording.

use serde::{Deserialize, Deserializer};

use super::Recording;

/// A set of field changes to apply to an existing recording.
///
/// Outer `None` leaves a field untouched. For nullable fields `Some(None)`
/// clears the value; in JSON that is an explicit `null` as opposed to a
/// missing key. The uuid is not part of a patch and a `uuid` key in patch JSON
/// is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingPatch {
    pub created_at: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub video_width: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present")]
    pub video_height: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present")]
    pub schedule_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub duration: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub thumbnail_width: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present")]
    pub thumbnail_height: Option<Option<u32>>,
    #[serde(
        default,
        deserialize_with = "super::thumbnail::base64_bytes::deserialize_patch"
    )]
    pub thumbnail_data: Option<Option<Vec<u8>>>,
    #[serde(default, deserialize_with = "present")]
    pub frame_rate: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub file_size: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub digest: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub cloud_sync_task_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub cloud_sync_status: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub cloud_storage_provider: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub cloud_storage_provider_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub path: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub mime_type: Option<Option<String>>,
}

/// Marks a key that appeared in the input, even when its value is `null`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn assign<T: Clone>(target: &mut T, change: &Option<T>) {
    if let Some(value) = change {
        *target = value.clone();
    }
}

impl RecordingPatch {
    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites the fields present in the patch.
    pub fn apply(&self, recording: &mut Recording) {
        assign(&mut recording.created_at, &self.created_at);
        assign(&mut recording.video_width, &self.video_width);
        assign(&mut recording.video_height, &self.video_height);
        assign(&mut recording.schedule_id, &self.schedule_id);
        assign(&mut recording.title, &self.title);
        assign(&mut recording.duration, &self.duration);
        assign(&mut recording.thumbnail_width, &self.thumbnail_width);
        assign(&mut recording.thumbnail_height, &self.thumbnail_height);
        assign(&mut recording.thumbnail_data, &self.thumbnail_data);
        assign(&mut recording.frame_rate, &self.frame_rate);
        assign(&mut recording.file_size, &self.file_size);
        assign(&mut recording.digest, &self.digest);
        assign(&mut recording.cloud_sync_task_id, &self.cloud_sync_task_id);
        assign(&mut recording.cloud_sync_status, &self.cloud_sync_status);
        assign(&mut recording.cloud_storage_provider, &self.cloud_storage_provider);
        assign(
            &mut recording.cloud_storage_provider_id,
            &self.cloud_storage_provider_id,
        );
        assign(&mut recording.path, &self.path);
        assign(&mut recording.mime_type, &self.mime_type);
    }
}
