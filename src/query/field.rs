//! Queryable recording columns.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

/// Storage class of a column, used to type-check predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Real,
    Blob,
}

/// A column of the `recordings` table.
///
/// Serializes with the camelCase names used in recording JSON (`scheduleId`);
/// [`Field::column`] gives the SQL column name (`schedule_id`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Uuid,
    CreatedAt,
    VideoWidth,
    VideoHeight,
    ScheduleId,
    Title,
    Duration,
    ThumbnailWidth,
    ThumbnailHeight,
    ThumbnailData,
    FrameRate,
    FileSize,
    Digest,
    CloudSyncTaskId,
    CloudSyncStatus,
    CloudStorageProvider,
    CloudStorageProviderId,
    Path,
    MimeType,
}

impl Field {
    /// SQL column name.
    pub fn column(self) -> &'static str {
        self.into()
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::CreatedAt
            | Field::VideoWidth
            | Field::VideoHeight
            | Field::ThumbnailWidth
            | Field::ThumbnailHeight
            | Field::FileSize => FieldKind::Integer,
            Field::Duration | Field::FrameRate => FieldKind::Real,
            Field::ThumbnailData => FieldKind::Blob,
            Field::Uuid
            | Field::ScheduleId
            | Field::Title
            | Field::Digest
            | Field::CloudSyncTaskId
            | Field::CloudSyncStatus
            | Field::CloudStorageProvider
            | Field::CloudStorageProviderId
            | Field::Path
            | Field::MimeType => FieldKind::Text,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self.kind(), FieldKind::Integer | FieldKind::Real)
    }

    pub fn is_text(self) -> bool {
        self.kind() == FieldKind::Text
    }
}

/// Comma-separated list of every column, in declaration order.
pub(crate) fn select_columns() -> String {
    Field::iter()
        .map(Field::column)
        .collect::<Vec<_>>()
        .join(", ")
}
