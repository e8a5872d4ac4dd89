//! Recording CRUD and filtered queries.

use log::debug;
use sqlx::query::Query as SqlQuery;
use sqlx::sqlite::SqliteArguments;
use sqlx::{QueryBuilder, Sqlite};
use strum::IntoEnumIterator;

use crate::error_handling::StoreError;
use crate::models::{Recording, RecordingPatch};
use crate::query::sql::push_where;
use crate::query::{select_columns, Field, Query};

use super::store::RecordingStore;
use super::types::{count_from_sql, QueryResults};

type SqliteQuery<'q> = SqlQuery<'q, Sqlite, SqliteArguments<'q>>;

/// Stable ordering for every recording listing.
pub(crate) const ORDER_BY: &str = " ORDER BY created_at, uuid";

pub(crate) fn select_sql() -> String {
    format!("SELECT {} FROM recordings", select_columns())
}

fn insert_sql() -> String {
    let placeholders = vec!["?"; Field::iter().count()].join(", ");
    format!(
        "INSERT INTO recordings ({}) VALUES ({})",
        select_columns(),
        placeholders
    )
}

fn update_sql() -> String {
    let assignments = Field::iter()
        .filter(|f| *f != Field::Uuid)
        .map(|f| format!("{} = ?", f.column()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("UPDATE recordings SET {assignments} WHERE uuid = ?")
}

/// Binds every column except `uuid`, in [`Field`] declaration order.
fn bind_columns<'q>(query: SqliteQuery<'q>, r: &'q Recording) -> SqliteQuery<'q> {
    query
        .bind(r.created_at)
        .bind(r.video_width)
        .bind(r.video_height)
        .bind(&r.schedule_id)
        .bind(&r.title)
        .bind(r.duration)
        .bind(r.thumbnail_width)
        .bind(r.thumbnail_height)
        .bind(&r.thumbnail_data)
        .bind(r.frame_rate)
        .bind(r.file_size)
        .bind(&r.digest)
        .bind(&r.cloud_sync_task_id)
        .bind(&r.cloud_sync_status)
        .bind(&r.cloud_storage_provider)
        .bind(&r.cloud_storage_provider_id)
        .bind(&r.path)
        .bind(&r.mime_type)
}

fn map_insert_error(e: sqlx::Error, uuid: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return StoreError::AlreadyExists(uuid.to_string());
        }
    }
    e.into()
}

impl RecordingStore {
    /// Inserts a new recording.
    ///
    /// # Errors
    ///
    /// `Validation` if the record breaks an invariant, `AlreadyExists` if the
    /// uuid is taken.
    pub async fn create(&self, recording: &Recording) -> Result<(), StoreError> {
        recording.validate()?;
        let sql = insert_sql();
        bind_columns(sqlx::query(&sql).bind(&recording.uuid), recording)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| map_insert_error(e, &recording.uuid))?;

        debug!("Created recording {}", recording.uuid);
        self.notify_subscribers().await;
        Ok(())
    }

    /// Inserts several recordings atomically: either all are stored or none.
    pub async fn create_many(&self, recordings: &[Recording]) -> Result<(), StoreError> {
        for recording in recordings {
            recording.validate()?;
        }

        let sql = insert_sql();
        let mut tx = self.begin_write().await?;
        for recording in recordings {
            bind_columns(sqlx::query(&sql).bind(&recording.uuid), recording)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_insert_error(e, &recording.uuid))?;
        }
        tx.commit().await?;

        debug!("Created {} recordings", recordings.len());
        if !recordings.is_empty() {
            self.notify_subscribers().await;
        }
        Ok(())
    }

    /// Looks up a recording by uuid.
    pub async fn find(&self, uuid: &str) -> Result<Option<Recording>, StoreError> {
        let sql = format!("{} WHERE uuid = ?", select_sql());
        let recording = sqlx::query_as::<_, Recording>(&sql)
            .bind(uuid)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(recording)
    }

    /// Looks up a recording by uuid, failing with `NotFound` when absent.
    pub async fn get(&self, uuid: &str) -> Result<Recording, StoreError> {
        self.find(uuid)
            .await?
            .ok_or_else(|| StoreError::NotFound(uuid.to_string()))
    }

    /// Applies `patch` to the stored recording and returns the result.
    ///
    /// The uuid never changes. The patched record is validated before it is written.
    pub async fn update(&self, uuid: &str, patch: &RecordingPatch) -> Result<Recording, StoreError> {
        let select = format!("{} WHERE uuid = ?", select_sql());
        let mut tx = self.begin_write().await?;

        let mut recording = sqlx::query_as::<_, Recording>(&select)
            .bind(uuid)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::NotFound(uuid.to_string()))?;

        patch.apply(&mut recording);
        recording.validate()?;

        let sql = update_sql();
        bind_columns(sqlx::query(&sql), &recording)
            .bind(&recording.uuid)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!("Updated recording {uuid}");
        self.notify_subscribers().await;
        Ok(recording)
    }

    /// Removes a recording row. Its media file is left alone; see
    /// [`RecordingStore::delete_recording`] for file-aware deletion.
    pub async fn delete(&self, uuid: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM recordings WHERE uuid = ?")
            .bind(uuid)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(uuid.to_string()));
        }

        debug!("Deleted recording {uuid}");
        self.notify_subscribers().await;
        Ok(())
    }

    /// Removes every recording row and returns how many were removed.
    pub async fn delete_all(&self) -> Result<usize, StoreError> {
        let result = sqlx::query("DELETE FROM recordings")
            .execute(self.pool.as_ref())
            .await?;
        let removed = result.rows_affected() as usize;

        debug!("Deleted all {removed} recordings");
        self.notify_subscribers().await;
        Ok(removed)
    }

    /// Every recording, oldest first.
    pub async fn all(&self) -> Result<QueryResults<Recording>, StoreError> {
        self.query(&Query::all()).await
    }

    /// Recordings matching `query`, oldest first.
    ///
    /// `count` is the number of matches before the limit is applied.
    pub async fn query(&self, query: &Query) -> Result<QueryResults<Recording>, StoreError> {
        query.validate()?;
        let predicate = query.predicate.as_ref();

        let mut count_builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM recordings");
        push_where(&mut count_builder, predicate);

        let mut select_builder = QueryBuilder::<Sqlite>::new(select_sql());
        push_where(&mut select_builder, predicate);
        select_builder.push(ORDER_BY);
        if let Some(limit) = query.limit {
            select_builder.push(" LIMIT ");
            select_builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        // One read transaction so the count and the rows agree.
        let mut tx = self.pool.begin().await?;
        let count: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&mut *tx)
            .await?;
        let results = select_builder
            .build_query_as::<Recording>()
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(QueryResults {
            results,
            count: count_from_sql(count),
        })
    }

    /// Number of stored recordings.
    pub async fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recordings")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count_from_sql(count))
    }
}
