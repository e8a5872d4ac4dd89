//! Lookups keyed by schedule id.
//!
//! Recordings reference an external schedule entity through `schedule_id`.
//! These queries answer which recordings belong to which schedules without
//! loading full records.

use sqlx::{Executor, QueryBuilder, Sqlite};

use crate::error_handling::StoreError;

use super::store::RecordingStore;
use super::types::{count_from_sql, QueryResults, RecordingRef};

/// Counts the recordings that belong to `schedule_id`.
pub(crate) async fn count_for_schedule<'e, E>(
    executor: E,
    schedule_id: &str,
) -> Result<usize, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recordings WHERE schedule_id = ?")
        .bind(schedule_id)
        .fetch_one(executor)
        .await?;
    Ok(count_from_sql(count))
}

fn push_schedule_list(query_builder: &mut QueryBuilder<'_, Sqlite>, schedule_ids: &[String]) {
    query_builder.push("schedule_id IN (");
    let mut separated = query_builder.separated(", ");
    for schedule_id in schedule_ids {
        separated.push_bind(schedule_id.clone());
    }
    separated.push_unseparated(")");
}

impl RecordingStore {
    /// Number of recordings belonging to `schedule_id`.
    pub async fn count_for_schedule(&self, schedule_id: &str) -> Result<usize, StoreError> {
        Ok(count_for_schedule(self.pool.as_ref(), schedule_id).await?)
    }

    /// Uuids of the recordings that belong to `schedule_id`, oldest first.
    pub async fn recording_ids_for_schedule(
        &self,
        schedule_id: &str,
    ) -> Result<QueryResults<String>, StoreError> {
        let uuids: Vec<String> = sqlx::query_scalar(
            "SELECT uuid FROM recordings WHERE schedule_id = ? ORDER BY created_at, uuid",
        )
        .bind(schedule_id)
        .fetch_all(self.pool.as_ref())
        .await?;
        Ok(QueryResults::complete(uuids))
    }

    /// Uuid and schedule id of every recording belonging to any of `schedule_ids`.
    pub async fn recording_ids_for_schedules(
        &self,
        schedule_ids: &[String],
    ) -> Result<QueryResults<RecordingRef>, StoreError> {
        if schedule_ids.is_empty() {
            return Ok(QueryResults::complete(Vec::new()));
        }

        let mut query_builder =
            QueryBuilder::<Sqlite>::new("SELECT uuid, schedule_id FROM recordings WHERE ");
        push_schedule_list(&mut query_builder, schedule_ids);
        query_builder.push(" ORDER BY created_at, uuid");

        let refs = query_builder
            .build_query_as::<RecordingRef>()
            .fetch_all(self.pool.as_ref())
            .await?;
        Ok(QueryResults::complete(refs))
    }

    /// The subset of `schedule_ids` that has at least one recording.
    pub async fn schedule_ids_with_recordings(
        &self,
        schedule_ids: &[String],
    ) -> Result<QueryResults<String>, StoreError> {
        if schedule_ids.is_empty() {
            return Ok(QueryResults::complete(Vec::new()));
        }

        let mut query_builder =
            QueryBuilder::<Sqlite>::new("SELECT DISTINCT schedule_id FROM recordings WHERE ");
        push_schedule_list(&mut query_builder, schedule_ids);
        query_builder.push(" ORDER BY schedule_id");

        let ids: Vec<String> = query_builder
            .build_query_scalar()
            .fetch_all(self.pool.as_ref())
            .await?;
        Ok(QueryResults::complete(ids))
    }

    /// Distinct schedule ids that have recordings, optionally limited.
    ///
    /// `count` is the total number of distinct schedule ids.
    pub async fn all_schedule_ids(
        &self,
        limit: Option<usize>,
    ) -> Result<QueryResults<String>, StoreError> {
        let mut query_builder = QueryBuilder::<Sqlite>::new(
            "SELECT DISTINCT schedule_id FROM recordings WHERE schedule_id IS NOT NULL ORDER BY schedule_id",
        );
        if let Some(limit) = limit {
            query_builder.push(" LIMIT ");
            query_builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let mut tx = self.pool.begin().await?;
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT schedule_id) FROM recordings WHERE schedule_id IS NOT NULL",
        )
        .fetch_one(&mut *tx)
        .await?;
        let ids: Vec<String> = query_builder
            .build_query_scalar()
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(QueryResults {
            results: ids,
            count: count_from_sql(total),
        })
    }
}
