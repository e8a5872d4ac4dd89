//! JSONL export functionality.
//!
//! Each line is one recording serialized exactly as the library serializes
//! [`Recording`]: camelCase keys, base64 thumbnail, `null` for absent fields.
//! Ideal for piping to `jq` or loading into another store.

use std::io::{self, Write};

use anyhow::{Context, Result};
use futures::TryStreamExt;
use log::info;
use sqlx::{QueryBuilder, Sqlite};

use crate::models::Recording;
use crate::query::sql::push_where;
use crate::query::Predicate;
use crate::storage::{select_sql, RecordingStore, ORDER_BY};

use super::types::ExportOptions;
use super::writer::IgnoreBrokenPipe;

/// Streams matching recordings into `writer`, oldest first.
///
/// Rows are fetched one at a time, so memory use does not grow with the
/// table. Returns the number of recordings written.
pub async fn write_jsonl<W: Write>(
    store: &RecordingStore,
    predicate: Option<&Predicate>,
    writer: &mut W,
) -> Result<usize> {
    if let Some(predicate) = predicate {
        predicate.validate().context("Invalid export filter")?;
    }

    let mut query_builder = QueryBuilder::<Sqlite>::new(select_sql());
    push_where(&mut query_builder, predicate);
    query_builder.push(ORDER_BY);

    let query = query_builder.build_query_as::<Recording>();
    let mut rows = query.fetch(store.pool().as_ref());

    let mut record_count = 0;
    while let Some(recording) = rows.try_next().await? {
        serde_json::to_writer(&mut *writer, &recording)
            .with_context(|| format!("Failed to serialize recording {}", recording.uuid))?;
        writer.write_all(b"\n")?;
        record_count += 1;
    }
    writer.flush()?;

    Ok(record_count)
}

/// Exports recordings to JSONL (JSON Lines), to a file or stdout.
///
/// Returns the number of records exported.
pub async fn export_jsonl(store: &RecordingStore, opts: &ExportOptions) -> Result<usize> {
    let mut writer: Box<dyn Write> = if let Some(output_path) = opts.output.as_ref() {
        let file = tokio::fs::File::create(output_path)
            .await
            .with_context(|| format!("Failed to create output file: {}", output_path.display()))?
            .into_std()
            .await;
        Box::new(io::BufWriter::new(file))
    } else {
        Box::new(IgnoreBrokenPipe::new(io::stdout()))
    };

    let record_count = write_jsonl(store, opts.predicate.as_ref(), &mut writer).await?;

    if let Some(output_path) = opts.output.as_ref() {
        info!(
            "Exported {record_count} recordings to {}",
            output_path.display()
        );
    }
    Ok(record_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Field;
    use crate::storage::test_helpers::{create_test_store, sample_recording};

    #[tokio::test]
    async fn test_write_jsonl_one_line_per_recording() {
        let store = create_test_store().await;
        store
            .create(&sample_recording("b", "sched-1", 2))
            .await
            .unwrap();
        store
            .create(&sample_recording("a", "sched-2", 1))
            .await
            .unwrap();

        let mut out = Vec::new();
        let written = write_jsonl(&store, None, &mut out).await.unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Recording = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, sample_recording("a", "sched-2", 1));
        assert!(lines[0].contains("\"scheduleId\":\"sched-2\""));
    }

    #[tokio::test]
    async fn test_write_jsonl_applies_filter() {
        let store = create_test_store().await;
        store
            .create(&sample_recording("a", "sched-1", 1))
            .await
            .unwrap();
        store
            .create(&sample_recording("b", "sched-2", 2))
            .await
            .unwrap();

        let predicate = Predicate::equal_to(Field::ScheduleId, "sched-2");
        let mut out = Vec::new();
        let written = write_jsonl(&store, Some(&predicate), &mut out)
            .await
            .unwrap();
        assert_eq!(written, 1);
        assert!(String::from_utf8(out).unwrap().contains("\"uuid\":\"b\""));
    }

    #[tokio::test]
    async fn test_write_jsonl_rejects_invalid_filter() {
        let store = create_test_store().await;
        let predicate = Predicate::contains(Field::Duration, "1");
        let mut out = Vec::new();
        assert!(write_jsonl(&store, Some(&predicate), &mut out)
            .await
            .is_err());
        assert!(out.is_empty());
    }
}
