//! Tests for store operations issued from many tasks at once against a
//! file-backed database.

use std::sync::Arc;

use futures::future::join_all;
use recording_store::{RecordingPatch, RecordingStore};
use tempfile::TempDir;

#[path = "helpers.rs"]
mod helpers;

use helpers::{create_test_recording, seed_schedule};

async fn open_shared_store(dir: &TempDir) -> Arc<RecordingStore> {
    let store = RecordingStore::open_path(&dir.path().join("recordings.db"), 8)
        .await
        .expect("Failed to open store");
    Arc::new(store)
}

fn errors<T>(results: Vec<Result<T, recording_store::StoreError>>) -> Vec<String> {
    results
        .into_iter()
        .filter_map(|r| r.err().map(|e| e.to_string()))
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_updates_all_succeed() {
    let dir = TempDir::new().unwrap();
    let store = open_shared_store(&dir).await;
    seed_schedule(&store, "news", 16, 0).await;

    let tasks = (0..80).map(|i| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let patch = RecordingPatch {
                cloud_sync_status: Some(Some(format!("pass-{i}"))),
                ..Default::default()
            };
            store.update(&format!("news-{}", i % 16), &patch).await
        })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("update task panicked"))
        .collect();

    let failures = errors(results);
    assert!(failures.is_empty(), "updates failed: {failures:?}");
    for row in 0..16 {
        let recording = store.get(&format!("news-{row}")).await.unwrap();
        assert!(recording
            .cloud_sync_status
            .as_deref()
            .is_some_and(|status| status.starts_with("pass-")));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_delete_recording_all_succeed() {
    let dir = TempDir::new().unwrap();
    let store = open_shared_store(&dir).await;

    let mut files = Vec::new();
    for i in 0..40 {
        let media = dir.path().join(format!("clip-{i}.mp4"));
        std::fs::write(&media, b"media").unwrap();
        let mut recording = create_test_recording(&format!("r{i}"), "s", i);
        recording.path = Some(media.to_string_lossy().into_owned());
        store.create(&recording).await.unwrap();
        files.push(media);
    }

    let tasks = (0..40).map(|i| {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.delete_recording(&format!("r{i}"), "s").await })
    });
    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.expect("delete task panicked"))
        .collect();

    assert!(results.iter().all(|r| matches!(r, Ok(remaining) if *remaining < 40)));
    let failures = errors(results);
    assert!(failures.is_empty(), "deletes failed: {failures:?}");
    assert_eq!(store.count_for_schedule("s").await.unwrap(), 0);
    assert!(files.iter().all(|f| !f.exists()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_creates_and_batch_deletes() {
    let dir = TempDir::new().unwrap();
    let store = open_shared_store(&dir).await;
    seed_schedule(&store, "old", 20, 0).await;

    let creates = (0..30).map(|i| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            store
                .create(&create_test_recording(&format!("new-{i}"), "new", 100 + i))
                .await
        })
    });
    let deletes = (0..4).map(|batch| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let uuids: Vec<String> = (0..5).map(|i| format!("old-{}", batch * 5 + i)).collect();
            store.delete_recordings(&uuids, "old").await.map(|_| ())
        })
    });

    let results: Vec<_> = join_all(creates.chain(deletes))
        .await
        .into_iter()
        .map(|joined| joined.expect("task panicked"))
        .collect();

    let failures = errors(results);
    assert!(failures.is_empty(), "writes failed: {failures:?}");
    assert_eq!(store.count_for_schedule("new").await.unwrap(), 30);
    assert_eq!(store.count_for_schedule("old").await.unwrap(), 0);
}
