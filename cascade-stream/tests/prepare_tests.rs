// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cascade_core::StreamItem;
use cascade_stream::PrepareExt;
use cascade_test_utils::test_data::{person_alice, person_bob};
use cascade_test_utils::{test_channel, unwrap_stream, unwrap_value};
use futures::{stream, StreamExt};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_prepare_runs_on_first_poll_only() -> anyhow::Result<()> {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let (tx, stream) = test_channel();
    let mut result = stream.prepare(move || {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });

    // Act
    tx.send(person_alice())?;
    let first = unwrap_value(Some(unwrap_stream(&mut result, 500).await));
    tx.send(person_bob())?;
    let second = unwrap_value(Some(unwrap_stream(&mut result, 500).await));

    // Assert
    assert_eq!(first, person_alice());
    assert_eq!(second, person_bob());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_prepare_not_run_without_subscription() -> anyhow::Result<()> {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    // Act
    let result = stream::iter(vec![StreamItem::Value(1)]).prepare(move || {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });
    drop(result);

    // Assert
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test]
async fn test_prepare_runs_before_source_is_polled() -> anyhow::Result<()> {
    // Arrange
    let events = Arc::new(Mutex::new(Vec::new()));
    let source_events = events.clone();
    let prepare_events = events.clone();
    let source = stream::iter(vec![StreamItem::Value(1)]).inspect(move |_| {
        source_events.lock().push("source");
    });

    // Act
    let values: Vec<_> = source
        .prepare(move || prepare_events.lock().push("prepare"))
        .collect()
        .await;

    // Assert
    assert_eq!(values, vec![StreamItem::Value(1)]);
    assert_eq!(*events.lock(), vec!["prepare", "source"]);

    Ok(())
}

#[tokio::test]
async fn test_prepare_runs_on_empty_source() -> anyhow::Result<()> {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let mut result = stream::empty::<StreamItem<i32>>().prepare(move || {
        calls_clone.fetch_add(1, Ordering::SeqCst);
    });

    // Act
    let next = result.next().await;

    // Assert
    assert!(next.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_prepare_per_stream_instance() -> anyhow::Result<()> {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let build = || {
        let calls = calls.clone();
        stream::iter(vec![StreamItem::Value("test")]).prepare(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    };

    // Act
    let first: Vec<_> = build().collect().await;
    let second: Vec<_> = build().collect().await;

    // Assert
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    Ok(())
}
