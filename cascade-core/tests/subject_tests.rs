// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cascade_core::{CascadeError, StreamItem, Subject, SubjectError};
use futures::StreamExt;

#[tokio::test]
async fn subject_broadcasts_to_every_subscriber() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<u32>::new();
    let mut first = subject.subscribe()?;
    let mut second = subject.subscribe()?;

    // Act
    subject.next(7)?;

    // Assert
    assert_eq!(first.next().await, Some(StreamItem::Value(7)));
    assert_eq!(second.next().await, Some(StreamItem::Value(7)));
    assert_eq!(subject.subscriber_count(), 2);

    Ok(())
}

#[tokio::test]
async fn late_subscriber_misses_earlier_items() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<&'static str>::new();
    subject.next("early")?;

    // Act
    let mut late = subject.subscribe()?;
    subject.next("late")?;
    subject.close();

    // Assert
    assert_eq!(late.next().await, Some(StreamItem::Value("late")));
    assert_eq!(late.next().await, None);

    Ok(())
}

#[tokio::test]
async fn error_is_delivered_then_subject_closes() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<bool>::new();
    let mut stream = subject.subscribe()?;

    // Act
    subject.error(CascadeError::stream_error("indicator failed"))?;

    // Assert
    assert!(matches!(
        stream.next().await,
        Some(StreamItem::Error(CascadeError::StreamProcessingError { context })) if context == "indicator failed"
    ));
    assert_eq!(stream.next().await, None);
    assert!(subject.is_closed());
    assert_eq!(subject.next(true), Err(SubjectError::Closed));
    assert!(subject.subscribe().is_err());

    Ok(())
}

#[tokio::test]
async fn dropped_subscribers_are_pruned_on_send() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<i32>::new();
    let kept = subject.subscribe()?;
    let dropped = subject.subscribe()?;
    drop(dropped);

    // Act
    subject.next(1)?;

    // Assert
    assert_eq!(subject.subscriber_count(), 1);
    drop(kept);

    Ok(())
}

#[tokio::test]
async fn clones_share_subscribers() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<i32>::new();
    let clone = subject.clone();
    let mut stream = subject.subscribe()?;

    // Act
    clone.next(42)?;
    clone.close();

    // Assert
    assert_eq!(stream.next().await, Some(StreamItem::Value(42)));
    assert!(subject.is_closed());

    Ok(())
}
