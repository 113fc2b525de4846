// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cascade_core::{CascadeError, StreamItem};
use cascade_stream::{BeforeLoadExt, IsFilled};
use cascade_test_utils::helpers::collect_items;
use cascade_test_utils::{
    assert_no_element_emitted, test_channel, test_channel_with_errors, unwrap_stream,
    unwrap_value, ErrorInjectingStream,
};
use futures::{stream, StreamExt};
use serde_json::json;

#[tokio::test]
async fn test_before_load_starts_true_and_waits() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel::<i32>();
    let mut result = Box::pin(stream.before_load());

    // Act & Assert
    assert!(unwrap_value(Some(unwrap_stream(&mut result, 500).await)));
    assert_no_element_emitted(&mut result, 50).await;

    tx.send(0)?;
    assert_no_element_emitted(&mut result, 50).await;

    tx.send(5)?;
    assert!(!unwrap_value(Some(unwrap_stream(&mut result, 500).await)));
    assert!(result.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_before_load_on_completion() -> anyhow::Result<()> {
    // Arrange
    let source = stream::iter(vec![StreamItem::Value(String::new())]);

    // Act
    let flags: Vec<_> = source.before_load().collect().await;

    // Assert
    assert_eq!(flags, vec![StreamItem::Value(true), StreamItem::Value(false)]);

    Ok(())
}

#[tokio::test]
async fn test_before_load_on_error() -> anyhow::Result<()> {
    // Arrange
    let (tx, stream) = test_channel_with_errors::<Vec<i32>>();
    let mut result = Box::pin(stream.before_load());

    // Act
    tx.send(StreamItem::Value(Vec::new()))?;
    tx.send(StreamItem::Error(CascadeError::stream_error("boom")))?;

    // Assert
    assert!(unwrap_value(Some(unwrap_stream(&mut result, 500).await)));
    assert!(!unwrap_value(Some(unwrap_stream(&mut result, 500).await)));
    assert!(result.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_before_load_with_custom_predicate() -> anyhow::Result<()> {
    // Arrange
    let source = stream::iter(vec![1, 2, 3, 4].into_iter().map(StreamItem::Value));

    // Act
    let flags: Vec<_> = source
        .before_load_with(|value: &i32| *value > 2)
        .collect()
        .await;

    // Assert
    assert_eq!(flags, vec![StreamItem::Value(true), StreamItem::Value(false)]);

    Ok(())
}

#[tokio::test]
async fn test_before_load_ignores_values_after_settling() -> anyhow::Result<()> {
    // Arrange
    let source = ErrorInjectingStream::new(stream::iter(vec![0, 3, 4]), 2);

    // Act
    let flags = collect_items(source.before_load()).await;

    // Assert
    assert_eq!(flags, vec![StreamItem::Value(true), StreamItem::Value(false)]);

    Ok(())
}

#[test]
fn test_is_filled_values() {
    assert!(!0i32.is_filled());
    assert!(7u8.is_filled());
    assert!(!f64::NAN.is_filled());
    assert!(!false.is_filled());
    assert!(!"".is_filled());
    assert!("x".is_filled());
    assert!(!Vec::<i32>::new().is_filled());
    assert!(vec![0i32].is_filled());
    assert!(!None::<i32>.is_filled());
    assert!(!Some(0i32).is_filled());
    assert!(Some(1i32).is_filled());
    assert!(!json!(null).is_filled());
    assert!(!json!({}).is_filled());
    assert!(json!({"a": null}).is_filled());
    assert!(!json!([]).is_filled());
    assert!(!json!(0).is_filled());
    assert!(json!("text").is_filled());
}
