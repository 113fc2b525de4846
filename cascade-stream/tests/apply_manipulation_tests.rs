// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cascade_core::{CascadeError, StreamItem};
use cascade_stream::{apply_manipulation, ManipulationStrategy};
use cascade_test_utils::test_data::{profile_name_patch, tags_patch};
use cascade_test_utils::{
    assert_no_element_emitted, test_channel, test_channel_with_errors, unwrap_stream,
    unwrap_value,
};
use futures::stream::FusedStream;
use futures::StreamExt;
use serde_json::json;

#[tokio::test]
async fn test_apply_manipulation_uses_latest_state() -> anyhow::Result<()> {
    // Arrange
    let (strategy_tx, strategies) = test_channel();
    let (state_tx, state) = test_channel();
    let mut result = apply_manipulation(strategies, state);

    // Act
    state_tx.send(json!({"stale": true}))?;
    state_tx.send(profile_name_patch())?;
    strategy_tx.send(ManipulationStrategy::AddObject)?;
    let copied = unwrap_value(Some(unwrap_stream(&mut result, 500).await));

    strategy_tx.send(ManipulationStrategy::Clear)?;
    let cleared = unwrap_value(Some(unwrap_stream(&mut result, 500).await));

    // Assert
    assert_eq!(copied, json!({"name": "Alice"}));
    assert_eq!(cleared, json!({}));

    Ok(())
}

#[tokio::test]
async fn test_apply_manipulation_drops_strategies_before_state() -> anyhow::Result<()> {
    // Arrange
    let (strategy_tx, strategies) = test_channel();
    let (state_tx, state) = test_channel();
    let mut result = apply_manipulation(strategies, state);

    // Act
    strategy_tx.send(ManipulationStrategy::AddArray)?;
    assert_no_element_emitted(&mut result, 50).await;

    state_tx.send(tags_patch())?;
    assert_no_element_emitted(&mut result, 50).await;

    strategy_tx.send(ManipulationStrategy::AddArray)?;
    let value = unwrap_value(Some(unwrap_stream(&mut result, 500).await));

    // Assert
    assert_eq!(value, json!(["admin", "editor"]));

    Ok(())
}

#[tokio::test]
async fn test_apply_manipulation_reports_mismatch() -> anyhow::Result<()> {
    // Arrange
    let (strategy_tx, strategies) = test_channel();
    let (state_tx, state) = test_channel();
    let mut result = apply_manipulation(strategies, state);

    // Act
    state_tx.send(tags_patch())?;
    strategy_tx.send(ManipulationStrategy::AddObject)?;
    let item = unwrap_stream(&mut result, 500).await;

    // Assert
    assert!(matches!(
        item,
        StreamItem::Error(CascadeError::TypeMismatch { .. })
    ));

    Ok(())
}

#[tokio::test]
async fn test_apply_manipulation_forwards_state_errors() -> anyhow::Result<()> {
    // Arrange
    let (_strategy_tx, strategies) = test_channel::<ManipulationStrategy>();
    let (state_tx, state) = test_channel_with_errors();
    let mut result = apply_manipulation(strategies, state);

    // Act
    state_tx.send(StreamItem::Error(CascadeError::stream_error("state failed")))?;
    let item = unwrap_stream(&mut result, 500).await;

    // Assert
    assert!(item.is_error());

    Ok(())
}

#[tokio::test]
async fn test_apply_manipulation_ends_with_manipulations() -> anyhow::Result<()> {
    // Arrange
    let (strategy_tx, strategies) = test_channel::<ManipulationStrategy>();
    let (_state_tx, state) = test_channel::<serde_json::Value>();
    let mut result = apply_manipulation(strategies, state);

    // Act
    drop(strategy_tx);
    let end = result.next().await;

    // Assert
    assert!(end.is_none());
    assert!(result.is_terminated());
    assert!(result.next().await.is_none());

    Ok(())
}
