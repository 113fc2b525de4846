// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use cascade_core::CascadeError;
use cascade_strategies::{CascadeStrategies, StrategyMap};
use cascade_test_utils::{assert_no_element_emitted, StrategyProbe};
use futures::channel::oneshot;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_dropping_mid_cascade_halts_further_attempts() {
    // Arrange
    let probe = StrategyProbe::new();
    let strategies = CascadeStrategies::new(
        StrategyMap::<&'static str, (), i32>::new()
            .with_strategy("a", probe.fail::<(), i32>("a"))
            .with_strategy("stuck", probe.never::<(), i32>("stuck"))
            .with_strategy("c", probe.succeed::<(), i32>("c", 3)),
    );
    let mut stream = strategies.use_strategies(["a", "stuck", "c"], ()).stream();

    // Act
    assert_no_element_emitted(&mut stream, 50).await;
    drop(stream);

    // Assert
    assert_eq!(probe.calls(), vec!["a", "stuck"]);
}

#[tokio::test]
async fn test_dropping_cancels_in_flight_strategy() {
    // Arrange
    let (tx, rx) = oneshot::channel::<i32>();
    let rx = Arc::new(Mutex::new(Some(rx)));
    let strategies = CascadeStrategies::new(
        StrategyMap::<&'static str, (), i32>::new().with_future_strategy("slow", move |_: &()| {
            let rx = rx.lock().take();
            async move {
                match rx {
                    Some(rx) => rx
                        .await
                        .map_err(|_| CascadeError::stream_error("sender dropped")),
                    None => Err(CascadeError::stream_error("already consumed")),
                }
            }
        }),
    );
    let mut stream = strategies.use_strategies(["slow"], ()).stream();
    assert_no_element_emitted(&mut stream, 50).await;
    assert!(!tx.is_canceled());

    // Act
    drop(stream);

    // Assert
    assert!(tx.is_canceled());
}

#[tokio::test]
async fn test_next_strategy_starts_only_after_previous_failure() {
    // Arrange
    let events = Arc::new(Mutex::new(Vec::new()));
    let slow_events = Arc::clone(&events);
    let fast_events = Arc::clone(&events);
    let strategies = CascadeStrategies::new(
        StrategyMap::<&'static str, (), &'static str>::new()
            .with_future_strategy("slow", move |_: &()| {
                let events = Arc::clone(&slow_events);
                async move {
                    events.lock().push("slow:start");
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    events.lock().push("slow:failed");
                    Err(CascadeError::stream_error("timed out upstream"))
                }
            })
            .with_future_strategy("fast", move |_: &()| {
                let events = Arc::clone(&fast_events);
                async move {
                    events.lock().push("fast:start");
                    Ok("fast")
                }
            }),
    );

    // Act
    let result = strategies.use_strategies(["slow", "fast"], ()).run().await;

    // Assert
    assert!(matches!(result, Ok("fast")));
    assert_eq!(
        *events.lock(),
        vec!["slow:start", "slow:failed", "fast:start"]
    );
}
