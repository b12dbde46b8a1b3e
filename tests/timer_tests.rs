//! Integration tests for the step timer.
//!
//! Run under tokio's paused clock so a five-minute countdown completes
//! instantly and deterministically.

use std::time::Duration;

use cookalong::{StepTimerEngine, TimerEvent, TimerState};

async fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<TimerEvent>) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn full_run_ticks_down_and_finishes_once() {
    let mut timer = StepTimerEngine::new(300);
    let mut rx = timer.take_events().unwrap();

    timer.start();
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(301)).await;
    tokio::task::yield_now().await;

    let events = drain(&mut rx).await;
    // 300 ticks plus exactly one completion event.
    assert_eq!(events.len(), 301);
    assert_eq!(events[0], TimerEvent::Tick { remaining: 299 });
    assert_eq!(events[299], TimerEvent::Tick { remaining: 0 });
    assert_eq!(events[300], TimerEvent::Finished);

    assert_eq!(timer.state(), TimerState::Expired);
    assert_eq!(timer.remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn restart_after_expiry_does_not_fire_again() {
    let mut timer = StepTimerEngine::new(2);
    let mut rx = timer.take_events().unwrap();

    timer.start();
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(3)).await;
    tokio::task::yield_now().await;
    assert_eq!(timer.state(), TimerState::Expired);
    drain(&mut rx).await;

    // Starting an expired, un-reset timer is a no-op.
    timer.start();
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;

    let events = drain(&mut rx).await;
    assert!(events.is_empty());
    assert_eq!(timer.state(), TimerState::Expired);
}

#[tokio::test(start_paused = true)]
async fn reset_allows_a_second_completion() {
    let mut timer = StepTimerEngine::new(2);
    let mut rx = timer.take_events().unwrap();

    timer.start();
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(3)).await;
    tokio::task::yield_now().await;
    drain(&mut rx).await;

    timer.reset();
    assert_eq!(timer.state(), TimerState::Idle);
    assert_eq!(timer.remaining(), 2);

    timer.start();
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(3)).await;
    tokio::task::yield_now().await;

    let events = drain(&mut rx).await;
    assert_eq!(events.last(), Some(&TimerEvent::Finished));
}

#[tokio::test(start_paused = true)]
async fn pause_retains_remaining_time() {
    let mut timer = StepTimerEngine::new(60);
    let mut rx = timer.take_events().unwrap();

    timer.start();
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(10)).await;
    tokio::task::yield_now().await;

    timer.pause();
    assert_eq!(timer.state(), TimerState::Idle);
    assert_eq!(timer.remaining(), 50);
    drain(&mut rx).await;

    // Time passing while paused changes nothing.
    tokio::time::advance(Duration::from_secs(30)).await;
    tokio::task::yield_now().await;
    assert!(drain(&mut rx).await.is_empty());
    assert_eq!(timer.remaining(), 50);

    // Resume picks up where it left off.
    timer.start();
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;
    assert_eq!(drain(&mut rx).await, vec![TimerEvent::Tick { remaining: 49 }]);
}

#[tokio::test(start_paused = true)]
async fn start_while_running_is_a_no_op() {
    let mut timer = StepTimerEngine::new(10);
    let mut rx = timer.take_events().unwrap();

    timer.start();
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(3)).await;
    tokio::task::yield_now().await;

    // A second start must not spawn a second ticker.
    timer.start();
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(3)).await;
    tokio::task::yield_now().await;

    let events = drain(&mut rx).await;
    assert_eq!(events.len(), 6);
    assert_eq!(timer.remaining(), 4);
}

#[tokio::test(start_paused = true)]
async fn reset_while_running_stops_the_countdown() {
    let mut timer = StepTimerEngine::new(30);
    let mut rx = timer.take_events().unwrap();

    timer.start();
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    drain(&mut rx).await;

    timer.reset();
    tokio::time::advance(Duration::from_secs(10)).await;
    tokio::task::yield_now().await;

    assert!(drain(&mut rx).await.is_empty());
    assert_eq!(timer.remaining(), 30);
    assert_eq!(timer.state(), TimerState::Idle);
}
