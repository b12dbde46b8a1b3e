//! Per-step countdown timer.
//!
//! A `StepTimerEngine` owns the single background tick task for the currently
//! expanded step. The tick task is the only background activity in a recipe
//! session and is aborted, not merely ignored, whenever the timer is paused,
//! reset, or dropped — a leaked ticker would fire into stale session state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Events emitted by a running timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; `remaining` is the value after the decrement.
    Tick { remaining: u32 },
    /// The countdown reached zero. Emitted exactly once per run; restarting
    /// an expired timer without a reset does not re-emit it.
    Finished,
}

/// Observable timer lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not counting down; `remaining` may be full (fresh/reset) or partial (paused).
    Idle,
    Running,
    /// Reached zero and fired its completion event.
    Expired,
}

/// Pure countdown state, shared between the engine API and its tick task.
#[derive(Debug)]
struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
    fired: bool,
}

impl Countdown {
    fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
            fired: false,
        }
    }

    /// Advance one second. Returns the events to emit for this tick.
    fn tick(&mut self) -> Option<(TimerEvent, Option<TimerEvent>)> {
        if !self.running || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let tick = TimerEvent::Tick {
            remaining: self.remaining,
        };
        if self.remaining == 0 {
            self.running = false;
            if !self.fired {
                self.fired = true;
                return Some((tick, Some(TimerEvent::Finished)));
            }
        }
        Some((tick, None))
    }

    fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.fired && self.remaining == 0 {
            TimerState::Expired
        } else {
            TimerState::Idle
        }
    }
}

/// Countdown timer for a single step.
///
/// Created from the step's duration in seconds; the owning session discards
/// and recreates the engine whenever the expanded step changes.
#[derive(Debug)]
pub struct StepTimerEngine {
    inner: Arc<Mutex<Countdown>>,
    events_tx: mpsc::UnboundedSender<TimerEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<TimerEvent>>,
    tick_task: Option<JoinHandle<()>>,
}

impl StepTimerEngine {
    /// Create an idle timer with the full step duration remaining.
    pub fn new(duration_secs: u32) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(Mutex::new(Countdown::new(duration_secs))),
            events_tx,
            events_rx: Some(events_rx),
            tick_task: None,
        }
    }

    /// Take the event stream. Yields `Tick` once per elapsed second and a
    /// single `Finished` when the countdown completes. Returns `None` if
    /// already taken.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<TimerEvent>> {
        self.events_rx.take()
    }

    /// Start or resume the countdown. No-op while already running, and no-op
    /// on an expired timer that has not been reset (an expired run must not
    /// fire its completion event a second time).
    pub fn start(&mut self) {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.running || inner.remaining == 0 {
                return;
            }
            inner.running = true;
        }
        self.spawn_ticker();
    }

    /// Pause the countdown, retaining the remaining time. Cancels the tick task.
    pub fn pause(&mut self) {
        self.cancel_ticker();
        self.inner.lock().unwrap().running = false;
    }

    /// Stop and restore the full step duration. Clears the fired flag so a
    /// subsequent run can complete (and notify) again.
    pub fn reset(&mut self) {
        self.cancel_ticker();
        let mut inner = self.inner.lock().unwrap();
        inner.remaining = inner.duration;
        inner.running = false;
        inner.fired = false;
    }

    pub fn remaining(&self) -> u32 {
        self.inner.lock().unwrap().remaining
    }

    pub fn duration(&self) -> u32 {
        self.inner.lock().unwrap().duration
    }

    pub fn state(&self) -> TimerState {
        self.inner.lock().unwrap().state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == TimerState::Running
    }

    fn spawn_ticker(&mut self) {
        self.cancel_ticker();
        let inner = Arc::clone(&self.inner);
        let events = self.events_tx.clone();
        // Unconstrained: every iteration awaits a genuinely pending 1s
        // interval, so coop budgeting buys nothing here — but under a paused
        // test clock it would deschedule the ticker mid-drain.
        self.tick_task = Some(tokio::spawn(tokio::task::unconstrained(async move {
            let start = Instant::now() + Duration::from_secs(1);
            let mut ticker = interval_at(start, Duration::from_secs(1));
            loop {
                ticker.tick().await;
                let emitted = inner.lock().unwrap().tick();
                match emitted {
                    Some((tick, finished)) => {
                        let _ = events.send(tick);
                        if let Some(finished) = finished {
                            let _ = events.send(finished);
                            break;
                        }
                        if matches!(tick, TimerEvent::Tick { remaining: 0 }) {
                            break;
                        }
                    }
                    // Paused or expired from under us; stop ticking.
                    None => break,
                }
            }
        })));
    }

    fn cancel_ticker(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
    }
}

impl Drop for StepTimerEngine {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
