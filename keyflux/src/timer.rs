//! # Timer Module - Cancellable Countdown
//!
//! The countdown is split in two halves:
//!
//! - A [`Scheduler`] produces a [`CountdownToken`] once per interval, somewhere outside the
//!   engine. It never touches game state.
//! - The [`Countdown`] owned by the session consumes those tokens. Each started countdown gets a
//!   fresh token, so ticks that belong to a cancelled countdown are recognized and dropped.
//!
//! Dropping or cancelling the [`CancelHandle`] returned by the scheduler stops delivery.

use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};
use web_time::Instant;

use crate::Seconds;

/// One second, the countdown resolution
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Identifies one started countdown. Delivered back to the session with every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountdownToken(u64);

impl CountdownToken {
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// Shared cancellation flag between a [`CancelHandle`] and the tick producer
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Stops a scheduled countdown when cancelled or dropped
#[derive(Debug)]
pub struct CancelHandle {
    flag: CancelFlag,
}

impl CancelHandle {
    /// Create a handle together with the flag the producer should watch
    pub fn new() -> (Self, CancelFlag) {
        let flag = CancelFlag::default();
        (Self { flag: flag.clone() }, flag)
    }

    pub fn cancel(&self) {
        self.flag.cancel();
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.flag.cancel();
    }
}

/// Something that can deliver countdown ticks
pub trait Scheduler: Debug {
    /// Begin delivering `token` every `interval` until the returned handle is cancelled.
    fn start_countdown(&mut self, token: CountdownToken, interval: Duration) -> CancelHandle;
}

/// Delivers ticks from a background thread through a channel.
///
/// The thread only sends tokens. It exits when its countdown is cancelled or the receiving end
/// hangs up.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    sender: Sender<CountdownToken>,
}

impl IntervalScheduler {
    pub const fn new(sender: Sender<CountdownToken>) -> Self {
        Self { sender }
    }
}

impl Scheduler for IntervalScheduler {
    fn start_countdown(&mut self, token: CountdownToken, interval: Duration) -> CancelHandle {
        let (handle, flag) = CancelHandle::new();
        let sender = self.sender.clone();

        thread::spawn(move || {
            let mut next = Instant::now() + interval;
            loop {
                // Sleep against a fixed schedule so ticks do not drift
                thread::sleep(next.saturating_duration_since(Instant::now()));
                next += interval;

                if flag.is_cancelled() || sender.send(token).is_err() {
                    break;
                }
            }
            trace!(generation = token.generation(), "Tick thread stopped");
        });

        handle
    }
}

/// Records started countdowns instead of running them. Ticks are delivered by hand.
///
/// Clones share their record, so a test can keep one clone while the session owns another.
///
/// ```rust
/// use keyflux::timer::{Countdown, ManualScheduler};
///
/// let scheduler = ManualScheduler::default();
/// let mut countdown = Countdown::new(60);
///
/// countdown.start(&mut scheduler.clone());
/// assert_eq!(scheduler.starts(), 1);
/// assert_eq!(scheduler.last_token(), Some(countdown.token()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    started: Rc<RefCell<Vec<(CountdownToken, CancelFlag)>>>,
}

impl ManualScheduler {
    /// Number of countdowns started so far
    pub fn starts(&self) -> usize {
        self.started.borrow().len()
    }

    /// Token of the most recently started countdown
    pub fn last_token(&self) -> Option<CountdownToken> {
        self.started.borrow().last().map(|(token, _)| *token)
    }

    /// Returns true if the countdown for `token` was started and not cancelled
    pub fn is_active(&self, token: CountdownToken) -> bool {
        self.started
            .borrow()
            .iter()
            .any(|(started, flag)| *started == token && !flag.is_cancelled())
    }
}

impl Scheduler for ManualScheduler {
    fn start_countdown(&mut self, token: CountdownToken, _interval: Duration) -> CancelHandle {
        let (handle, flag) = CancelHandle::new();
        self.started.borrow_mut().push((token, flag));
        handle
    }
}

/// Result of feeding one tick to a [`Countdown`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining: u32 },
    Expired,
}

/// A one-second countdown from a time limit to zero
#[derive(Debug)]
pub struct Countdown {
    limit: u32,
    remaining: u32,
    generation: u64,
    handle: Option<CancelHandle>,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl Countdown {
    pub const fn new(limit: u32) -> Self {
        Self {
            limit,
            remaining: limit,
            generation: 0,
            handle: None,
            started_at: None,
            stopped_at: None,
        }
    }

    pub const fn limit(&self) -> u32 {
        self.limit
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    pub const fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub const fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Token the running countdown's ticks carry
    pub const fn token(&self) -> CountdownToken {
        CountdownToken(self.generation)
    }

    /// Start ticking. Does nothing if this countdown was already started.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        if self.has_started() {
            return;
        }

        self.generation += 1;
        self.started_at = Some(Instant::now());
        self.handle = Some(scheduler.start_countdown(self.token(), TICK_INTERVAL));

        debug!(
            generation = self.generation,
            limit = self.limit,
            "Countdown started"
        );
    }

    /// Feed one tick.
    ///
    /// Returns `None` for ticks carrying a stale token or arriving after the countdown stopped.
    pub fn tick(&mut self, token: CountdownToken) -> Option<TickOutcome> {
        if token != self.token() || !self.is_running() {
            trace!(
                stale = token.generation(),
                current = self.generation,
                "Ignored tick"
            );
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.stopped_at = Some(Instant::now());
            self.cancel();
            Some(TickOutcome::Expired)
        } else {
            Some(TickOutcome::Running {
                remaining: self.remaining,
            })
        }
    }

    /// Stop delivery and invalidate every token handed out so far
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
        self.generation += 1;
    }

    /// Cancel and return to the not-started state with a new limit
    pub fn reset(&mut self, limit: u32) {
        self.cancel();
        self.limit = limit;
        self.remaining = limit;
        self.started_at = None;
        self.stopped_at = None;
    }

    /// Wall-clock seconds since the countdown started, or 0 if it has not.
    ///
    /// Frozen once the countdown expires.
    pub fn elapsed_seconds(&self) -> Seconds {
        let Some(start) = self.started_at else {
            return 0.0;
        };

        self.stopped_at
            .unwrap_or_else(Instant::now)
            .saturating_duration_since(start)
            .as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn test_cancel_handle_cancels_on_drop() {
        let (handle, flag) = CancelHandle::new();
        assert!(!flag.is_cancelled());

        drop(handle);
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_countdown_runs_to_expiry() {
        let mut scheduler = ManualScheduler::default();
        let mut countdown = Countdown::new(3);

        countdown.start(&mut scheduler);
        let token = scheduler.last_token().unwrap();
        assert!(scheduler.is_active(token));

        assert_eq!(
            countdown.tick(token),
            Some(TickOutcome::Running { remaining: 2 })
        );
        assert_eq!(
            countdown.tick(token),
            Some(TickOutcome::Running { remaining: 1 })
        );
        assert_eq!(countdown.tick(token), Some(TickOutcome::Expired));

        // Stopped: no further ticks are accepted and the producer was told to stop
        assert_eq!(countdown.tick(token), None);
        assert!(!scheduler.is_active(token));
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut scheduler = ManualScheduler::default();
        let mut countdown = Countdown::new(60);

        countdown.start(&mut scheduler);
        countdown.start(&mut scheduler);

        assert_eq!(scheduler.starts(), 1);
    }

    #[test]
    fn test_reset_invalidates_old_tokens() {
        let mut scheduler = ManualScheduler::default();
        let mut countdown = Countdown::new(60);

        countdown.start(&mut scheduler);
        let old = scheduler.last_token().unwrap();

        countdown.reset(30);
        assert!(!scheduler.is_active(old));
        assert_eq!(countdown.tick(old), None);
        assert_eq!(countdown.remaining(), 30);
        assert!(!countdown.has_started());

        countdown.start(&mut scheduler);
        let new = scheduler.last_token().unwrap();
        assert_ne!(old, new);
        assert_eq!(countdown.tick(old), None);
        assert_eq!(
            countdown.tick(new),
            Some(TickOutcome::Running { remaining: 29 })
        );
    }

    #[test]
    fn test_elapsed_before_start_is_zero() {
        let countdown = Countdown::new(60);
        assert_eq!(countdown.elapsed_seconds(), 0.0);
    }

    #[test]
    fn test_elapsed_stops_at_expiry() {
        let mut scheduler = ManualScheduler::default();
        let mut countdown = Countdown::new(1);

        countdown.start(&mut scheduler);
        countdown.tick(scheduler.last_token().unwrap());
        let at_expiry = countdown.elapsed_seconds();

        thread::sleep(Duration::from_millis(20));
        assert_eq!(countdown.elapsed_seconds(), at_expiry);

        countdown.reset(1);
        assert_eq!(countdown.elapsed_seconds(), 0.0);
    }

    #[test]
    fn test_interval_scheduler_delivers_until_cancelled() {
        let (tx, rx) = mpsc::channel();
        let mut scheduler = IntervalScheduler::new(tx);
        let token = CountdownToken(4);

        let handle = scheduler.start_countdown(token, Duration::from_millis(5));

        let received = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(received, token);

        drop(handle);
        drop(scheduler);

        // The thread notices the cancellation within one interval and drops its sender
        let deadline = Instant::now() + Duration::from_secs(2);
        while rx.recv_timeout(Duration::from_millis(50)).is_ok() {
            assert!(Instant::now() < deadline, "tick thread kept running");
        }
    }
}
