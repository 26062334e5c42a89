//! Scheduled-task driver for the countdown timer.
//!
//! The state machine in `play_core::timer` is pure; this wraps it in a
//! single tokio task that fires the one-second cadence. The whole cadence
//! is cancelable through one handle, and the task is aborted when the
//! handle drops, so a session abandoned mid-countdown cannot leave a
//! recurring callback behind.
//!
//! Observer panics are not guarded: a panicking observer kills the driver
//! task and no further ticks fire. Whether a throwing observer should halt
//! the countdown or be swallowed is deliberately left open; callers that
//! care should not panic in observers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use play_core::timer::{Tick, Timer, TimerPhase};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

type TickObserver = Box<dyn FnMut(u32, u32) + Send>;
type CompleteObserver = Box<dyn FnMut() + Send>;

#[derive(Default)]
struct Observers {
    on_tick: Option<TickObserver>,
    on_complete: Option<CompleteObserver>,
}

/// Owns a [`Timer`] and the task that drives it.
pub struct Countdown {
    timer: Arc<Mutex<Timer>>,
    observers: Arc<Mutex<Observers>>,
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    #[must_use]
    pub fn new(timer: Timer) -> Self {
        Self {
            timer: Arc::new(Mutex::new(timer)),
            observers: Arc::new(Mutex::new(Observers::default())),
            task: None,
        }
    }

    /// Installs the per-second observer, called as `on_tick(remaining,
    /// duration)` after every decrement, including the one that reaches
    /// zero.
    #[must_use]
    pub fn on_tick(self, observer: impl FnMut(u32, u32) + Send + 'static) -> Self {
        lock_ignoring_poison(&self.observers).on_tick = Some(Box::new(observer));
        self
    }

    /// Installs the completion observer, fired exactly once per run when
    /// the countdown expires.
    #[must_use]
    pub fn on_complete(self, observer: impl FnMut() + Send + 'static) -> Self {
        lock_ignoring_poison(&self.observers).on_complete = Some(Box::new(observer));
        self
    }

    /// Starts (or resumes) the countdown cadence.
    ///
    /// No-op while already ticking, and no-op on an expired timer; only
    /// `reset` revives an expired run.
    pub fn start(&mut self) {
        {
            let mut timer = lock_ignoring_poison(&self.timer);
            timer.start();
            if !timer.is_running() {
                return;
            }
        }

        if self.is_ticking() {
            return;
        }

        let timer = Arc::clone(&self.timer);
        let observers = Arc::clone(&self.observers);
        self.task = Some(tokio::spawn(run_cadence(timer, observers)));
    }

    /// Halts the cadence, leaving the remaining time untouched. Idempotent.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        lock_ignoring_poison(&self.timer).pause();
    }

    /// Stops the cadence and restores the timer to idle at full duration.
    /// Idempotent.
    pub fn reset(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        lock_ignoring_poison(&self.timer).reset();
    }

    /// Whether the driver task is currently alive.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        lock_ignoring_poison(&self.timer).phase()
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        lock_ignoring_poison(&self.timer).remaining_secs()
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        lock_ignoring_poison(&self.timer).duration_secs()
    }

    /// Renders the remaining time as `m:ss`.
    #[must_use]
    pub fn format_time(&self) -> String {
        lock_ignoring_poison(&self.timer).format_time()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// Timer mutations never panic, so a poisoned lock still holds consistent
// state and the data can be recovered.
fn lock_ignoring_poison<T>(mutex: &Arc<Mutex<T>>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_cadence(timer: Arc<Mutex<Timer>>, observers: Arc<Mutex<Observers>>) {
    let mut cadence = interval(Duration::from_secs(1));
    cadence.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first interval tick completes immediately; the cadence starts
    // one second later
    cadence.tick().await;

    loop {
        cadence.tick().await;

        let (outcome, duration) = {
            let mut timer = lock_ignoring_poison(&timer);
            (timer.tick(), timer.duration_secs())
        };

        match outcome {
            Tick::Advanced { remaining } => notify_tick(&observers, remaining, duration),
            Tick::Expired => {
                notify_tick(&observers, 0, duration);
                notify_complete(&observers);
                return;
            }
            Tick::Skipped => return,
        }
    }
}

fn notify_tick(observers: &Arc<Mutex<Observers>>, remaining: u32, duration: u32) {
    if let Some(on_tick) = lock_ignoring_poison(observers).on_tick.as_mut() {
        on_tick(remaining, duration);
    }
}

fn notify_complete(observers: &Arc<Mutex<Observers>>) {
    if let Some(on_complete) = lock_ignoring_poison(observers).on_complete.as_mut() {
        on_complete();
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn timer(duration: u32) -> Timer {
        Timer::new(duration).unwrap()
    }

    fn recording_countdown(duration: u32) -> (Countdown, Arc<Mutex<Vec<u32>>>, Arc<AtomicU32>) {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let completions = Arc::new(AtomicU32::new(0));

        let tick_log = Arc::clone(&ticks);
        let completion_count = Arc::clone(&completions);
        let countdown = Countdown::new(timer(duration))
            .on_tick(move |remaining, _duration| {
                tick_log.lock().unwrap().push(remaining);
            })
            .on_complete(move || {
                completion_count.fetch_add(1, Ordering::SeqCst);
            });

        (countdown, ticks, completions)
    }

    #[tokio::test(start_paused = true)]
    async fn runs_to_completion_with_decreasing_ticks() {
        let (mut countdown, ticks, completions) = recording_countdown(3);
        countdown.start();

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(*ticks.lock().unwrap(), vec![2, 1, 0]);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert_eq!(countdown.phase(), TimerPhase::Expired);
        assert!(!countdown.is_ticking());

        // expired is terminal: restarting without reset does nothing
        countdown.start();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert_eq!(*ticks.lock().unwrap(), vec![2, 1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_preserves_remaining_and_is_idempotent() {
        let (mut countdown, ticks, _completions) = recording_countdown(10);
        countdown.start();

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        countdown.stop();

        assert_eq!(countdown.remaining_secs(), 7);
        assert_eq!(countdown.phase(), TimerPhase::Paused);

        countdown.stop();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(countdown.remaining_secs(), 7);
        assert_eq!(*ticks.lock().unwrap(), vec![9, 8, 7]);
    }

    #[tokio::test(start_paused = true)]
    async fn resumes_after_stop() {
        let (mut countdown, ticks, _completions) = recording_countdown(10);
        countdown.start();
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        countdown.stop();

        countdown.start();
        tokio::time::sleep(Duration::from_millis(2_500)).await;

        assert_eq!(*ticks.lock().unwrap(), vec![9, 8, 7, 6]);
        assert_eq!(countdown.remaining_secs(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_allows_a_second_completed_run() {
        let (mut countdown, ticks, completions) = recording_countdown(2);
        countdown.start();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(completions.load(Ordering::SeqCst), 1);

        countdown.reset();
        assert_eq!(countdown.phase(), TimerPhase::Idle);
        assert_eq!(countdown.remaining_secs(), 2);

        countdown.start();
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(completions.load(Ordering::SeqCst), 2);
        assert_eq!(*ticks.lock().unwrap(), vec![1, 0, 1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_cadence() {
        let (mut countdown, ticks, completions) = recording_countdown(10);
        countdown.start();
        tokio::time::sleep(Duration::from_millis(2_500)).await;

        drop(countdown);
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(*ticks.lock().unwrap(), vec![9, 8]);
        assert_eq!(completions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn format_time_tracks_the_countdown() {
        let (mut countdown, _ticks, _completions) = recording_countdown(65);
        assert_eq!(countdown.format_time(), "1:05");

        countdown.start();
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert_eq!(countdown.format_time(), "1:04");
    }
}
