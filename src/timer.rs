//! Repeating scheduled tasks driven by the frame clock.
//!
//! The scheduler never calls back into the scene.  `advance` hands back the
//! tasks that came due and the scene dispatches them itself, so timers can
//! live inside the same context the scene borrows mutably.

use std::time::Duration;

/// Returned by `Scheduler::every`; pass it to `cancel` to stop the timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Clone, Debug)]
struct Repeating<T> {
    handle: TimerHandle,
    interval: f32,
    until_next: f32,
    task: T,
}

#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    timers: Vec<Repeating<T>>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `task` every `interval`, first one interval from now.
    ///
    /// A zero interval would fire without end inside a single `advance`, so
    /// it is raised to one millisecond.
    pub fn every(&mut self, interval: Duration, task: T) -> TimerHandle {
        let interval = interval.as_secs_f32().max(0.001);
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Repeating {
            handle,
            interval,
            until_next: interval,
            task,
        });
        handle
    }

    /// Stop a timer.  Returns `false` if it was already cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Move the clock forward by `dt` seconds and collect every task that
    /// came due, in firing order per timer.  A long frame can fire the same
    /// timer more than once.
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        let mut due = Vec::new();
        for timer in &mut self.timers {
            timer.until_next -= dt;
            while timer.until_next <= 0.0 {
                due.push(timer.task.clone());
                timer.until_next += timer.interval;
            }
        }
        due
    }
}
