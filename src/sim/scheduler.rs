//! Periodic tasks on a virtual clock
//!
//! The host moves time forward explicitly, so cadence and cancellation can
//! be tested without waiting on a wall clock.

use std::time::Duration;

/// The periodic jobs the game runs while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Physics + collision
    Simulation,
    /// Pipe retire + spawn
    Spawn,
}

#[derive(Debug, Clone)]
struct Timer {
    task: Task,
    period: Duration,
    next_due: Duration,
}

/// Interval timers over a virtual clock
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Start (or restart) a task; it first fires one period from now
    ///
    /// # Panics
    /// If `period` is zero.
    pub fn start(&mut self, task: Task, period: Duration) {
        assert!(!period.is_zero(), "{:?} scheduled with a zero period", task);
        self.cancel(task);
        self.timers.push(Timer {
            task,
            period,
            next_due: self.now + period,
        });
    }

    /// Stop a task. Returns whether it was running.
    pub fn cancel(&mut self, task: Task) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.task != task);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_running(&self, task: Task) -> bool {
        self.timers.iter().any(|t| t.task == task)
    }

    /// Earliest pending firing, if any task is running
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.next_due).min()
    }

    /// Fire the earliest task due at or before `until`
    ///
    /// The clock moves to that task's due time. Tasks due at the same
    /// instant fire in the order they were started.
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.next_due <= until)
            .min_by_key(|(_, t)| t.next_due)
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[idx];
        self.now = timer.next_due;
        timer.next_due += timer.period;
        Some(timer.task)
    }

    /// Move the clock to `until` (never backwards)
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(scheduler: &mut Scheduler, until: Duration) -> Vec<(Task, Duration)> {
        let mut fired = Vec::new();
        while let Some(task) = scheduler.pop_due(until) {
            fired.push((task, scheduler.now()));
        }
        scheduler.advance_to(until);
        fired
    }

    #[test]
    fn test_first_firing_is_one_period_out() {
        let mut scheduler = Scheduler::new();
        scheduler.start(Task::Spawn, ms(1400));
        assert!(drain(&mut scheduler, ms(1399)).is_empty());
        assert_eq!(drain(&mut scheduler, ms(1400)), vec![(Task::Spawn, ms(1400))]);
        assert_eq!(scheduler.next_due(), Some(ms(2800)));
    }

    #[test]
    fn test_interleaves_in_time_order() {
        let mut scheduler = Scheduler::new();
        scheduler.start(Task::Simulation, ms(10));
        scheduler.start(Task::Spawn, ms(25));
        let fired = drain(&mut scheduler, ms(50));
        assert_eq!(
            fired,
            vec![
                (Task::Simulation, ms(10)),
                (Task::Simulation, ms(20)),
                (Task::Spawn, ms(25)),
                (Task::Simulation, ms(30)),
                (Task::Simulation, ms(40)),
                (Task::Simulation, ms(50)),
                (Task::Spawn, ms(50)),
            ]
        );
        assert_eq!(scheduler.now(), ms(50));
    }

    #[test]
    fn test_cancel_stops_firing() {
        let mut scheduler = Scheduler::new();
        scheduler.start(Task::Simulation, ms(10));
        scheduler.start(Task::Spawn, ms(10));
        assert!(scheduler.cancel(Task::Spawn));
        assert!(!scheduler.cancel(Task::Spawn));

        let fired = drain(&mut scheduler, ms(20));
        assert!(fired.iter().all(|(task, _)| *task == Task::Simulation));

        scheduler.cancel_all();
        assert!(!scheduler.is_running(Task::Simulation));
        assert!(drain(&mut scheduler, ms(100)).is_empty());
        assert_eq!(scheduler.now(), ms(100));
    }

    #[test]
    fn test_restart_resets_phase() {
        let mut scheduler = Scheduler::new();
        scheduler.start(Task::Spawn, ms(100));
        drain(&mut scheduler, ms(60));
        scheduler.start(Task::Spawn, ms(100));
        assert_eq!(scheduler.next_due(), Some(ms(160)));
    }

    #[test]
    #[should_panic]
    fn test_zero_period_panics() {
        Scheduler::new().start(Task::Simulation, Duration::ZERO);
    }
}
