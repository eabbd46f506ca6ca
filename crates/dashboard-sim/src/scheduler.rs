//! Dual-cadence scheduler: a frame task and a fixed-period timer task.
//!
//! The two tasks are scheduled independently against the same time
//! source. `poll` only decides what is due; the controller runs it. When
//! both are due in one poll the timer task runs first.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use dashboard_core::config::ScheduleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// 1 Hz mission countdown.
    Timer,
    /// Stepper followed by the three renderers.
    Frame,
}

/// One periodic task's due-time bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTask {
    period: Duration,
    next_due: Duration,
}

impl PeriodicTask {
    pub fn new(period: Duration, first_due: Duration) -> Self {
        Self {
            period,
            next_due: first_due,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// True if the task is due at `now`; schedules the following run.
    ///
    /// At most one run is reported per poll. A task that has fallen more
    /// than two periods behind is re-anchored on `now` instead of
    /// replaying the backlog.
    pub fn poll(&mut self, now: Duration) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if now > self.next_due && now - self.next_due > self.period * 2 {
            self.next_due = now + self.period;
        }
        true
    }
}

/// Tasks due in one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueTasks {
    pub timer: bool,
    pub frame: bool,
}

impl DueTasks {
    pub fn any(&self) -> bool {
        self.timer || self.frame
    }

    /// Due tasks in execution order.
    pub fn in_order(&self) -> impl Iterator<Item = TaskKind> {
        let timer = self.timer.then_some(TaskKind::Timer);
        let frame = self.frame.then_some(TaskKind::Frame);
        timer.into_iter().chain(frame)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
    timer: PeriodicTask,
    frame: PeriodicTask,
    running: bool,
}

impl Scheduler {
    /// The first frame is due at `start`; the first timer tick one timer
    /// period later.
    pub fn new(schedule: &ScheduleConfig, start: Duration) -> Self {
        let timer_period = schedule.timer_interval();
        Self {
            timer: PeriodicTask::new(timer_period, start + timer_period),
            frame: PeriodicTask::new(schedule.frame_interval(), start),
            running: true,
        }
    }

    pub fn poll(&mut self, now: Duration) -> DueTasks {
        if !self.running {
            return DueTasks::default();
        }
        DueTasks {
            timer: self.timer.poll(now),
            frame: self.frame.poll(now),
        }
    }

    /// Earliest time either task is due.
    pub fn next_wakeup(&self) -> Duration {
        self.timer.next_due().min(self.frame.next_due())
    }

    pub fn task(&self, kind: TaskKind) -> &PeriodicTask {
        match kind {
            TaskKind::Timer => &self.timer,
            TaskKind::Frame => &self.frame,
        }
    }

    /// Stops both tasks. Polls report nothing afterwards.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
