//! Mission countdown state machine.
//!
//! `Stopped --start--> Running --stop--> Stopped`. Each `tick` while
//! running removes one second, borrowing from minutes and hours. Borrowing
//! past zero hours clamps every field to zero and forces `Stopped`.

use dashboard_core::state::TimerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Timer was stopped; nothing changed.
    Idle,
    Ticked,
    /// The countdown underflowed and the timer stopped itself.
    Expired,
}

/// Unconditional. A timer started at 0:00:00 expires on its next tick.
pub fn start(timer: &mut TimerState) {
    timer.is_running = true;
}

pub fn stop(timer: &mut TimerState) {
    timer.is_running = false;
}

pub fn tick(timer: &mut TimerState) -> TimerOutcome {
    if !timer.is_running {
        return TimerOutcome::Idle;
    }

    if timer.seconds > 0 {
        timer.seconds -= 1;
        return TimerOutcome::Ticked;
    }
    timer.seconds = 59;

    if timer.minutes > 0 {
        timer.minutes -= 1;
        return TimerOutcome::Ticked;
    }
    timer.minutes = 59;

    if timer.hours > 0 {
        timer.hours -= 1;
        return TimerOutcome::Ticked;
    }

    *timer = TimerState::zero();
    TimerOutcome::Expired
}
