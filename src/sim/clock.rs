//! Named timer table
//!
//! A tiny cooperative scheduler. Timers are keyed by a logical name so the
//! hit pause can cancel and re-arm them unambiguously. Time only moves when
//! the owner advances the clock; due timers are handed out one at a time in
//! due order so a callback can reschedule before the next one is checked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Logical timer identities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimerName {
    /// Fixed-rate simulation tick
    Tick,
    /// Periodic meteor spawn
    Spawn,
    /// One-shot resume after a hit pause
    Resume,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum Schedule {
    Interval { period: f64 },
    Once,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Timer {
    schedule: Schedule,
    /// Absolute time of the next firing
    due: f64,
    /// When the timer was armed or last fired
    last: f64,
}

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fired {
    pub name: TimerName,
    /// Seconds since the timer was armed or last fired
    pub dt: f32,
}

/// Simulated clock with a small table of named timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clock {
    now: f64,
    timers: BTreeMap<TimerName, Timer>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock time (seconds since start)
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Arm a repeating timer, replacing any timer with the same name
    pub fn schedule_interval(&mut self, name: TimerName, period: f32) {
        let period = f64::from(period);
        self.timers.insert(
            name,
            Timer {
                schedule: Schedule::Interval { period },
                due: self.now + period,
                last: self.now,
            },
        );
    }

    /// Arm a one-shot timer, replacing any timer with the same name
    pub fn schedule_once(&mut self, name: TimerName, delay: f32) {
        self.timers.insert(
            name,
            Timer {
                schedule: Schedule::Once,
                due: self.now + f64::from(delay),
                last: self.now,
            },
        );
    }

    /// Cancel a timer; returns whether it was armed
    pub fn unschedule(&mut self, name: TimerName) -> bool {
        self.timers.remove(&name).is_some()
    }

    pub fn is_scheduled(&self, name: TimerName) -> bool {
        self.timers.contains_key(&name)
    }

    /// Period of an armed interval timer
    pub fn period(&self, name: TimerName) -> Option<f32> {
        match self.timers.get(&name)?.schedule {
            Schedule::Interval { period } => Some(period as f32),
            Schedule::Once => None,
        }
    }

    /// Absolute time at which a timer fires next
    pub fn due(&self, name: TimerName) -> Option<f64> {
        self.timers.get(&name).map(|t| t.due)
    }

    /// Pop the earliest timer due at or before `until`
    ///
    /// Moves the clock to that timer's due time. Ties fire in [`TimerName`]
    /// order. Interval timers are re-armed one period later; one-shot
    /// timers are removed.
    pub fn next_due(&mut self, until: f64) -> Option<Fired> {
        let (&name, timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= until)
            .min_by(|(a_name, a), (b_name, b)| a.due.total_cmp(&b.due).then(a_name.cmp(b_name)))?;
        let timer = *timer;

        self.now = self.now.max(timer.due);
        let dt = (timer.due - timer.last) as f32;

        match timer.schedule {
            Schedule::Interval { period } => {
                if let Some(t) = self.timers.get_mut(&name) {
                    t.last = timer.due;
                    t.due = timer.due + period;
                }
            }
            Schedule::Once => {
                self.timers.remove(&name);
            }
        }

        Some(Fired { name, dt })
    }

    /// Move the clock forward to `until` once no more timers are due
    pub fn settle(&mut self, until: f64) {
        self.now = self.now.max(until);
    }
}
