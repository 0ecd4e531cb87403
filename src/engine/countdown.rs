//! Countdown timer driven by the host event loop.
//!
//! The timer owns no thread. The caller polls it with the current instant and
//! receives the tick/finish events that became due since the last poll.
//!
//! ```text
//! Stopped -> Running -> (Stopped | Finished)
//! ```
//!
//! Every `start` opens a new run with a fresh [`RunId`]. Events carry the run
//! they belong to, so an event produced before a `cancel` or `restart` is
//! recognised as stale by [`CountdownTimer::is_current`] even if it is
//! delivered afterwards.

use std::time::{Duration, Instant};

pub const TICK_INTERVAL_MS: u64 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEventKind {
    Tick { remaining_ms: u64 },
    Finish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerEvent {
    pub run: RunId,
    pub kind: TimerEventKind,
}

#[derive(Debug, Clone)]
pub struct CountdownTimer {
    state: TimerState,
    generation: u64,
    duration_ms: u64,
    started_at: Option<Instant>,
    /// Ticks already handed out for the current run.
    ticks_emitted: u64,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Stopped,
            generation: 0,
            duration_ms: 0,
            started_at: None,
            ticks_emitted: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn current_run(&self) -> RunId {
        RunId(self.generation)
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn remaining_ms(&self, now: Instant) -> u64 {
        match (self.state, self.started_at) {
            (TimerState::Running, Some(start)) => {
                self.duration_ms.saturating_sub(elapsed_ms(start, now))
            }
            _ => 0,
        }
    }

    /// True when `event` belongs to the live run. Events of a canceled or
    /// superseded run are never current.
    pub fn is_current(&self, event: &TimerEvent) -> bool {
        event.run == self.current_run() && self.state != TimerState::Stopped
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Open a new run. Any run still in progress is canceled first, so at
    /// most one run can ever produce events.
    pub fn start(&mut self, duration_ms: u64, now: Instant) -> RunId {
        self.cancel();
        self.generation += 1;
        self.duration_ms = duration_ms;
        self.started_at = Some(now);
        self.ticks_emitted = 0;
        self.state = TimerState::Running;
        self.current_run()
    }

    /// Returns whether a run was actually stopped.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            TimerState::Stopped => false,
            TimerState::Running | TimerState::Finished => {
                let was_running = self.state == TimerState::Running;
                self.state = TimerState::Stopped;
                self.started_at = None;
                was_running
            }
        }
    }

    pub fn restart(&mut self, duration_ms: u64, now: Instant) -> RunId {
        self.cancel();
        self.start(duration_ms, now)
    }

    /// Collect every event that became due up to `now`, in order. At most one
    /// finish is ever produced per run.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerEvent> {
        let Some(start) = self.started_at else {
            return Vec::new();
        };
        if self.state != TimerState::Running {
            return Vec::new();
        }

        let elapsed = elapsed_ms(start, now);
        let run = self.current_run();
        let mut events = Vec::new();

        loop {
            let next_tick_at = (self.ticks_emitted + 1) * TICK_INTERVAL_MS;
            if next_tick_at >= self.duration_ms || next_tick_at > elapsed {
                break;
            }
            self.ticks_emitted += 1;
            events.push(TimerEvent {
                run,
                kind: TimerEventKind::Tick {
                    remaining_ms: self.duration_ms - next_tick_at,
                },
            });
        }

        if elapsed >= self.duration_ms {
            self.state = TimerState::Finished;
            events.push(TimerEvent {
                run,
                kind: TimerEventKind::Finish,
            });
        }

        events
    }
}

fn elapsed_ms(start: Instant, now: Instant) -> u64 {
    let elapsed: Duration = now.saturating_duration_since(start);
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
