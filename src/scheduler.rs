//! Fixed-timestep scheduling.
//!
//! Each frame the driving loop measures a wall-clock delta and hands it to
//! [`Scheduler::advance`], which converts leftover time into zero or more
//! simulation steps. Logical speed is therefore independent of render
//! rate, and a single oversized delta (host suspend, system menu, laptop
//! lid) discards the backlog instead of fast-forwarding the snake.

use std::time::Instant;

use crate::session::{GameState, Session};
use crate::snake::SPAWN_LENGTH;

/// Speed curve and suspend threshold, in milliseconds.
#[derive(Copy, Clone, Debug)]
pub struct Pacing {
    /// Step interval for a freshly spawned snake.
    pub base_step_ms: f64,
    /// Floor the interval never shrinks below.
    pub min_step_ms: f64,
    /// Interval reduction per body segment beyond the spawn length.
    pub speedup_per_segment_ms: f64,
    /// A frame delta above this is treated as a host suspend.
    pub suspend_gap_ms: f64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            base_step_ms: 140.0,
            min_step_ms: 70.0,
            speedup_per_segment_ms: 2.0,
            suspend_gap_ms: 500.0,
        }
    }
}

impl Pacing {
    /// Current step interval: the snake speeds up as it grows, floored at
    /// `min_step_ms`.
    pub fn step_interval_ms(&self, snake_len: usize) -> f64 {
        let extra = snake_len.saturating_sub(SPAWN_LENGTH) as f64;
        (self.base_step_ms - extra * self.speedup_per_segment_ms).max(self.min_step_ms)
    }
}

/// Accumulates frame deltas and drains them into whole simulation steps.
pub struct Scheduler {
    pacing: Pacing,
    accum_ms: f64,
}

impl Scheduler {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing, accum_ms: 0.0 }
    }

    #[inline]
    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// Leftover time carried into the next frame.
    #[inline]
    pub fn accumulated_ms(&self) -> f64 {
        self.accum_ms
    }

    /// Feed one frame delta; returns the number of simulation steps run.
    ///
    /// A delta above the suspend threshold zeroes the accumulator and
    /// suspends a running or paused session without stepping. Time only
    /// accrues while the session is running; the interval is fixed at the
    /// start of the frame, and draining stops early if a step ends the
    /// game.
    pub fn advance(&mut self, session: &mut Session, dt_ms: f64) -> u32 {
        if dt_ms > self.pacing.suspend_gap_ms {
            self.accum_ms = 0.0;
            session.suspend();
            return 0;
        }

        if session.state() != GameState::Running {
            self.accum_ms = 0.0;
            return 0;
        }

        self.accum_ms += dt_ms;
        let interval = self.pacing.step_interval_ms(session.snake_len());

        let mut steps = 0;
        while self.accum_ms >= interval {
            self.accum_ms -= interval;
            session.step();
            steps += 1;
            if session.state() != GameState::Running {
                break;
            }
        }
        steps
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Pacing::default())
    }
}

/// Monotonic delta-time source for loop drivers. Tests bypass it and feed
/// synthetic deltas straight into [`Scheduler::advance`].
pub trait Clock {
    /// Milliseconds elapsed since the previous call.
    fn delta_ms(&mut self) -> f64;
}

pub struct MonotonicClock {
    last: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn delta_ms(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt.as_secs_f64() * 1000.0
    }
}

// ---------- tests ----------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Playfield};

    fn running_session() -> Session {
        let mut s = Session::new(Playfield::walled(40, 28), 10, Some(5));
        s.propose_direction(Direction::Right);
        s
    }

    #[test]
    fn interval_shrinks_with_length_down_to_floor() {
        let pacing = Pacing::default();
        assert_eq!(pacing.step_interval_ms(3), 140.0);
        assert_eq!(pacing.step_interval_ms(13), 120.0);
        assert_eq!(pacing.step_interval_ms(38), 70.0);
        assert_eq!(pacing.step_interval_ms(200), 70.0);
    }

    #[test]
    fn drains_whole_steps_and_keeps_the_remainder() {
        let mut session = running_session();
        let mut scheduler = Scheduler::default();

        // 300 ms at a 140 ms interval: two steps, 20 ms left over.
        let steps = scheduler.advance(&mut session, 300.0);
        assert_eq!(steps, 2);
        assert!((scheduler.accumulated_ms() - 20.0).abs() < 1e-9);
        assert!(scheduler.accumulated_ms() < 140.0);
    }

    #[test]
    fn sub_interval_deltas_run_no_steps() {
        let mut session = running_session();
        let mut scheduler = Scheduler::default();

        assert_eq!(scheduler.advance(&mut session, 100.0), 0);
        assert_eq!(scheduler.advance(&mut session, 100.0), 1);
        assert!((scheduler.accumulated_ms() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn suspend_gap_discards_backlog_and_gates_resume() {
        let mut session = running_session();
        let mut scheduler = Scheduler::default();
        scheduler.advance(&mut session, 100.0);

        let steps = scheduler.advance(&mut session, 600.0);
        assert_eq!(steps, 0);
        assert_eq!(scheduler.accumulated_ms(), 0.0);
        assert_eq!(session.state(), GameState::WaitResume);
    }

    #[test]
    fn suspend_gap_leaves_waiting_sessions_alone() {
        let mut session = Session::new(Playfield::walled(40, 28), 10, Some(5));
        let mut scheduler = Scheduler::default();

        scheduler.advance(&mut session, 600.0);
        assert_eq!(session.state(), GameState::WaitStart);
    }

    #[test]
    fn no_time_accrues_outside_running() {
        let mut session = running_session();
        session.toggle_pause();
        let mut scheduler = Scheduler::default();

        assert_eq!(scheduler.advance(&mut session, 200.0), 0);
        assert_eq!(scheduler.accumulated_ms(), 0.0);
    }

    #[test]
    fn draining_stops_when_a_step_ends_the_game() {
        // Head at (3,3) on a 7x7 walled field: the third step hits the wall.
        let mut session = Session::new(Playfield::walled(7, 7), 10, Some(5));
        session.propose_direction(Direction::Right);
        let mut scheduler = Scheduler::default();

        let steps = scheduler.advance(&mut session, 420.0);
        assert_eq!(steps, 3);
        assert_eq!(session.state(), GameState::GameOver);
    }

    #[test]
    fn monotonic_clock_reports_nonnegative_deltas() {
        let mut clock = MonotonicClock::new();
        assert!(clock.delta_ms() >= 0.0);
        assert!(clock.delta_ms() >= 0.0);
    }
}
