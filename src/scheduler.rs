//! Frame and timer scheduling
//!
//! The controller never talks to `requestAnimationFrame` or `setTimeout`
//! directly. It hands epoch-tagged tokens to a `Scheduler`; whoever fires them
//! later passes them back to `Game::on_frame` / `Game::on_timer`, which drop
//! tokens from an older epoch.

use std::collections::VecDeque;

/// Handle for one scheduled animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken {
    pub epoch: u64,
}

/// One-shot deferred actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Jump cooldown expired, drop the paddle back to its baseline
    PaddleLand,
}

/// Handle for one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub epoch: u64,
    pub kind: TimerKind,
}

pub trait Scheduler {
    /// Call back with `token` on the next animation frame
    fn request_frame(&mut self, token: FrameToken);

    /// Call back with `token` once `delay_ms` has elapsed
    fn set_timeout(&mut self, delay_ms: u32, token: TimerToken);
}

/// Scheduler driven by hand: frames are queued until taken, timers fire when
/// virtual time is advanced past their deadline.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    frames: VecDeque<FrameToken>,
    /// (deadline, insertion order, token)
    timers: Vec<(u64, u64, TimerToken)>,
    next_seq: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual clock (ms)
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Pop the oldest requested frame
    pub fn take_frame(&mut self) -> Option<FrameToken> {
        self.frames.pop_front()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Move the clock forward and return every timer now due, in deadline order
    pub fn advance(&mut self, ms: u64) -> Vec<TimerToken> {
        self.now_ms += ms;
        let now = self.now_ms;

        let mut due: Vec<_> = self.timers.iter().filter(|t| t.0 <= now).copied().collect();
        self.timers.retain(|t| t.0 > now);
        due.sort_by_key(|t| (t.0, t.1));
        due.into_iter().map(|t| t.2).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self, token: FrameToken) {
        self.frames.push_back(token);
    }

    fn set_timeout(&mut self, delay_ms: u32, token: TimerToken) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push((self.now_ms + delay_ms as u64, seq, token));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn land(epoch: u64) -> TimerToken {
        TimerToken {
            epoch,
            kind: TimerKind::PaddleLand,
        }
    }

    #[test]
    fn test_frames_are_fifo() {
        let mut scheduler = ManualScheduler::new();
        scheduler.request_frame(FrameToken { epoch: 1 });
        scheduler.request_frame(FrameToken { epoch: 2 });
        assert_eq!(scheduler.pending_frames(), 2);
        assert_eq!(scheduler.take_frame(), Some(FrameToken { epoch: 1 }));
        assert_eq!(scheduler.take_frame(), Some(FrameToken { epoch: 2 }));
        assert_eq!(scheduler.take_frame(), None);
    }

    #[test]
    fn test_timers_fire_at_deadline() {
        let mut scheduler = ManualScheduler::new();
        scheduler.set_timeout(1000, land(1));
        scheduler.advance(300);
        scheduler.set_timeout(500, land(2));

        assert!(scheduler.advance(499).is_empty());
        assert_eq!(scheduler.advance(1), vec![land(2)]);
        assert!(scheduler.advance(199).is_empty());
        assert_eq!(scheduler.advance(1), vec![land(1)]);
        assert_eq!(scheduler.now_ms(), 1000);
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn test_simultaneous_timers_keep_insertion_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.set_timeout(10, land(7));
        scheduler.set_timeout(10, land(3));
        assert_eq!(scheduler.advance(10), vec![land(7), land(3)]);
    }
}
