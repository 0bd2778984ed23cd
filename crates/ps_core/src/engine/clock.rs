//! Match phase state machine and the 1 Hz countdown.
//!
//! Flow: `pregame → kickoff → inplay`, looping back through `pregame` once
//! at the halftime mark, then `finished` when the countdown reaches zero.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Pregame,
    Kickoff,
    InPlay,
    Finished,
}

/// Outcome of one 1 Hz countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    Running,
    Halftime,
    FullTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchClock {
    pub duration_s: u32,
    pub time_remaining: u32,
    /// Remaining-time mark at which halftime triggers.
    halftime_mark: u32,
    pub half: u8,
}

impl MatchClock {
    pub fn new(duration_s: u32) -> Self {
        Self {
            duration_s,
            time_remaining: duration_s,
            halftime_mark: duration_s / 2,
            half: 1,
        }
    }

    pub fn elapsed_s(&self) -> u32 {
        self.duration_s - self.time_remaining
    }

    /// Advance the countdown by one second.
    pub fn tick_second(&mut self) -> ClockSignal {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            return ClockSignal::FullTime;
        }
        if self.half == 1 && self.time_remaining <= self.halftime_mark {
            self.half = 2;
            return ClockSignal::Halftime;
        }
        ClockSignal::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_never_increases() {
        let mut clock = MatchClock::new(10);
        let mut prev = clock.time_remaining;
        for _ in 0..15 {
            clock.tick_second();
            assert!(clock.time_remaining <= prev);
            prev = clock.time_remaining;
        }
        assert_eq!(clock.time_remaining, 0);
    }

    #[test]
    fn test_halftime_fires_once_at_midpoint() {
        let mut clock = MatchClock::new(10);
        let mut halftimes = 0;
        let mut fulltimes = 0;
        for _ in 0..10 {
            match clock.tick_second() {
                ClockSignal::Halftime => halftimes += 1,
                ClockSignal::FullTime => fulltimes += 1,
                ClockSignal::Running => {}
            }
        }
        assert_eq!(halftimes, 1);
        assert_eq!(fulltimes, 1);
        assert_eq!(clock.half, 2);
    }

    #[test]
    fn test_elapsed_complements_remaining() {
        let mut clock = MatchClock::new(90);
        for _ in 0..30 {
            clock.tick_second();
        }
        assert_eq!(clock.elapsed_s(), 30);
        assert_eq!(clock.time_remaining, 60);
    }
}
