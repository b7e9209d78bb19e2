//! Periodic re-evaluation schedule.
//!
//! The host owns the real timer. Each time it (re)arms that timer it takes a
//! [`TickToken`] from here and hands the token back with every tick. Arming
//! again or cancelling bumps the generation, so callbacks scheduled before a
//! reset are recognised and dropped.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifies one armed schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickToken(u64);

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    generation: u64,
    armed: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            generation: 0,
            armed: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a fresh schedule, invalidating every earlier token.
    pub fn arm(&mut self) -> TickToken {
        self.generation += 1;
        self.armed = true;
        TickToken(self.generation)
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.armed = false;
    }

    /// Token of the live schedule, if any.
    pub fn token(&self) -> Option<TickToken> {
        self.armed.then_some(TickToken(self.generation))
    }

    pub fn is_current(&self, token: TickToken) -> bool {
        self.armed && token.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_invalidates_old_tokens() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        let first = ticker.arm();
        assert!(ticker.is_current(first));

        let second = ticker.arm();
        assert!(!ticker.is_current(first));
        assert!(ticker.is_current(second));
        assert_eq!(ticker.token(), Some(second));
    }

    #[test]
    fn cancel_leaves_nothing_current() {
        let mut ticker = Ticker::new(Duration::from_secs(60));
        let token = ticker.arm();
        ticker.cancel();
        assert!(!ticker.is_current(token));
        assert_eq!(ticker.token(), None);
    }

    #[test]
    fn unarmed_ticker_has_no_token() {
        let ticker = Ticker::new(Duration::from_secs(5));
        assert_eq!(ticker.token(), None);
        assert_eq!(ticker.interval(), Duration::from_secs(5));
    }
}
