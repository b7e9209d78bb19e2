use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Phase of a meeting.
///
/// ```text
/// Greetings -> Breakout      group creation
/// (any)     -> Farewells     minute threshold
/// (any)     -> Greetings     explicit reset
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Greetings,
    Breakout,
    Farewells,
}

impl Segment {
    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Leaving `Farewells` and returning to `Greetings` are reserved for an
    /// explicit reset and are not covered here.
    pub fn can_advance_to(self, next: Segment) -> bool {
        matches!(
            (self, next),
            (Segment::Greetings, Segment::Breakout)
                | (Segment::Breakout, Segment::Breakout)
                | (_, Segment::Farewells)
        )
    }
}

/// Which breakout round is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakoutSession {
    Breakout1,
    Breakout2,
}

impl BreakoutSession {
    /// Round that follows `current` when groups are formed again.
    pub fn next(current: Option<BreakoutSession>) -> BreakoutSession {
        match current {
            Some(BreakoutSession::Breakout1) => BreakoutSession::Breakout2,
            Some(BreakoutSession::Breakout2) | None => BreakoutSession::Breakout1,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            BreakoutSession::Breakout1 => 1,
            BreakoutSession::Breakout2 => 2,
        }
    }
}

/// What the host displays. Derived on every tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub language: Language,
    pub segment: Segment,
    /// Whole minutes left in the current segment.
    pub remaining_min: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farewells_is_reachable_from_everywhere() {
        for from in [Segment::Greetings, Segment::Breakout, Segment::Farewells] {
            assert!(from.can_advance_to(Segment::Farewells));
        }
    }

    #[test]
    fn no_way_back_without_reset() {
        assert!(!Segment::Farewells.can_advance_to(Segment::Breakout));
        assert!(!Segment::Farewells.can_advance_to(Segment::Greetings));
        assert!(!Segment::Breakout.can_advance_to(Segment::Greetings));
    }

    #[test]
    fn breakout_rounds_alternate() {
        let first = BreakoutSession::next(None);
        assert_eq!(first, BreakoutSession::Breakout1);
        let second = BreakoutSession::next(Some(first));
        assert_eq!(second, BreakoutSession::Breakout2);
        assert_eq!(BreakoutSession::next(Some(second)), BreakoutSession::Breakout1);
    }
}
