use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::clock::{BreakoutSession, Segment};
use crate::language::Language;
use crate::partition::BreakoutGroups;
use crate::roster::{Attendance, Pool};

/// Why a request for groups left the previous groups in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    TooFewAttendees { attendees: usize, minimum: usize },
    SessionEnded,
}

/// Every state change of a meeting produces an Event.
/// Hosts render from these or from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    LanguageChanged {
        from: Language,
        to: Language,
        at: NaiveDateTime,
    },
    SegmentChanged {
        from: Segment,
        to: Segment,
        at: NaiveDateTime,
    },
    GroupsCreated {
        groups: BreakoutGroups,
        breakout_session: BreakoutSession,
        at: NaiveDateTime,
    },
    GroupsRejected {
        #[serde(flatten)]
        reason: RejectReason,
        at: NaiveDateTime,
    },
    MemberToggled {
        pool: Pool,
        name: String,
        attendance: Attendance,
    },
    SessionReset {
        at: NaiveDateTime,
    },
    StateSnapshot {
        language: Language,
        segment: Segment,
        remaining_min: u32,
        breakout_session: Option<BreakoutSession>,
        groups: Option<BreakoutGroups>,
        english: Vec<String>,
        spanish: Vec<String>,
        at: NaiveDateTime,
    },
}
