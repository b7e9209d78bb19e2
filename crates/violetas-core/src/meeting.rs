//! Meeting engine.
//!
//! Holds the single roster and session snapshot a host works with. Like the
//! clock it never reads system time: every command takes the host's `now`.
//! There is no internal thread. The host arms a timer with the interval from
//! [`MeetingEngine::tick_interval`] and passes [`MeetingEngine::tick_token`]
//! back on each tick.
//!
//! ## Segment transitions
//!
//! ```text
//! Greetings -> Breakout     request_groups (roster passes the gate)
//! (any)     -> Farewells    tick / request_groups past the farewell minute
//! (any)     -> Greetings    reset_session
//! ```

use chrono::NaiveDateTime;
use std::time::Duration;
use tracing::{debug, info};

use crate::clock::{BreakoutSession, Segment, SessionClock, SessionState, TickToken, Ticker};
use crate::error::{CoreError, ValidationError};
use crate::events::{Event, RejectReason};
use crate::language::Language;
use crate::partition::{BreakoutGroups, GroupPartitioner};
use crate::roster::{Pool, Roster};
use crate::storage::Config;

#[derive(Debug)]
pub struct MeetingEngine {
    clock: SessionClock,
    partitioner: GroupPartitioner,
    ticker: Ticker,
    roster: Roster,
    state: SessionState,
    breakout_session: Option<BreakoutSession>,
    groups: Option<BreakoutGroups>,
    last_evaluated: NaiveDateTime,
}

impl MeetingEngine {
    /// Start a session from configuration with every seeded member present.
    ///
    /// # Errors
    ///
    /// Fails if the configured roster seed is invalid.
    pub fn new(config: &Config, now: NaiveDateTime) -> Result<Self, CoreError> {
        let roster = config.roster.to_roster()?;
        Ok(Self::from_parts(
            SessionClock::new(&config.clock),
            GroupPartitioner::new(&config.groups),
            Ticker::new(Duration::from_secs(config.clock.tick_interval_secs)),
            roster,
            now,
        ))
    }

    pub fn from_parts(
        clock: SessionClock,
        partitioner: GroupPartitioner,
        mut ticker: Ticker,
        roster: Roster,
        now: NaiveDateTime,
    ) -> Self {
        ticker.arm();
        let state = clock.evaluate(now, Segment::Greetings, None);
        Self {
            clock,
            partitioner,
            ticker,
            roster,
            state,
            breakout_session: None,
            groups: None,
            last_evaluated: now,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session_state(&self) -> SessionState {
        self.state
    }

    pub fn language(&self) -> Language {
        self.state.language
    }

    pub fn segment(&self) -> Segment {
        self.state.segment
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn groups(&self) -> Option<&BreakoutGroups> {
        self.groups.as_ref()
    }

    pub fn breakout_session(&self) -> Option<BreakoutSession> {
        self.breakout_session
    }

    pub fn min_attendees(&self) -> usize {
        self.partitioner.min_attendees()
    }

    pub fn tick_interval(&self) -> Duration {
        self.ticker.interval()
    }

    /// Token the host must pass to [`MeetingEngine::tick`]. Changes on reset.
    pub fn tick_token(&self) -> Option<TickToken> {
        self.ticker.token()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            language: self.state.language,
            segment: self.state.segment,
            remaining_min: self.state.remaining_min,
            breakout_session: self.breakout_session,
            groups: self.groups.clone(),
            english: self.roster.english().to_vec(),
            spanish: self.roster.spanish().to_vec(),
            at: self.last_evaluated,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Re-evaluate the clock. Ticks carrying a stale token do nothing.
    pub fn tick(&mut self, token: TickToken, now: NaiveDateTime) -> Vec<Event> {
        if !self.ticker.is_current(token) {
            debug!(?token, "ignoring tick from a replaced schedule");
            return Vec::new();
        }
        self.evaluate(now)
    }

    /// Flip a member's attendance. Existing groups are left as they are.
    ///
    /// # Errors
    ///
    /// Rejects blank names and names already present in the other pool.
    pub fn toggle_member(&mut self, pool: Pool, name: &str) -> Result<Event, ValidationError> {
        let attendance = self.roster.toggle(pool, name)?;
        debug!(%pool, name, ?attendance, "attendance toggled");
        Ok(Event::MemberToggled {
            pool,
            name: name.trim().to_string(),
            attendance,
        })
    }

    /// Form new breakout groups from the current roster.
    ///
    /// When the roster is below the gate, or the meeting is already in
    /// farewells, a `GroupsRejected` event is returned and previous groups
    /// stay as they were.
    pub fn request_groups(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mut events = self.evaluate(now);

        if !self.state.segment.can_advance_to(Segment::Breakout) {
            info!("groups requested after farewells began");
            events.push(Event::GroupsRejected {
                reason: RejectReason::SessionEnded,
                at: now,
            });
            return events;
        }

        let Some(groups) = self.partitioner.partition(&self.roster) else {
            let attendees = self.roster.total();
            let minimum = self.partitioner.min_attendees();
            info!(attendees, minimum, "cannot form breakout groups yet");
            events.push(Event::GroupsRejected {
                reason: RejectReason::TooFewAttendees { attendees, minimum },
                at: now,
            });
            return events;
        };

        let from = self.state.segment;
        let session = BreakoutSession::next(self.breakout_session);
        self.breakout_session = Some(session);
        self.groups = Some(groups.clone());
        self.state.segment = Segment::Breakout;
        self.state.remaining_min = self.clock.remaining(Segment::Breakout, Some(session), now);

        if from != Segment::Breakout {
            info!(?from, "entering breakout");
            events.push(Event::SegmentChanged {
                from,
                to: Segment::Breakout,
                at: now,
            });
        }
        info!(round = session.number(), size = groups.len(), "breakout groups created");
        events.push(Event::GroupsCreated {
            groups,
            breakout_session: session,
            at: now,
        });
        events
    }

    /// Start a new session: greetings, no groups, fresh tick schedule.
    pub fn reset_session(&mut self, now: NaiveDateTime) -> Vec<Event> {
        self.groups = None;
        self.breakout_session = None;
        self.ticker.arm();

        let from = self.state.segment;
        self.state.segment = Segment::Greetings;
        info!(?from, "session reset");

        let mut events = vec![Event::SessionReset { at: now }];
        if from != Segment::Greetings {
            events.push(Event::SegmentChanged {
                from,
                to: Segment::Greetings,
                at: now,
            });
        }
        events.extend(self.evaluate(now));
        events
    }

    /// Stop accepting ticks until the next reset.
    pub fn stop_ticking(&mut self) {
        self.ticker.cancel();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn evaluate(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let next = self
            .clock
            .evaluate(now, self.state.segment, self.breakout_session);
        let mut events = Vec::new();

        if next.language != self.state.language {
            info!(from = %self.state.language, to = %next.language, "display language changed");
            events.push(Event::LanguageChanged {
                from: self.state.language,
                to: next.language,
                at: now,
            });
        }
        if next.segment != self.state.segment {
            info!(from = ?self.state.segment, to = ?next.segment, "segment changed");
            events.push(Event::SegmentChanged {
                from: self.state.segment,
                to: next.segment,
                at: now,
            });
        }

        self.state = next;
        self.last_evaluated = now;
        events
    }
}
