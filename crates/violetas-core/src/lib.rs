//! # Las Violetas Core Library
//!
//! Session logic for a bilingual book club that meets for one hour: which
//! language the screen shows, which part of the meeting is running, how
//! long it has left, and how today's attendees split into two breakout
//! groups that mix native English and native Spanish speakers.
//!
//! ## Architecture
//!
//! - **Session clock**: pure derivations from a host-supplied timestamp
//! - **Partitioner**: shuffled, crossed halves of both language pools
//! - **Meeting engine**: the host-facing state machine; the caller ticks it
//!   with the current time and a schedule token
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`MeetingEngine`]: Session state machine
//! - [`SessionClock`]: Language, segment and remaining-time rules
//! - [`GroupPartitioner`]: Breakout group formation
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod language;
pub mod meeting;
pub mod partition;
pub mod roster;
pub mod storage;

pub use clock::{
    parse_wall_clock, BreakoutSession, ClockConfig, Segment, SessionClock, SessionState, TickToken,
    Ticker,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{Event, RejectReason};
pub use language::{Language, Phrase};
pub use meeting::MeetingEngine;
pub use partition::{BreakoutGroups, GroupPartitioner, GroupsConfig};
pub use roster::{Attendance, Pool, Roster};
pub use storage::{ClubConfig, Config, RosterSeed};
