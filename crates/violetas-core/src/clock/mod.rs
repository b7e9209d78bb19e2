mod segment;
mod session_clock;
mod ticker;

pub use segment::{BreakoutSession, Segment, SessionState};
pub use session_clock::{parse_wall_clock, ClockConfig, SessionClock};
pub use ticker::{TickToken, Ticker};
