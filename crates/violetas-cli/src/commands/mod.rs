pub mod config;
pub mod groups;
pub mod session;
pub mod status;

use chrono::{Local, NaiveDateTime};
use violetas_core::parse_wall_clock;

/// `--at` if given, otherwise the local wall clock.
pub fn resolve_now(at: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match at {
        Some(input) => Ok(parse_wall_clock(input)?),
        None => Ok(Local::now().naive_local()),
    }
}
