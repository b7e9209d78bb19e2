//! Today's attendance, kept per native-language pool.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pool {
    English,
    Spanish,
}

impl Pool {
    pub const ALL: [Pool; 2] = [Pool::English, Pool::Spanish];

    pub fn other(self) -> Pool {
        match self {
            Pool::English => Pool::Spanish,
            Pool::Spanish => Pool::English,
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pool::English => "english",
            Pool::Spanish => "spanish",
        })
    }
}

impl std::str::FromStr for Pool {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Pool::English),
            "spanish" | "es" => Ok(Pool::Spanish),
            other => Err(ValidationError::InvalidValue {
                field: "pool".into(),
                message: format!("expected 'english' or 'spanish', got '{other}'"),
            }),
        }
    }
}

/// Result of toggling a member's attendance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Present,
    Absent,
}

/// Ordered, duplicate-free name lists for both pools.
///
/// A name lives in at most one pool. Order is insertion order, which is
/// the order the partitioner starts shuffling from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RosterLists")]
pub struct Roster {
    english: Vec<String>,
    spanish: Vec<String>,
}

/// Unchecked wire form; deserialized rosters go through [`Roster::new`].
#[derive(Deserialize)]
struct RosterLists {
    #[serde(default)]
    english: Vec<String>,
    #[serde(default)]
    spanish: Vec<String>,
}

impl TryFrom<RosterLists> for Roster {
    type Error = ValidationError;

    fn try_from(lists: RosterLists) -> Result<Self, Self::Error> {
        Roster::new(lists.english, lists.spanish)
    }
}

impl Roster {
    /// Build a roster, rejecting empty names and names listed twice.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` on the first offending name.
    pub fn new<I, J, S, T>(english: I, spanish: J) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut roster = Roster::default();
        for name in english {
            roster.add(Pool::English, name)?;
        }
        for name in spanish {
            roster.add(Pool::Spanish, name)?;
        }
        Ok(roster)
    }

    pub fn pool(&self, pool: Pool) -> &[String] {
        match pool {
            Pool::English => &self.english,
            Pool::Spanish => &self.spanish,
        }
    }

    fn pool_mut(&mut self, pool: Pool) -> &mut Vec<String> {
        match pool {
            Pool::English => &mut self.english,
            Pool::Spanish => &mut self.spanish,
        }
    }

    pub fn english(&self) -> &[String] {
        &self.english
    }

    pub fn spanish(&self) -> &[String] {
        &self.spanish
    }

    pub fn total(&self) -> usize {
        self.english.len() + self.spanish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn contains(&self, pool: Pool, name: &str) -> bool {
        self.pool(pool).iter().any(|n| n == name)
    }

    pub fn pool_of(&self, name: &str) -> Option<Pool> {
        Pool::ALL.into_iter().find(|&pool| self.contains(pool, name))
    }

    /// Add `name` to `pool`. Returns `false` if it was already there.
    ///
    /// # Errors
    ///
    /// Fails for blank names and for names present in the other pool.
    pub fn add(&mut self, pool: Pool, name: impl Into<String>) -> Result<bool, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.contains(pool.other(), &name) {
            return Err(ValidationError::MemberInOtherPool {
                name,
                pool: pool.other(),
            });
        }
        if self.contains(pool, &name) {
            return Ok(false);
        }
        self.pool_mut(pool).push(name);
        Ok(true)
    }

    /// Remove `name` from `pool`. Returns `false` if it was not there.
    pub fn remove(&mut self, pool: Pool, name: &str) -> bool {
        let members = self.pool_mut(pool);
        let before = members.len();
        members.retain(|n| n != name.trim());
        members.len() != before
    }

    /// Flip attendance of `name` within its own pool.
    ///
    /// # Errors
    ///
    /// Same as [`Roster::add`] when the name is being added.
    pub fn toggle(&mut self, pool: Pool, name: &str) -> Result<Attendance, ValidationError> {
        if self.remove(pool, name) {
            Ok(Attendance::Absent)
        } else {
            self.add(pool, name)?;
            Ok(Attendance::Present)
        }
    }
}
