//! Breakout group formation.
//!
//! Each pool is shuffled and halved, then the halves are crossed so both
//! groups mix native English and native Spanish speakers:
//!
//! ```text
//! english: [e0 e1 | e2 e3]     spanish: [s0 | s1]
//! group1 = english[0] + spanish[1]
//! group2 = english[1] + spanish[0]
//! ```
//!
//! Calls are independent. Nothing about earlier pairings is remembered.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::roster::Roster;

/// Fewest attendees for which groups are ever formed.
pub const DEFAULT_MIN_ATTENDEES: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupsConfig {
    /// May raise the gate above `DEFAULT_MIN_ATTENDEES`, never lower it
    #[serde(default = "default_min_attendees")]
    pub min_attendees: usize,
    /// Fixed RNG seed for reproducible groups (None = random)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_min_attendees() -> usize {
    DEFAULT_MIN_ATTENDEES
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            min_attendees: DEFAULT_MIN_ATTENDEES,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakoutGroups {
    pub group1: Vec<String>,
    pub group2: Vec<String>,
}

impl BreakoutGroups {
    pub fn len(&self) -> usize {
        self.group1.len() + self.group2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &[String])> {
        [(1, self.group1.as_slice()), (2, self.group2.as_slice())].into_iter()
    }
}

#[derive(Debug)]
pub struct GroupPartitioner {
    min_attendees: usize,
    rng: Mcg128Xsl64,
}

impl GroupPartitioner {
    pub fn new(config: &GroupsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self {
            min_attendees: config.min_attendees.max(DEFAULT_MIN_ATTENDEES),
            rng,
        }
    }

    pub fn min_attendees(&self) -> usize {
        self.min_attendees
    }

    /// Split `roster` into two mixed groups.
    ///
    /// Returns `None` when fewer than `min_attendees` are present.
    pub fn partition(&mut self, roster: &Roster) -> Option<BreakoutGroups> {
        let total = roster.total();
        if total < self.min_attendees {
            debug!(total, minimum = self.min_attendees, "not enough attendees for breakout groups");
            return None;
        }

        let mut english = roster.english().to_vec();
        let mut spanish = roster.spanish().to_vec();
        english.shuffle(&mut self.rng);
        spanish.shuffle(&mut self.rng);

        let (english_first, english_second) = halve(english);
        let (spanish_first, spanish_second) = halve(spanish);

        let mut group1: Vec<String> = english_first.into_iter().chain(spanish_second).collect();
        let mut group2: Vec<String> = english_second.into_iter().chain(spanish_first).collect();
        group1.shuffle(&mut self.rng);
        group2.shuffle(&mut self.rng);

        debug!(total, group1 = group1.len(), group2 = group2.len(), "breakout groups formed");
        Some(BreakoutGroups { group1, group2 })
    }
}

/// First half gets the extra member when the length is odd.
fn halve(mut members: Vec<String>) -> (Vec<String>, Vec<String>) {
    let second = members.split_off(members.len().div_ceil(2));
    (members, second)
}
