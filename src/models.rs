//! Frontend Models
//!
//! Data structures matching the activities API responses.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Activity data structure (matches backend, keyed by name in the list response)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    /// Remaining capacity. Negative when the server has over-enrolled.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// Activities in the order the server listed them.
///
/// Decoded straight from the `GET /activities` object so that cards and
/// select options follow the response's key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityBoard {
    entries: Vec<(String, Activity)>,
}

impl ActivityBoard {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries.iter().map(|(name, activity)| (name.as_str(), activity))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.iter().find(|(n, _)| *n == name).map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Insert or replace. A repeated name keeps its first position.
    pub fn insert(&mut self, name: String, activity: Activity) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = activity,
            None => self.entries.push((name, activity)),
        }
    }
}

impl<'de> Deserialize<'de> for ActivityBoard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(BoardVisitor)
    }
}

struct BoardVisitor;

impl<'de> Visitor<'de> for BoardVisitor {
    type Value = ActivityBoard;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of activity name to activity details")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut board = ActivityBoard::default();
        while let Some((name, activity)) = map.next_entry::<String, Activity>()? {
            board.insert(name, activity);
        }
        Ok(board)
    }
}

/// Body of signup/unregister responses.
///
/// Success bodies carry `message`; error bodies carry `detail` and sometimes `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationReply {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}
