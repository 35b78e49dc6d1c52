//! Core data types shared by the backend and the panel
//!
//! - [`BagTime`] - ROS time stamp (seconds + nanoseconds)
//! - [`TopicInfo`] - a `{name, type}` pair as reported by a bag or the live bus
//! - [`TopicEntry`] / [`TopicList`] - a user-selectable topic collection

use std::fmt;
use std::ops::Sub;

/// A ROS time stamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BagTime {
    pub sec: u32,
    pub nsec: u32,
}

impl BagTime {
    pub const ZERO: BagTime = BagTime { sec: 0, nsec: 0 };

    pub fn new(sec: u32, nsec: u32) -> Self {
        Self { sec, nsec }
    }

    /// Build from a nanosecond count
    pub fn from_nanos(nanos: u64) -> Self {
        Self {
            sec: (nanos / 1_000_000_000) as u32,
            nsec: (nanos % 1_000_000_000) as u32,
        }
    }

    pub fn as_nanos(&self) -> u64 {
        self.sec as u64 * 1_000_000_000 + self.nsec as u64
    }

    /// Wall-clock representation, if the stamp is a plausible epoch time
    pub fn to_datetime(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        if self.sec == 0 {
            return None;
        }
        chrono::DateTime::from_timestamp(self.sec as i64, self.nsec)
    }
}

impl Sub for BagTime {
    type Output = f64;

    /// Signed difference in seconds
    fn sub(self, rhs: BagTime) -> f64 {
        (self.as_nanos() as i128 - rhs.as_nanos() as i128) as f64 * 1e-9
    }
}

impl fmt::Display for BagTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.sec, self.nsec)
    }
}

/// A topic name with its message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicInfo {
    pub name: String,
    pub datatype: String,
}

impl TopicInfo {
    pub fn new(name: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
        }
    }
}

/// One row of a topic selection list
#[derive(Debug, Clone, PartialEq)]
pub struct TopicEntry {
    pub name: String,
    pub datatype: String,
    /// Message count, when known (bag topics only)
    pub message_count: Option<u64>,
    pub included: bool,
}

impl TopicEntry {
    /// Create an entry, included by default
    pub fn new(name: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
            message_count: None,
            included: true,
        }
    }

    pub fn with_message_count(mut self, count: u64) -> Self {
        self.message_count = Some(count);
        self
    }
}

impl From<&TopicInfo> for TopicEntry {
    fn from(info: &TopicInfo) -> Self {
        TopicEntry::new(&info.name, &info.datatype)
    }
}

/// An ordered topic selection list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicList {
    entries: Vec<TopicEntry>,
}

impl TopicList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entries; prior selections are discarded
    pub fn replace(&mut self, entries: Vec<TopicEntry>) {
        self.entries = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TopicEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&TopicEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Set the included flag of one entry by name
    pub fn set_included(&mut self, name: &str, included: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.included = included;
                true
            }
            None => false,
        }
    }

    /// Set the included flag on every entry
    pub fn set_all(&mut self, included: bool) {
        for entry in &mut self.entries {
            entry.included = included;
        }
    }

    /// Names of the included entries, in list order
    pub fn included_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.included)
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn included_count(&self) -> usize {
        self.entries.iter().filter(|e| e.included).count()
    }
}

impl FromIterator<TopicEntry> for TopicList {
    fn from_iter<I: IntoIterator<Item = TopicEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
