//! Session data types

use crate::backend::ProcessTag;

/// Lifecycle of one external process kind (recorder or player)
///
/// The tag is created on the inactive → active transition and dropped on
/// active → inactive, so at most one tag per kind exists at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProcessSlot {
    #[default]
    Inactive,
    Active(ProcessTag),
}

impl ProcessSlot {
    pub fn is_active(&self) -> bool {
        matches!(self, ProcessSlot::Active(_))
    }

    pub fn tag(&self) -> Option<&ProcessTag> {
        match self {
            ProcessSlot::Active(tag) => Some(tag),
            ProcessSlot::Inactive => None,
        }
    }

    /// Mark active with `tag`; returns false (and keeps the old tag) if already active
    pub fn activate(&mut self, tag: ProcessTag) -> bool {
        if self.is_active() {
            return false;
        }
        *self = ProcessSlot::Active(tag);
        true
    }

    /// Mark inactive, handing back the tag that was active
    pub fn deactivate(&mut self) -> Option<ProcessTag> {
        match std::mem::take(self) {
            ProcessSlot::Active(tag) => Some(tag),
            ProcessSlot::Inactive => None,
        }
    }
}

/// Selects one of the two topic lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicListKind {
    /// Topics stored in the loaded bag
    Play,
    /// Topics currently published on the live bus
    Record,
}

impl TopicListKind {
    pub fn heading(&self) -> &'static str {
        match self {
            TopicListKind::Play => "Play topics",
            TopicListKind::Record => "Record topics",
        }
    }
}
