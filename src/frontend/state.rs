//! Action types for the frontend
//!
//! Render functions never touch the session directly. They return
//! `AppAction`s which the app applies in one place after drawing.

use crate::config::PlaybackSettings;
use crate::session::TopicListKind;

/// Actions that any part of the UI can emit
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // File operations
    /// Ask for a bag file and load it
    OpenBag,
    /// Ask for a destination and save the included play topics
    SaveBag,

    // Transport
    /// Record toggle changed to the given checked state
    ToggleRecord(bool),
    /// Play from the start
    Play,
    /// Pause if playing, otherwise continue from the time field
    Resume,
    /// Stop recording and playback
    Stop,
    /// Open the player configuration dialog
    Configure,
    /// Commit values from the player configuration dialog
    ApplyPlayback(PlaybackSettings),

    // Topic selection
    /// Check or uncheck every entry of one list
    SetAllTopics { list: TopicListKind, included: bool },
    /// Check or uncheck a single entry
    SetTopicIncluded {
        list: TopicListKind,
        name: String,
        included: bool,
    },

    // Timeline
    /// Time field edited (seconds since begin)
    SeekTime(f64),
    /// Scrub bar moved
    SeekSlider(i32),
}
