//! Session module: the panel's state and transport logic
//!
//! A session starts empty when the app launches, is mutated by transport
//! actions (open, save, record, play, pause, stop) and is discarded on exit.
//! Nothing here is persisted.
//!
//! # Components
//!
//! - [`PanelController`] - owns the topic lists and process slots, drives the backend
//! - [`Timeline`] - time field and scrub bar kept in step
//! - [`ProcessSlot`] - inactive/active state of the recorder and the player

pub mod panel;
pub mod timeline;
pub mod types;

pub use panel::{PanelController, SaveOutcome};
pub use timeline::{TimeSource, Timeline};
pub use types::{ProcessSlot, TopicListKind};
