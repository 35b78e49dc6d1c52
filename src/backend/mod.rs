//! Backend module: everything that touches files and external tools
//!
//! The panel never does heavy work itself. It reads bag indexes and drives
//! the ROS command-line tools, and this module hides both behind small traits
//! so the orchestration logic can be tested without ROS installed.
//!
//! # Components
//!
//! - [`LogStore`] / [`BagIndexReader`] - bag index queries (topics, begin/end time)
//! - [`ProcessRunner`] / [`DetachedRunner`] - fire-and-forget process launch and kill-by-tag
//! - [`CommandBuilder`] - argument grammar for `rosbag`, `rosnode`, `rostopic`
//! - [`TopicDiscovery`] / [`DiscoveryWorker`] - periodic live topic poll on a background thread
//! - [`ClockFeed`] - live `/clock` samples on a background thread
//!
//! Background results reach the UI thread through crossbeam channels that the
//! app drains once per frame.

pub mod bag_index;
pub mod clock;
pub mod commands;
pub mod discovery;
pub mod process;

pub use bag_index::{BagIndexReader, BagSummary, BagTopic, LogStore};
pub use clock::ClockFeed;
pub use commands::{CommandBuilder, Invocation, PlayRequest};
pub use discovery::{DiscoveryWorker, RostopicDiscovery, TopicDiscovery};
pub use process::{DetachedRunner, ProcessKind, ProcessRunner, ProcessTag, TagGenerator};
