//! # bagplayer-rs: ROS bag record/replay panel
//!
//! A desktop control panel for recording and replaying ROS bag files. The
//! operator picks topics to record from the live bus or to play back from a
//! loaded bag; the panel launches `rosbag` as detached processes, stops them
//! with `rosnode kill`, and keeps a scrub bar in step with playback time.
//!
//! ## Architecture
//!
//! - **Backend**: bag index reader, process launcher, live topic and clock feeds
//! - **Session**: the panel's state machine, independent of any UI
//! - **Frontend**: renders the panel using eframe/egui
//! - **Communication**: crossbeam channels from the background feeds to the UI thread
//!
//! ## Configuration
//!
//! An optional `config.toml` is read from the platform config directory
//! under `dev.bagplayer-rs` (see [`config`]). Logs are written to stderr and
//! to `logs/bagplayer.log` under the platform data directory.
//!
//! ## Example
//!
//! ```no_run
//! use bagplayer_rs::backend::{BagIndexReader, CommandBuilder, DetachedRunner};
//! use bagplayer_rs::config::AppConfig;
//! use bagplayer_rs::session::PanelController;
//!
//! let config = AppConfig::default();
//! let runner = DetachedRunner::new(CommandBuilder::new(config.tools.clone()));
//! let mut panel = PanelController::new(runner, BagIndexReader, &config);
//!
//! panel.open(std::path::Path::new("/data/run.bag"))?;
//! panel.play();
//! # Ok::<(), bagplayer_rs::BagPlayerError>(())
//! ```

pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod frontend;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use app::BagPlayerApp;
pub use backend::{BagIndexReader, BagSummary, LogStore, ProcessRunner, ProcessTag};
pub use config::{AppConfig, PlaybackSettings};
pub use error::{BagPlayerError, Result};
pub use session::{PanelController, TopicListKind};
pub use types::{BagTime, TopicEntry, TopicInfo, TopicList};
