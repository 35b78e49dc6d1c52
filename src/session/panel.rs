//! Panel controller: the transport state machine behind the UI
//!
//! Holds the session state (loaded bag, both topic lists, record/play
//! process slots, playback settings, timeline) and turns transport actions
//! into bag index queries and process launches. The controller has no UI
//! dependency; the frontend calls it and renders whatever it exposes.
//!
//! Launch and kill requests are best-effort. A failure to issue one is
//! logged and otherwise treated as success, since the panel has no way to
//! observe the external tools anyway.

use std::path::{Path, PathBuf};

use crate::backend::{
    BagSummary, CommandBuilder, Invocation, LogStore, PlayRequest, ProcessKind, ProcessRunner,
    ProcessTag, TagGenerator,
};
use crate::config::{AppConfig, PlaybackSettings};
use crate::error::Result;
use crate::types::{BagTime, TopicEntry, TopicInfo, TopicList};

use super::timeline::{TimeSource, Timeline};
use super::types::{ProcessSlot, TopicListKind};

/// Why a save request did not launch a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// `rosbag filter` was launched
    Launched,
    /// No bag is loaded
    NoBag,
    /// The play list is empty or nothing in it is included
    NothingSelected,
}

pub struct PanelController<R, S> {
    runner: R,
    store: S,
    commands: CommandBuilder,
    tags: TagGenerator,

    bag: Option<BagSummary>,
    play_topics: TopicList,
    record_topics: TopicList,
    /// Topic count seen by the last discovery poll
    discovered_count: usize,

    record: ProcessSlot,
    play: ProcessSlot,
    playback: PlaybackSettings,
    timeline: Timeline,
}

impl<R: ProcessRunner, S: LogStore> PanelController<R, S> {
    pub fn new(runner: R, store: S, config: &AppConfig) -> Self {
        Self {
            runner,
            store,
            commands: CommandBuilder::new(config.tools.clone()),
            tags: TagGenerator::new(),
            bag: None,
            play_topics: TopicList::new(),
            record_topics: TopicList::new(),
            discovered_count: 0,
            record: ProcessSlot::Inactive,
            play: ProcessSlot::Inactive,
            playback: config.playback.clamped(),
            timeline: Timeline::new(config.ui.slider_range),
        }
    }

    // ==================== Accessors ====================

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn bag(&self) -> Option<&BagSummary> {
        self.bag.as_ref()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.bag.as_ref().map(|b| b.path.as_path())
    }

    pub fn begin_time(&self) -> BagTime {
        self.bag.as_ref().map(|b| b.begin).unwrap_or_default()
    }

    pub fn end_time(&self) -> BagTime {
        self.bag.as_ref().map(|b| b.end).unwrap_or_default()
    }

    pub fn topics(&self, kind: TopicListKind) -> &TopicList {
        match kind {
            TopicListKind::Play => &self.play_topics,
            TopicListKind::Record => &self.record_topics,
        }
    }

    fn topics_mut(&mut self, kind: TopicListKind) -> &mut TopicList {
        match kind {
            TopicListKind::Play => &mut self.play_topics,
            TopicListKind::Record => &mut self.record_topics,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.record.is_active()
    }

    pub fn is_playing(&self) -> bool {
        self.play.is_active()
    }

    pub fn record_slot(&self) -> &ProcessSlot {
        &self.record
    }

    pub fn play_slot(&self) -> &ProcessSlot {
        &self.play
    }

    pub fn playback(&self) -> PlaybackSettings {
        self.playback
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    // ==================== File operations ====================

    /// Load a bag's index, replacing the play list
    ///
    /// Playback is stopped first. On error the previously loaded bag, its
    /// topic list and the timeline are left as they were.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        if self.is_playing() {
            self.stop_playback();
        }

        let summary = self.store.open(path)?;
        tracing::info!(
            "Opened {:?}: {} topics, {:.3}s",
            path,
            summary.topics.len(),
            summary.duration()
        );

        self.play_topics.replace(summary.topic_entries());
        self.timeline.reset(summary.duration());
        self.bag = Some(summary);
        Ok(())
    }

    /// Copy the included play topics of the loaded bag into `destination`
    pub fn save(&mut self, destination: &Path) -> SaveOutcome {
        if self.is_playing() {
            self.stop_playback();
        }

        let Some(source) = self.file_path().map(Path::to_path_buf) else {
            tracing::warn!("Save requested with no bag loaded");
            return SaveOutcome::NoBag;
        };

        let topics = self.play_topics.included_names();
        if topics.is_empty() {
            tracing::warn!("Save requested with no play topics selected");
            return SaveOutcome::NothingSelected;
        }

        let invocation = self.commands.filter(&source, destination, &topics);
        self.launch(&invocation);
        tracing::info!("Filtering {} topics into {:?}", topics.len(), destination);
        SaveOutcome::Launched
    }

    // ==================== Transport ====================

    /// Record toggle; returns the resulting checked state of the control
    ///
    /// Checking with no included record topic reverts the control.
    pub fn toggle_record(&mut self, checked: bool) -> bool {
        if checked {
            if self.is_recording() {
                return true;
            }

            let topics = self.record_topics.included_names();
            if topics.is_empty() {
                tracing::debug!("Record toggled with no topics selected, reverting");
                return false;
            }

            let tag = self.tags.next(ProcessKind::Record);
            let invocation = self.commands.record(&topics, &tag);
            self.launch(&invocation);
            tracing::info!("Recording {} topics as {}", topics.len(), tag);
            self.record.activate(tag);
            true
        } else {
            if let Some(tag) = self.record.deactivate() {
                self.terminate(&tag);
                tracing::info!("Recording {} stopped", tag);
            }
            false
        }
    }

    /// Play button: rewind to 0 and start playback
    pub fn play(&mut self) -> bool {
        if self.is_playing() {
            self.stop_playback();
        }
        self.timeline.apply(TimeSource::TimeField, 0.0);
        self.start_playback()
    }

    /// Pause button: stop if playing, otherwise start from the time field
    pub fn resume(&mut self) -> bool {
        if self.is_playing() {
            self.stop_playback();
            false
        } else {
            self.start_playback()
        }
    }

    /// Stop button: end recording and playback
    pub fn stop(&mut self) {
        if self.is_recording() {
            self.toggle_record(false);
        }
        self.stop_playback();
    }

    /// Launch the player from the current time field; no-op without a bag
    fn start_playback(&mut self) -> bool {
        if self.is_playing() {
            return true;
        }

        let Some(bag) = self.bag.as_ref() else {
            tracing::debug!("Play requested with no bag loaded");
            return false;
        };

        let request = PlayRequest {
            bag: bag.path.clone(),
            settings: self.playback,
            start_offset: self.timeline.time(),
            topics: self.play_topics.included_names(),
        };

        let tag = self.tags.next(ProcessKind::Play);
        let invocation = self.commands.play(&request, &tag);
        self.launch(&invocation);
        tracing::info!("Playing from {:.3}s as {}", request.start_offset, tag);
        self.play.activate(tag);
        true
    }

    fn stop_playback(&mut self) {
        if let Some(tag) = self.play.deactivate() {
            self.terminate(&tag);
            tracing::info!("Playback {} stopped", tag);
        }
    }

    // ==================== Settings & selection ====================

    /// Commit values accepted in the config dialog
    pub fn apply_playback(&mut self, settings: PlaybackSettings) {
        self.playback = settings.clamped();
        tracing::debug!("Playback settings: {:?}", self.playback);
    }

    pub fn set_all_included(&mut self, kind: TopicListKind, included: bool) {
        self.topics_mut(kind).set_all(included);
    }

    pub fn set_included(&mut self, kind: TopicListKind, name: &str, included: bool) {
        self.topics_mut(kind).set_included(name, included);
    }

    // ==================== Live inputs ====================

    /// Feed one discovery poll; rebuilds the record list when the count changed
    pub fn refresh_record_topics(&mut self, topics: &[TopicInfo]) -> bool {
        if topics.len() == self.discovered_count {
            return false;
        }

        tracing::debug!(
            "Live topic count {} -> {}, rebuilding record list",
            self.discovered_count,
            topics.len()
        );
        self.discovered_count = topics.len();
        self.record_topics
            .replace(topics.iter().map(TopicEntry::from).collect());
        true
    }

    /// Feed one live clock sample
    ///
    /// Only moves the timeline while playing a loaded bag, so clocks from
    /// other publishers don't drag the scrub bar around while idle.
    pub fn on_clock(&mut self, clock: BagTime) {
        if !self.is_playing() {
            return;
        }
        if let Some(bag) = self.bag.as_ref() {
            let elapsed = clock - bag.begin;
            self.timeline.apply(TimeSource::Clock, elapsed);
        }
    }

    /// Time field edited by the user
    pub fn set_time(&mut self, seconds: f64) {
        self.timeline.apply(TimeSource::TimeField, seconds);
    }

    /// Scrub bar moved by the user
    pub fn set_slider(&mut self, position: i32) {
        self.timeline.apply_slider(position);
    }

    /// Terminate anything still running
    pub fn shutdown(&mut self) {
        self.stop();
    }

    /// Path the save dialog suggests for a filtered copy
    pub fn suggested_save_name(&self) -> Option<PathBuf> {
        let path = self.file_path()?;
        let stem = path.file_stem()?.to_string_lossy();
        Some(PathBuf::from(format!("{}_filtered.bag", stem)))
    }

    // ==================== Process plumbing ====================

    fn launch(&self, invocation: &Invocation) {
        if let Err(e) = self.runner.start(invocation) {
            tracing::warn!("Launch failed ({}): {}", invocation, e);
        }
    }

    fn terminate(&self, tag: &ProcessTag) {
        if let Err(e) = self.runner.stop(tag) {
            tracing::warn!("Terminating {} failed: {}", tag, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::bag_index::{BagTopic, MockLogStore};
    use crate::backend::process::MockProcessRunner;
    use crate::error::BagPlayerError;
    use mockall::predicate::*;

    fn summary(path: &str, topics: &[&str]) -> BagSummary {
        BagSummary {
            path: PathBuf::from(path),
            begin: BagTime::new(100, 0),
            end: BagTime::new(112, 500_000_000),
            topics: topics
                .iter()
                .map(|name| BagTopic {
                    name: name.to_string(),
                    datatype: "std_msgs/String".to_string(),
                    message_count: 3,
                })
                .collect(),
        }
    }

    fn store_with(bag: BagSummary) -> MockLogStore {
        let mut store = MockLogStore::new();
        store.expect_open().returning(move |_| Ok(bag.clone()));
        store
    }

    #[test]
    fn test_open_failure_keeps_previous_bag() {
        let mut store = MockLogStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_open()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(summary("/a.bag", &["/a"])));
        store
            .expect_open()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|p| Err(BagPlayerError::UnindexedBag(p.to_path_buf())));

        let mut panel = PanelController::new(MockProcessRunner::new(), store, &AppConfig::default());
        panel.open(Path::new("/a.bag")).unwrap();
        assert!(panel.open(Path::new("/broken.bag")).is_err());

        assert_eq!(panel.file_path(), Some(Path::new("/a.bag")));
        assert_eq!(panel.topics(TopicListKind::Play).len(), 1);
        assert_eq!(panel.timeline().duration(), 12.5);
    }

    #[test]
    fn test_open_while_playing_stops_player_first() {
        let mut runner = MockProcessRunner::new();
        runner.expect_start().times(1).returning(|_| Ok(()));
        runner
            .expect_stop()
            .withf(|tag| tag.as_str().starts_with("play_"))
            .times(1)
            .returning(|_| Ok(()));

        let mut panel = PanelController::new(
            runner,
            store_with(summary("/a.bag", &["/a"])),
            &AppConfig::default(),
        );
        panel.open(Path::new("/a.bag")).unwrap();
        assert!(panel.play());
        panel.open(Path::new("/a.bag")).unwrap();
        assert!(!panel.is_playing());
    }

    #[test]
    fn test_launch_failure_still_counts_as_recording() {
        let mut runner = MockProcessRunner::new();
        runner.expect_start().times(1).returning(|inv| {
            Err(BagPlayerError::Spawn {
                program: inv.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        });

        let mut panel = PanelController::new(runner, MockLogStore::new(), &AppConfig::default());
        panel.refresh_record_topics(&[TopicInfo::new("/a", "")]);
        assert!(panel.toggle_record(true));
        assert!(panel.is_recording());
    }

    #[test]
    fn test_record_without_included_topics_reverts() {
        let mut runner = MockProcessRunner::new();
        runner.expect_start().never();

        let mut panel = PanelController::new(runner, MockLogStore::new(), &AppConfig::default());
        panel.refresh_record_topics(&[TopicInfo::new("/a", ""), TopicInfo::new("/b", "")]);
        panel.set_all_included(TopicListKind::Record, false);

        assert!(!panel.toggle_record(true));
        assert!(!panel.is_recording());
    }

    #[test]
    fn test_play_uses_settings_and_time_field() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_start()
            .with(function(|inv: &Invocation| {
                inv.args.contains(&"-l".to_string())
                    && !inv.args.contains(&"--clock".to_string())
                    && inv.args.windows(2).any(|w| w[0] == "-r" && w[1] == "2")
                    && inv.args.windows(2).any(|w| w[0] == "-s" && w[1] == "5")
            }))
            .times(1)
            .returning(|_| Ok(()));

        let mut panel = PanelController::new(
            runner,
            store_with(summary("/a.bag", &["/a"])),
            &AppConfig::default(),
        );
        panel.open(Path::new("/a.bag")).unwrap();
        panel.apply_playback(PlaybackSettings {
            loop_playback: true,
            publish_clock: false,
            rate: 2.0,
        });
        panel.set_time(5.0);
        assert!(panel.resume());
    }

    #[test]
    fn test_clock_ignored_when_idle() {
        let mut panel = PanelController::new(
            MockProcessRunner::new(),
            store_with(summary("/a.bag", &["/a"])),
            &AppConfig::default(),
        );
        panel.open(Path::new("/a.bag")).unwrap();
        panel.on_clock(BagTime::new(105, 0));
        assert_eq!(panel.timeline().time(), 0.0);
    }

    #[test]
    fn test_suggested_save_name() {
        let mut panel = PanelController::new(
            MockProcessRunner::new(),
            store_with(summary("/data/run.bag", &["/a"])),
            &AppConfig::default(),
        );
        assert_eq!(panel.suggested_save_name(), None);
        panel.open(Path::new("/data/run.bag")).unwrap();
        assert_eq!(
            panel.suggested_save_name(),
            Some(PathBuf::from("run_filtered.bag"))
        );
    }
}
