//! Frontend module for egui UI
//!
//! This module provides the main window using eframe/egui. The window is a
//! single panel: a toolbar with the transport controls and scrub bar, the
//! play and record topic lists side by side, and a status bar.
//!
//! Live topic polls and clock samples arrive from background threads over
//! crossbeam channels and are drained once per frame.
//!
//! # Main Types
//!
//! - [`BagPlayerApp`] - Main application state implementing [`eframe::App`]
//! - [`AppAction`] - Everything the UI can ask the session to do
//!
//! # Submodules
//!
//! - [`dialogs`] - Player configuration and error dialogs
//! - `toolbar` - File, transport and timeline controls
//! - `topic_list` - Checkable topic lists with Check All / Uncheck All
//! - `status_bar` - File info, process state, last message
//! - `widgets` - Status indicator

pub mod dialogs;
pub mod state;
mod status_bar;
mod toolbar;
mod topic_list;
pub mod widgets;

pub use state::AppAction;

use std::path::{Path, PathBuf};
use std::time::Duration;

use dialogs::{
    show_dialog, ErrorContext, ErrorDialog, ErrorState, PlayerConfigAction, PlayerConfigContext,
    PlayerConfigDialog, PlayerConfigState,
};
use status_bar::{render_status_bar, StatusBarContext};
use toolbar::{render_toolbar, ToolbarContext};
use topic_list::render_topic_list;

use crate::backend::{
    BagIndexReader, ClockFeed, CommandBuilder, DetachedRunner, DiscoveryWorker, RostopicDiscovery,
};
use crate::config::{AppConfig, BAG_FILE_EXTENSION};
use crate::session::{PanelController, SaveOutcome, TopicListKind};

/// How often the feeds are drained when nothing else wakes the UI
const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Main application state for the bag player
pub struct BagPlayerApp {
    // === Session ===
    panel: PanelController<DetachedRunner, BagIndexReader>,

    // === Background feeds ===
    discovery: Option<DiscoveryWorker>,
    clock: Option<ClockFeed>,

    // === File dialogs (process lifetime only) ===
    open_dir: PathBuf,
    save_dir: PathBuf,

    // === Messages ===
    last_error: Option<String>,
    status_message: Option<String>,

    // === Dialogs ===
    player_config_open: bool,
    player_config_state: PlayerConfigState,
    error_open: bool,
    error_state: ErrorState,
}

impl BagPlayerApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let commands = CommandBuilder::new(config.tools.clone());
        let panel = PanelController::new(
            DetachedRunner::new(commands.clone()),
            BagIndexReader,
            &config,
        );

        let discovery = if config.discovery.enabled {
            let interval = Duration::from_millis(config.discovery.poll_interval_ms.max(1));
            match DiscoveryWorker::spawn(RostopicDiscovery::new(&commands), interval) {
                Ok(worker) => Some(worker),
                Err(e) => {
                    tracing::warn!("Topic discovery unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let clock = if config.clock.enabled {
            match ClockFeed::spawn(commands.echo_csv(&config.clock.topic)) {
                Ok(feed) => Some(feed),
                Err(e) => {
                    tracing::warn!("Clock feed unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let initial_dir = config.initial_directory();

        Self {
            panel,
            discovery,
            clock,
            open_dir: initial_dir.clone(),
            save_dir: initial_dir,
            last_error: None,
            status_message: None,
            player_config_open: false,
            player_config_state: PlayerConfigState::default(),
            error_open: false,
            error_state: ErrorState::default(),
        }
    }

    /// Drain the background feeds; returns true if anything changed
    fn process_background(&mut self) -> bool {
        let mut changed = false;

        if let Some(topics) = self.discovery.as_ref().and_then(DiscoveryWorker::latest) {
            changed |= self.panel.refresh_record_topics(&topics);
        }

        if let Some(tick) = self.clock.as_ref().and_then(ClockFeed::latest) {
            self.panel.on_clock(tick);
            changed = true;
        }

        changed
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::OpenBag => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Open Bag File")
                    .set_directory(&self.open_dir)
                    .add_filter("Bag Files", &[BAG_FILE_EXTENSION])
                    .add_filter("All Files", &["*"])
                    .pick_file()
                {
                    remember_dir(&mut self.open_dir, &path);
                    self.open_bag(&path);
                }
            }
            AppAction::SaveBag => self.save_bag(),
            AppAction::ToggleRecord(checked) => {
                let recording = self.panel.toggle_record(checked);
                if checked && !recording {
                    self.status_message = Some("No record topics selected".to_string());
                }
            }
            AppAction::Play => {
                self.panel.play();
            }
            AppAction::Resume => {
                self.panel.resume();
            }
            AppAction::Stop => self.panel.stop(),
            AppAction::Configure => {
                self.player_config_state = PlayerConfigState::from_settings(&self.panel.playback());
                self.player_config_open = true;
            }
            AppAction::ApplyPlayback(settings) => self.panel.apply_playback(settings),
            AppAction::SetAllTopics { list, included } => {
                self.panel.set_all_included(list, included);
            }
            AppAction::SetTopicIncluded {
                list,
                name,
                included,
            } => {
                self.panel.set_included(list, &name, included);
            }
            AppAction::SeekTime(seconds) => self.panel.set_time(seconds),
            AppAction::SeekSlider(position) => self.panel.set_slider(position),
        }
    }

    fn open_bag(&mut self, path: &Path) {
        match self.panel.open(path) {
            Ok(()) => {
                self.last_error = None;
                self.status_message = Some(format!("Opened {}", path.display()));
            }
            Err(e) => {
                tracing::warn!("Failed to open {:?}: {}", path, e);
                self.last_error = Some(e.to_string());
                self.error_state = ErrorState::new("Could not open bag file", e.to_string());
                self.error_open = true;
            }
        }
    }

    fn save_bag(&mut self) {
        if self.panel.bag().is_none() {
            self.status_message = Some("Open a bag file first".to_string());
            return;
        }

        let mut dialog = rfd::FileDialog::new()
            .set_title("Save Bag File")
            .set_directory(&self.save_dir)
            .add_filter("Bag Files", &[BAG_FILE_EXTENSION])
            .add_filter("All Files", &["*"]);
        if let Some(name) = self.panel.suggested_save_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }

        let Some(path) = dialog.save_file() else {
            return;
        };
        remember_dir(&mut self.save_dir, &path);

        self.status_message = Some(match self.panel.save(&path) {
            SaveOutcome::Launched => format!("Saving to {}", path.display()),
            SaveOutcome::NoBag => "Open a bag file first".to_string(),
            SaveOutcome::NothingSelected => "No play topics selected".to_string(),
        });
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::Key;

        if ctx.wants_keyboard_input() {
            return;
        }

        let mut open = false;
        let mut save = false;
        let mut resume = false;

        ctx.input(|i| {
            if i.key_pressed(Key::O) && i.modifiers.command_only() {
                open = true;
            }

            if i.key_pressed(Key::S) && i.modifiers.command_only() {
                save = true;
            }

            if i.key_pressed(Key::Space) && !i.modifiers.any() {
                resume = true;
            }
        });

        if open {
            self.handle_action(AppAction::OpenBag);
        }
        if save {
            self.handle_action(AppAction::SaveBag);
        }
        if resume {
            self.handle_action(AppAction::Resume);
        }
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) -> Vec<AppAction> {
        let mut actions = Vec::new();

        if let Some(action) = show_dialog::<PlayerConfigDialog>(
            ctx,
            &mut self.player_config_open,
            &mut self.player_config_state,
            PlayerConfigContext,
        ) {
            match action {
                PlayerConfigAction::Accept(settings) => {
                    actions.push(AppAction::ApplyPlayback(settings));
                }
            }
        }

        if let Some(never) = show_dialog::<ErrorDialog>(
            ctx,
            &mut self.error_open,
            &mut self.error_state,
            ErrorContext,
        ) {
            match never {}
        }

        actions
    }

    fn dialog_open(&self) -> bool {
        self.player_config_open || self.error_open
    }
}

fn remember_dir(slot: &mut PathBuf, picked: &Path) {
    if let Some(parent) = picked.parent() {
        *slot = parent.to_path_buf();
    }
}

impl eframe::App for BagPlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.process_background() {
            ctx.request_repaint();
        }

        // Shortcuts bypass the modal backdrop
        if !self.dialog_open() {
            self.handle_keyboard_shortcuts(ctx);
        }

        // Background feeds are polled, not pushed
        ctx.request_repaint_after(REPAINT_INTERVAL);

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let toolbar_ctx = ToolbarContext {
                has_bag: self.panel.bag().is_some(),
                is_recording: self.panel.is_recording(),
                is_playing: self.panel.is_playing(),
                timeline: self.panel.timeline(),
            };
            actions.extend(render_toolbar(ui, &toolbar_ctx));
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status_ctx = StatusBarContext {
                file_path: self.panel.file_path(),
                begin: self.panel.begin_time(),
                message_count: self.panel.bag().map(|b| b.message_count()),
                record_tag: self.panel.record_slot().tag(),
                play_tag: self.panel.play_slot().tag(),
                rate: self.panel.playback().rate,
                last_error: self.last_error.as_deref(),
                status_message: self.status_message.as_deref(),
            };
            render_status_bar(ui, &status_ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                render_topic_list(
                    &mut columns[0],
                    TopicListKind::Play,
                    self.panel.topics(TopicListKind::Play),
                    &mut actions,
                );
                render_topic_list(
                    &mut columns[1],
                    TopicListKind::Record,
                    self.panel.topics(TopicListKind::Record),
                    &mut actions,
                );
            });
        });

        actions.extend(self.render_dialogs(ctx));

        for action in actions {
            self.handle_action(action);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.panel.shutdown();

        if let Some(mut discovery) = self.discovery.take() {
            discovery.shutdown();
        }
        if let Some(mut clock) = self.clock.take() {
            clock.shutdown();
        }
    }
}
