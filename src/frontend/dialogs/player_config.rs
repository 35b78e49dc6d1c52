//! Player configuration dialog
//!
//! Edits the playback rate and the loop/clock flags passed to
//! `rosbag play`. Values are committed only on OK.

use egui::Ui;

use crate::config::{PlaybackSettings, MAX_PLAYBACK_RATE, MIN_PLAYBACK_RATE};
use crate::frontend::dialogs::{Dialog, DialogAction, DialogState};

/// State for the player configuration dialog
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfigState {
    pub rate: f64,
    pub loop_playback: bool,
    pub publish_clock: bool,
}

impl Default for PlayerConfigState {
    fn default() -> Self {
        Self::from_settings(&PlaybackSettings::default())
    }
}

impl PlayerConfigState {
    /// Pre-fill the form from the current settings
    pub fn from_settings(settings: &PlaybackSettings) -> Self {
        Self {
            rate: settings.rate,
            loop_playback: settings.loop_playback,
            publish_clock: settings.publish_clock,
        }
    }

    pub fn to_settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            loop_playback: self.loop_playback,
            publish_clock: self.publish_clock,
            rate: self.rate,
        }
    }
}

impl DialogState for PlayerConfigState {
    fn is_valid(&self) -> bool {
        self.rate.is_finite() && (MIN_PLAYBACK_RATE..=MAX_PLAYBACK_RATE).contains(&self.rate)
    }
}

/// Actions produced by the player configuration dialog
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerConfigAction {
    /// OK pressed with these values
    Accept(PlaybackSettings),
}

/// Context for rendering
pub struct PlayerConfigContext;

/// The player configuration dialog
pub struct PlayerConfigDialog;

impl Dialog for PlayerConfigDialog {
    type State = PlayerConfigState;
    type Action = PlayerConfigAction;
    type Context<'a> = PlayerConfigContext;

    fn title(_state: &Self::State) -> &'static str {
        "Player Configuration"
    }

    fn width() -> f32 {
        280.0
    }

    fn render(
        state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        egui::Grid::new("player_config_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Rate:");
                ui.add(
                    egui::DragValue::new(&mut state.rate)
                        .range(MIN_PLAYBACK_RATE..=MAX_PLAYBACK_RATE)
                        .speed(0.01)
                        .fixed_decimals(2)
                        .suffix("x"),
                );
                ui.end_row();

                ui.label("Loop:");
                ui.checkbox(&mut state.loop_playback, "");
                ui.end_row();

                ui.label("Clock:");
                ui.checkbox(&mut state.publish_clock, "")
                    .on_hover_text("Publish the bag time on /clock");
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.separator();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(state.is_valid(), egui::Button::new("OK"))
                .clicked()
            {
                return DialogAction::Commit(PlayerConfigAction::Accept(
                    state.to_settings(),
                ));
            }
            if ui.button("Cancel").clicked() {
                return DialogAction::Close;
            }
            DialogAction::None
        })
        .inner
    }
}
