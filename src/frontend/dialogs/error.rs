//! Error message dialog
//!
//! Shown when a bag file cannot be opened.

use std::convert::Infallible;

use egui::{Color32, RichText, Ui};

use super::{Dialog, DialogAction, DialogState};

/// State for the error dialog
#[derive(Debug, Default)]
pub struct ErrorState {
    pub title: String,
    pub message: String,
}

impl ErrorState {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl DialogState for ErrorState {}

pub struct ErrorContext;

pub struct ErrorDialog;

impl Dialog for ErrorDialog {
    type State = ErrorState;
    type Action = Infallible;
    type Context<'a> = ErrorContext;

    fn title(_state: &Self::State) -> &'static str {
        "Error"
    }

    fn width() -> f32 {
        380.0
    }

    fn render(
        state: &mut Self::State,
        _ctx: Self::Context<'_>,
        ui: &mut Ui,
    ) -> DialogAction<Self::Action> {
        if !state.title.is_empty() {
            ui.label(RichText::new(&state.title).strong());
        }
        ui.label(RichText::new(&state.message).color(Color32::LIGHT_RED));

        ui.separator();

        if ui.button("OK").clicked() {
            return DialogAction::Close;
        }
        DialogAction::None
    }
}
