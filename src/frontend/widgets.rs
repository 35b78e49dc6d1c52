//! Small reusable widgets

use egui::{Color32, Response, Ui, Widget};

/// A widget that displays a colored status indicator
pub struct StatusIndicator {
    color: Color32,
    label: String,
    tooltip: Option<String>,
}

impl StatusIndicator {
    /// Create a new status indicator with the given color and label
    pub fn new(color: Color32, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
            tooltip: None,
        }
    }

    /// Indicator for the recorder slot
    pub fn recording(active: bool) -> Self {
        if active {
            Self::new(Color32::from_rgb(230, 70, 70), "Recording")
        } else {
            Self::new(Color32::GRAY, "Not recording")
        }
    }

    /// Indicator for the player slot
    pub fn playing(active: bool) -> Self {
        if active {
            Self::new(Color32::GREEN, "Playing")
        } else {
            Self::new(Color32::GRAY, "Stopped")
        }
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl Widget for StatusIndicator {
    fn ui(self, ui: &mut Ui) -> Response {
        let response = ui.horizontal(|ui| {
            ui.colored_label(self.color, "●");
            ui.label(egui::RichText::new(&self.label).small());
        });

        let response = response.response;

        if let Some(tooltip) = self.tooltip {
            response.on_hover_text(tooltip)
        } else {
            response
        }
    }
}
