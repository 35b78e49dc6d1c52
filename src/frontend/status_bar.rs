//! Status bar panel: bottom bar with file info, process state and messages.

use std::path::Path;

use egui::{Color32, RichText, Ui};

use crate::backend::ProcessTag;
use crate::frontend::widgets::StatusIndicator;
use crate::types::BagTime;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub file_path: Option<&'a Path>,
    pub begin: BagTime,
    pub message_count: Option<u64>,
    pub record_tag: Option<&'a ProcessTag>,
    pub play_tag: Option<&'a ProcessTag>,
    pub rate: f64,
    pub last_error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        // === Loaded file ===
        match ctx.file_path {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(RichText::new(name).small())
                    .on_hover_text(path.display().to_string());

                if let Some(date) = ctx.begin.to_datetime() {
                    ui.separator();
                    ui.label(
                        RichText::new(format!(
                            "Recorded {}",
                            date.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
                        ))
                        .small(),
                    );
                }

                if let Some(count) = ctx.message_count {
                    ui.separator();
                    ui.label(RichText::new(format!("Messages: {}", count)).small());
                }
            }
            None => {
                ui.label(RichText::new("No bag loaded").small().color(Color32::GRAY));
            }
        }

        ui.separator();

        // === Process state ===
        let mut recording = StatusIndicator::recording(ctx.record_tag.is_some());
        if let Some(tag) = ctx.record_tag {
            recording = recording.with_tooltip(format!("Node /{}", tag));
        }
        ui.add(recording);

        let mut playing = StatusIndicator::playing(ctx.play_tag.is_some());
        if let Some(tag) = ctx.play_tag {
            playing = playing.with_tooltip(format!("Node /{}", tag));
        }
        ui.add(playing);

        ui.label(RichText::new(format!("Rate: {}x", ctx.rate)).small());

        // === Message (right-aligned) ===
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(error) = ctx.last_error {
                ui.colored_label(Color32::RED, RichText::new(error).small());
            } else if let Some(message) = ctx.status_message {
                ui.label(RichText::new(message).small());
            }
        });
    });
}
