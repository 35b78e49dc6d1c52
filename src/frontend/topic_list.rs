//! Checkable topic list used for both the play and record candidates.

use egui::{Color32, RichText, Ui};

use crate::frontend::state::AppAction;
use crate::session::TopicListKind;
use crate::types::TopicList;

/// Render one topic list with its heading
///
/// Right-clicking the heading or any row offers Check All / Uncheck All.
pub fn render_topic_list(
    ui: &mut Ui,
    kind: TopicListKind,
    topics: &TopicList,
    actions: &mut Vec<AppAction>,
) {
    let heading = ui
        .label(
            RichText::new(format!(
                "{} ({}/{})",
                kind.heading(),
                topics.included_count(),
                topics.len()
            ))
            .strong(),
        )
        .interact(egui::Sense::click());
    heading.context_menu(|ui| selection_menu(ui, kind, actions));

    ui.separator();

    if topics.is_empty() {
        let hint = match kind {
            TopicListKind::Play => "Open a bag file to list its topics",
            TopicListKind::Record => "No topics published",
        };
        ui.label(RichText::new(hint).italics().color(Color32::GRAY));
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt(kind.heading())
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for entry in topics.entries() {
                ui.horizontal(|ui| {
                    let mut included = entry.included;
                    let mut response = ui.checkbox(&mut included, entry.name.as_str());
                    if !entry.datatype.is_empty() {
                        response = response.on_hover_text(entry.datatype.as_str());
                    }
                    if response.changed() {
                        actions.push(AppAction::SetTopicIncluded {
                            list: kind,
                            name: entry.name.clone(),
                            included,
                        });
                    }
                    response.context_menu(|ui| selection_menu(ui, kind, actions));

                    if let Some(count) = entry.message_count {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(format!("{} msgs", count))
                                    .small()
                                    .color(Color32::GRAY),
                            );
                        });
                    }
                });
            }
        });
}

fn selection_menu(ui: &mut Ui, kind: TopicListKind, actions: &mut Vec<AppAction>) {
    if ui.button("Check All").clicked() {
        actions.push(AppAction::SetAllTopics {
            list: kind,
            included: true,
        });
        ui.close();
    }
    if ui.button("Uncheck All").clicked() {
        actions.push(AppAction::SetAllTopics {
            list: kind,
            included: false,
        });
        ui.close();
    }
}
