//! Toolbar panel: file buttons, transport controls and the scrub bar.
//!
//! Layout left to right: Open, Save | Record, Play, Pause, Stop, Config |
//! begin time, slider, time field, end time.

use egui::{Color32, RichText, Ui};

use crate::frontend::state::AppAction;
use crate::session::Timeline;

/// Context needed to render the toolbar.
pub struct ToolbarContext<'a> {
    pub has_bag: bool,
    pub is_recording: bool,
    pub is_playing: bool,
    pub timeline: &'a Timeline,
}

/// Render the main toolbar.
///
/// Returns actions to be applied by the app.
pub fn render_toolbar(ui: &mut Ui, ctx: &ToolbarContext<'_>) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        render_file_group(ui, ctx, &mut actions);
        ui.separator();
        render_transport_group(ui, ctx, &mut actions);
        ui.separator();
        render_timeline_group(ui, ctx, &mut actions);
    });

    actions
}

fn render_file_group(ui: &mut Ui, ctx: &ToolbarContext<'_>, actions: &mut Vec<AppAction>) {
    if ui
        .button("Open")
        .on_hover_text("Open a bag file (Ctrl+O)")
        .clicked()
    {
        actions.push(AppAction::OpenBag);
    }

    if ui
        .add_enabled(ctx.has_bag, egui::Button::new("Save"))
        .on_hover_text("Save the checked play topics to a new bag (Ctrl+S)")
        .clicked()
    {
        actions.push(AppAction::SaveBag);
    }
}

fn render_transport_group(ui: &mut Ui, ctx: &ToolbarContext<'_>, actions: &mut Vec<AppAction>) {
    // Toggle state mirrors is-recording; the panel decides whether it sticks
    let mut record = ctx.is_recording;
    let record_text = if ctx.is_recording {
        RichText::new("● Record").color(Color32::from_rgb(230, 70, 70))
    } else {
        RichText::new("● Record")
    };
    if ui
        .toggle_value(&mut record, record_text)
        .on_hover_text("Record the checked live topics")
        .changed()
    {
        actions.push(AppAction::ToggleRecord(record));
    }

    if ui
        .add_enabled(ctx.has_bag, egui::Button::new("▶ Play"))
        .on_hover_text("Play from the beginning")
        .clicked()
    {
        actions.push(AppAction::Play);
    }

    let pause_text = if ctx.is_playing { "⏸ Pause" } else { "⏵ Resume" };
    if ui
        .add_enabled(ctx.has_bag, egui::Button::new(pause_text))
        .on_hover_text("Pause, or continue from the time field (Space)")
        .clicked()
    {
        actions.push(AppAction::Resume);
    }

    let stop_btn = if ctx.is_recording || ctx.is_playing {
        egui::Button::new(RichText::new("■ Stop").color(Color32::WHITE))
            .fill(Color32::from_rgb(180, 50, 50))
    } else {
        egui::Button::new("■ Stop")
    };
    if ui
        .add(stop_btn)
        .on_hover_text("Stop recording and playback")
        .clicked()
    {
        actions.push(AppAction::Stop);
    }

    if ui
        .button("Config")
        .on_hover_text("Playback rate, loop and clock")
        .clicked()
    {
        actions.push(AppAction::Configure);
    }
}

fn render_timeline_group(ui: &mut Ui, ctx: &ToolbarContext<'_>, actions: &mut Vec<AppAction>) {
    let timeline = ctx.timeline;
    let duration = timeline.duration();

    let mut begin = 0.0_f64;
    ui.add_enabled(
        false,
        egui::DragValue::new(&mut begin).fixed_decimals(3).suffix(" s"),
    );

    let mut slider = timeline.slider();
    let response = ui.add_enabled(
        ctx.has_bag,
        egui::Slider::new(&mut slider, 0..=timeline.slider_range()).show_value(false),
    );
    if response.changed() {
        actions.push(AppAction::SeekSlider(slider));
    }

    let mut time = timeline.time();
    let response = ui.add_enabled(
        ctx.has_bag,
        egui::DragValue::new(&mut time)
            .range(0.0..=duration)
            .speed(0.1)
            .fixed_decimals(3)
            .suffix(" s"),
    );
    if response.changed() {
        actions.push(AppAction::SeekTime(time));
    }

    let mut end = duration;
    ui.add_enabled(
        false,
        egui::DragValue::new(&mut end).fixed_decimals(3).suffix(" s"),
    );
}
