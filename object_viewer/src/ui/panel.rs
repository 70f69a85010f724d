//! Session panel: connection status, mint form, load button, scene toggle.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::data::{SessionChannel, SessionCommand};
use crate::scene::SceneState;
use crate::ui::{MintForm, SessionView, StatusLine};

pub fn panel_plugin(app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
        app.add_plugins(EguiPlugin);
    }
    app.add_plugins(FrameTimeDiagnosticsPlugin)
        .init_resource::<MintForm>()
        .add_systems(Update, session_panel_system);
}

#[allow(clippy::too_many_arguments)]
fn session_panel_system(
    mut contexts: EguiContexts,
    channel: Res<SessionChannel>,
    mut view: ResMut<SessionView>,
    mut form: ResMut<MintForm>,
    scene_state: Res<State<SceneState>>,
    mut next_scene: ResMut<NextState<SceneState>>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    let mut command = None;
    let mut show_scene = *scene_state.get() != SceneState::Unmounted;

    egui::Window::new("Metaverse NFT Viewer")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(true)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Connected as:").strong());
                ui.label(egui::RichText::new(view.account_label()).monospace());
            });
            ui.label(format!("Chain  {}", view.chain));
            if view.account.is_none() && ui.button("Connect").clicked() {
                command = Some(SessionCommand::Connect);
            }
            ui.separator();

            ui.label(
                egui::RichText::new("Mint New 3D Object")
                    .size(15.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            egui::Grid::new("mint_form")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Name");
                    ui.add(egui::TextEdit::singleline(&mut form.name).hint_text("Name"));
                    ui.end_row();
                    for (label, value) in form.numeric_fields_mut() {
                        ui.label(label);
                        ui.add(egui::TextEdit::singleline(value).desired_width(80.0));
                        ui.end_row();
                    }
                });
            if ui.button("Mint Object").clicked() {
                command = Some(SessionCommand::Mint(form.to_request()));
            }
            ui.separator();

            ui.label(
                egui::RichText::new("3D Scene Viewer")
                    .size(15.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.horizontal(|ui| {
                if ui.button("Load Objects").clicked() {
                    command = Some(SessionCommand::FetchAll);
                }
                ui.checkbox(&mut show_scene, "Show scene");
            });
            ui.label(format!("Objects  {}", view.object_count));
            ui.label(format!("FPS  {fps:.0}"));

            match &view.status {
                StatusLine::Idle => {}
                StatusLine::Info(msg) => {
                    ui.label(msg);
                }
                StatusLine::Error(msg) => {
                    ui.colored_label(egui::Color32::from_rgb(240, 90, 90), msg);
                }
            }
        });

    if let Some(command) = command {
        view.dispatch(&channel, command);
    }

    match (*scene_state.get(), show_scene) {
        (SceneState::Unmounted, true) => next_scene.set(SceneState::Constructing),
        (SceneState::Looping, false) => next_scene.set(SceneState::Unmounted),
        _ => {}
    }
}
