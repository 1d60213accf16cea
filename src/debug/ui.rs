// src/debug/ui.rs
use crate::physics::motion::PositionTracker;
use crate::physics::sim::resources::{CameraMode, SimulationParameters, SurfaceResource};
use crate::physics::sim::state::SimulationState;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{Slider, Window},
};
use egui::{Color32, RichText};

pub fn simulation_control_ui_system(
    mut contexts: EguiContexts,
    mut sim_params: ResMut<SimulationParameters>,
    tracker: Res<PositionTracker>,
    surface: Res<SurfaceResource>,
    mut next_state: ResMut<NextState<SimulationState>>,
    current_state: Res<State<SimulationState>>,
) {
    Window::new("Simulationssteuerung")
        .default_width(320.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Globale Steuerung");
            ui.horizontal(|ui| {
                let running = *current_state.get() == SimulationState::Running;
                let target = current_state.get().toggled();
                if ui.button(if running { "⏸ Pause" } else { "▶ Play" }).clicked()
                    && target != *current_state.get()
                {
                    next_state.set(target);
                }
                let color = if running { Color32::LIGHT_GREEN } else { Color32::YELLOW };
                ui.label(RichText::new(format!("Zustand: {:?}", current_state.get())).color(color));
            });

            ui.collapsing("Position", |ui| {
                let position = tracker.position();
                let grid = surface.grid();
                ui.label(format!(
                    "Zeile {:.2} / {}   Spalte {:.2} / {}",
                    position.x, grid.rows, position.y, grid.cols
                ));
                ui.label(format!(
                    "φ = {:.3} rad   ψ = {:.3} rad",
                    surface.phi(position.x),
                    surface.psi(position.y)
                ));
                ui.label(format!(
                    "Kurs {:.3} rad   Geschwindigkeit {:+.0}",
                    tracker.heading(),
                    tracker.speed()
                ));
                let (width, height) = surface.height_field().image_size();
                ui.label(format!(
                    "Höhe {:.3} (Höhenbild {}x{} px)",
                    surface.height_at(position.x, position.y),
                    width,
                    height
                ));
            });

            ui.collapsing("Bewegung", |ui| {
                ui.add(
                    Slider::new(&mut sim_params.time_unit, 0.001..=1.0)
                        .logarithmic(true)
                        .text("Zeiteinheit (s)"),
                );
                ui.add(Slider::new(&mut sim_params.linear_speed, 0.0..=10.0).text("Zellen pro Einheit"));
                ui.add(Slider::new(&mut sim_params.turn_rate, 0.0..=0.3).text("Drehrate (rad)"));
            });

            ui.collapsing("Kamera", |ui| {
                ui.horizontal(|ui| {
                    ui.radio_value(&mut sim_params.camera_mode, CameraMode::Follow, "Folgen");
                    ui.radio_value(&mut sim_params.camera_mode, CameraMode::Orbit, "Orbit");
                });
                ui.add(Slider::new(&mut sim_params.spring_coef, 0.0..=1.0).text("Federkonstante"));
                ui.add(
                    Slider::new(&mut sim_params.epsilon_near, 0.0..=0.1)
                        .logarithmic(true)
                        .text("Ruheabstand"),
                );
                ui.add(Slider::new(&mut sim_params.epsilon_far, 0.5..=50.0).text("Sprungabstand"));
                ui.add(Slider::new(&mut sim_params.camera_height, 0.0..=10.0).text("Höhe"));
                ui.add(Slider::new(&mut sim_params.camera_distance, 0.0..=20.0).text("Abstand"));
            });

            ui.collapsing("Oberfläche", |ui| {
                let shading = &mut sim_params.shading;
                for k in 0..3 {
                    ui.horizontal(|ui| {
                        ui.color_edit_button_rgb(&mut shading.layer_colors[k]);
                        ui.add(
                            Slider::new(&mut shading.layer_heights[k], 0.0..=1.0)
                                .text(format!("Schicht {} Höhe", k + 1)),
                        );
                    });
                    ui.add(
                        Slider::new(&mut shading.layer_repeat_counts[k], 1..=100)
                            .text(format!("Schicht {} Wiederholungen", k + 1)),
                    );
                }
                ui.add(Slider::new(&mut shading.blend_width, 0.0..=0.5).text("Überblendbreite"));
                ui.add(Slider::new(&mut shading.layer_contrast, 0.0..=1.0).text("Musterkontrast"));
                ui.separator();
                ui.add(Slider::new(&mut shading.detail_repeat_count, 1..=100).text("Detail Wiederholungen"));
                ui.add(Slider::new(&mut shading.detail_dist, 0.0..=1.0).text("Detail Abstand"));
                ui.add(Slider::new(&mut shading.detail_coef, 0.0..=5.0).text("Detail Stärke"));
            });

            ui.collapsing("Visualisierung & Debug", |ui| {
                ui.add(Slider::new(&mut sim_params.object_scale, 0.1..=5.0).text("Objektgröße"));
                ui.checkbox(&mut sim_params.show_frame_axes, "Lokaler Rahmen");
                ui.checkbox(&mut sim_params.show_tracker_tangents, "Tracker-Tangenten");
                ui.checkbox(&mut sim_params.show_torus_grid, "Torus-Gitter");
                ui.add(Slider::new(&mut sim_params.gizmo_length, 0.1..=3.0).text("Pfeillänge"));
            });

            ui.collapsing("Steuerung Info", |ui| {
                ui.label("Pfeil hoch/runter: vorwärts/rückwärts");
                ui.label("Pfeil links/rechts: drehen (nur in Bewegung)");
                ui.label("C: Kameramodus wechseln");
                ui.label("P / Leertaste: Pause");
                ui.separator();
                ui.label("Orbit: Rechte Maustaste + Ziehen, Mittlere Maustaste: Pan, Mausrad: Zoom");
            });
        });
}
