// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use std::sync::Arc;
use thiserror::Error;

// Eigene Module deklarieren
pub mod config;
pub mod debug;
pub mod math;
pub mod physics;
pub mod render;
pub mod setup; // Szene: Planet, Objekt, Licht, Kamera

use config::{ConfigError, TorusWorldConfig};
use debug::{
    ui::simulation_control_ui_system,
    visualization::{
        normal_vector::draw_normal_arrows_system, torus_grid::draw_torus_grid_gizmos,
    },
};
use math::error::SurfaceError;
use physics::motion::PositionTracker;
use physics::sim::resources::*;
use physics::sim::state::*;
use physics::sim::systems::*;
use render::refresh_surface_shading_system;
use setup::setup_scene;

/// Fehler, die den Start der Anwendung verhindern.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

fn main() -> Result<(), AppError> {
    // Konfiguration und Oberfläche vor dem App-Start: Ladefehler sind fatal
    let config = TorusWorldConfig::load_or_default()?;
    let surface = Arc::new(config.surface.build_surface()?);
    let tracker = PositionTracker::new(
        surface.clone(),
        config.simulation.start_position(),
        config.simulation.tracker_settings(),
    );

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin)
        .add_plugins(PanOrbitCameraPlugin)
        .insert_resource(config.simulation)
        .insert_resource(SurfaceResource(surface))
        .insert_resource(tracker)
        .init_state::<SimulationState>()
        .add_systems(Startup, setup_scene)
        // --- Initialisierungsphase ---
        .add_systems(
            Update,
            finish_initialization_system.run_if(in_state(SimulationState::Initializing)),
        )
        // Pausenzeit nicht nachholen
        .add_systems(OnEnter(SimulationState::Running), resync_tracker_clock_system)
        .add_systems(
            Update,
            (
                // Block 1: UI und Eingaben
                simulation_control_ui_system,
                toggle_pause_system,
                toggle_camera_mode_system,
                apply_camera_mode_system,
                sync_tracker_settings_system,
                // Block 2: Tracker bewegen (nur wenn Running)
                (tracker_input_system, advance_tracker_system)
                    .chain()
                    .run_if(in_state(SimulationState::Running)),
                // Block 3: Objekt und Kamera platzieren
                place_crawler_system,
                follow_camera_system,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                refresh_surface_shading_system.after(simulation_control_ui_system),
                (draw_normal_arrows_system, draw_torus_grid_gizmos).after(place_crawler_system),
            ),
        )
        .run();

    Ok(())
}
