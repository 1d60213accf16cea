// src/physics/sim/systems.rs
use super::resources::{CameraMode, SimulationParameters};
use super::state::SimulationState;
use crate::physics::motion::{
    Crawler, PositionTracker, SpeedInput, SpringCamera, TurnInput,
    placement::{camera_target, object_transform, spring_step},
};
use crate::setup::Planet;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

/// Wechselt nach dem Spawnen der Szene in den laufenden Zustand.
pub fn finish_initialization_system(mut next_state: ResMut<NextState<SimulationState>>) {
    next_state.set(SimulationState::Running);
    info!("Initialization sequence complete, simulation is Running.");
}

/// `P` oder Leertaste pausiert bzw. setzt fort.
pub fn toggle_pause_system(
    keys: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<SimulationState>>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    if keys.just_pressed(KeyCode::KeyP) || keys.just_pressed(KeyCode::Space) {
        let target = current_state.get().toggled();
        if target != *current_state.get() {
            next_state.set(target);
            info!("Simulation state: {:?} -> {:?}", current_state.get(), target);
        }
    }
}

/// Beim (Wieder-)Eintritt in Running die Pausenzeit verwerfen.
pub fn resync_tracker_clock_system(time: Res<Time>, mut tracker: ResMut<PositionTracker>) {
    tracker.sync_clock(time.elapsed_seconds_f64());
    debug!("Tracker clock resynced at {:.3}s", time.elapsed_seconds_f64());
}

/// Übernimmt im UI geänderte Raten in den Tracker.
pub fn sync_tracker_settings_system(
    params: Res<SimulationParameters>,
    mut tracker: ResMut<PositionTracker>,
) {
    if params.is_changed() {
        tracker.set_settings(params.tracker_settings());
    }
}

/// Pfeiltasten: Hoch/Runter setzen die Geschwindigkeit, Links/Rechts drehen.
pub fn tracker_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut tracker: ResMut<PositionTracker>,
) {
    let speed = if keys.pressed(KeyCode::ArrowUp) {
        SpeedInput::Forward
    } else if keys.pressed(KeyCode::ArrowDown) {
        SpeedInput::Backward
    } else {
        SpeedInput::None
    };
    tracker.set_speed_from_input(speed);

    let elapsed = time.delta_seconds();
    if keys.pressed(KeyCode::ArrowRight) {
        tracker.set_turn_from_input(TurnInput::Right, elapsed);
    }
    if keys.pressed(KeyCode::ArrowLeft) {
        tracker.set_turn_from_input(TurnInput::Left, elapsed);
    }
}

pub fn advance_tracker_system(time: Res<Time>, mut tracker: ResMut<PositionTracker>) {
    tracker.advance(time.elapsed_seconds_f64());
}

/// Legt das Objekt an der Tracker-Position auf die Oberfläche.
pub fn place_crawler_system(
    tracker: Res<PositionTracker>,
    params: Res<SimulationParameters>,
    planet_query: Query<&Transform, (With<Planet>, Without<Crawler>)>,
    mut crawler_query: Query<(&Crawler, &mut Transform)>,
) {
    let Ok(planet_transform) = planet_query.get_single() else {
        return;
    };
    for (crawler, mut transform) in crawler_query.iter_mut() {
        *transform = object_transform(&tracker, crawler, params.object_scale, planet_transform);
    }
}

/// Feder-Kamera hinter dem Objekt (nur im Follow-Modus).
pub fn follow_camera_system(
    time: Res<Time>,
    params: Res<SimulationParameters>,
    crawler_query: Query<&Transform, (With<Crawler>, Without<SpringCamera>)>,
    mut camera_query: Query<(&mut SpringCamera, &mut Transform)>,
) {
    if params.camera_mode != CameraMode::Follow {
        return;
    }
    let Ok(crawler_transform) = crawler_query.get_single() else {
        return;
    };
    let target = camera_target(crawler_transform, params.camera_distance, params.camera_height);

    for (mut spring, mut transform) in camera_query.iter_mut() {
        let eye = if spring.initialized {
            spring_step(
                transform.translation,
                target.eye,
                time.delta_seconds(),
                &params.spring_settings(),
            )
        } else {
            spring.initialized = true;
            target.eye
        };
        *transform = Transform::from_translation(eye).looking_at(target.look_at, target.up);
    }
}

/// `C` wechselt zwischen Follow- und Orbit-Kamera.
pub fn toggle_camera_mode_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut params: ResMut<SimulationParameters>,
) {
    if keys.just_pressed(KeyCode::KeyC) {
        params.camera_mode = params.camera_mode.toggled();
    }
}

/// Aktiviert die Orbit-Steuerung passend zum Modus. Beim Zurückschalten
/// springt die Feder-Kamera einmal direkt an ihr Ziel.
pub fn apply_camera_mode_system(
    params: Res<SimulationParameters>,
    mut last_mode: Local<Option<CameraMode>>,
    mut camera_query: Query<(&mut PanOrbitCamera, &mut SpringCamera)>,
) {
    if *last_mode == Some(params.camera_mode) {
        return;
    }
    *last_mode = Some(params.camera_mode);

    for (mut orbit, mut spring) in camera_query.iter_mut() {
        orbit.enabled = params.camera_mode == CameraMode::Orbit;
        if params.camera_mode == CameraMode::Follow {
            spring.initialized = false;
        }
    }
    info!("Camera mode: {:?}", params.camera_mode);
}
