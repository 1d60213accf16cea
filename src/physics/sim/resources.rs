// src/physics/sim/resources.rs
use crate::math::geometry::torus::ToroidalSurface;
use crate::physics::motion::{placement::SpringSettings, tracker::TrackerSettings};
use crate::render::SurfaceShading;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kameramodus: Feder-Kamera hinter dem Objekt oder freie Orbit-Kamera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    Follow,
    Orbit,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Follow => CameraMode::Orbit,
            CameraMode::Orbit => CameraMode::Follow,
        }
    }
}

/// Alle zur Laufzeit einstellbaren Parameter. Wird aus der Konfiguration
/// geladen und über das egui-Panel verändert.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    // --- Zeit & Bewegung ---
    /// Sekunden pro Zeiteinheit; alle Raten beziehen sich auf diese Einheit
    pub time_unit: f32,
    /// Gitterzellen pro Zeiteinheit
    pub linear_speed: f32,
    /// Radiant pro Zeiteinheit (bei Geschwindigkeit 1)
    pub turn_rate: f32,
    /// Startposition (Zeile, Spalte)
    pub start_position: [f32; 2],

    // --- Feder-Kamera ---
    pub spring_coef: f32,
    pub epsilon_near: f32,
    pub epsilon_far: f32,
    pub camera_height: f32,
    pub camera_distance: f32,
    pub camera_mode: CameraMode,

    // --- Objekt ---
    pub object_scale: f32,

    // --- Oberfläche ---
    pub shading: SurfaceShading,

    // --- Visualisierung & Debug ---
    pub show_frame_axes: bool,
    pub show_tracker_tangents: bool,
    pub show_torus_grid: bool,
    pub gizmo_length: f32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            // Zeit & Bewegung: eine Zelle bzw. 0.03 rad pro 60stel Sekunde
            time_unit: 1.0 / 60.0,
            linear_speed: 1.0,
            turn_rate: 0.03,
            start_position: [150.0, 150.0],

            // Kamera
            spring_coef: 0.1,
            epsilon_near: 1e-3,
            epsilon_far: 8.0,
            camera_height: 1.2,
            camera_distance: 2.5,
            camera_mode: CameraMode::Follow,

            // Objekt
            object_scale: 1.0,

            // Oberfläche
            shading: SurfaceShading::default(),

            // Vis/Debug
            show_frame_axes: true,
            show_tracker_tangents: false,
            show_torus_grid: false,
            gizmo_length: 0.6,
        }
    }
}

impl SimulationParameters {
    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            time_unit: self.time_unit,
            linear_speed: self.linear_speed,
            turn_rate: self.turn_rate,
        }
    }

    pub fn spring_settings(&self) -> SpringSettings {
        SpringSettings {
            time_unit: self.time_unit,
            spring_coef: self.spring_coef,
            epsilon_near: self.epsilon_near,
            epsilon_far: self.epsilon_far,
        }
    }

    pub fn start_position(&self) -> Vec2 {
        Vec2::from(self.start_position)
    }
}

/// Die unveränderliche Oberfläche, geteilt von Tracker, Platzierung und
/// Debug-Zeichnung.
#[derive(Resource, Debug, Clone)]
pub struct SurfaceResource(pub Arc<ToroidalSurface>);

impl std::ops::Deref for SurfaceResource {
    type Target = ToroidalSurface;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_follow_parameters() {
        let params = SimulationParameters {
            time_unit: 0.5,
            spring_coef: 0.3,
            ..Default::default()
        };
        assert_eq!(params.tracker_settings().time_unit, 0.5);
        assert_eq!(params.spring_settings().spring_coef, 0.3);
        assert_eq!(params.start_position(), Vec2::new(150.0, 150.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: SimulationParameters =
            serde_json::from_str(r#"{ "linear_speed": 2.0, "camera_mode": "Orbit" }"#).unwrap();
        assert_eq!(params.linear_speed, 2.0);
        assert_eq!(params.camera_mode, CameraMode::Orbit);
        assert_eq!(params.turn_rate, SimulationParameters::default().turn_rate);
        assert_eq!(params.shading, SurfaceShading::default());

        let params: SimulationParameters =
            serde_json::from_str(r#"{ "shading": { "detail_repeat_count": 25 } }"#).unwrap();
        assert_eq!(params.shading.detail_repeat_count, 25);
        assert_eq!(params.shading.layer_repeat_counts, [3, 3, 3]);
    }

    #[test]
    fn test_camera_mode_toggle() {
        assert_eq!(CameraMode::Follow.toggled(), CameraMode::Orbit);
        assert_eq!(CameraMode::Orbit.toggled(), CameraMode::Follow);
    }
}
