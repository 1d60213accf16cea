// src/debug/visualization/normal_vector.rs
use crate::math::geometry::torus::orthonormal_frame_at;
use crate::physics::motion::PositionTracker;
use crate::physics::sim::resources::SimulationParameters;
use crate::setup::Planet;
use bevy::prelude::*;

/// Ein Pfeil in Weltkoordinaten.
#[derive(Debug, Clone, Copy)]
pub struct NormalArrowVisual {
    pub origin: Vec3,
    /// Richtung (wird normalisiert)
    pub direction: Vec3,
    pub length: f32,
    pub color: Color,
}

impl NormalArrowVisual {
    pub fn new(origin: Vec3, direction: Vec3, length: f32, color: Color) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            length,
            color,
        }
    }

    pub fn tip(&self) -> Vec3 {
        self.origin + self.direction * self.length
    }

    fn draw(&self, gizmos: &mut Gizmos) {
        if self.direction != Vec3::ZERO {
            gizmos.arrow(self.origin, self.tip(), self.color);
        }
    }
}

/// Pfeile am Objekt: lokaler Rahmen (Normale rot, Tangente grün,
/// Bitangente blau) und die Tracker-Tangenten.
pub fn draw_normal_arrows_system(
    mut gizmos: Gizmos,
    params: Res<SimulationParameters>,
    tracker: Res<PositionTracker>,
    planet_query: Query<&Transform, With<Planet>>,
) {
    if !params.show_frame_axes && !params.show_tracker_tangents {
        return;
    }
    let Ok(planet) = planet_query.get_single() else {
        return;
    };

    let surface = tracker.surface();
    let position = tracker.position();
    let origin = planet.transform_point(surface.vertex_at(position.x, position.y));
    let length = params.gizmo_length;

    let mut arrows = Vec::with_capacity(6);
    if params.show_frame_axes {
        let frame = orthonormal_frame_at(surface, position);
        for (axis, color) in frame.axes().into_iter().zip([Color::RED, Color::GREEN, Color::BLUE]) {
            arrows.push(NormalArrowVisual::new(origin, planet.rotation * axis, length, color));
        }
    }
    if params.show_tracker_tangents {
        let tangents = [
            (tracker.tangent_x(), Color::YELLOW),
            (tracker.tangent_y(), Color::CYAN),
            (tracker.forward_tangent(), Color::ORANGE),
        ];
        for (tangent, color) in tangents {
            arrows.push(NormalArrowVisual::new(origin, planet.rotation * tangent, length, color));
        }
    }

    for arrow in &arrows {
        arrow.draw(&mut gizmos);
    }
}
