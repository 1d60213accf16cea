// src/debug/visualization/torus_grid.rs
use crate::physics::sim::resources::{SimulationParameters, SurfaceResource};
use crate::setup::Planet;
use bevy::prelude::*;

const NUM_RING_LINES: usize = 36; // Linien konstanter Zeile (um das Rohr)
const NUM_TUBE_LINES: usize = 12; // Linien konstanter Spalte (um den großen Kreis)
const SEGMENTS_PER_LINE: usize = 48;

/// Parametergitter des nackten Torus (ohne Höhe), leicht nach außen versetzt.
pub fn draw_torus_grid_gizmos(
    mut gizmos: Gizmos,
    params: Res<SimulationParameters>,
    surface: Res<SurfaceResource>,
    planet_query: Query<&Transform, With<Planet>>,
) {
    if !params.show_torus_grid {
        return;
    }
    let Ok(planet) = planet_query.get_single() else {
        return;
    };

    let grid = surface.grid();
    let lift = 0.01 * surface.minor_radius();
    let ring_color = Color::rgba(0.0, 1.0, 0.0, 0.3);
    let tube_color = Color::rgba(0.0, 0.5, 1.0, 0.3);

    for i in 0..NUM_RING_LINES {
        let row = i as f32 / NUM_RING_LINES as f32 * grid.row_period();
        let points = (0..=SEGMENTS_PER_LINE).map(|k| {
            let col = k as f32 / SEGMENTS_PER_LINE as f32 * grid.col_period();
            planet.transform_point(surface.vertex_without_height_at(row, col, lift))
        });
        gizmos.linestrip(points, ring_color);
    }

    for j in 0..NUM_TUBE_LINES {
        let col = j as f32 / NUM_TUBE_LINES as f32 * grid.col_period();
        let points = (0..=SEGMENTS_PER_LINE).map(|k| {
            let row = k as f32 / SEGMENTS_PER_LINE as f32 * grid.row_period();
            planet.transform_point(surface.vertex_without_height_at(row, col, lift))
        });
        gizmos.linestrip(points, tube_color);
    }

    // Koordinatenachsen der Welt, skaliert mit dem großen Radius
    let axis_length = surface.major_radius();
    gizmos.line(Vec3::ZERO, Vec3::X * axis_length, Color::RED);
    gizmos.line(Vec3::ZERO, Vec3::Y * axis_length, Color::LIME_GREEN);
    gizmos.line(Vec3::ZERO, Vec3::Z * axis_length, Color::CYAN);
}
