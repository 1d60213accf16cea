// src/setup.rs
use crate::math::types::*;
use crate::physics::motion::{Crawler, SpringCamera};
use crate::physics::sim::resources::{CameraMode, SimulationParameters, SurfaceResource};
use crate::render::{SurfaceShadingInput, mesh_bounds, to_bevy_mesh};
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;
use std::f32::consts::FRAC_PI_2;

/// Markiert den Planeten. Seine `Transform` bildet den Oberflächenraum
/// (Polarachse z) auf die Welt (Polarachse y) ab.
#[derive(Component, Debug, Default)]
pub struct Planet;

const CRAWLER_SIZE: Vec3 = Vec3::new(0.3, 0.15, 0.45);

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    surface: Res<SurfaceResource>,
    params: Res<SimulationParameters>,
) {
    // Planet
    let surface_mesh = surface.build_mesh();
    info!(
        "Torus mesh generated: {}x{} grid, {} vertices, {} triangles",
        surface_mesh.grid.rows,
        surface_mesh.grid.cols,
        surface_mesh.vertices.len(),
        surface_mesh.triangle_count()
    );
    let shading_input =
        SurfaceShadingInput::from_surface_mesh(&surface_mesh, surface.height_field().amplitude());
    let planet_mesh = to_bevy_mesh(&surface_mesh, shading_input.colors(&params.shading));

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(planet_mesh),
            material: materials.add(StandardMaterial {
                base_color: Color::WHITE,
                metallic: 0.1,
                perceptual_roughness: 0.8,
                ..default()
            }),
            transform: Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            ..default()
        },
        Planet,
        shading_input,
    ));

    // Licht
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(8.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
    });

    // Kriechendes Objekt; die Platzierung übernimmt place_crawler_system
    let crawler_mesh = Mesh::from(Cuboid::from_size(CRAWLER_SIZE));
    let bounds = mesh_bounds(&crawler_mesh).unwrap_or(Bounds3D {
        min: -CRAWLER_SIZE * 0.5,
        max: CRAWLER_SIZE * 0.5,
    });
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(crawler_mesh),
            material: materials.add(StandardMaterial {
                base_color: Color::rgb(0.9, 0.3, 0.1),
                metallic: 0.4,
                perceptual_roughness: 0.5,
                ..default()
            }),
            ..default()
        },
        Crawler { bounds },
    ));

    // Kamera
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 20.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        PanOrbitCamera {
            enabled: params.camera_mode == CameraMode::Orbit,
            button_orbit: MouseButton::Right,
            button_pan: MouseButton::Middle,
            radius: Some(30.0), // Start Entfernung
            ..default()
        },
        SpringCamera::default(),
    ));
}
