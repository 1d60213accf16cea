// src/physics/motion/placement.rs

use super::tracker::PositionTracker;
use crate::math::{types::*, utils::constants::EPSILON};
use bevy::prelude::{Component, Transform};

/// Parameter der Feder-Kamera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSettings {
    pub time_unit: f32,
    /// Anteil des Abstands, der pro Zeiteinheit aufgeholt wird
    pub spring_coef: f32,
    /// Unterhalb dieses Abstands bleibt die Kamera stehen
    pub epsilon_near: f32,
    /// Oberhalb dieses Abstands springt die Kamera direkt ans Ziel
    pub epsilon_far: f32,
}

/// Markiert das über die Oberfläche kriechende Objekt.
#[derive(Component, Debug, Clone, Copy)]
pub struct Crawler {
    /// Achsenparallele Box des unskalierten Objekt-Meshes
    pub bounds: Bounds3D,
}

/// Kamera, die dem Objekt über eine Feder folgt.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SpringCamera {
    /// Erster Frame: ohne Feder direkt ans Ziel
    pub initialized: bool,
}

/// Zielpose der Kamera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub eye: Point3D,
    pub look_at: Point3D,
    pub up: Point3D,
}

/// Weltpose des Objekts: Ursprung (Unterkante) auf der verschobenen
/// Oberfläche, lokales +Y entlang der Normale, Blick (-Z) in Fahrtrichtung
/// bei Vorwärts-Eingabe.
pub fn object_transform(
    tracker: &PositionTracker,
    object: &Crawler,
    scale: f32,
    surface_to_world: &Transform,
) -> Transform {
    let surface = tracker.surface();
    let position = tracker.position();

    let local = surface.translation_matrix(position, object.bounds.bottom_offset(scale));
    let origin = surface_to_world.transform_point(local.transform_point3(Point3D::ZERO));

    let normal = surface_to_world.rotation * surface.normal_at(position.x, position.y, true);
    // Vorwärts bewegt gegen den Kurs, siehe SpeedInput::Forward
    let travel = surface_to_world.rotation * -tracker.forward_tangent();
    let facing = project_onto_plane(travel, normal);

    let transform = Transform::from_translation(origin).with_scale(Point3D::splat(scale));
    if facing == Point3D::ZERO || normal.length_squared() < 0.5 {
        return transform;
    }
    transform.looking_to(facing, normal)
}

/// Zielpose hinter und über dem Objekt.
pub fn camera_target(object: &Transform, distance: f32, height: f32) -> CameraTarget {
    let up = object.rotation * Point3D::Y;
    let forward = object.rotation * Point3D::NEG_Z;

    CameraTarget {
        eye: object.translation - forward * distance + up * height,
        look_at: object.translation,
        up,
    }
}

/// Ein Federschritt von `current` Richtung `target`.
///
/// Der Faktor `spring_coef / time_unit * elapsed` ist auf [0, 1] begrenzt,
/// die Kamera schießt also nie über das Ziel hinaus. Der Ruheabstand ist
/// nach unten durch `EPSILON` begrenzt, damit `delta / distance` definiert bleibt.
pub fn spring_step(current: Point3D, target: Point3D, elapsed: f32, settings: &SpringSettings) -> Point3D {
    let delta = target - current;
    let distance = delta.length();

    if distance > settings.epsilon_far {
        return target;
    }
    if distance < settings.epsilon_near.max(EPSILON) {
        return current;
    }

    let factor = if settings.time_unit > 0.0 {
        (settings.spring_coef / settings.time_unit * elapsed).clamp(0.0, 1.0)
    } else {
        1.0
    };
    current + delta / distance * distance * factor
}

/// Anteil von `v` in der Ebene senkrecht zu `normal`, normiert
fn project_onto_plane(v: Point3D, normal: Point3D) -> Point3D {
    let n = normal.normalize_or_zero();
    (v - n * v.dot(n)).normalize_or_zero()
}
