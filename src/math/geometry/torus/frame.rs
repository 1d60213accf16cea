// src/math/geometry/torus/frame.rs

use super::surface::ToroidalSurface;
use crate::math::{types::*, utils::constants::PI};
use nalgebra::{Rotation3, Vector3 as NVec3};

/// Orthonormales lokales Koordinatensystem an einem Oberflächenpunkt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFrame {
    /// Oberflächennormale (mit Höhe)
    pub normal: Point3D,
    pub tangent: Point3D,
    pub bitangent: Point3D,
}

impl SurfaceFrame {
    pub fn axes(&self) -> [Point3D; 3] {
        [self.normal, self.tangent, self.bitangent]
    }
}

/// Baut den lokalen Rahmen an `position`.
///
/// Eine Rotation bildet die Welt-X-Achse auf die Normale ab; Welt-Y und
/// Welt-Z unter dieser Rotation ergeben die beiden Tangenten.
/// Zeigt die Normale exakt nach -X, ist die minimale Rotation nicht
/// eindeutig; dann wird die Halbdrehung um Z verwendet.
pub fn orthonormal_frame_at(surface: &ToroidalSurface, position: GridPoint) -> SurfaceFrame {
    let normal = surface.normal_at(position.x, position.y, true);
    let rotation = rotation_from_x_axis(normal);

    let tangent = to_bevy(rotation * NVec3::<f32>::y()).normalize();
    let bitangent = to_bevy(rotation * NVec3::<f32>::z()).normalize();

    SurfaceFrame {
        normal,
        tangent,
        bitangent,
    }
}

/// Minimale Rotation, die +X auf `target` dreht.
fn rotation_from_x_axis(target: Point3D) -> Rotation3<f32> {
    let target = NVec3::new(target.x, target.y, target.z);
    Rotation3::rotation_between(&NVec3::<f32>::x(), &target)
        .unwrap_or_else(|| Rotation3::from_axis_angle(&NVec3::z_axis(), PI))
}

fn to_bevy(v: NVec3<f32>) -> Point3D {
    Point3D::new(v.x, v.y, v.z)
}
