// src/math/types/bounds.rs

use crate::math::{error::*, types::*};

/// 3D Bounding Box (Axis-Aligned Bounding Box) eines Objekts im Objektraum.
///
/// Wird für das Platzieren von Objekten auf der Oberfläche benötigt: die
/// Unterseite (`min.y`) bestimmt, wie weit der Objekt-Ursprung über dem
/// Boden schweben muss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3D {
    pub min: Point3D,
    pub max: Point3D,
}

impl Bounds3D {
    /// Erstellt eine neue Bounding Box
    pub fn new(min: Point3D, max: Point3D) -> SurfaceResult<Self> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(SurfaceError::InvalidConfiguration {
                message: format!("Invalid bounds: min {:?} > max {:?}", min, max),
            });
        }

        Ok(Self { min, max })
    }

    /// Erstellt eine Bounding Box die alle Punkte umschließt.
    /// Jede Achse wird unabhängig per min/max reduziert.
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3D>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let (min, max) = points_iter.fold((first_point, first_point), |(min, max), point| {
            (min.min(point), max.max(point))
        });

        Some(Self { min, max })
    }

    /// Zentrum der Bounding Box
    pub fn center(&self) -> Point3D {
        (self.min + self.max) * 0.5
    }

    /// Mittelpunkt der Unterseite (Y ist "oben" im Objektraum)
    pub fn bottom_center(&self) -> Point3D {
        let center = self.center();
        Point3D::new(center.x, self.min.y, center.z)
    }

    /// Größe der Bounding Box
    pub fn size(&self) -> Point3D {
        (self.max - self.min).max(Point3D::ZERO)
    }

    /// Abstand vom Objekt-Ursprung bis zur Unterseite, nach Skalierung.
    /// Positiv, wenn die Unterseite unterhalb des Ursprungs liegt.
    pub fn bottom_offset(&self, scale: f32) -> f32 {
        -self.bottom_center().y * scale
    }
}
