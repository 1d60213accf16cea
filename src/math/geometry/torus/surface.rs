// src/math/geometry/torus/surface.rs

use super::{grid::GridResolution, height_field::HeightField, mesh::SurfaceMesh};
use crate::math::{error::*, types::*, utils::*};

/// Höhenverschobener Torus über einem Parametergitter.
///
/// Parametrisierung (z ist die Polarachse):
/// `x = (R + (r+h) cos ψ) cos φ`, `y = (R + (r+h) cos ψ) sin φ`, `z = (r+h) sin ψ`.
///
/// Alle Abfragen sind reine Funktionen über ganz ℝ²; Koordinaten außerhalb
/// des Gitters werden periodisch behandelt.
#[derive(Debug, Clone)]
pub struct ToroidalSurface {
    major_radius: f32,
    minor_radius: f32,
    height_field: HeightField,
}

impl ToroidalSurface {
    pub fn new(major_radius: f32, minor_radius: f32, height_field: HeightField) -> SurfaceResult<Self> {
        if !(minor_radius > 0.0) || !minor_radius.is_finite() {
            return Err(SurfaceError::InvalidConfiguration {
                message: format!("Minor radius must be positive, got {minor_radius}"),
            });
        }
        if !(major_radius > minor_radius) || !major_radius.is_finite() {
            return Err(SurfaceError::InvalidConfiguration {
                message: format!(
                    "Major radius ({major_radius}) must be larger than the minor radius ({minor_radius})"
                ),
            });
        }

        Ok(Self {
            major_radius,
            minor_radius,
            height_field,
        })
    }

    pub fn major_radius(&self) -> f32 {
        self.major_radius
    }

    pub fn minor_radius(&self) -> f32 {
        self.minor_radius
    }

    pub fn grid(&self) -> GridResolution {
        self.height_field.grid()
    }

    pub fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    /// Winkel um den großen Kreis
    pub fn phi(&self, row: f32) -> f32 {
        self.grid().phi(row)
    }

    /// Winkel um den Rohrquerschnitt
    pub fn psi(&self, col: f32) -> f32 {
        self.grid().psi(col)
    }

    /// Höhe an einer Gitterposition. Die Koordinaten werden zuerst in die
    /// geometrische Periode (`count - 1`) gebracht, damit Nachbarn über die
    /// Naht hinweg dieselben Daten lesen wie die Gegenseite.
    pub fn height_at(&self, row: f32, col: f32) -> f32 {
        let grid = self.grid();
        self.height_field.sample(
            wrapping::wrap_into(row, grid.row_period()),
            wrapping::wrap_into(col, grid.col_period()),
        )
    }

    /// Punkt auf der verschobenen Oberfläche
    pub fn vertex_at(&self, row: f32, col: f32) -> Point3D {
        self.vertex_without_height_at(row, col, self.height_at(row, col))
    }

    /// Punkt mit vorgegebener Höhe (z.B. 0 für den "nackten" Torus)
    pub fn vertex_without_height_at(&self, row: f32, col: f32, height: f32) -> Point3D {
        torus_point(
            self.major_radius,
            self.minor_radius + height,
            self.phi(row),
            self.psi(col),
        )
    }

    fn sample_vertex(&self, row: f32, col: f32, with_height: bool) -> Point3D {
        if with_height {
            self.vertex_at(row, col)
        } else {
            self.vertex_without_height_at(row, col, 0.0)
        }
    }

    /// Normale per finiten Differenzen: vier Nachbarn (Zeile ±1, Spalte ±1),
    /// vier Kantenvektoren relativ zum Zentrum, Kreuzprodukte benachbarter
    /// Kanten, gemittelt und normiert. Zeigt vom Torus-Kern weg.
    pub fn normal_at(&self, row: f32, col: f32, with_height: bool) -> Point3D {
        let center = self.sample_vertex(row, col, with_height);

        // Reihenfolge gegen den Uhrzeigersinn um die Außennormale
        let edges = [
            self.sample_vertex(row + 1.0, col, with_height) - center,
            self.sample_vertex(row, col + 1.0, with_height) - center,
            self.sample_vertex(row - 1.0, col, with_height) - center,
            self.sample_vertex(row, col - 1.0, with_height) - center,
        ];

        let sum = (0..edges.len())
            .map(|k| edges[k].cross(edges[(k + 1) % edges.len()]).normalize_or_zero())
            .fold(Point3D::ZERO, |acc, normal| acc + normal);

        (sum / edges.len() as f32).normalize_or_zero()
    }

    /// Erzeugt die kompletten Vertex-/Index-Puffer.
    pub fn build_mesh(&self) -> SurfaceMesh {
        SurfaceMesh::generate(self)
    }

    /// Transformation, die den Ursprung eines Objekts auf die Oberfläche an
    /// `position` (Zeile, Spalte) legt, "außen" weg vom Torus-Kern.
    ///
    /// Reihenfolge: Drehung um φ um die Polarachse, Verschiebung um R nach
    /// außen, Drehung um -ψ um die Tangentialachse, Verschiebung um
    /// `r + h + object_bottom_offset` entlang der neuen Radialachse.
    pub fn translation_matrix(&self, position: GridPoint, object_bottom_offset: f32) -> Mat4 {
        let phi = self.phi(position.x);
        let psi = self.psi(position.y);
        let height = self.height_at(position.x, position.y);

        Mat4::from_rotation_z(phi)
            * Mat4::from_translation(Point3D::X * self.major_radius)
            * Mat4::from_rotation_y(-psi)
            * Mat4::from_translation(Point3D::X * (self.minor_radius + height + object_bottom_offset))
    }
}

/// Standard-Torusparametrisierung mit Rohrradius `tube_radius`.
pub fn torus_point(major_radius: f32, tube_radius: f32, phi: f32, psi: f32) -> Point3D {
    let ring = major_radius + tube_radius * psi.cos();
    Point3D::new(ring * phi.cos(), ring * phi.sin(), tube_radius * psi.sin())
}
