// src/render/shading.rs
use crate::math::{geometry::torus::SurfaceMesh, types::*, utils::constants::*};
use crate::physics::sim::resources::SimulationParameters;
use crate::setup::Planet;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Stärke der Detailmodulation pro Einheit `detail_coef`
const DETAIL_AMPLITUDE: f32 = 0.1;

/// Höhenabhängige Einfärbung der Oberfläche.
///
/// Drei Schichten (z.B. Tiefland, Fels, Schnee) werden nach der relativen
/// Höhe überblendet. Jede Schicht trägt ein über den Torus gekacheltes
/// Muster (`layer_repeat_counts`), darüber liegt ein feineres Detailmuster,
/// das nur in der Nähe der Schichtübergänge eingeblendet wird.
/// Die Werte landen als Vertexfarben im Mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceShading {
    /// Relative Höhe in [0, 1], an der die jeweilige Schicht voll deckt
    pub layer_heights: [f32; 3],
    pub layer_colors: [[f32; 3]; 3],
    /// Halbe Breite der Überblendung (relative Höhe); 0 ergibt harte Bänder
    pub blend_width: f32,
    /// Wie oft das Schichtmuster um den Torus wiederholt wird
    pub layer_repeat_counts: [u32; 3],
    pub layer_contrast: f32,
    pub detail_repeat_count: u32,
    /// Höhenabstand zum nächsten Schichtübergang, ab dem kein Detail mehr wirkt
    pub detail_dist: f32,
    pub detail_coef: f32,
}

impl Default for SurfaceShading {
    fn default() -> Self {
        Self {
            layer_heights: [0.1, 0.5, 0.9],
            layer_colors: [[0.25, 0.45, 0.25], [0.55, 0.52, 0.5], [0.92, 0.94, 0.96]],
            blend_width: 0.3,
            layer_repeat_counts: [3, 3, 3],
            layer_contrast: 0.15,
            detail_repeat_count: 10,
            detail_dist: 0.2,
            detail_coef: 2.1,
        }
    }
}

impl SurfaceShading {
    /// Farbe an Texturkoordinate `uv` mit relativer Höhe in [0, 1]
    pub fn color_at(&self, uv: Point2D, relative_height: f32) -> [f32; 4] {
        let h = relative_height.clamp(0.0, 1.0);
        let weights = self.layer_weights(h);

        let mut color = Point3D::ZERO;
        for (k, weight) in weights.into_iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            let pattern = tile_pattern(uv, self.layer_repeat_counts[k], k as f32 / 3.0);
            let shade = 1.0 + self.layer_contrast * (2.0 * pattern - 1.0);
            color += Point3D::from(self.layer_colors[k]) * shade * weight;
        }

        let detail = tile_pattern(uv, self.detail_repeat_count, 0.125);
        color *= 1.0 + self.detail_coef * DETAIL_AMPLITUDE * (2.0 * detail - 1.0) * self.detail_fade(h);

        let color = color.clamp(Point3D::ZERO, Point3D::ONE);
        [color.x, color.y, color.z, 1.0]
    }

    /// Normierte Schichtgewichte: Dreiecksfenster der Breite `blend_width`
    /// um jede Schichthöhe. Liegt `h` in keinem Fenster, deckt die nächste
    /// Schicht allein.
    fn layer_weights(&self, h: f32) -> [f32; 3] {
        let mut weights = [0.0; 3];
        if self.blend_width > EPSILON {
            for (k, weight) in weights.iter_mut().enumerate() {
                *weight = (1.0 - (h - self.layer_heights[k]).abs() / self.blend_width).max(0.0);
            }
        }

        let sum: f32 = weights.iter().sum();
        if sum <= EPSILON {
            let nearest = (0..3)
                .min_by(|&a, &b| {
                    let da = (h - self.layer_heights[a]).abs();
                    let db = (h - self.layer_heights[b]).abs();
                    da.total_cmp(&db)
                })
                .unwrap_or(0);
            weights = [0.0; 3];
            weights[nearest] = 1.0;
            return weights;
        }
        weights.map(|w| w / sum)
    }

    /// 1 direkt auf einem Schichtübergang, 0 ab `detail_dist` Abstand
    fn detail_fade(&self, h: f32) -> f32 {
        if self.detail_dist <= EPSILON {
            return 0.0;
        }
        let [a, b, c] = self.layer_heights;
        let proximity = (h - (a + b) * 0.5).abs().min((h - (b + c) * 0.5).abs());
        (1.0 - proximity / self.detail_dist).clamp(0.0, 1.0)
    }
}

/// Periodisches Muster in [0, 1]. Ganzzahlige Wiederholungen halten es an
/// der Naht (u bzw. v = 0 und 1) stetig.
fn tile_pattern(uv: Point2D, repeat: u32, phase: f32) -> f32 {
    let n = repeat as f32;
    0.5 + 0.5 * (TAU * (uv.x * n + phase)).sin() * (TAU * (uv.y * n + phase)).sin()
}

/// Pro Vertex gespeicherte UVs und relative Höhen, damit die Farben bei
/// geänderten Parametern ohne Neuaufbau des Netzes berechnet werden können.
#[derive(Component, Debug, Clone, Default)]
pub struct SurfaceShadingInput {
    uvs: Vec<Point2D>,
    relative_heights: Vec<f32>,
}

impl SurfaceShadingInput {
    pub fn from_surface_mesh(surface_mesh: &SurfaceMesh, amplitude: f32) -> Self {
        let vertices = &surface_mesh.vertices;
        Self {
            uvs: vertices
                .iter()
                .map(|v| Point2D::new(v.tex_coord.x, v.tex_coord.y))
                .collect(),
            relative_heights: vertices
                .iter()
                .map(|v| {
                    if amplitude > 0.0 {
                        v.tex_coord.z / amplitude
                    } else {
                        0.0
                    }
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.uvs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uvs.is_empty()
    }

    pub fn colors(&self, shading: &SurfaceShading) -> Vec<[f32; 4]> {
        self.uvs
            .iter()
            .zip(&self.relative_heights)
            .map(|(&uv, &h)| shading.color_at(uv, h))
            .collect()
    }
}

/// Schreibt die Vertexfarben des Planeten neu, sobald sich die
/// Einfärbungsparameter ändern.
pub fn refresh_surface_shading_system(
    params: Res<SimulationParameters>,
    mut last_shading: Local<Option<SurfaceShading>>,
    planet_query: Query<(&Handle<Mesh>, &SurfaceShadingInput), With<Planet>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if last_shading.as_ref() == Some(&params.shading) {
        return;
    }
    *last_shading = Some(params.shading.clone());

    for (handle, input) in planet_query.iter() {
        if let Some(mesh) = meshes.get_mut(handle) {
            mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, input.colors(&params.shading));
            debug!("Surface shading refreshed for {} vertices", input.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::torus::{GridResolution, HeightField, ToroidalSurface};
    use approx::assert_abs_diff_eq;

    fn plain() -> SurfaceShading {
        SurfaceShading {
            layer_contrast: 0.0,
            detail_coef: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_layer_color_at_layer_height() {
        let shading = plain();
        let uv = Point2D::new(0.3, 0.7);
        for k in 0..3 {
            let color = shading.color_at(uv, shading.layer_heights[k]);
            for c in 0..3 {
                assert_abs_diff_eq!(color[c], shading.layer_colors[k][c], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_blend_is_continuous_in_height() {
        let shading = SurfaceShading::default();
        let uv = Point2D::new(0.42, 0.13);
        let mut previous = shading.color_at(uv, 0.0);
        for step in 1..=1000 {
            let color = shading.color_at(uv, step as f32 / 1000.0);
            for c in 0..3 {
                assert!((color[c] - previous[c]).abs() < 0.02, "jump at {step}");
            }
            previous = color;
        }
    }

    #[test]
    fn test_zero_blend_width_gives_hard_bands() {
        let shading = SurfaceShading {
            blend_width: 0.0,
            ..plain()
        };
        let uv = Point2D::ZERO;
        let low = shading.color_at(uv, 0.25);
        let mid = shading.color_at(uv, 0.35);
        assert_eq!(&low[..3], &shading.layer_colors[0][..]);
        assert_eq!(&mid[..3], &shading.layer_colors[1][..]);
    }

    #[test]
    fn test_pattern_is_seamless() {
        let shading = SurfaceShading::default();
        for &h in &[0.05, 0.3, 0.7, 1.0] {
            for &v in &[0.0, 0.25, 0.6] {
                let start = shading.color_at(Point2D::new(0.0, v), h);
                let end = shading.color_at(Point2D::new(1.0, v), h);
                for c in 0..3 {
                    assert_abs_diff_eq!(start[c], end[c], epsilon = 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_detail_only_near_transitions() {
        let without = SurfaceShading {
            detail_coef: 0.0,
            ..Default::default()
        };
        let with = SurfaceShading {
            detail_coef: 5.0,
            ..Default::default()
        };
        // Mitte der Tiefland-Schicht, weit weg von jedem Übergang
        let uv = Point2D::new(0.07, 0.31);
        assert_eq!(with.color_at(uv, 0.0), without.color_at(uv, 0.0));
        assert_abs_diff_eq!(with.detail_fade(0.3), 1.0, epsilon = 1e-5);
        assert_eq!(with.detail_fade(0.0), 0.0);

        let no_dist = SurfaceShading {
            detail_dist: 0.0,
            ..with.clone()
        };
        assert_eq!(no_dist.color_at(uv, 0.3), without.color_at(uv, 0.3));
    }

    #[test]
    fn test_colors_stay_in_unit_range() {
        let shading = SurfaceShading {
            layer_contrast: 1.0,
            detail_coef: 5.0,
            ..Default::default()
        };
        for i in 0..50 {
            for j in 0..50 {
                let uv = Point2D::new(i as f32 / 49.0, j as f32 / 49.0);
                let color = shading.color_at(uv, (i * j) as f32 / 2401.0);
                assert!(color.iter().all(|c| (0.0..=1.0).contains(c)));
            }
        }
    }

    #[test]
    fn test_input_from_surface_mesh() {
        let grid = GridResolution::new(6, 5).unwrap();
        let field = HeightField::from_samples(1, 1, &[255], grid, 2.0).unwrap();
        let surface_mesh = ToroidalSurface::new(10.0, 2.0, field).unwrap().build_mesh();
        let input = SurfaceShadingInput::from_surface_mesh(&surface_mesh, 2.0);
        assert_eq!(input.len(), 30);
        assert!(input.relative_heights.iter().all(|&h| (h - 1.0).abs() < 1e-6));
        assert_eq!(input.colors(&SurfaceShading::default()).len(), 30);
    }
}
