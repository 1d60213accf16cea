// src/math/geometry/torus/grid.rs

use crate::math::{error::*, utils::*};

/// Auflösung des Parametergitters.
///
/// `rows` läuft um den großen Kreis (φ), `cols` um den Rohrquerschnitt (ψ).
/// Die letzte Zeile bzw. Spalte fällt geometrisch auf die erste zurück,
/// daher ist die Periode jeweils `count - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridResolution {
    pub rows: usize,
    pub cols: usize,
}

impl GridResolution {
    /// Erstellt eine neue Auflösung. Die Winkel-Formeln teilen durch
    /// `count - 1`, deshalb braucht jede Achse mindestens zwei Einträge.
    pub fn new(rows: usize, cols: usize) -> SurfaceResult<Self> {
        if rows <= 1 || cols <= 1 {
            return Err(SurfaceError::DegenerateParameter { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn vertex_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Anzahl der Gitterzellen (jeweils zwei Dreiecke)
    pub fn cell_count(&self) -> usize {
        (self.rows - 1) * (self.cols - 1)
    }

    /// Periode in Zeilenrichtung
    pub fn row_period(&self) -> f32 {
        (self.rows - 1) as f32
    }

    /// Periode in Spaltenrichtung
    pub fn col_period(&self) -> f32 {
        (self.cols - 1) as f32
    }

    /// φ einer (auch gebrochenen) Zeile, in [0, 2π).
    /// Die letzte Zeile landet exakt auf 0, nicht auf 2π.
    pub fn phi(&self, row: f32) -> f32 {
        let wrapped = wrapping::wrap_into(row, self.row_period());
        angles::normalize_angle(constants::TAU * wrapped / self.row_period())
    }

    /// ψ einer (auch gebrochenen) Spalte, vorzeichenbehaftet in [-π, π).
    /// Spalte 0 liegt auf dem äußeren Äquator (ψ = 0), die letzte Spalte
    /// landet exakt wieder auf dem Winkel von Spalte 0.
    pub fn psi(&self, col: f32) -> f32 {
        let wrapped = wrapping::wrap_into(col, self.col_period());
        angles::normalize_angle_signed(constants::TAU * wrapped / self.col_period())
    }

    /// Linearer Index eines ganzzahligen Gitterpunkts im Vertex-Puffer
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_degenerate_grid_rejected() {
        assert!(matches!(
            GridResolution::new(1, 10),
            Err(SurfaceError::DegenerateParameter { rows: 1, cols: 10 })
        ));
        assert!(GridResolution::new(10, 0).is_err());
        assert!(GridResolution::new(2, 2).is_ok());
    }

    #[test]
    fn test_seam_angles_wrap_to_start() {
        let grid = GridResolution::new(10, 7).unwrap();
        assert_eq!(grid.phi(9.0), 0.0);
        assert_eq!(grid.phi(0.0), 0.0);
        assert_eq!(grid.psi(6.0), grid.psi(0.0));
    }

    #[test]
    fn test_angle_ranges() {
        let grid = GridResolution::new(10, 10).unwrap();
        assert_abs_diff_eq!(grid.phi(4.5), constants::PI, epsilon = 1e-5);
        assert_abs_diff_eq!(grid.psi(2.25), constants::PI / 2.0, epsilon = 1e-5);
        // Zweite Hälfte des Rohrs ergibt negative Winkel
        assert_abs_diff_eq!(grid.psi(6.75), -constants::PI / 2.0, epsilon = 1e-5);
        for k in -20..40 {
            let value = k as f32 * 0.37;
            let phi = grid.phi(value);
            let psi = grid.psi(value);
            assert!((0.0..constants::TAU).contains(&phi), "phi {phi}");
            assert!((-constants::PI..constants::PI).contains(&psi), "psi {psi}");
        }
    }

    #[test]
    fn test_counts() {
        let grid = GridResolution::new(4, 3).unwrap();
        assert_eq!(grid.vertex_count(), 12);
        assert_eq!(grid.cell_count(), 6);
        assert_eq!(grid.index(2, 1), 7);
    }
}
