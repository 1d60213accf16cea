// src/math/geometry/torus/height_field.rs

use super::grid::GridResolution;
use crate::math::{error::*, utils::*};
use std::path::Path;

/// Höhenfeld aus dem Rotkanal eines Bildes.
///
/// Das Feld wird über das Parametergitter gespiegelt: ein Index jenseits der
/// halben Auflösung wird zurückgefaltet (`idx >= N/2 ? N - idx - 1 : idx`),
/// bevor er in Bildkoordinaten umgerechnet wird. Dadurch ist das Muster an
/// den Faltlinien und an der Naht nahtlos. Nach dem Laden unveränderlich.
#[derive(Debug, Clone)]
pub struct HeightField {
    width: usize,
    height: usize,
    /// Rotkanal, zeilenweise, Werte in [0, 1]
    samples: Vec<f32>,
    grid: GridResolution,
    /// Maximale Höhe (der kleine Torusradius `r`)
    amplitude: f32,
}

impl HeightField {
    /// Lädt ein Höhenbild von der Platte.
    pub fn load(path: impl AsRef<Path>, grid: GridResolution, amplitude: f32) -> SurfaceResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| SurfaceError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let red: Vec<u8> = rgb.pixels().map(|pixel| pixel.0[0]).collect();

        bevy::log::info!(
            "Height map '{}' loaded: {}x{} px",
            path.display(),
            width,
            height
        );
        Self::from_samples(width as usize, height as usize, &red, grid, amplitude)
    }

    /// Baut ein Höhenfeld aus einem bereits dekodierten Rotkanal.
    pub fn from_samples(
        width: usize,
        height: usize,
        red: &[u8],
        grid: GridResolution,
        amplitude: f32,
    ) -> SurfaceResult<Self> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidConfiguration {
                message: format!("Height map must not be empty ({width}x{height})"),
            });
        }
        if red.len() != width * height {
            return Err(SurfaceError::InvalidConfiguration {
                message: format!(
                    "Height map sample count {} does not match {width}x{height}",
                    red.len()
                ),
            });
        }
        if !(amplitude >= 0.0 && amplitude.is_finite()) {
            return Err(SurfaceError::InvalidConfiguration {
                message: format!("Height amplitude must be finite and non-negative, got {amplitude}"),
            });
        }

        Ok(Self {
            width,
            height,
            samples: red.iter().map(|&value| value as f32 / 255.0).collect(),
            grid,
            amplitude,
        })
    }

    /// Flaches Feld (überall Höhe 0)
    pub fn flat(grid: GridResolution, amplitude: f32) -> Self {
        Self {
            width: 1,
            height: 1,
            samples: vec![0.0],
            grid,
            amplitude,
        }
    }

    pub fn grid(&self) -> GridResolution {
        self.grid
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Größe des zugrunde liegenden Bildes in Pixeln
    pub fn image_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Höhe in [0, amplitude] an einer beliebigen (auch gebrochenen oder
    /// außerhalb liegenden) Gitterposition. Aufrufer müssen nicht clampen.
    pub fn sample(&self, row: f32, col: f32) -> f32 {
        let folded_row = fold(row, self.grid.rows as f32);
        let folded_col = fold(col, self.grid.cols as f32);

        let y = to_pixel(folded_row, self.grid.rows as f32, self.height);
        let x = to_pixel(folded_col, self.grid.cols as f32, self.width);

        self.samples[y * self.width + x] * self.amplitude
    }
}

/// Bringt `idx` in [0, n) und spiegelt die obere Hälfte zurück.
fn fold(idx: f32, n: f32) -> f32 {
    let wrapped = wrapping::wrap_into(idx, n);
    let folded = if wrapped >= n / 2.0 {
        n - wrapped - 1.0
    } else {
        wrapped
    };
    // Gebrochene Werte in (n-1, n) würden sonst negativ
    folded.max(0.0)
}

/// Gitterindex -> Pixelindex (abgeschnitten wie beim Ganzzahl-Cast)
fn to_pixel(folded: f32, n: f32, pixels: usize) -> usize {
    let pixel = (folded / n * pixels as f32) as usize;
    pixel.min(pixels - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn gradient_field(grid: GridResolution, amplitude: f32) -> HeightField {
        // 8x8 Bild, Wert wächst mit x + y
        let red: Vec<u8> = (0..64).map(|i| ((i % 8 + i / 8) * 18) as u8).collect();
        HeightField::from_samples(8, 8, &red, grid, amplitude).unwrap()
    }

    #[test]
    fn test_fold_mirrors_upper_half() {
        assert_abs_diff_eq!(fold(0.0, 10.0), 0.0);
        assert_abs_diff_eq!(fold(4.0, 10.0), 4.0);
        assert_abs_diff_eq!(fold(5.0, 10.0), 4.0);
        assert_abs_diff_eq!(fold(9.0, 10.0), 0.0);
        assert_abs_diff_eq!(fold(-1.0, 10.0), 0.0);
        assert_abs_diff_eq!(fold(9.5, 10.0), 0.0);
    }

    #[test]
    fn test_sample_is_symmetric_about_half_resolution() {
        let grid = GridResolution::new(16, 16).unwrap();
        let field = gradient_field(grid, 2.0);
        for i in 0..16 {
            for j in 0..16 {
                let mirrored_i = 16 - i - 1;
                let mirrored_j = 16 - j - 1;
                assert_eq!(
                    field.sample(i as f32, j as f32),
                    field.sample(mirrored_i as f32, mirrored_j as f32)
                );
            }
        }
    }

    #[test]
    fn test_height_bounded_by_amplitude() {
        let grid = GridResolution::new(20, 12).unwrap();
        let red: Vec<u8> = (0..=255).collect();
        let field = HeightField::from_samples(16, 16, &red, grid, 2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let row = rng.random_range(-100.0..100.0);
            let col = rng.random_range(-100.0..100.0);
            let h = field.sample(row, col);
            assert!((0.0..=2.0).contains(&h), "h = {h} at ({row}, {col})");
        }
        // Maximalwert 255 ergibt genau die Amplitude
        let white = HeightField::from_samples(1, 1, &[255], grid, 2.0).unwrap();
        assert_abs_diff_eq!(white.sample(3.0, 4.0), 2.0);
    }

    #[test]
    fn test_sample_is_deterministic() {
        let grid = GridResolution::new(9, 9).unwrap();
        let field = gradient_field(grid, 1.0);
        let first = field.sample(3.3, 7.9);
        for _ in 0..10 {
            assert_eq!(field.sample(3.3, 7.9), first);
        }
    }

    #[test]
    fn test_invalid_sample_buffers() {
        let grid = GridResolution::new(4, 4).unwrap();
        assert!(HeightField::from_samples(2, 2, &[0, 1, 2], grid, 1.0).is_err());
        assert!(HeightField::from_samples(0, 2, &[], grid, 1.0).is_err());
        assert!(HeightField::from_samples(1, 1, &[0], grid, -1.0).is_err());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let grid = GridResolution::new(4, 4).unwrap();
        let result = HeightField::load("does/not/exist.png", grid, 1.0);
        assert!(matches!(result, Err(SurfaceError::Load { .. })));
    }

    #[test]
    fn test_flat_field() {
        let grid = GridResolution::new(10, 10).unwrap();
        let field = HeightField::flat(grid, 2.0);
        assert_eq!(field.sample(3.0, 8.0), 0.0);
        assert_eq!(field.image_size(), (1, 1));
    }
}
