// src/config.rs
use crate::math::{
    error::{SurfaceError, SurfaceResult},
    geometry::torus::{GridResolution, HeightField, ToroidalSurface},
};
use crate::physics::sim::resources::SimulationParameters;
use bevy::log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Umgebungsvariable mit dem Pfad zur Konfigurationsdatei
pub const CONFIG_ENV_VAR: &str = "TORUS_WORLD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "assets/torus_world.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Geometrie des Planeten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub major_radius: f32,
    pub minor_radius: f32,
    pub rows: usize,
    pub cols: usize,
    /// Höhenbild (Rotkanal); ohne Bild bleibt der Torus flach
    pub height_map: Option<PathBuf>,
    /// Anteil des kleinen Radius, der als maximale Höhe verwendet wird
    pub height_scale: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            major_radius: 10.0,
            minor_radius: 2.0,
            rows: 1500,
            cols: 300,
            height_map: Some(PathBuf::from("assets/height_map.png")),
            height_scale: 1.0,
        }
    }
}

impl SurfaceConfig {
    /// Maximale Höhe, nie größer als der kleine Radius
    pub fn amplitude(&self) -> f32 {
        self.minor_radius * self.height_scale
    }

    /// Baut Gitter, Höhenfeld und Oberfläche. Fehler hier sind fatal.
    pub fn build_surface(&self) -> SurfaceResult<ToroidalSurface> {
        if !(0.0..=1.0).contains(&self.height_scale) {
            return Err(SurfaceError::InvalidConfiguration {
                message: format!("height_scale must lie in [0, 1], got {}", self.height_scale),
            });
        }

        let grid = GridResolution::new(self.rows, self.cols)?;
        let height_field = match &self.height_map {
            Some(path) => HeightField::load(path, grid, self.amplitude())?,
            None => {
                warn!("No height map configured, using a flat torus");
                HeightField::flat(grid, self.amplitude())
            }
        };

        ToroidalSurface::new(self.major_radius, self.minor_radius, height_field)
    }
}

/// Gesamte Konfiguration der Anwendung.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusWorldConfig {
    pub surface: SurfaceConfig,
    pub simulation: SimulationParameters,
}

impl TorusWorldConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Liest die Datei aus `TORUS_WORLD_CONFIG` oder den Standardpfad.
    /// Nur eine fehlende Standarddatei führt zu den eingebauten Werten; ein
    /// explizit gesetzter Pfad muss existieren.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let config = Self::load(&path)?;
                info!("Configuration loaded from {}", Path::new(&path).display());
                Ok(config)
            }
            None => Self::load_optional(DEFAULT_CONFIG_PATH),
        }
    }

    fn load_optional(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load(path)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::sim::resources::CameraMode;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("torus_world_{}_{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = TorusWorldConfig::default();
        assert_eq!(config.surface.major_radius, 10.0);
        assert_eq!(config.surface.minor_radius, 2.0);
        assert_eq!((config.surface.rows, config.surface.cols), (1500, 300));
        assert_eq!(config.surface.amplitude(), 2.0);
    }

    #[test]
    fn test_partial_json() {
        let config = TorusWorldConfig::from_json(
            r#"{ "surface": { "rows": 64, "height_map": null }, "simulation": { "camera_mode": "Orbit" } }"#,
        )
        .unwrap();
        assert_eq!(config.surface.rows, 64);
        assert_eq!(config.surface.cols, 300);
        assert_eq!(config.surface.height_map, None);
        assert_eq!(config.simulation.camera_mode, CameraMode::Orbit);
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_file("ok.json", r#"{ "surface": { "major_radius": 7.5 } }"#);
        let config = TorusWorldConfig::load(&path).unwrap();
        assert_eq!(config.surface.major_radius, 7.5);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_errors() {
        let missing = TorusWorldConfig::load("does/not/exist.json");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let path = temp_file("broken.json", "{ surface: ");
        let broken = TorusWorldConfig::load(&path);
        assert!(matches!(broken, Err(ConfigError::Parse { .. })));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_default_file_yields_defaults() {
        let config = TorusWorldConfig::load_optional("does/not/exist.json").unwrap();
        assert_eq!(config, TorusWorldConfig::default());
    }

    #[test]
    fn test_build_flat_surface() {
        let config = SurfaceConfig {
            rows: 10,
            cols: 10,
            height_map: None,
            ..Default::default()
        };
        let surface = config.build_surface().unwrap();
        let v = surface.vertex_at(0.0, 0.0);
        assert!((v.x - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_build_surface_errors() {
        let degenerate = SurfaceConfig {
            rows: 1,
            height_map: None,
            ..Default::default()
        };
        assert!(matches!(
            degenerate.build_surface(),
            Err(SurfaceError::DegenerateParameter { .. })
        ));

        let too_high = SurfaceConfig {
            height_scale: 1.5,
            height_map: None,
            ..Default::default()
        };
        assert!(too_high.build_surface().is_err());

        let missing_image = SurfaceConfig {
            rows: 4,
            cols: 4,
            height_map: Some(PathBuf::from("does/not/exist.png")),
            ..Default::default()
        };
        assert!(matches!(
            missing_image.build_surface(),
            Err(SurfaceError::Load { .. })
        ));
    }
}
