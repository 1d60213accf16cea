// src/math/types/mod.rs
pub mod bounds;

pub use bounds::*;

// Re-export häufig verwendete externe Typen
pub use bevy::math::{Mat4, Vec2, Vec3};

// Einheitliche Typen für das gesamte Modul
pub type Point2D = Vec2;
pub type Point3D = Vec3;
/// Kontinuierliche Parameterkoordinate (Zeile, Spalte) auf dem Gitter
pub type GridPoint = Vec2;
