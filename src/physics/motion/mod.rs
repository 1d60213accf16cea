// src/physics/motion/mod.rs

// Bewegung auf der Oberfläche und Platzierung von Objekt und Kamera
pub mod placement;
pub mod tracker;

pub use placement::{CameraTarget, Crawler, SpringCamera, SpringSettings};
pub use tracker::{PositionTracker, SpeedInput, TrackerSettings, TurnInput};
