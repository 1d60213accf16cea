// src/physics/motion/tracker.rs

use crate::math::{geometry::torus::ToroidalSurface, types::*, utils::constants::*};
use bevy::prelude::Resource;
use std::sync::Arc;

/// Geschwindigkeitseingabe. "Vorwärts" bewegt gegen die Blickrichtung im
/// Parameterraum (Geschwindigkeit -1), "Rückwärts" mit ihr (+1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedInput {
    Forward,
    Backward,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnInput {
    Left,
    Right,
    None,
}

/// Raten des Trackers, jeweils pro Zeiteinheit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    /// Sekunden pro Zeiteinheit
    pub time_unit: f32,
    pub linear_speed: f32,
    pub turn_rate: f32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            time_unit: 1.0 / 60.0,
            linear_speed: 1.0,
            turn_rate: 0.03,
        }
    }
}

impl TrackerSettings {
    /// Vergangene Sekunden in Zeiteinheiten
    fn units(&self, elapsed: f32) -> f32 {
        if self.time_unit > EPSILON {
            elapsed / self.time_unit
        } else {
            0.0
        }
    }
}

/// Position und Kurs eines Objekts im Parameterraum des Torus.
///
/// `position.x` ist die Zeile (φ-Richtung), `position.y` die Spalte
/// (ψ-Richtung). Die Position wird nicht normalisiert, sondern erst beim
/// Überlauf an den Gittergrenzen umgebrochen.
#[derive(Resource, Debug, Clone)]
pub struct PositionTracker {
    surface: Arc<ToroidalSurface>,
    settings: TrackerSettings,
    position: GridPoint,
    /// Akkumulierter Kurswinkel α
    heading: f32,
    speed: f32,
    last_time: Option<f64>,
}

impl PositionTracker {
    pub fn new(surface: Arc<ToroidalSurface>, start: GridPoint, settings: TrackerSettings) -> Self {
        Self {
            surface,
            settings,
            position: start,
            heading: 0.0,
            speed: 0.0,
            last_time: None,
        }
    }

    pub fn surface(&self) -> &ToroidalSurface {
        &self.surface
    }

    pub fn set_settings(&mut self, settings: TrackerSettings) {
        self.settings = settings;
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Richtungsvektor (cos α, sin α), bei jeder Abfrage neu abgeleitet
    pub fn heading_vector(&self) -> Point2D {
        Point2D::new(self.heading.cos(), self.heading.sin())
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed_from_input(&mut self, input: SpeedInput) {
        self.speed = match input {
            SpeedInput::Forward => -1.0,
            SpeedInput::Backward => 1.0,
            SpeedInput::None => 0.0,
        };
    }

    /// Dreht den Kurs. Ohne Bewegung (Geschwindigkeit 0) wird nicht gedreht,
    /// im Rückwärtsgang kehrt sich die Drehrichtung um.
    pub fn set_turn_from_input(&mut self, input: TurnInput, elapsed: f32) {
        let direction = match input {
            TurnInput::Right => 1.0,
            TurnInput::Left => -1.0,
            TurnInput::None => 0.0,
        };
        self.heading +=
            direction * self.speed * self.settings.turn_rate * self.settings.units(elapsed);

        // Grobe Begrenzung: nach mehr als einer vollen Drehung zurück auf 0
        if self.heading.abs() > TAU {
            self.heading = 0.0;
        }
    }

    /// Setzt die Referenzzeit neu, z.B. nach einer Pause.
    pub fn sync_clock(&mut self, now: f64) {
        self.last_time = Some(now);
    }

    /// Bewegt die Position um die seit dem letzten Aufruf vergangene Zeit
    /// und gibt diese Zeit (Sekunden) zurück. Der erste Aufruf ohne
    /// Referenzzeit bewegt nicht.
    pub fn advance(&mut self, now: f64) -> f32 {
        let elapsed = self
            .last_time
            .map_or(0.0, |last| (now - last).max(0.0) as f32);
        self.last_time = Some(now);

        let step = self.heading_vector()
            * self.speed
            * self.settings.linear_speed
            * self.settings.units(elapsed);
        self.position += step;

        let grid = self.surface.grid();
        self.position.x = wrap_component(self.position.x, grid.rows as f32);
        self.position.y = wrap_component(self.position.y, grid.cols as f32);

        elapsed
    }

    /// Weltrichtung einer Zeile weiter
    pub fn tangent_x(&self) -> Point3D {
        self.surface_difference(Point2D::new(1.0, 0.0))
    }

    /// Weltrichtung einer Spalte weiter
    pub fn tangent_y(&self) -> Point3D {
        self.surface_difference(Point2D::new(0.0, 1.0))
    }

    /// Weltrichtung entlang des Kurses (zwei Zellen voraus)
    pub fn forward_tangent(&self) -> Point3D {
        self.surface_difference(self.heading_vector() * 2.0)
    }

    fn surface_difference(&self, offset: Point2D) -> Point3D {
        let p = self.position;
        let q = p + offset;
        self.surface.vertex_at(q.x, q.y) - self.surface.vertex_at(p.x, p.y)
    }
}

/// Umbruch an den Gittergrenzen: `>= bound` springt auf 0, `< 0` auf `bound`.
///
/// `bound` ist die Anzahl der Zeilen bzw. Spalten, die geometrische Periode
/// der Oberfläche aber `count - 1`. Position `bound` liegt daher auf Zeile
/// bzw. Spalte 1; beim Umbruch springt das Objekt um eine Zelle.
fn wrap_component(value: f32, bound: f32) -> f32 {
    if value >= bound {
        0.0
    } else if value < 0.0 {
        bound
    } else {
        value
    }
}
