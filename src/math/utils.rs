// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    pub const TAU: f32 = std::f32::consts::TAU;
    pub const PI: f32 = std::f32::consts::PI;
}

/// Winkel-Hilfsfunktionen
pub mod angles {
    use super::constants::{PI, TAU};

    /// Normalisiert einen Winkel auf [0, 2π)
    pub fn normalize_angle(angle: f32) -> f32 {
        let result = angle.rem_euclid(TAU);
        // rem_euclid kann bei sehr kleinen negativen Werten exakt TAU liefern
        if result >= TAU { 0.0 } else { result }
    }

    /// Normalisiert einen Winkel auf [-π, π)
    pub fn normalize_angle_signed(angle: f32) -> f32 {
        let result = normalize_angle(angle);
        if result >= PI { result - TAU } else { result }
    }
}

/// Wrap-Hilfsfunktionen für periodische Parameterbereiche
pub mod wrapping {
    /// Bildet `value` in das halboffene Intervall [0, period) ab.
    pub fn wrap_into(value: f32, period: f32) -> f32 {
        let result = value.rem_euclid(period);
        if result >= period { 0.0 } else { result }
    }
}
