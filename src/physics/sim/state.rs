// src/physics/sim/state.rs
use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SimulationState {
    #[default] // Startzustand, bis Planet, Objekt und Kamera gespawnt sind
    Initializing,
    Running,
    Paused,
}

impl SimulationState {
    /// Zielzustand beim Umschalten mit der Pause-Taste
    pub fn toggled(self) -> Self {
        match self {
            SimulationState::Running => SimulationState::Paused,
            SimulationState::Paused => SimulationState::Running,
            SimulationState::Initializing => SimulationState::Initializing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(SimulationState::Running.toggled(), SimulationState::Paused);
        assert_eq!(SimulationState::Paused.toggled(), SimulationState::Running);
        assert_eq!(
            SimulationState::Initializing.toggled(),
            SimulationState::Initializing
        );
    }
}
