// src/physics/mod.rs
pub mod motion;
pub mod sim;
