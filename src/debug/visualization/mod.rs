// src/debug/visualization/mod.rs
pub mod normal_vector;
pub mod torus_grid;
