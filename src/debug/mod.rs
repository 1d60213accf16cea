// src/debug/mod.rs
pub mod ui;
pub mod visualization;
