// src/core/mod.rs

pub mod encoder;
pub mod engine;
pub mod keypad;
pub mod query;
pub mod stems;
pub mod types;
