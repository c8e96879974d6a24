// src/lib.rs

pub mod config;
pub mod core;
pub mod errors;
pub mod persistence;

pub use crate::config::Settings;
pub use crate::core::engine::KeypadEngine;
pub use crate::errors::{Result, T9Error};
