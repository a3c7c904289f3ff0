//! Core domain types and logic.

pub mod observation;
pub mod resample;
pub mod simulator;
pub mod interpolator;
pub mod pacer;
pub mod summary;
pub mod settings;
pub mod config_validation;
pub mod error;
