//! # Domain Layer

pub mod config;
pub mod errors;
pub mod report;
pub mod version;
