//! # Rebuild Service

mod rebuilder;

pub use rebuilder::Rebuilder;
