//! # Ports Layer
//!
//! - `outbound` - The store collaborator (driven port)
//! - `inbound` - The before-commit hook the index layer plugs into

pub mod inbound;
pub mod outbound;
