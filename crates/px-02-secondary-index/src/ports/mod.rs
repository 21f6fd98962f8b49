//! # Ports Layer
//!
//! - `outbound` - `IndexFn`, the user-supplied derivation function

pub mod outbound;
