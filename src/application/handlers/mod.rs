//! Command handlers.

pub mod diagnostic;
