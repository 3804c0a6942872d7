//! Transcript module - the ordered, append-only log of a diagnostic exchange.

mod log;
mod turn;

pub use log::Transcript;
pub use turn::{Speaker, Turn};
