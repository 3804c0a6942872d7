//! Domain layer - session lifecycle, transcript, and diagnosis vocabulary.

pub mod diagnosis;
pub mod foundation;
pub mod session;
pub mod transcript;
