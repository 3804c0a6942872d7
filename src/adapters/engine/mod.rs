//! Diagnosis engine adapters.

mod http_engine;
mod scripted;

pub use http_engine::{HttpDiagnosisEngine, HttpEngineConfig};
pub use scripted::ScriptedEngine;
