//! Car Expert Client - Diagnostic Session Protocol Core
//!
//! This crate drives multi-turn yes/no diagnostic sessions against the
//! remote Car Expert diagnosis engine, keeping a faithful transcript and
//! terminating into a structured probabilistic result.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
