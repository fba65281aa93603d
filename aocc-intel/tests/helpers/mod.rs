//! Test Helper Utilities
//!
//! Shared utilities for testing aocc-intel

#![allow(dead_code)]

pub mod scripted_generator;

pub use scripted_generator::ScriptedGenerator;

use std::sync::Arc;

use aocc_intel::{build_router, AppState};
use axum::Router;

/// Router backed by a scripted generator
pub fn test_router(generator: Arc<ScriptedGenerator>) -> (Router, AppState) {
    let state = AppState::new(generator);
    (build_router(state.clone()), state)
}
