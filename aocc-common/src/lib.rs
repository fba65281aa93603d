//! # AOCC Common Library
//!
//! Shared code for the AOCC operations services:
//! - Error and result types
//! - TOML bootstrap configuration
//! - Generator credential resolution and validation

pub mod config;
pub mod credentials;
pub mod error;

pub use credentials::{ApiKeyPolicy, CredentialError};
pub use error::{Error, Result};
