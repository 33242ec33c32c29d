//! Skin System Core
//!
//! Core domain types, traits, and error handling for the skin system.
//! This crate has minimal dependencies and defines the shared vocabulary
//! used across the storage and CLI crates.

pub mod error;
pub mod ports;
pub mod profile;

pub use error::{Error, Result};
pub use profile::{Cape, SLIM_MODEL, TextureProfile};
