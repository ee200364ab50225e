//! Common utilities for aac
//!
//! This crate provides the error type shared by the aac crates.

pub mod error;

pub use error::{Result, StoreError};
