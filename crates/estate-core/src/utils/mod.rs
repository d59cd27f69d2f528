//! Utils module - Shared utilities and helpers
//!
//! Helpers used across the API, core and display layers.

/// Conversions from transport errors into [`crate::error::ApiError`]
pub mod error_helpers;

/// Verbose console output helpers
pub mod logging;

/// Retry with exponential backoff for idempotent requests
pub mod retry;

/// Number, price and text formatting
pub mod text;

/// Input validation and sanitization utilities
pub mod validation;
