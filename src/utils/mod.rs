//! Utility functions for code generation, URL validation, and store error handling.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Original URL validation
//! - [`db_error`] - PostgreSQL error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
