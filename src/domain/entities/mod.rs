//! Core domain entities for the shortening service.
//!
//! # Entity Types
//!
//! - [`UrlRecord`] - A persisted short code → URL mapping
//! - [`ShortCode`] - Validated short identifier, used as the lookup key
//! - [`ExpireIn`] - Record validity, carried as a single duration type
//!
//! Records are created through [`NewUrlRecord`] and never mutated afterwards.

pub mod short_code;
pub mod url_record;

pub use short_code::{CODE_ALPHABET, MAX_CODE_LENGTH, MIN_CODE_LENGTH, ShortCode};
pub use url_record::{ExpireIn, NewUrlRecord, UrlRecord};
