//! # Route Modules
//!
//! - [`content`]: the five CRUD handlers, mounted once per registered type.
//! - [`describe`]: `GET /api/describe`, the registered type listing.

pub mod content;
pub mod describe;
