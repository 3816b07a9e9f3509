//! # cms-core: Foundational Types for the Content API
//!
//! Defines the primitives every other crate in the workspace builds on:
//!
//! - [`TypeDef`]: a declared content type (name, id field, JSON Schema text).
//! - [`TypeRegistry`]: the immutable, ordered set of declared types, fixed at startup.
//! - [`Object`]: a free-form JSON object. Objects carry no Rust-side structure;
//!   the declared schema is the only contract.
//! - [`object_id`]: derives the storage id of an object from its id field.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cms-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod registry;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use registry::TypeRegistry;
pub use types::{check_id, object_id, Object, Record, TypeDef, RESERVED_TYPE_NAMES};
