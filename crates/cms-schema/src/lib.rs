//! # cms-schema: Payload Validation
//!
//! Wraps the `jsonschema` engine for content payloads. A type's schema is
//! compiled once at startup into a [`CompiledSchema`] and reused for every
//! request; [`validate`] offers the one-shot compile-and-validate form.
//!
//! Validation never fails on a bad payload *shape*: shape violations come back
//! as a [`ValidationOutcome`] with `valid == false` and one message per
//! violation. [`SchemaError`] is reserved for inputs that cannot be validated
//! at all (a malformed schema document, or a payload that is not JSON).

pub mod error;
pub mod validate;

pub use error::SchemaError;
pub use validate::{parse_payload, validate, CompiledSchema, ValidationOutcome};
