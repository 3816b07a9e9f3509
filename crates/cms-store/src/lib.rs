//! # cms-store: Content Storage Providers
//!
//! Every backend implements [`StorageProvider`] with identical observable
//! semantics:
//!
//! - `list` returns a type's objects in ascending id order, and an empty
//!   sequence for a type that has never been written.
//! - `get` fails with a not-found error when the type or the id is absent.
//! - `create` and `update` are both unconditional upserts.
//! - `delete` is idempotent.
//!
//! Two providers ship:
//!
//! - [`MemoryStore`]: process memory behind a single reader/writer lock.
//! - [`BucketStore`]: one JSON document per object at `{type}/{id}` in a
//!   [`Bucket`]. [`MemoryBucket`] keeps keys in process; `S3Bucket` (feature
//!   `s3`, on by default) talks to any S3-compatible endpoint, including
//!   Google Cloud Storage through its interoperability API.

pub mod bucket;
pub mod error;
pub mod memory;
pub mod provider;
#[cfg(feature = "s3")]
pub mod s3;

pub use bucket::{Bucket, BucketStore, MemoryBucket};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use provider::StorageProvider;
#[cfg(feature = "s3")]
pub use s3::{S3Bucket, S3Config};
