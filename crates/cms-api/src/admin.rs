//! # Admin Assets
//!
//! Serves the admin single-page app from a directory under `/admin`. Paths
//! that match no file fall back to `index.html` so client-side routes
//! survive a reload.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

pub fn service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
