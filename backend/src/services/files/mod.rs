//! # File Service
//!
//! Serves uploaded objects at the public URLs handed out by the operations.
//!
//! ## Sub-modules:
//! - `serve`: streams a public object inline when its type is safe to show, or as a download.

mod serve;

use actix_web::web::{get, scope};
use actix_web::Scope;

const FILES_PATH: &str = "/files";

/// Configures and returns the Actix `Scope` for public objects.
///
/// # Registered Routes:
///
/// *   **`GET /{object_id}`**:
///     - **Handler**: `serve::process`
///     - **Description**: Returns the object's bytes. Images and PDFs are
///       shown inline under their stored type; anything else is sent as an
///       `application/octet-stream` download. With `?download=1` every
///       object is sent as a download.
///       Objects that were never shared publicly answer `404 Not Found`.
pub fn configure_routes() -> Scope {
    scope(FILES_PATH).route("/{object_id}", get().to(serve::process))
}
