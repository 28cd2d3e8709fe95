//! # Action Service
//!
//! Every client operation goes through one endpoint. The request names the
//! operation in its `action` field and the response is always the JSON
//! envelope `{status, data}` or `{status, message, kind}` with HTTP 200.
//!
//! ## Sub-modules:
//! - `dispatch`: parses the envelope, routes by action and wraps the result.

mod dispatch;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path of the action endpoint.
const API_PATH: &str = "/api";

/// Configures and returns the Actix `Scope` for the action endpoint.
///
/// # Registered Routes:
///
/// *   **`POST /exec`**:
///     - **Handler**: `dispatch::process_post`
///     - **Description**: Runs the action named in the JSON body. Writing actions
///       (`submitLogbook`, `submitReport`, `updateProfile`) carry their
///       attachments inline as data URIs.
///
/// *   **`GET /exec`**:
///     - **Handler**: `dispatch::process_get`
///     - **Description**: Runs the action named in the query string, with the
///       other query parameters as its fields. Used by clients for the reading
///       actions (`getDashboardData`, `getAllLogbooks`).
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/exec", post().to(dispatch::process_post))
        .route("/exec", get().to(dispatch::process_get))
}
