//! # Action Dispatcher
//!
//! The single entry point of every operation.
//!
//! ## Workflow
//!
//! 1.  **Envelope parsing**: the body (or the query string for `GET`) is read
//!     as a JSON object. It is taken as raw bytes so that a malformed body
//!     still gets an error envelope instead of a transport-level 400. `GET`
//!     only runs the reading actions that carry no credentials
//!     (`getDashboardData`, `getAllLogbooks`).
//!
//! 2.  **Routing**: the `action` field selects the operation; its remaining
//!     fields are deserialized into that operation's request type.
//!
//! 3.  **Gating**: writing actions hold the gate in `AppState` exclusively,
//!     reading actions share it. The operation itself runs on the blocking
//!     pool since the stores do file and SQLite I/O.
//!
//! 4.  **Response**: the result, or the error's message and kind, is wrapped
//!     in an [`Envelope`] and returned with `200 OK`.

use crate::error::{AppError, AppResult};
use crate::services::{auth, dashboard, logbook, profile, reports};
use crate::state::{AppContext, AppState};
use crate::stores::StoreError;
use actix_web::{web, HttpRequest, HttpResponse};
use common::requests::Action;
use common::responses::Envelope;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Actix web handler for `POST /api/exec`.
pub async fn process_post(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let result = match serde_json::from_slice::<Value>(&body) {
        Ok(request) => execute(&state, request).await,
        Err(e) => Err(AppError::from(e)),
    };
    respond(result)
}

/// Actix web handler for `GET /api/exec`.
pub async fn process_get(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let result = match web::Query::<HashMap<String, String>>::from_query(req.query_string()) {
        Ok(query) => {
            let fields: Map<String, Value> = query
                .into_inner()
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            match allowed_over_get(&fields) {
                Ok(()) => execute(&state, Value::Object(fields)).await,
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(AppError::Parse(e.to_string())),
    };
    respond(result)
}

/// `GET` runs the reading actions only; a request without an action falls
/// through to the usual parse error.
fn allowed_over_get(fields: &Map<String, Value>) -> AppResult<()> {
    let Some(name) = fields.get("action").and_then(Value::as_str) else {
        return Ok(());
    };
    match name.parse::<Action>() {
        Ok(Action::GetDashboardData | Action::GetAllLogbooks) => Ok(()),
        _ => Err(AppError::UnknownAction(name.to_string())),
    }
}

/// Routes one request envelope to its operation under the action gate.
async fn execute(state: &AppState, request: Value) -> AppResult<Value> {
    let name = request
        .get("action")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Parse("request has no action field".into()))?;
    let action: Action = name.parse().map_err(AppError::UnknownAction)?;
    debug!("dispatching {}", action);

    let ctx = state.ctx.clone();
    let run = move || route(&ctx, action, request);
    if action.is_write() {
        let _gate = state.gate.write().await;
        run_blocking(run).await
    } else {
        let _gate = state.gate.read().await;
        run_blocking(run).await
    }
}

async fn run_blocking<F>(f: F) -> AppResult<Value>
where
    F: FnOnce() -> AppResult<Value> + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        AppError::UpstreamStore(StoreError::Unavailable(format!("action worker failed: {}", e)))
    })?
}

fn route(ctx: &AppContext, action: Action, request: Value) -> AppResult<Value> {
    match action {
        Action::Login => {
            let identity = auth::login::process(ctx, serde_json::from_value(request)?)?;
            Ok(serde_json::to_value(identity)?)
        }
        Action::SubmitLogbook => logbook::submit::process(ctx, serde_json::from_value(request)?),
        Action::SubmitReport => reports::submit::process(ctx, serde_json::from_value(request)?),
        Action::UpdateProfile => profile::update::process(ctx, serde_json::from_value(request)?),
        Action::GetDashboardData => Ok(dashboard::process(serde_json::from_value(request)?)),
        Action::GetAllLogbooks => Ok(serde_json::to_value(logbook::aggregate::process(ctx)?)?),
    }
}

fn respond(result: AppResult<Value>) -> HttpResponse {
    let envelope = match result {
        Ok(data) => Envelope::success(data),
        Err(e) => {
            warn!("action failed ({}): {}", e.kind(), e);
            Envelope::error(e.kind(), e.to_string())
        }
    };
    HttpResponse::Ok().json(envelope)
}
