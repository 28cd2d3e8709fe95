use crate::state::AppState;
use actix_web::{web, HttpResponse};
use log::warn;
use mime_guess::get_mime_extensions_str;
use serde::Deserialize;

const OPAQUE_MIME: &str = "application/octet-stream";

#[derive(Debug, Deserialize)]
pub struct ServeQuery {
    #[serde(default)]
    download: Option<String>,
}

/// Actix web handler for `GET /files/{object_id}`.
///
/// Only images and PDFs are served inline under their stored type. Every
/// other object goes out as `application/octet-stream` attachment, whatever
/// type the uploader declared.
///
/// # Returns
/// - `200 OK` with the object bytes if the object exists and is public.
/// - `404 Not Found` otherwise.
/// - `503 Service Unavailable` if the blob store cannot be read.
pub async fn process(
    state: web::Data<AppState>,
    object_id: web::Path<String>,
    query: web::Query<ServeQuery>,
) -> HttpResponse {
    let blobs = state.ctx.blobs.clone();
    let id = object_id.into_inner();
    let lookup = web::block(move || blobs.open_public(&id)).await;

    let blob = match lookup {
        Ok(Ok(Some(blob))) => blob,
        Ok(Ok(None)) => return HttpResponse::NotFound().body("Not Found"),
        Ok(Err(e)) => {
            warn!("cannot read object: {}", e);
            return HttpResponse::ServiceUnavailable().body(format!("Error reading file: {}", e));
        }
        Err(e) => {
            return HttpResponse::ServiceUnavailable().body(format!("Error reading file: {}", e))
        }
    };

    let inline = renders_inline(&blob.object.mime);
    let mut response = HttpResponse::Ok();
    response.content_type(if inline { blob.object.mime.as_str() } else { OPAQUE_MIME });
    response.insert_header(("X-Content-Type-Options", "nosniff"));
    if !inline || query.download.as_deref() == Some("1") {
        response.insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", download_name(&blob.object.name, &blob.object.mime)),
        ));
    }
    response.body(blob.bytes)
}

/// Types a browser may display in place without running scripts.
fn renders_inline(mime: &str) -> bool {
    let mime = mime.trim().to_ascii_lowercase();
    let essence = mime.split(';').next().unwrap_or_default().trim();
    essence == "application/pdf" || (essence.starts_with("image/") && essence != "image/svg+xml")
}

/// Object name with an extension matching its MIME type, unless it has one.
fn download_name(name: &str, mime: &str) -> String {
    let clean: String = name.chars().filter(|c| *c != '"' && !c.is_control()).collect();
    if clean.contains('.') {
        return clean;
    }
    match get_mime_extensions_str(mime).and_then(|exts| exts.first()) {
        Some(ext) => format!("{}.{}", clean, ext),
        None => clean,
    }
}
