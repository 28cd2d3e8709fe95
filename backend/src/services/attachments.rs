//! Attachment decoding and upload.
//!
//! Clients send files inline as data URIs (`data:<mime>;base64,<payload>`).
//! Uploading an attachment means resolving the target container from a folder
//! link, creating the object, and making it publicly readable.

use crate::error::{AppError, AppResult};
use crate::state::AppContext;
use crate::stores::{link_id, BlobObject};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Decodes a data URI, or bare base64 typed as `fallback_mime`.
///
/// A data URI without a MIME type also falls back to `fallback_mime`.
pub fn decode(raw: &str, fallback_mime: &str) -> AppResult<Attachment> {
    let raw = raw.trim();
    let (mime, payload) = match raw.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| AppError::Validation("attachment data URI has no payload".into()))?;
            let mime = header.split(';').next().unwrap_or_default().trim();
            (mime, payload)
        }
        None => ("", raw),
    };
    let mime = if mime.is_empty() { fallback_mime } else { mime };

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact)
        .map_err(|e| AppError::Validation(format!("attachment is not valid base64: {}", e)))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("attachment is empty".into()));
    }
    Ok(Attachment {
        mime: mime.to_string(),
        bytes,
    })
}

/// Container id behind a folder link; the container must exist.
pub fn resolve_container(ctx: &AppContext, folder_link: &str) -> AppResult<String> {
    let id = link_id(folder_link)
        .ok_or_else(|| AppError::InvalidFolderLink(folder_link.to_string()))?;
    if !ctx.blobs.has_container(&id)? {
        return Err(AppError::InvalidFolderLink(folder_link.to_string()));
    }
    Ok(id)
}

/// `<kind>_<username>_<epoch millis>`.
pub fn object_name(kind: &str, username: &str) -> String {
    format!("{}_{}_{}", kind, username, Utc::now().timestamp_millis())
}

/// Stores the attachment in `container` and shares it publicly.
pub fn upload(
    ctx: &AppContext,
    container: &str,
    name: &str,
    attachment: &Attachment,
) -> AppResult<BlobObject> {
    let object = ctx
        .blobs
        .create_object(container, name, &attachment.mime, &attachment.bytes)?;
    ctx.blobs.set_public_read(&object.id)?;
    Ok(object)
}
