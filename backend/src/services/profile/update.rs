use crate::error::{AppError, AppResult};
use crate::services::accounts::{folder_link, loose_eq};
use crate::services::attachments::{self, object_name};
use crate::state::AppContext;
use crate::stores::link_id;
use crate::stores::tables::{folder_link_column, profile_column, ProfileField, ID_COLUMN};
use common::model::account::Role;
use common::requests::UpdateProfileRequest;
use log::{info, warn};
use serde_json::{json, Value};

const PHOTO_FALLBACK_MIME: &str = "image/jpeg";

/// What happened to the profile photo during an update.
#[derive(Debug, Clone, PartialEq)]
pub enum PhotoOutcome {
    /// A new photo was stored at this URL.
    Updated(String),
    /// No photo was sent.
    Unchanged,
    /// A photo was sent but could not be stored; the row keeps its old photo.
    Failed(String),
}

impl PhotoOutcome {
    fn label(&self) -> &'static str {
        match self {
            PhotoOutcome::Updated(_) => "updated",
            PhotoOutcome::Unchanged => "unchanged",
            PhotoOutcome::Failed(_) => "failed",
        }
    }
}

/// Handles the `updateProfile` action.
///
/// Finds the caller's row by id in the table of their role and overwrites the
/// editable columns of that role in one write. A phone or bio missing from a
/// staff update is written as an empty cell. A username already held by
/// another row of the same table is refused. A photo that cannot be stored
/// does not fail the update; the outcome is reported in `photoUpdate`.
pub fn process(ctx: &AppContext, req: UpdateProfileRequest) -> AppResult<Value> {
    if req.password.is_empty() {
        return Err(AppError::Validation("password must not be empty".into()));
    }

    let book = &ctx.config.tables.accounts_book;
    let table = match req.role {
        Role::Student => &ctx.config.tables.students,
        Role::Lecturer => &ctx.config.tables.staff,
    };
    let rows = ctx.rows.read_table(book, table)?.unwrap_or_default();
    let (row_index, row) = rows
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, row)| {
            row.get(ID_COLUMN)
                .is_some_and(|id| loose_eq(id, &req.id))
        })
        .ok_or_else(|| AppError::UserNotFound(req.id.clone()))?;

    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username must not be empty".into()));
    }
    if let Some(column) = profile_column(req.role, ProfileField::Username) {
        let taken = rows.iter().enumerate().skip(1).any(|(index, other)| {
            index != row_index && other.get(column).is_some_and(|u| loose_eq(u, username))
        });
        if taken {
            return Err(AppError::Validation(format!(
                "username {} is already in use",
                username
            )));
        }
    }

    let photo = match req.photo_base64.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(raw) => {
            let stored_folder = row
                .get(folder_link_column(req.role))
                .map(String::as_str)
                .unwrap_or_default();
            let folder = folder_link(req.link_folder.as_deref(), stored_folder);
            match store_photo(ctx, &req, raw, folder) {
                Ok(url) => PhotoOutcome::Updated(url),
                Err(e) => {
                    warn!("profile photo for {} not stored: {}", req.username, e);
                    PhotoOutcome::Failed(e.to_string())
                }
            }
        }
        None => PhotoOutcome::Unchanged,
    };

    let mut updates = vec![
        (ProfileField::Username, username.to_string()),
        (ProfileField::Email, req.email.trim().to_string()),
        (ProfileField::Name, req.name.trim().to_string()),
        (ProfileField::Password, req.password.clone()),
    ];
    if req.role == Role::Lecturer {
        updates.push((ProfileField::Phone, req.phone.clone().unwrap_or_default()));
        updates.push((ProfileField::Bio, req.bio.clone().unwrap_or_default()));
    }
    if let PhotoOutcome::Updated(url) = &photo {
        updates.push((ProfileField::Photo, url.clone()));
    }
    let cells: Vec<(usize, String)> = updates
        .into_iter()
        .filter_map(|(field, value)| profile_column(req.role, field).map(|column| (column, value)))
        .collect();
    ctx.rows.write_cells(book, table, row_index, &cells)?;
    info!(
        "profile of {} {} updated, photo {}",
        req.role.as_str(),
        req.id,
        photo.label()
    );

    let photo_url = match &photo {
        PhotoOutcome::Updated(url) => url.clone(),
        _ => req.photo_url.clone().unwrap_or_default(),
    };
    let mut data = json!({
        "message": "Profile updated",
        "photoUrl": photo_url,
        "photoUpdate": photo.label(),
    });
    if let PhotoOutcome::Failed(reason) = &photo {
        data["photoError"] = json!(reason);
    }
    Ok(data)
}

/// Uploads a new photo into the user's folder, or the root container when
/// the folder link is unusable.
fn store_photo(
    ctx: &AppContext,
    req: &UpdateProfileRequest,
    raw: &str,
    folder: &str,
) -> AppResult<String> {
    let mime = req
        .mime_type
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(PHOTO_FALLBACK_MIME);
    let attachment = attachments::decode(raw, mime)?;

    let container = match link_id(folder) {
        Some(id) if ctx.blobs.has_container(&id)? => id,
        _ => ctx.blobs.root_container().to_string(),
    };
    let object = attachments::upload(
        ctx,
        &container,
        &object_name("Profile", req.username.trim()),
        &attachment,
    )?;
    Ok(ctx.blobs.download_url(&object))
}
