use crate::error::{AppError, AppResult};
use crate::services::accounts::{find_student, folder_link, resolve_log_book};
use crate::services::attachments::{self, object_name, resolve_container};
use crate::state::AppContext;
use crate::stores::tables::{logbook_to_row, LOGBOOK_HEADER};
use chrono::{SecondsFormat, Utc};
use common::model::attendance::AttendanceStatus;
use common::model::logbook::{Coordinates, LogbookEntry};
use common::model::rich_text;
use common::requests::SubmitLogbookRequest;
use log::info;
use serde_json::{json, Value};

const SELFIE_MIME: &str = "image/png";
const DOCUMENT_FALLBACK_MIME: &str = "application/octet-stream";

/// Handles the `submitLogbook` action.
///
/// The request is validated before anything is written. The logbook table is
/// created in the student's book if needed, both attachments are uploaded,
/// and the row is appended last, so a failed upload leaves no row behind.
pub fn process(ctx: &AppContext, req: SubmitLogbookRequest) -> AppResult<Value> {
    let entry = &req.log_entry;

    let status: AttendanceStatus = entry.status.parse().map_err(AppError::Validation)?;
    let selfie_raw = entry
        .selfie_base64
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("selfie photo is required".into()))?;
    let activity = rich_text::encode(&entry.activity);
    let output = rich_text::encode(&entry.output);
    if activity.is_empty() || output.is_empty() {
        return Err(AppError::Validation(
            "activity and output descriptions are required".into(),
        ));
    }

    let mut selfie = attachments::decode(selfie_raw, SELFIE_MIME)?;
    selfie.mime = SELFIE_MIME.to_string();
    let document = match entry.doc_base64.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => Some(attachments::decode(raw, DOCUMENT_FALLBACK_MIME)?),
        None => None,
    };

    let student = find_student(ctx, &req.username)?;
    let container = resolve_container(
        ctx,
        folder_link(req.folder_url.as_deref(), &student.drive_folder_link),
    )?;
    let book = resolve_log_book(req.link_spreadsheet.as_deref(), &student)?;
    let table = &ctx.config.tables.logbook;
    ctx.rows.ensure_table(&book, table, &LOGBOOK_HEADER)?;

    let selfie_object = attachments::upload(
        ctx,
        &container,
        &object_name("Selfie", &student.username),
        &selfie,
    )?;
    let selfie_url = ctx.blobs.download_url(&selfie_object);

    let doc_url = match &document {
        Some(doc) => {
            let object =
                attachments::upload(ctx, &container, &object_name("Dok", &student.username), doc)?;
            ctx.blobs.download_url(&object)
        }
        None => String::new(),
    };

    let row = LogbookEntry {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        full_name: student.full_name.clone(),
        class_name: student.class_name.clone(),
        username: student.username.clone(),
        date: entry.date.trim().to_string(),
        time: entry.time.trim().to_string(),
        attendance_status: status.as_str().to_string(),
        coordinates: Coordinates::new(entry.lat, entry.lng),
        accuracy_meters: entry.accuracy.to_string(),
        address: entry.address.trim().to_string(),
        selfie_photo_url: selfie_url.clone(),
        activity_description: activity,
        output_description: output,
        document_url: doc_url.clone(),
    };
    ctx.rows.append_row(&book, table, logbook_to_row(&row))?;
    info!(
        "logbook entry for {} on {} appended to {}",
        student.username, row.date, book
    );

    Ok(json!({
        "message": "Logbook saved",
        "selfieUrl": selfie_url,
        "docUrl": doc_url,
    }))
}
