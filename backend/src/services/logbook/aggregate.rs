use super::location::is_location_valid;
use crate::error::AppResult;
use crate::services::accounts::read_students;
use crate::state::AppContext;
use crate::stores::link_id;
use crate::stores::tables::logbook_from_row;
use common::model::account::StudentRecord;
use common::model::logbook::LogbookView;
use log::{info, warn};
use rayon::prelude::*;
use std::collections::HashMap;

/// Handles the `getAllLogbooks` action.
///
/// Every student's book is read independently and in parallel. A book that
/// cannot be read is logged and left out; it never fails the whole call.
///
/// # Returns
/// All rows of all books, flattened in student order then append order, and
/// reversed so the most recently appended row comes first.
pub fn process(ctx: &AppContext) -> AppResult<Vec<LogbookView>> {
    let students: Vec<StudentRecord> = read_students(ctx)?.into_iter().map(|(_, s)| s).collect();

    let targets: HashMap<String, String> = students
        .iter()
        .map(|s| (s.username.clone(), s.placement_address.to_lowercase()))
        .collect();

    let per_student: Vec<Vec<LogbookView>> = students
        .par_iter()
        .map(|student| read_student_book(ctx, student, &targets))
        .collect();

    let mut views: Vec<LogbookView> = per_student.into_iter().flatten().collect();
    views.reverse();
    info!(
        "aggregated {} logbook rows from {} students",
        views.len(),
        students.len()
    );
    Ok(views)
}

/// View rows of one student's book, or none when the book is unusable.
fn read_student_book(
    ctx: &AppContext,
    student: &StudentRecord,
    targets: &HashMap<String, String>,
) -> Vec<LogbookView> {
    if student.log_sheet_link.is_empty() {
        return Vec::new();
    }
    let Some(book) = link_id(&student.log_sheet_link) else {
        warn!(
            "skipping {}: log sheet link {:?} has no book id",
            student.username, student.log_sheet_link
        );
        return Vec::new();
    };
    let rows = match ctx.rows.read_table(&book, &ctx.config.tables.logbook) {
        Ok(Some(rows)) => rows,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("skipping {}: cannot read book {}: {}", student.username, book, e);
            return Vec::new();
        }
    };

    rows.iter()
        .enumerate()
        .skip(1)
        .map(|(index, row)| {
            let entry = logbook_from_row(row);
            let nim = if entry.username.is_empty() {
                student.username.clone()
            } else {
                entry.username
            };
            let target_address = targets
                .get(&nim)
                .cloned()
                .unwrap_or_else(|| student.placement_address.to_lowercase());
            LogbookView {
                id: format!("{}_{}", student.id, index),
                student_id: student.id.clone(),
                is_location_valid: is_location_valid(
                    &entry.attendance_status,
                    &entry.address,
                    &target_address,
                ),
                name: entry.full_name,
                nim,
                class_name: entry.class_name,
                timestamp: entry.timestamp,
                date: entry.date,
                time: entry.time,
                status: entry.attendance_status,
                lat: entry.coordinates.lat,
                lng: entry.coordinates.lng,
                accuracy: entry.accuracy_meters,
                address: entry.address,
                selfie_url: entry.selfie_photo_url,
                activity: entry.activity_description,
                output: entry.output_description,
                doc_url: entry.document_url,
                target_address,
            }
        })
        .collect()
}
