use crate::error::{AppError, AppResult};
use crate::services::accounts::{find_student, folder_link, resolve_log_book};
use crate::services::attachments::{self, resolve_container};
use crate::state::AppContext;
use crate::stores::tables::{report_to_row, REPORT_HEADER};
use chrono::{SecondsFormat, Utc};
use common::model::report::ReportEntry;
use common::requests::SubmitReportRequest;
use log::info;
use mime_guess::from_path;
use serde_json::{json, Value};

/// Handles the `submitReport` action.
///
/// The report file is optional. When present it is stored under the client's
/// file name, or `Laporan_<username>` without one, and its type comes from
/// the data URI or else the file name's extension. Report rows link to the
/// inline view of the file rather than a download.
pub fn process(ctx: &AppContext, req: SubmitReportRequest) -> AppResult<Value> {
    let report = &req.report_data;
    let title = report.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("report title is required".into()));
    }

    let student = find_student(ctx, &req.username)?;
    let container = resolve_container(
        ctx,
        folder_link(req.folder_url.as_deref(), &student.drive_folder_link),
    )?;
    let book = resolve_log_book(req.link_spreadsheet.as_deref(), &student)?;

    let file = match report.file_base64.as_deref().filter(|f| !f.trim().is_empty()) {
        Some(raw) => {
            let name = report
                .file_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Laporan_{}", student.username));
            let fallback = from_path(&name).first_or_octet_stream();
            Some((name, attachments::decode(raw, fallback.as_ref())?))
        }
        None => None,
    };

    let table = &ctx.config.tables.reports;
    ctx.rows.ensure_table(&book, table, &REPORT_HEADER)?;

    let file_url = match &file {
        Some((name, attachment)) => {
            let object = attachments::upload(ctx, &container, name, attachment)?;
            ctx.blobs.view_url(&object)
        }
        None => String::new(),
    };

    let entry = ReportEntry {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        title: title.to_string(),
        overview_text: report.overview.trim().to_string(),
        file_url: file_url.clone(),
    };
    ctx.rows.append_row(&book, table, report_to_row(&entry))?;
    info!("report {:?} from {} appended to {}", entry.title, student.username, book);

    Ok(json!({
        "message": "Report submitted",
        "reportFileUrl": file_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::memory::{student, Fixture, AYU_BOOK};
    use crate::stores::tables::report_from_row;

    const USER: &str = "2141720001";

    fn fixture() -> Fixture {
        Fixture::new(&[student("1", USER, "Ayu", AYU_BOOK, "")], &[])
    }

    fn request(report: Value) -> SubmitReportRequest {
        serde_json::from_value(json!({ "username": USER, "reportData": report })).unwrap()
    }

    fn report_rows(fx: &Fixture) -> Vec<Vec<String>> {
        fx.rows
            .table(AYU_BOOK, &fx.ctx.config.tables.reports)
            .unwrap_or_default()
    }

    #[test]
    fn stores_file_and_appends_row() {
        let fx = fixture();
        let data = process(
            &fx.ctx,
            request(json!({
                "title": " Laporan Akhir ",
                "overview": "Ringkasan kegiatan",
                "fileBase64": "data:application/pdf;base64,JVBERi0x",
                "fileName": "laporan-ayu.pdf",
            })),
        )
        .unwrap();
        assert_eq!(data["message"], "Report submitted");
        assert_eq!(data["reportFileUrl"], "http://files.test/files/1");

        let rows = report_rows(&fx);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], REPORT_HEADER.map(String::from).to_vec());
        let stored = report_from_row(&rows[1]);
        assert_eq!(stored.title, "Laporan Akhir");
        assert_eq!(stored.overview_text, "Ringkasan kegiatan");
        assert_eq!(stored.file_url, "http://files.test/files/1");

        let objects = fx.blobs.objects();
        assert_eq!(objects[0].0.name, "laporan-ayu.pdf");
        assert_eq!(objects[0].0.mime, "application/pdf");
        assert!(objects[0].2);
    }

    #[test]
    fn unnamed_file_gets_fallback_name() {
        let fx = fixture();
        process(
            &fx.ctx,
            request(json!({"title": "Laporan", "fileBase64": "JVBERi0x"})),
        )
        .unwrap();
        let objects = fx.blobs.objects();
        assert_eq!(objects[0].0.name, "Laporan_2141720001");
        assert_eq!(objects[0].0.mime, "application/octet-stream");
    }

    #[test]
    fn bare_base64_takes_type_from_file_name() {
        let fx = fixture();
        process(
            &fx.ctx,
            request(json!({"title": "Laporan", "fileBase64": "JVBERi0x", "fileName": "akhir.pdf"})),
        )
        .unwrap();
        assert_eq!(fx.blobs.objects()[0].0.mime, "application/pdf");
    }

    #[test]
    fn report_without_file_has_empty_url() {
        let fx = fixture();
        let data = process(&fx.ctx, request(json!({"title": "Draft"}))).unwrap();
        assert_eq!(data["reportFileUrl"], "");
        assert_eq!(report_rows(&fx).len(), 2);
        assert!(fx.blobs.objects().is_empty());
    }

    #[test]
    fn blank_title_is_rejected() {
        let fx = fixture();
        assert!(matches!(
            process(&fx.ctx, request(json!({"title": "  "}))),
            Err(AppError::Validation(_))
        ));
        assert!(report_rows(&fx).is_empty());
    }

    #[test]
    fn failed_upload_appends_no_row() {
        let fx = fixture();
        fx.blobs.fail_uploads(true);
        assert!(matches!(
            process(
                &fx.ctx,
                request(json!({"title": "Laporan", "fileBase64": "JVBERi0x"}))
            ),
            Err(AppError::UpstreamStore(_))
        ));
        assert_eq!(report_rows(&fx).len(), 1);
    }
}
