use serde::{Deserialize, Serialize};

/// One final-report submission, as stored in a student's Reports table.
///
/// The row carries no student key: the table lives in the submitting
/// student's own book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub timestamp: String,
    pub title: String,
    pub overview_text: String,
    pub file_url: String,
}
