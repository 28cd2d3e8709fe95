//! Payloads accepted by the action dispatcher.
//!
//! Every request is a JSON object with an `action` field naming the operation;
//! the remaining fields depend on the action. Field names follow the client's
//! existing wire format (`logEntry`, `link_spreadsheet`, `selfieBase64`, ...).

use crate::model::account::Role;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// The operations a client can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    SubmitLogbook,
    SubmitReport,
    UpdateProfile,
    GetDashboardData,
    GetAllLogbooks,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Login => "login",
            Action::SubmitLogbook => "submitLogbook",
            Action::SubmitReport => "submitReport",
            Action::UpdateProfile => "updateProfile",
            Action::GetDashboardData => "getDashboardData",
            Action::GetAllLogbooks => "getAllLogbooks",
        }
    }

    /// Whether the action writes to the row or blob store.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Action::SubmitLogbook | Action::SubmitReport | Action::UpdateProfile
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Action::Login),
            "submitLogbook" => Ok(Action::SubmitLogbook),
            "submitReport" => Ok(Action::SubmitReport),
            "updateProfile" => Ok(Action::UpdateProfile),
            "getDashboardData" => Ok(Action::GetDashboardData),
            "getAllLogbooks" => Ok(Action::GetAllLogbooks),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email, username (NIM/NIP) or phone number.
    #[serde(deserialize_with = "lenient_string")]
    pub identifier: String,
    #[serde(deserialize_with = "lenient_string")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitLogbookRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub username: String,
    /// Link to the student's log book; falls back to the stored link.
    #[serde(default)]
    pub link_spreadsheet: Option<String>,
    /// Link to the student's attachment folder; falls back to the stored link.
    #[serde(default)]
    pub folder_url: Option<String>,
    #[serde(rename = "logEntry")]
    pub log_entry: LogEntryPayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryPayload {
    pub date: String,
    pub time: String,
    pub status: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub lng: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accuracy: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub output: String,
    /// Data URI of the selfie; always stored as PNG.
    #[serde(default)]
    pub selfie_base64: Option<String>,
    /// Data URI of the optional supporting document.
    #[serde(default)]
    pub doc_base64: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReportRequest {
    #[serde(deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default)]
    pub link_spreadsheet: Option<String>,
    #[serde(default)]
    pub folder_url: Option<String>,
    #[serde(rename = "reportData")]
    pub report_data: ReportPayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub file_base64: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub role: Role,
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub username: String,
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub password: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Data URI or bare base64 of a new profile photo.
    #[serde(default, rename = "photoBase64")]
    pub photo_base64: Option<String>,
    /// MIME type for a bare base64 photo.
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub link_folder: Option<String>,
    /// The photo URL the client currently shows; echoed back when no new
    /// photo is stored.
    #[serde(default, rename = "photoUrl")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardRequest {
    #[serde(default, rename = "userId", deserialize_with = "lenient_opt_string")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// Accepts a JSON string or number; clients send NIMs and phone numbers both ways.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(d).map(String::from)
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Option::<StringOrNumber>::deserialize(d).map(|v| v.map(String::from))
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    match StringOrNumber::deserialize(d)? {
        StringOrNumber::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("number out of range")),
        StringOrNumber::String(s) if s.trim().is_empty() => Ok(0.0),
        StringOrNumber::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("not a number: {}", s))),
    }
}
