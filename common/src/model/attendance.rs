use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attendance status of a daily logbook entry.
///
/// Stored canonically in English. The Indonesian labels used by the client
/// forms are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(alias = "Hadir")]
    Present,
    #[serde(alias = "Sakit")]
    Sick,
    #[serde(alias = "Izin")]
    Excused,
    #[serde(alias = "Libur")]
    Holiday,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Sick => "Sick",
            AttendanceStatus::Excused => "Excused",
            AttendanceStatus::Holiday => "Holiday",
        }
    }

    /// True only for a stored cell that reads as `Present`.
    ///
    /// Anything else, including unreadable cells, bypasses the location check.
    pub fn is_present_cell(cell: &str) -> bool {
        matches!(cell.parse::<AttendanceStatus>(), Ok(AttendanceStatus::Present))
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Present" | "Hadir" => Ok(AttendanceStatus::Present),
            "Sick" | "Sakit" => Ok(AttendanceStatus::Sick),
            "Excused" | "Izin" => Ok(AttendanceStatus::Excused),
            "Holiday" | "Libur" => Ok(AttendanceStatus::Holiday),
            other => Err(format!("unknown attendance status: {}", other)),
        }
    }
}
