//! Column layouts of every table, and conversion between rows and records.
//!
//! The row store addresses cells by position. This module is the single place
//! where a field name turns into a column index; operations only see the typed
//! records from `common::model`.

use super::Row;
use common::model::account::{Role, StaffRecord, StudentRecord};
use common::model::logbook::{Coordinates, LogbookEntry};
use common::model::report::ReportEntry;

/// Students table, `InfoAkunMahasiswa`.
pub mod student_col {
    pub const ID: usize = 0;
    pub const EMAIL: usize = 1;
    pub const USERNAME: usize = 2;
    pub const FULL_NAME: usize = 3;
    pub const CLASS_NAME: usize = 4;
    pub const ENROLLMENT_STATUS: usize = 5;
    pub const PHONE: usize = 6;
    pub const PASSWORD: usize = 7;
    pub const PHOTO_URL: usize = 8;
    pub const PLACEMENT_NAME: usize = 9;
    pub const PLACEMENT_ADDRESS: usize = 10;
    pub const INTERNAL_SUPERVISOR: usize = 11;
    pub const EXTERNAL_SUPERVISOR: usize = 12;
    pub const DRIVE_FOLDER_LINK: usize = 13;
    pub const LOG_SHEET_LINK: usize = 14;
}

/// Staff table, `InfoAkunDosen`.
pub mod staff_col {
    pub const ID: usize = 0;
    pub const USERNAME: usize = 1;
    pub const EMAIL: usize = 2;
    pub const PHONE: usize = 3;
    pub const FULL_NAME: usize = 4;
    pub const TITLE: usize = 5;
    pub const CLASS_ASSIGNMENT: usize = 6;
    pub const PASSWORD: usize = 7;
    pub const PHOTO_URL: usize = 8;
    pub const BIO: usize = 9;
    pub const DRIVE_FOLDER_LINK: usize = 10;
    pub const LOG_SHEET_LINK: usize = 11;
}

/// Per-student Logbook table.
pub mod logbook_col {
    pub const TIMESTAMP: usize = 0;
    pub const FULL_NAME: usize = 1;
    pub const CLASS_NAME: usize = 2;
    pub const USERNAME: usize = 3;
    pub const DATE: usize = 4;
    pub const TIME: usize = 5;
    pub const STATUS: usize = 6;
    pub const COORDINATES: usize = 7;
    pub const ACCURACY: usize = 8;
    pub const ADDRESS: usize = 9;
    pub const SELFIE_URL: usize = 10;
    pub const ACTIVITY: usize = 11;
    pub const OUTPUT: usize = 12;
    pub const DOCUMENT_URL: usize = 13;
}

pub const LOGBOOK_HEADER: [&str; 14] = [
    "TimeStamp",
    "Nama",
    "Kelas",
    "Username",
    "Tanggal",
    "Jam_Absen",
    "Status",
    "Koordinat",
    "Akurasi_Meter",
    "Alamat_Lengkap",
    "Link_FotoSelfie",
    "Detail Kegiatan",
    "Output yang Dihasilkan",
    "Link Dokumentasi",
];

pub const REPORT_HEADER: [&str; 4] = [
    "TimeStamp",
    "Judul Laporan",
    "Ringkasan/Overview",
    "Link Data Laporan",
];

fn cell(row: &[String], index: usize) -> String {
    row.get(index).map(|c| c.trim().to_string()).unwrap_or_default()
}

pub fn student_from_row(row: &[String]) -> StudentRecord {
    use student_col::*;
    StudentRecord {
        id: cell(row, ID),
        email: cell(row, EMAIL),
        username: cell(row, USERNAME),
        full_name: cell(row, FULL_NAME),
        class_name: cell(row, CLASS_NAME),
        enrollment_status: cell(row, ENROLLMENT_STATUS),
        phone: cell(row, PHONE),
        password: row.get(PASSWORD).cloned().unwrap_or_default(),
        photo_url: cell(row, PHOTO_URL),
        placement_name: cell(row, PLACEMENT_NAME),
        placement_address: cell(row, PLACEMENT_ADDRESS),
        internal_supervisor: cell(row, INTERNAL_SUPERVISOR),
        external_supervisor: cell(row, EXTERNAL_SUPERVISOR),
        drive_folder_link: cell(row, DRIVE_FOLDER_LINK),
        log_sheet_link: cell(row, LOG_SHEET_LINK),
    }
}

pub fn staff_from_row(row: &[String]) -> StaffRecord {
    use staff_col::*;
    StaffRecord {
        id: cell(row, ID),
        username: cell(row, USERNAME),
        email: cell(row, EMAIL),
        phone: cell(row, PHONE),
        full_name: cell(row, FULL_NAME),
        title: cell(row, TITLE),
        class_assignment: cell(row, CLASS_ASSIGNMENT),
        password: row.get(PASSWORD).cloned().unwrap_or_default(),
        photo_url: cell(row, PHOTO_URL),
        bio: cell(row, BIO),
        drive_folder_link: cell(row, DRIVE_FOLDER_LINK),
        log_sheet_link: cell(row, LOG_SHEET_LINK),
    }
}

#[cfg(test)]
pub fn student_to_row(r: &StudentRecord) -> Row {
    vec![
        r.id.clone(),
        r.email.clone(),
        r.username.clone(),
        r.full_name.clone(),
        r.class_name.clone(),
        r.enrollment_status.clone(),
        r.phone.clone(),
        r.password.clone(),
        r.photo_url.clone(),
        r.placement_name.clone(),
        r.placement_address.clone(),
        r.internal_supervisor.clone(),
        r.external_supervisor.clone(),
        r.drive_folder_link.clone(),
        r.log_sheet_link.clone(),
    ]
}

#[cfg(test)]
pub fn staff_to_row(r: &StaffRecord) -> Row {
    vec![
        r.id.clone(),
        r.username.clone(),
        r.email.clone(),
        r.phone.clone(),
        r.full_name.clone(),
        r.title.clone(),
        r.class_assignment.clone(),
        r.password.clone(),
        r.photo_url.clone(),
        r.bio.clone(),
        r.drive_folder_link.clone(),
        r.log_sheet_link.clone(),
    ]
}

pub fn logbook_from_row(row: &[String]) -> LogbookEntry {
    use logbook_col::*;
    LogbookEntry {
        timestamp: cell(row, TIMESTAMP),
        full_name: cell(row, FULL_NAME),
        class_name: cell(row, CLASS_NAME),
        username: cell(row, USERNAME),
        date: cell(row, DATE),
        time: cell(row, TIME),
        attendance_status: cell(row, STATUS),
        coordinates: Coordinates::from_cell(&cell(row, COORDINATES)),
        accuracy_meters: cell(row, ACCURACY),
        address: cell(row, ADDRESS),
        selfie_photo_url: cell(row, SELFIE_URL),
        activity_description: cell(row, ACTIVITY),
        output_description: cell(row, OUTPUT),
        document_url: cell(row, DOCUMENT_URL),
    }
}

pub fn logbook_to_row(e: &LogbookEntry) -> Row {
    vec![
        e.timestamp.clone(),
        e.full_name.clone(),
        e.class_name.clone(),
        e.username.clone(),
        e.date.clone(),
        e.time.clone(),
        e.attendance_status.clone(),
        e.coordinates.to_cell(),
        e.accuracy_meters.clone(),
        e.address.clone(),
        e.selfie_photo_url.clone(),
        e.activity_description.clone(),
        e.output_description.clone(),
        e.document_url.clone(),
    ]
}

pub fn report_to_row(r: &ReportEntry) -> Row {
    vec![
        r.timestamp.clone(),
        r.title.clone(),
        r.overview_text.clone(),
        r.file_url.clone(),
    ]
}

#[cfg(test)]
pub fn report_from_row(row: &[String]) -> ReportEntry {
    ReportEntry {
        timestamp: cell(row, 0),
        title: cell(row, 1),
        overview_text: cell(row, 2),
        file_url: cell(row, 3),
    }
}

/// Columns a profile update may overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    Email,
    Phone,
    Name,
    Password,
    Photo,
    Bio,
}

/// Column of the id every profile lookup matches on.
pub const ID_COLUMN: usize = 0;

/// Column holding `field` in the table of `role`, or `None` when that role
/// has no such editable column.
pub fn profile_column(role: Role, field: ProfileField) -> Option<usize> {
    match role {
        Role::Student => match field {
            ProfileField::Username => Some(student_col::USERNAME),
            ProfileField::Email => Some(student_col::EMAIL),
            ProfileField::Name => Some(student_col::FULL_NAME),
            ProfileField::Password => Some(student_col::PASSWORD),
            ProfileField::Photo => Some(student_col::PHOTO_URL),
            ProfileField::Phone | ProfileField::Bio => None,
        },
        Role::Lecturer => match field {
            ProfileField::Username => Some(staff_col::USERNAME),
            ProfileField::Email => Some(staff_col::EMAIL),
            ProfileField::Phone => Some(staff_col::PHONE),
            ProfileField::Name => Some(staff_col::FULL_NAME),
            ProfileField::Password => Some(staff_col::PASSWORD),
            ProfileField::Photo => Some(staff_col::PHOTO_URL),
            ProfileField::Bio => Some(staff_col::BIO),
        },
    }
}

/// Stored folder link of an account row.
pub fn folder_link_column(role: Role) -> usize {
    match role {
        Role::Student => student_col::DRIVE_FOLDER_LINK,
        Role::Lecturer => staff_col::DRIVE_FOLDER_LINK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn short_student_row_fills_missing_cells_with_empty_strings() {
        let record = student_from_row(&strings(&["1", "ayu@mail.test", "2141720001", "Ayu"]));
        assert_eq!(record.username, "2141720001");
        assert_eq!(record.full_name, "Ayu");
        assert_eq!(record.placement_address, "");
        assert_eq!(record.log_sheet_link, "");
    }

    #[test]
    fn logbook_row_layout_matches_header() {
        let entry = LogbookEntry {
            timestamp: "2026-10-16T01:00:00.000Z".into(),
            username: "2141720001".into(),
            attendance_status: "Present".into(),
            coordinates: Coordinates::new(-7.9, 112.6),
            address: "Jl. Raya No. 5".into(),
            document_url: "".into(),
            ..Default::default()
        };
        let row = logbook_to_row(&entry);
        assert_eq!(row.len(), LOGBOOK_HEADER.len());
        assert_eq!(row[logbook_col::USERNAME], "2141720001");
        assert_eq!(row[logbook_col::COORDINATES], "-7.9,112.6");
        assert_eq!(logbook_from_row(&row), entry);
    }

    #[test]
    fn profile_columns_per_role() {
        assert_eq!(profile_column(Role::Student, ProfileField::Password), Some(7));
        assert_eq!(profile_column(Role::Student, ProfileField::Photo), Some(8));
        assert_eq!(profile_column(Role::Student, ProfileField::Bio), None);
        assert_eq!(profile_column(Role::Lecturer, ProfileField::Username), Some(1));
        assert_eq!(profile_column(Role::Lecturer, ProfileField::Bio), Some(9));
        assert_eq!(folder_link_column(Role::Lecturer), 10);
    }
}
