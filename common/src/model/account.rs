use serde::{Deserialize, Serialize};

/// One row of the Students table.
///
/// Records are provisioned out-of-band. The server only reads them, and the
/// profile update rewrites a handful of columns in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub email: String,
    /// Login identifier, doubles as the NIM (student roll number).
    pub username: String,
    pub full_name: String,
    pub class_name: String,
    pub enrollment_status: String,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub photo_url: String,
    pub placement_name: String,
    pub placement_address: String,
    pub internal_supervisor: String,
    pub external_supervisor: String,
    pub drive_folder_link: String,
    pub log_sheet_link: String,
}

/// One row of the Staff table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRecord {
    pub id: String,
    /// Login identifier, doubles as the staff number (NIP).
    pub username: String,
    pub email: String,
    pub phone: String,
    pub full_name: String,
    pub title: String,
    pub class_assignment: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub photo_url: String,
    pub bio: String,
    pub drive_folder_link: String,
    pub log_sheet_link: String,
}

/// Which account table a user lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Lecturer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Lecturer => "lecturer",
        }
    }
}

/// Resolved identity returned by a successful login.
///
/// Serialized with a `role` tag so clients can branch on it; the field names
/// follow the payload the dashboard client already consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Identity {
    Student(StudentIdentity),
    Lecturer(LecturerIdentity),
}

impl Identity {
    pub fn role(&self) -> Role {
        match self {
            Identity::Student(_) => Role::Student,
            Identity::Lecturer(_) => Role::Lecturer,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Identity::Student(s) => &s.id,
            Identity::Lecturer(l) => &l.id,
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Identity::Student(s) => &s.username,
            Identity::Lecturer(l) => &l.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentIdentity {
    pub id: String,
    pub email: String,
    pub username: String,
    pub name: String,
    pub class: String,
    #[serde(rename = "enrollmentStatus")]
    pub enrollment_status: String,
    pub phone: String,
    #[serde(rename = "photoUrl")]
    pub photo_url: String,
    pub internship_place: String,
    pub internship_addr: String,
    pub supervisor_internal: String,
    pub supervisor_external: String,
    pub link_folder: String,
    pub link_spreadsheet: String,
}

impl From<&StudentRecord> for StudentIdentity {
    fn from(r: &StudentRecord) -> Self {
        StudentIdentity {
            id: r.id.clone(),
            email: r.email.clone(),
            username: r.username.clone(),
            name: r.full_name.clone(),
            class: r.class_name.clone(),
            enrollment_status: r.enrollment_status.clone(),
            phone: r.phone.clone(),
            photo_url: r.photo_url.clone(),
            internship_place: r.placement_name.clone(),
            internship_addr: r.placement_address.clone(),
            supervisor_internal: r.internal_supervisor.clone(),
            supervisor_external: r.external_supervisor.clone(),
            link_folder: r.drive_folder_link.clone(),
            link_spreadsheet: r.log_sheet_link.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LecturerIdentity {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub name: String,
    #[serde(rename = "jabatan")]
    pub title: String,
    #[serde(rename = "classId")]
    pub class_assignment: String,
    #[serde(rename = "photoUrl")]
    pub photo_url: String,
    pub bio: String,
    pub link_folder: String,
    pub link_spreadsheet: String,
}

impl From<&StaffRecord> for LecturerIdentity {
    fn from(r: &StaffRecord) -> Self {
        LecturerIdentity {
            id: r.id.clone(),
            username: r.username.clone(),
            email: r.email.clone(),
            phone: r.phone.clone(),
            name: r.full_name.clone(),
            title: r.title.clone(),
            class_assignment: r.class_assignment.clone(),
            photo_url: r.photo_url.clone(),
            bio: r.bio.clone(),
            link_folder: r.drive_folder_link.clone(),
            link_spreadsheet: r.log_sheet_link.clone(),
        }
    }
}
