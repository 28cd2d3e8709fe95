//! In-memory stores and account fixtures for tests.

use super::tables::{staff_to_row, student_to_row};
use super::{BlobObject, BlobStore, PublicBlob, Row, RowStore, StoreError};
use crate::config::AppConfig;
use crate::state::AppContext;
use common::model::account::{StaffRecord, StudentRecord};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MemoryRowStore {
    books: Mutex<HashMap<String, HashMap<String, Vec<Row>>>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryRowStore {
    pub fn add_book(&self, book: &str) {
        self.books
            .lock()
            .unwrap()
            .entry(book.to_string())
            .or_default();
    }

    pub fn put_table(&self, book: &str, table: &str, rows: Vec<Row>) {
        self.books
            .lock()
            .unwrap()
            .entry(book.to_string())
            .or_default()
            .insert(table.to_string(), rows);
    }

    pub fn table(&self, book: &str, table: &str) -> Option<Vec<Row>> {
        self.books.lock().unwrap().get(book)?.get(table).cloned()
    }

    /// Makes every call touching `book` fail.
    pub fn fail_book(&self, book: &str) {
        self.failing.lock().unwrap().insert(book.to_string());
    }

    fn check(&self, book: &str) -> Result<(), StoreError> {
        if self.failing.lock().unwrap().contains(book) {
            return Err(StoreError::Unavailable(format!("book {} is unreachable", book)));
        }
        if !self.books.lock().unwrap().contains_key(book) {
            return Err(StoreError::BookNotFound(book.to_string()));
        }
        Ok(())
    }
}

impl RowStore for MemoryRowStore {
    fn read_table(&self, book: &str, table: &str) -> Result<Option<Vec<Row>>, StoreError> {
        self.check(book)?;
        Ok(self.table(book, table))
    }

    fn ensure_table(&self, book: &str, table: &str, header: &[&str]) -> Result<bool, StoreError> {
        self.check(book)?;
        let mut books = self.books.lock().unwrap();
        let tables = books.entry(book.to_string()).or_default();
        if tables.contains_key(table) {
            return Ok(false);
        }
        tables.insert(
            table.to_string(),
            vec![header.iter().map(|h| h.to_string()).collect()],
        );
        Ok(true)
    }

    fn append_row(&self, book: &str, table: &str, row: Row) -> Result<(), StoreError> {
        self.check(book)?;
        let mut books = self.books.lock().unwrap();
        books
            .entry(book.to_string())
            .or_default()
            .entry(table.to_string())
            .or_default()
            .push(row);
        Ok(())
    }

    fn write_cells(
        &self,
        book: &str,
        table: &str,
        row: usize,
        cells: &[(usize, String)],
    ) -> Result<(), StoreError> {
        self.check(book)?;
        let mut books = self.books.lock().unwrap();
        let out_of_range = || StoreError::RowOutOfRange {
            table: table.to_string(),
            row,
        };
        let target = books
            .get_mut(book)
            .and_then(|t| t.get_mut(table))
            .and_then(|rows| rows.get_mut(row))
            .ok_or_else(out_of_range)?;
        for (column, value) in cells {
            if target.len() <= *column {
                target.resize(column + 1, String::new());
            }
            target[*column] = value.clone();
        }
        Ok(())
    }
}

pub struct StoredObject {
    pub object: BlobObject,
    pub bytes: Vec<u8>,
    pub public: bool,
}

pub struct MemoryBlobStore {
    containers: Mutex<HashSet<String>>,
    objects: Mutex<HashMap<String, StoredObject>>,
    next_id: AtomicUsize,
    fail_uploads: AtomicBool,
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        let store = MemoryBlobStore {
            containers: Mutex::new(HashSet::new()),
            objects: Mutex::new(HashMap::new()),
            next_id: AtomicUsize::new(1),
            fail_uploads: AtomicBool::new(false),
        };
        store.add_container("root");
        store
    }
}

impl MemoryBlobStore {
    pub fn add_container(&self, container: &str) {
        self.containers.lock().unwrap().insert(container.to_string());
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// All stored objects as (object, bytes, public), ordered by id.
    pub fn objects(&self) -> Vec<(BlobObject, Vec<u8>, bool)> {
        let objects = self.objects.lock().unwrap();
        let mut all: Vec<_> = objects
            .values()
            .map(|o| (o.object.clone(), o.bytes.clone(), o.public))
            .collect();
        all.sort_by_key(|(o, _, _)| o.id.parse::<usize>().unwrap_or(0));
        all
    }
}

impl BlobStore for MemoryBlobStore {
    fn has_container(&self, container: &str) -> Result<bool, StoreError> {
        Ok(self.containers.lock().unwrap().contains(container))
    }

    fn root_container(&self) -> &str {
        "root"
    }

    fn create_object(
        &self,
        container: &str,
        name: &str,
        mime: &str,
        bytes: &[u8],
    ) -> Result<BlobObject, StoreError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("blob store is unreachable".into()));
        }
        if !self.has_container(container)? {
            return Err(StoreError::ContainerNotFound(container.to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let object = BlobObject {
            id: id.clone(),
            container: container.to_string(),
            name: name.to_string(),
            mime: mime.to_string(),
        };
        self.objects.lock().unwrap().insert(
            id,
            StoredObject {
                object: object.clone(),
                bytes: bytes.to_vec(),
                public: false,
            },
        );
        Ok(object)
    }

    fn set_public_read(&self, object_id: &str) -> Result<(), StoreError> {
        match self.objects.lock().unwrap().get_mut(object_id) {
            Some(o) => {
                o.public = true;
                Ok(())
            }
            None => Err(StoreError::ObjectNotFound(object_id.to_string())),
        }
    }

    fn download_url(&self, object: &BlobObject) -> String {
        super::file_url("http://files.test", &object.id, true)
    }

    fn view_url(&self, object: &BlobObject) -> String {
        super::file_url("http://files.test", &object.id, false)
    }

    fn open_public(&self, object_id: &str) -> Result<Option<PublicBlob>, StoreError> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .get(object_id)
            .filter(|o| o.public)
            .map(|o| PublicBlob {
                object: o.object.clone(),
                bytes: o.bytes.clone(),
            }))
    }
}

pub const ACCOUNTS: &str = "DATA-AKUN-LMS";
pub const AYU_BOOK: &str = "1AyuLogSheetAAAAAAAAAAAAAAAAAAA";
pub const AYU_FOLDER: &str = "1AyuFolderBBBBBBBBBBBBBBBBBBBBB";
pub const BAYU_BOOK: &str = "1BayuLogSheetCCCCCCCCCCCCCCCCCC";
pub const CITRA_BOOK: &str = "1CitraLogSheetDDDDDDDDDDDDDDDDD";

pub fn sheet_link(id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}/edit", id)
}

pub fn folder_link(id: &str) -> String {
    format!("https://drive.google.com/drive/folders/{}", id)
}

pub fn student(id: &str, username: &str, name: &str, book: &str, placement: &str) -> StudentRecord {
    StudentRecord {
        id: id.into(),
        email: format!("{}@student.test", username),
        username: username.into(),
        full_name: name.into(),
        class_name: "TI-3A".into(),
        enrollment_status: "Aktif".into(),
        phone: format!("0812{}", id),
        password: format!("pw-{}", username),
        photo_url: String::new(),
        placement_name: "Dinas Kominfo".into(),
        placement_address: placement.into(),
        internal_supervisor: "Dr. Budi".into(),
        external_supervisor: "Ir. Sari".into(),
        drive_folder_link: folder_link(AYU_FOLDER),
        log_sheet_link: sheet_link(book),
    }
}

pub fn lecturer(id: &str, username: &str, email: &str, password: &str) -> StaffRecord {
    StaffRecord {
        id: id.into(),
        username: username.into(),
        email: email.into(),
        phone: "08111".into(),
        full_name: "Dr. Budi Santoso".into(),
        title: "Lektor".into(),
        class_assignment: "TI-3A".into(),
        password: password.into(),
        photo_url: String::new(),
        bio: String::new(),
        drive_folder_link: String::new(),
        log_sheet_link: String::new(),
    }
}

/// Test wiring: memory stores holding the two account tables and the given
/// students' books (each with no tables yet).
pub struct Fixture {
    pub rows: Arc<MemoryRowStore>,
    pub blobs: Arc<MemoryBlobStore>,
    pub ctx: AppContext,
}

impl Fixture {
    pub fn new(students: &[StudentRecord], staff: &[StaffRecord]) -> Self {
        let config = AppConfig::default();
        let rows = Arc::new(MemoryRowStore::default());
        let blobs = Arc::new(MemoryBlobStore::default());
        blobs.add_container(AYU_FOLDER);

        let mut student_rows = vec![vec!["id".to_string(), "email_address".to_string()]];
        student_rows.extend(students.iter().map(student_to_row));
        rows.put_table(ACCOUNTS, &config.tables.students, student_rows);

        let mut staff_rows = vec![vec!["id".to_string(), "username".to_string()]];
        staff_rows.extend(staff.iter().map(staff_to_row));
        rows.put_table(ACCOUNTS, &config.tables.staff, staff_rows);

        for s in students {
            if let Some(book) = super::link_id(&s.log_sheet_link) {
                rows.add_book(&book);
            }
        }

        let ctx = AppContext::new(config, rows.clone(), blobs.clone());
        Fixture { rows, blobs, ctx }
    }

    pub fn student_row(&self, index: usize) -> Row {
        self.rows
            .table(ACCOUNTS, &self.ctx.config.tables.students)
            .unwrap()[index + 1]
            .clone()
    }

    pub fn staff_row(&self, index: usize) -> Row {
        self.rows
            .table(ACCOUNTS, &self.ctx.config.tables.staff)
            .unwrap()[index + 1]
            .clone()
    }
}
