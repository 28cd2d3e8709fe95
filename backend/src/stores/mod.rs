//! Storage collaborators behind the operations.
//!
//! - [`RowStore`]: spreadsheet-like books of named tables whose rows are
//!   positional string cells. The accounts book holds the Students and Staff
//!   tables; every student owns a book with their Logbook and Reports tables.
//! - [`BlobStore`]: containers of uploaded objects with public URLs.
//!
//! Books and containers are referenced from account rows through links. The id
//! inside a link is its first run of 25 or more URL-safe characters, see
//! [`link_id`].
//!
//! Only [`tables`] knows which column holds which field.

pub mod csv_rows;
pub mod disk_blobs;
#[cfg(test)]
pub mod memory;
pub mod tables;

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// One row of a table, header row included.
pub type Row = Vec<String>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("blob index error: {0}")]
    Index(#[from] rusqlite::Error),

    #[error("book not found: {0}")]
    BookNotFound(String),

    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("row {row} is outside table {table}")]
    RowOutOfRange { table: String, row: usize },

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// Injected by test doubles and by adapters with no better variant.
    #[error("{0}")]
    Unavailable(String),
}

/// Row-oriented tabular store addressed by book id and table name.
pub trait RowStore: Send + Sync {
    /// All rows of `table`, or `None` when the book has no such table.
    fn read_table(&self, book: &str, table: &str) -> Result<Option<Vec<Row>>, StoreError>;

    /// Creates `table` with a single `header` row unless it exists.
    ///
    /// Returns `true` when the table was created.
    fn ensure_table(&self, book: &str, table: &str, header: &[&str]) -> Result<bool, StoreError>;

    fn append_row(&self, book: &str, table: &str, row: Row) -> Result<(), StoreError>;

    /// Overwrites `(column, value)` cells of one row in a single write; either
    /// every cell is stored or none is.
    ///
    /// `row` and the columns are 0-based and `row` counts the header. Rows
    /// shorter than a column are padded with empty cells.
    fn write_cells(
        &self,
        book: &str,
        table: &str,
        row: usize,
        cells: &[(usize, String)],
    ) -> Result<(), StoreError>;
}

/// Metadata of a stored object.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobObject {
    pub id: String,
    pub container: String,
    pub name: String,
    pub mime: String,
}

/// Object bytes served to the public.
#[derive(Debug, Clone)]
pub struct PublicBlob {
    pub object: BlobObject,
    pub bytes: Vec<u8>,
}

/// Container-oriented binary object store.
pub trait BlobStore: Send + Sync {
    fn has_container(&self, container: &str) -> Result<bool, StoreError>;

    /// Container used when a user has no usable folder link.
    fn root_container(&self) -> &str;

    fn create_object(
        &self,
        container: &str,
        name: &str,
        mime: &str,
        bytes: &[u8],
    ) -> Result<BlobObject, StoreError>;

    /// Makes the object readable by anyone holding its URL.
    fn set_public_read(&self, object_id: &str) -> Result<(), StoreError>;

    /// URL that downloads the object.
    fn download_url(&self, object: &BlobObject) -> String;

    /// URL that displays the object inline.
    fn view_url(&self, object: &BlobObject) -> String;

    /// Object and bytes if it exists and is public.
    fn open_public(&self, object_id: &str) -> Result<Option<PublicBlob>, StoreError>;
}

static LINK_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[-A-Za-z0-9_]{25,}").expect("link id pattern is valid")
});

/// Extracts the book or container id embedded in a link.
///
/// Returns the first run of at least 25 characters from `[A-Za-z0-9_-]`,
/// which also accepts a bare id.
pub fn link_id(link: &str) -> Option<String> {
    LINK_ID.find(link).map(|m| m.as_str().to_string())
}

/// Public URL of an object served by `GET /files/{id}`.
pub(crate) fn file_url(base: &str, object_id: &str, download: bool) -> String {
    if download {
        format!("{}/files/{}?download=1", base, object_id)
    } else {
        format!("{}/files/{}", base, object_id)
    }
}
