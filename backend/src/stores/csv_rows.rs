//! CSV-backed row store.
//!
//! Each book is a directory under the store root, each table a CSV file inside
//! it (`<root>/<book>/<table>.csv`). Books are provisioned out-of-band, so a
//! missing directory is [`StoreError::BookNotFound`]; tables are created on
//! demand by [`RowStore::ensure_table`].
//!
//! Rows may have different widths. Appends open the file in append mode; cell
//! writes rewrite the whole table through a temporary file that is renamed
//! over the original. All mutations go through one mutex.

use super::{Row, RowStore, StoreError};
use csv::{ReaderBuilder, WriterBuilder};
use log::debug;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct CsvRowStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvRowStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(CsvRowStore {
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn book_dir(&self, book: &str) -> Result<PathBuf, StoreError> {
        let valid = !book.is_empty()
            && book != "."
            && book != ".."
            && !book.contains(['/', '\\']);
        let dir = self.root.join(book);
        if valid && dir.is_dir() {
            Ok(dir)
        } else {
            Err(StoreError::BookNotFound(book.to_string()))
        }
    }

    fn table_path(&self, book: &str, table: &str) -> Result<PathBuf, StoreError> {
        let file_name = format!("{}.csv", table.replace(['/', '\\'], "_"));
        Ok(self.book_dir(book)?.join(file_name))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock only means another writer panicked; the files are still consistent.
        self.write_lock.lock().unwrap_or_else(|p| p.into_inner())
    }
}

fn read_rows(path: &Path) -> Result<Vec<Row>, StoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn write_rows(path: &Path, rows: &[Row]) -> Result<(), StoreError> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = WriterBuilder::new().flexible(true).from_path(&tmp)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

impl RowStore for CsvRowStore {
    fn read_table(&self, book: &str, table: &str) -> Result<Option<Vec<Row>>, StoreError> {
        let path = self.table_path(book, table)?;
        if !path.exists() {
            return Ok(None);
        }
        read_rows(&path).map(Some)
    }

    fn ensure_table(&self, book: &str, table: &str, header: &[&str]) -> Result<bool, StoreError> {
        let path = self.table_path(book, table)?;
        let _guard = self.lock();
        if path.exists() {
            return Ok(false);
        }
        let header: Row = header.iter().map(|h| h.to_string()).collect();
        write_rows(&path, &[header])?;
        debug!("created table {} in book {}", table, book);
        Ok(true)
    }

    fn append_row(&self, book: &str, table: &str, row: Row) -> Result<(), StoreError> {
        let path = self.table_path(book, table)?;
        let _guard = self.lock();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = WriterBuilder::new().flexible(true).from_writer(file);
        writer.write_record(&row)?;
        writer.flush()?;
        Ok(())
    }

    fn write_cells(
        &self,
        book: &str,
        table: &str,
        row: usize,
        cells: &[(usize, String)],
    ) -> Result<(), StoreError> {
        let path = self.table_path(book, table)?;
        let _guard = self.lock();
        if !path.exists() {
            return Err(StoreError::RowOutOfRange {
                table: table.to_string(),
                row,
            });
        }
        let mut rows = read_rows(&path)?;
        let target = rows.get_mut(row).ok_or_else(|| StoreError::RowOutOfRange {
            table: table.to_string(),
            row,
        })?;
        for (column, value) in cells {
            if target.len() <= *column {
                target.resize(column + 1, String::new());
            }
            target[*column] = value.clone();
        }
        write_rows(&path, &rows)
    }
}
