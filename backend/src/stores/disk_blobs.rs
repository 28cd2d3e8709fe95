//! Filesystem blob store with a SQLite object index.
//!
//! Containers are directories under the store root. Uploaded bytes are written
//! to `<root>/<container>/<md5>_<object id>.<ext>`, the extension guessed from
//! the MIME type. The `blobs.sqlite` index at the root keeps each object's
//! container, display name, MIME type, checksum, file path and public flag;
//! only objects flagged public are served by `GET /files/{id}`.

use super::{file_url, BlobObject, BlobStore, PublicBlob, StoreError};
use chrono::Utc;
use md5::Context;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

pub struct DiskBlobStore {
    root: PathBuf,
    public_url: String,
    root_container: String,
    index: Mutex<Connection>,
}

impl DiskBlobStore {
    /// Opens the store, creating the root, the root container and the index.
    pub fn open(
        root: impl Into<PathBuf>,
        public_url: &str,
        root_container: &str,
    ) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(root_container))?;
        let conn = Connection::open(root.join("blobs.sqlite"))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS blobs (
                id TEXT PRIMARY KEY,
                container TEXT NOT NULL,
                name TEXT NOT NULL,
                mime TEXT NOT NULL,
                md5 TEXT NOT NULL,
                path TEXT NOT NULL,
                public INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(DiskBlobStore {
            root,
            public_url: public_url.trim_end_matches('/').to_string(),
            root_container: root_container.to_string(),
            index: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.index.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn container_dir(&self, container: &str) -> Option<PathBuf> {
        let valid = !container.is_empty()
            && container != "."
            && container != ".."
            && !container.contains(['/', '\\']);
        let dir = self.root.join(container);
        (valid && dir.is_dir()).then_some(dir)
    }
}

impl BlobStore for DiskBlobStore {
    fn has_container(&self, container: &str) -> Result<bool, StoreError> {
        Ok(self.container_dir(container).is_some())
    }

    fn root_container(&self) -> &str {
        &self.root_container
    }

    fn create_object(
        &self,
        container: &str,
        name: &str,
        mime: &str,
        bytes: &[u8],
    ) -> Result<BlobObject, StoreError> {
        let dir = self
            .container_dir(container)
            .ok_or_else(|| StoreError::ContainerNotFound(container.to_string()))?;

        let id = Uuid::new_v4().simple().to_string();
        let mut hasher = Context::new();
        hasher.consume(bytes);
        let checksum = format!("{:x}", hasher.finalize());
        let extension = mime_guess::get_mime_extensions_str(mime)
            .and_then(|exts| exts.first())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        let path = dir.join(format!("{}_{}{}", checksum, id, extension));
        fs::write(&path, bytes)?;

        self.conn().execute(
            "INSERT INTO blobs (id, container, name, mime, md5, path, public, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
            params![
                id,
                container,
                name,
                mime,
                checksum,
                path.to_string_lossy().into_owned(),
                Utc::now().to_rfc3339()
            ],
        )?;

        Ok(BlobObject {
            id,
            container: container.to_string(),
            name: name.to_string(),
            mime: mime.to_string(),
        })
    }

    fn set_public_read(&self, object_id: &str) -> Result<(), StoreError> {
        let updated = self
            .conn()
            .execute("UPDATE blobs SET public = 1 WHERE id = ?1", params![object_id])?;
        if updated == 0 {
            return Err(StoreError::ObjectNotFound(object_id.to_string()));
        }
        Ok(())
    }

    fn download_url(&self, object: &BlobObject) -> String {
        file_url(&self.public_url, &object.id, true)
    }

    fn view_url(&self, object: &BlobObject) -> String {
        file_url(&self.public_url, &object.id, false)
    }

    fn open_public(&self, object_id: &str) -> Result<Option<PublicBlob>, StoreError> {
        let found = self
            .conn()
            .query_row(
                "SELECT container, name, mime, path FROM blobs WHERE id = ?1 AND public = 1",
                params![object_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;

        let Some((container, name, mime, path)) = found else {
            return Ok(None);
        };
        let bytes = fs::read(&path)?;
        Ok(Some(PublicBlob {
            object: BlobObject {
                id: object_id.to_string(),
                container,
                name,
                mime,
            },
            bytes,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store() -> (TempDir, DiskBlobStore) {
        let dir = TempDir::new().unwrap();
        let store = DiskBlobStore::open(dir.path(), "http://files.test/", "root").unwrap();
        (dir, store)
    }

    #[test]
    fn root_container_exists_after_open() {
        let (_dir, store) = open_store();
        assert!(store.has_container("root").unwrap());
        assert!(!store.has_container("missing-container").unwrap());
        assert!(!store.has_container("..").unwrap());
    }

    #[test]
    fn objects_are_private_until_shared() {
        let (_dir, store) = open_store();
        let object = store
            .create_object("root", "Selfie_2141720001_1", "image/png", b"png-bytes")
            .unwrap();
        assert_eq!(object.container, "root");
        assert!(store.open_public(&object.id).unwrap().is_none());

        store.set_public_read(&object.id).unwrap();
        let public = store.open_public(&object.id).unwrap().unwrap();
        assert_eq!(public.bytes, b"png-bytes");
        assert_eq!(public.object.mime, "image/png");
        assert_eq!(public.object.name, "Selfie_2141720001_1");
    }

    #[test]
    fn urls_point_at_the_files_route() {
        let (_dir, store) = open_store();
        let object = store
            .create_object("root", "Laporan_2141720001", "application/pdf", b"%PDF")
            .unwrap();
        assert_eq!(
            store.download_url(&object),
            format!("http://files.test/files/{}?download=1", object.id)
        );
        assert_eq!(
            store.view_url(&object),
            format!("http://files.test/files/{}", object.id)
        );
    }

    #[test]
    fn unknown_container_and_object_are_errors() {
        let (_dir, store) = open_store();
        assert!(matches!(
            store.create_object("nope", "x", "text/plain", b"x"),
            Err(StoreError::ContainerNotFound(_))
        ));
        assert!(matches!(
            store.set_public_read("missing"),
            Err(StoreError::ObjectNotFound(_))
        ));
    }
}
