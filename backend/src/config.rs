//! Server configuration.
//!
//! Loaded once in `main.rs` from `LOGBOOK_*` environment variables and shared
//! with every operation through [`AppContext`](crate::state::AppContext).
//! Nothing below the dispatcher reads the environment directly, so tests build
//! a config by hand and point it at in-memory stores.

use std::env;
use std::path::PathBuf;

/// Names of the tables the operations read and write.
#[derive(Debug, Clone)]
pub struct TableNames {
    /// Book holding both account tables.
    pub accounts_book: String,
    pub students: String,
    pub staff: String,
    /// Per-student logbook table, inside each student's own book.
    pub logbook: String,
    /// Per-student final-report table, inside each student's own book.
    pub reports: String,
}

impl Default for TableNames {
    fn default() -> Self {
        TableNames {
            accounts_book: "DATA-AKUN-LMS".to_string(),
            students: "InfoAkunMahasiswa".to_string(),
            staff: "InfoAkunDosen".to_string(),
            logbook: "Logbook".to_string(),
            reports: "Pengumpulan Tugas".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Root directory; books live under `sheets/`, blob containers under `drive/`.
    pub data_dir: PathBuf,
    pub tables: TableNames,
    /// Container used for profile photos when the user has no usable folder link.
    pub root_container: String,
    /// Base of the public URLs handed out for uploaded objects.
    pub public_url: String,
    /// Request body limit in bytes; attachments travel inline as data URIs.
    pub max_payload: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            tables: TableNames::default(),
            root_container: "root".to_string(),
            public_url: "http://127.0.0.1:8080".to_string(),
            max_payload: 10 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        let tables = TableNames::default();

        let host = env::var("LOGBOOK_HOST").unwrap_or(defaults.host);
        let port = env::var("LOGBOOK_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);
        let public_url = env::var("LOGBOOK_PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", host, port));

        AppConfig {
            data_dir: env::var("LOGBOOK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            tables: TableNames {
                accounts_book: env::var("LOGBOOK_ACCOUNTS_BOOK").unwrap_or(tables.accounts_book),
                students: env::var("LOGBOOK_STUDENTS_TABLE").unwrap_or(tables.students),
                staff: env::var("LOGBOOK_STAFF_TABLE").unwrap_or(tables.staff),
                logbook: env::var("LOGBOOK_LOGBOOK_TABLE").unwrap_or(tables.logbook),
                reports: env::var("LOGBOOK_REPORTS_TABLE").unwrap_or(tables.reports),
            },
            root_container: env::var("LOGBOOK_ROOT_CONTAINER").unwrap_or(defaults.root_container),
            public_url: public_url.trim_end_matches('/').to_string(),
            max_payload: env::var("LOGBOOK_MAX_PAYLOAD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_payload),
            host,
            port,
        }
    }

    pub fn sheets_dir(&self) -> PathBuf {
        self.data_dir.join("sheets")
    }

    pub fn drive_dir(&self) -> PathBuf {
        self.data_dir.join("drive")
    }
}
