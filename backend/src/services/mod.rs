//! # Services
//!
//! One module per operation family, plus the helpers they share.
//!
//! - `actions`: the `/api/exec` dispatcher routing every action.
//! - `files`: public download and inline view of uploaded objects.
//! - `auth`, `logbook`, `reports`, `profile`, `dashboard`: the operations.
//! - `accounts`, `attachments`: account table reads and attachment uploads.

pub mod accounts;
pub mod actions;
pub mod attachments;
pub mod auth;
pub mod dashboard;
pub mod files;
pub mod logbook;
pub mod profile;
pub mod reports;
