//! # Report Service
//!
//! Final internship reports, one row per submission in the submitting
//! student's `Pengumpulan Tugas` table.
//!
//! ## Sub-modules:
//! - `submit`: uploads the report file and appends the report row.

pub mod submit;
