//! # Profile Service
//!
//! ## Sub-modules:
//! - `update`: overwrites the editable columns of a student or staff row and
//!   optionally stores a new profile photo.

pub mod update;
