//! # Logbook Service
//!
//! Daily check-ins are written to and read from each student's own book.
//!
//! ## Sub-modules:
//! - `submit`: validates one check-in, uploads its selfie and optional
//!   document, then appends the row to the student's `Logbook` table.
//! - `aggregate`: reads every student's `Logbook` table for supervising staff,
//!   flagging check-ins whose address does not match the placement.
//! - `location`: the address plausibility rule used by `aggregate`.

pub mod aggregate;
pub mod location;
pub mod submit;
