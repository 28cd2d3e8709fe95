//! Types shared between the logbook server and its clients.
//!
//! - `model`: account records, identities, logbook and report entries, and the
//!   aggregated `LogbookView` rows served to supervising staff.
//! - `requests`: the tagged action payloads accepted by the dispatcher.
//! - `responses`: the uniform success/error envelope.
//! - `listing`: client-side filtering, sorting and pagination over
//!   aggregated logbook rows.

pub mod listing;
pub mod model;
pub mod requests;
pub mod responses;
