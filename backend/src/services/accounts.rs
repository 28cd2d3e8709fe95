//! Typed reads of the account tables and link resolution shared by the
//! operations.

use crate::error::{AppError, AppResult};
use crate::state::AppContext;
use crate::stores::tables::{staff_from_row, student_from_row};
use crate::stores::{link_id, Row};
use common::model::account::{StaffRecord, StudentRecord};
use log::warn;

/// Rows of an accounts table, header skipped, each paired with its row index
/// in the table (header = 0).
fn read_accounts(ctx: &AppContext, table: &str) -> AppResult<Vec<(usize, Row)>> {
    let book = &ctx.config.tables.accounts_book;
    let rows = match ctx.rows.read_table(book, table)? {
        Some(rows) => rows,
        None => {
            warn!("accounts table {} is missing from book {}", table, book);
            Vec::new()
        }
    };
    Ok(rows.into_iter().enumerate().skip(1).collect())
}

pub fn read_students(ctx: &AppContext) -> AppResult<Vec<(usize, StudentRecord)>> {
    Ok(read_accounts(ctx, &ctx.config.tables.students)?
        .into_iter()
        .map(|(i, row)| (i, student_from_row(&row)))
        .collect())
}

pub fn read_staff(ctx: &AppContext) -> AppResult<Vec<(usize, StaffRecord)>> {
    Ok(read_accounts(ctx, &ctx.config.tables.staff)?
        .into_iter()
        .map(|(i, row)| (i, staff_from_row(&row)))
        .collect())
}

/// First student whose username matches.
pub fn find_student(ctx: &AppContext, username: &str) -> AppResult<StudentRecord> {
    read_students(ctx)?
        .into_iter()
        .map(|(_, s)| s)
        .find(|s| loose_eq(&s.username, username))
        .ok_or_else(|| AppError::UserNotFound(username.to_string()))
}

/// Cell comparison used for identifiers and ids.
///
/// Equal strings match. So do two digit strings that differ only in leading
/// zeros, because the store may have dropped a phone number's leading zero or
/// a NIM's quoting (`"0812345"` matches `812345`). Digits are compared as
/// text, so identifiers of any length keep every digit. An empty input never
/// matches.
pub fn loose_eq(cell: &str, input: &str) -> bool {
    let (cell, input) = (cell.trim(), input.trim());
    if input.is_empty() {
        return false;
    }
    if cell == input {
        return true;
    }
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    is_digits(cell)
        && is_digits(input)
        && cell.trim_start_matches('0') == input.trim_start_matches('0')
}

/// Book id of a student's log sheet: the request's link if given, else the
/// stored one.
pub fn resolve_log_book(requested: Option<&str>, student: &StudentRecord) -> AppResult<String> {
    let link = requested
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(&student.log_sheet_link);
    link_id(link).ok_or_else(|| AppError::InvalidSheetLink(link.to_string()))
}

/// Folder link to upload into: the request's link if given, else the stored one.
pub fn folder_link<'a>(requested: Option<&'a str>, stored: &'a str) -> &'a str {
    requested
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(stored)
}
