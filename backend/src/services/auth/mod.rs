//! Login: resolves a free-form identifier and password to an account.
//!
//! Students are searched before staff. A student matches on email, username
//! (NIM) or phone; a staff member on username (NIP) or email. The first
//! matching row wins, so identifiers are expected to be unique across rows.

pub mod login;
