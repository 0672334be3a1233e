//! Shared helpers for file handling and input validation.

pub mod io;
pub mod validation;
