//! Session data: the profile, the files derived from it, and the scrollback.

pub mod file_table;
pub mod profile;
pub mod scrollback;
