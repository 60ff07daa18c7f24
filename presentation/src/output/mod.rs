//! Output formatting for chat replies

pub mod console;
