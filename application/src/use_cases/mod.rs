//! Use cases (application services)

pub mod process_message;
pub(crate) mod shared;
