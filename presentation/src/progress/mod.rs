//! Progress reporting for chat runs

pub mod reporter;
