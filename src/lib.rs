pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod logging;
pub mod marker;
pub mod output;
pub mod scanner;
pub mod workspace;

pub use error::{Result, TodoGuardError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_MARKERS_FOUND: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
