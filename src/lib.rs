pub mod analysis;
pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod file_info;
pub mod filter;
pub mod output;
pub mod pattern;
pub mod pool;
pub mod repository;
pub mod scope;

pub use error::{RepoGuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_CHECK_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
