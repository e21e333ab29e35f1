mod loader;
mod model;

pub use loader::{FileSystem, REPO_INFO_FILENAME, RealFileSystem, RepoInfoLoader};
pub use model::{CopyrightConfig, DEFAULT_COPYRIGHT_HOLDER, FnmatchList, RepoInfo};

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
