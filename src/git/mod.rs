//! Git operations using git2-rs.

pub mod history;
pub mod tags;

pub use history::{load_history, open_repository, read_history, RepositoryHistory};
pub use tags::get_all_tags;
