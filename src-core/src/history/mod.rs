pub mod history_errors;
pub mod history_model;
pub mod history_rebuilder;
pub mod history_traits;

pub use history_errors::HistoryError;
pub use history_model::{AccountLogEntry, ReplayEntry};
pub use history_rebuilder::HistoryRebuilder;
pub use history_traits::AccountLogRepositoryTrait;
