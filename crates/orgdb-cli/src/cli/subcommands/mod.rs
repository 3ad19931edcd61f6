mod history;
mod org;

pub use history::HistoryCommands;
pub use org::OrgCommands;
