pub mod dispatch;
pub mod export;
pub mod history;
pub mod import;
pub mod org;
pub mod schema;
pub mod shared;
pub mod stats;
