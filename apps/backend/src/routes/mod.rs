pub mod achievements;
pub mod auth;
pub mod content;
pub mod limits;
pub mod progress;
pub mod users;
