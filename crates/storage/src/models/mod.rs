mod badge;
mod project;
mod user;
mod vote;

pub use badge::{Badge, BadgeTier};
pub use project::Project;
pub use user::User;
pub use vote::{Vote, VoteType};
