pub mod badge;
pub mod common;
pub mod project;
pub mod user;
pub mod vote;
