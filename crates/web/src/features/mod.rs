pub mod badges;
pub mod projects;
pub mod users;
pub mod votes;
