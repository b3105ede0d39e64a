mod team;
mod user;

pub use team::{NewTeam, Team};
pub use user::User;
