mod link;
mod user;

pub use link::{CreateLinkDto, Link, LinkRow, LinkStatsDto};
pub use user::{LoginDto, SignupDto, User, UserRole};
