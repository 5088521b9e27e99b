mod link;
mod user;

pub use link::{LinkRepository, LinkRepositoryTrait};
pub use user::{UserRepository, UserRepositoryTrait};

#[cfg(test)]
pub use link::MockLinkRepositoryTrait;
#[cfg(test)]
pub use user::MockUserRepositoryTrait;
