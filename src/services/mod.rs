use std::sync::Arc;

use actix_web::web;

mod link;
mod session;
mod user;

pub use link::{LinkService, LinkServiceTrait};
pub use session::SessionService;
pub use user::{UserService, UserServiceTrait};

use crate::{
    config::Config,
    db::Database,
    repositories::{LinkRepository, UserRepository},
};

/// Service Register
pub fn register(db: Database, config: &Config, cfg: &mut web::ServiceConfig) {
    let user_repository = UserRepository::new(db.clone());
    let link_repository = LinkRepository::new(db);

    let session_service = SessionService::new(
        &config.auth.session_secret,
        config.auth.cookie_max_age_seconds as i64,
    );
    let user_service = UserService::new(Arc::new(user_repository.clone()));
    let link_service = LinkService::new(Arc::new(link_repository), config.app.base_url.clone());

    // The auth middleware resolves session subjects against the user store
    // directly, so the repository is registered alongside the services.
    cfg.app_data(web::Data::new(user_repository));
    cfg.app_data(web::Data::new(session_service));
    cfg.app_data(web::Data::new(user_service));
    cfg.app_data(web::Data::new(link_service));
}
