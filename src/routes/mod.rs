use actix_web::{middleware::from_fn, web, HttpResponse, Responder};

use crate::{
    handlers::{
        admin_list_handler, create_handler, list_own_handler, login_handler, login_page,
        redirect_handler, signup_handler, signup_page, stats_handler,
    },
    middleware::auth::{authenticate, require_role},
    models::UserRole,
    types::{AppState, HealthStatus},
};

// Handler function for the health check endpoint
async fn health_check(data: web::Data<AppState>) -> impl Responder {
    let uptime = data.start_time.elapsed().as_secs();

    let status = HealthStatus {
        status: String::from("OK"),
        version: data.version.clone(),
        db_health: data.db.health_check().await,
        uptime_seconds: uptime,
    };

    HttpResponse::Ok().json(status)
}

// Configure all routes function
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));

    // Account routes, reachable without a session
    cfg.service(
        web::scope("/user")
            .route("/signup", web::get().to(signup_page))
            .route("/login", web::get().to(login_page))
            .route("/signup", web::post().to(signup_handler))
            .route("/login", web::post().to(login_handler)),
    );

    // Everything else requires an authenticated user. /admin is registered
    // before the short-id matcher so it is not swallowed by it.
    cfg.service(
        web::scope("")
            .wrap(from_fn(authenticate))
            .route("/", web::get().to(list_own_handler))
            .route("/", web::post().to(create_handler))
            .service(
                web::scope("/admin")
                    .wrap(from_fn(require_role(&[UserRole::Admin])))
                    .route("", web::get().to(admin_list_handler)),
            )
            .route("/{short_id}", web::get().to(redirect_handler))
            .route("/{short_id}/stats", web::get().to(stats_handler)),
    );
}
