use actix_web::{http::header::LOCATION, web, HttpResponse, Responder};
use askama::Template;
use log::{debug, info};

use crate::{
    errors::AppError,
    middleware::auth::CurrentUser,
    models::{CreateLinkDto, LinkRow},
    repositories::LinkRepository,
    services::{LinkService, LinkServiceTrait},
};

use super::{render_html, HTML_CONTENT_TYPE};

pub type LinkServiceType = LinkService<LinkRepository>;

type Result<T> = std::result::Result<T, AppError>;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub rows: Vec<LinkRow>,
    pub show_owner: bool,
}

/// Create link route handler
pub async fn create_handler(
    user: web::ReqData<CurrentUser>,
    dto: web::Form<CreateLinkDto>,
    service: web::Data<LinkServiceType>,
) -> Result<impl Responder> {
    let user = user.into_inner().0;
    service.create(&user.id, dto.into_inner()).await?;

    // Back to the home listing
    Ok(HttpResponse::Found()
        .insert_header((LOCATION, "/"))
        .finish())
}

/// List own links route handler
pub async fn list_own_handler(
    user: web::ReqData<CurrentUser>,
    service: web::Data<LinkServiceType>,
) -> Result<impl Responder> {
    let user = user.into_inner().0;
    let rows = service.list_for_owner(&user.id).await?;
    let body = render_html(&IndexTemplate {
        rows,
        show_owner: false,
    })?;

    Ok(HttpResponse::Ok().content_type(HTML_CONTENT_TYPE).body(body))
}

/// Admin list-all route handler. Role enforcement happens in the routing
/// layer, not here.
pub async fn admin_list_handler(service: web::Data<LinkServiceType>) -> Result<impl Responder> {
    let rows = service.list_all().await?;
    let body = render_html(&IndexTemplate {
        rows,
        show_owner: true,
    })?;

    Ok(HttpResponse::Ok().content_type(HTML_CONTENT_TYPE).body(body))
}

/// Redirect route handler: records the visit and redirects to the stored
/// original URL
pub async fn redirect_handler(
    path: web::Path<String>,
    service: web::Data<LinkServiceType>,
) -> Result<impl Responder> {
    let short_id = path.into_inner();
    debug!("Redirect requested for short id: {}", short_id);

    let link = service.record_visit(&short_id).await?;

    info!("Redirecting '{}' to '{}'", short_id, link.original_url);
    Ok(HttpResponse::TemporaryRedirect()
        .insert_header((LOCATION, link.original_url.clone()))
        .finish())
}

/// Stats route handler
pub async fn stats_handler(
    path: web::Path<String>,
    service: web::Data<LinkServiceType>,
) -> Result<impl Responder> {
    let short_id = path.into_inner();
    let stats = service.stats(&short_id).await?;

    Ok(HttpResponse::Ok().json(stats))
}
