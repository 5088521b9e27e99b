mod link;
mod user;

pub use link::{
    admin_list_handler, create_handler, list_own_handler, redirect_handler, stats_handler,
};
pub use user::{login_handler, login_page, render_login_page, signup_handler, signup_page};

use askama::Template;

use crate::errors::AppError;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Render a template into an HTML string
pub fn render_html<T: Template>(template: &T) -> Result<String, AppError> {
    template
        .render()
        .map_err(|e| AppError::Internal(format!("Template rendering failed: {}", e)))
}
