mod articles;
mod middleware;
mod pages;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{MethodFilter, MethodRouter, on},
};
use tracing::error;

use crate::{application::articles::ArticleService, presentation::views::ViewRenderer};

pub use middleware::HTML_CONTENT_TYPE;

use middleware::{force_html, log_responses, set_request_context, strip_trailing_slash};
use routes::{ROUTES, RouteDef};

#[derive(Clone)]
pub struct HttpState {
    pub articles: Arc<ArticleService>,
    pub views: Arc<dyn ViewRenderer>,
    pub contact_email: Arc<str>,
}

/// Mount every entry of [`routes::ROUTES`] with the 404 fallback, before any middleware.
pub fn build_router(state: HttpState) -> Router {
    let router = ROUTES.iter().fold(Router::<HttpState>::new(), |router, def| {
        match method_router(def) {
            Some(handler) => router.route(def.pattern, handler),
            None => {
                error!(
                    target = "jotter::http::routes",
                    route = def.name,
                    "route has no handler and was not mounted"
                );
                router
            }
        }
    });

    router.fallback(pages::not_found).with_state(state)
}

fn method_router(def: &RouteDef) -> Option<MethodRouter<HttpState>> {
    let filter = MethodFilter::try_from(def.method.clone()).ok()?;
    let handler = match def.name {
        routes::HOME => on(filter, pages::home),
        routes::ABOUT => on(filter, pages::about),
        routes::ARTICLES_INDEX => on(filter, pages::articles_index),
        routes::ARTICLES_CREATE => on(filter, articles::create),
        routes::ARTICLES_STORE => on(filter, articles::store),
        routes::ARTICLES_SHOW => on(filter, articles::show),
        routes::ARTICLES_EDIT => on(filter, articles::edit),
        routes::ARTICLES_UPDATE => on(filter, articles::update),
        _ => return None,
    };
    Some(handler)
}


/// Full application: the router behind the middleware stack.
///
/// The routed app is mounted as a fallback service so `strip_trailing_slash`
/// rewrites the path before route matching.
pub fn build_app(state: HttpState) -> Router {
    Router::new()
        .fallback_service(build_router(state))
        .layer(axum_middleware::map_response(force_html))
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
        .layer(axum_middleware::from_fn(strip_trailing_slash))
}
