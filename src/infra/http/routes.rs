//! Static named route table and URL generation.

use axum::{
    extract::{FromRequestParts, Path},
    http::{Method, request::Parts},
    response::Response,
};
use thiserror::Error;

use super::pages::not_found_response;

pub const HOME: &str = "home";
pub const ABOUT: &str = "about";
pub const ARTICLES_INDEX: &str = "articles.index";
pub const ARTICLES_CREATE: &str = "articles.create";
pub const ARTICLES_STORE: &str = "articles.store";
pub const ARTICLES_SHOW: &str = "articles.show";
pub const ARTICLES_EDIT: &str = "articles.edit";
pub const ARTICLES_UPDATE: &str = "articles.update";

pub(super) const HOME_PATH: &str = "/";
pub(super) const ABOUT_PATH: &str = "/about";
pub(super) const ARTICLES_PATH: &str = "/articles";
pub(super) const ARTICLES_CREATE_PATH: &str = "/articles/create";
pub(super) const ARTICLE_PATH: &str = "/articles/{id}";
pub(super) const ARTICLE_EDIT_PATH: &str = "/articles/{id}/edit";

const ID_PARAM: &str = "id";

#[derive(Debug, Clone)]
pub struct RouteDef {
    pub name: &'static str,
    pub method: Method,
    pub pattern: &'static str,
}

pub static ROUTES: [RouteDef; 8] = [
    RouteDef {
        name: HOME,
        method: Method::GET,
        pattern: HOME_PATH,
    },
    RouteDef {
        name: ABOUT,
        method: Method::GET,
        pattern: ABOUT_PATH,
    },
    RouteDef {
        name: ARTICLES_INDEX,
        method: Method::GET,
        pattern: ARTICLES_PATH,
    },
    RouteDef {
        name: ARTICLES_CREATE,
        method: Method::GET,
        pattern: ARTICLES_CREATE_PATH,
    },
    RouteDef {
        name: ARTICLES_STORE,
        method: Method::POST,
        pattern: ARTICLES_PATH,
    },
    RouteDef {
        name: ARTICLES_SHOW,
        method: Method::GET,
        pattern: ARTICLE_PATH,
    },
    RouteDef {
        name: ARTICLES_EDIT,
        method: Method::GET,
        pattern: ARTICLE_EDIT_PATH,
    },
    RouteDef {
        name: ARTICLES_UPDATE,
        method: Method::POST,
        pattern: ARTICLE_PATH,
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown route `{0}`")]
    UnknownRoute(String),
    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam { route: &'static str, param: String },
    #[error("parameter `{param}` must be decimal digits, got `{value}`")]
    InvalidParam { param: String, value: String },
}

pub fn route(name: &str) -> Option<&'static RouteDef> {
    ROUTES.iter().find(|def| def.name == name)
}

/// Build the path of a named route, substituting `{param}` segments.
pub fn url_for(name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
    let def = route(name).ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

    let mut url = String::with_capacity(def.pattern.len());
    for segment in def.pattern.split('/').skip(1) {
        url.push('/');
        match segment
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            Some(param) => {
                let value = params
                    .iter()
                    .find(|(key, _)| *key == param)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| RouteError::MissingParam {
                        route: def.name,
                        param: param.to_string(),
                    })?;
                if param == ID_PARAM && !is_decimal(value) {
                    return Err(RouteError::InvalidParam {
                        param: param.to_string(),
                        value: value.to_string(),
                    });
                }
                url.push_str(value);
            }
            None => url.push_str(segment),
        }
    }

    Ok(url)
}

/// Path of a named route whose only parameter is an article id.
pub fn article_url(name: &str, id: i64) -> Result<String, RouteError> {
    url_for(name, &[(ID_PARAM, &id.to_string())])
}

fn is_decimal(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an `{id}` path segment; anything other than decimal digits fitting an i64 is rejected.
pub fn parse_article_id(raw: &str) -> Option<i64> {
    if !is_decimal(raw) {
        return None;
    }
    raw.parse().ok()
}

/// Article id taken from the `{id}` path segment. Non-numeric ids render the 404 page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleId(pub i64);

impl<S> FromRequestParts<S> for ArticleId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found_response())?;

        parse_article_id(&raw)
            .map(ArticleId)
            .ok_or_else(not_found_response)
    }
}
