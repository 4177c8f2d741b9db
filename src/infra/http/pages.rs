use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::application::error::ErrorReport;

use super::HttpState;

const NOT_FOUND_PAGE: &str =
    "<h1>Requested page not found :(</h1><p>If you have questions, please contact us.</p>";

pub(super) async fn home() -> Html<&'static str> {
    Html("<h1>Hello, welcome to jotter!</h1>")
}

pub(super) async fn about(State(state): State<HttpState>) -> Html<String> {
    let email = &state.contact_email;
    Html(format!(
        "This blog is used to record programming notes. If you have feedback or suggestions, \
         please contact <a href=\"mailto:{email}\">{email}</a>"
    ))
}

// Listing is not implemented yet; the route only acknowledges the request.
pub(super) async fn articles_index() -> Html<&'static str> {
    Html("Access article list.")
}

pub(super) async fn not_found() -> Response {
    not_found_response()
}

pub(crate) fn not_found_response() -> Response {
    let mut response = (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response();
    ErrorReport::from_message(
        "infra::http::pages::not_found_response",
        "No route matched the request",
    )
    .attach(&mut response);
    response
}
