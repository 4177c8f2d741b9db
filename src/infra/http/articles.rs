use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::{StatusCode, header::LOCATION},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    application::{
        articles::{StoreOutcome, UpdateOutcome},
        error::{HttpError, INTERNAL_ERROR_MESSAGE},
    },
    domain::articles::ArticleInput,
    presentation::views::{ArticleFormData, ArticleShowView, View, render_view_response},
};

use super::{
    HttpState,
    routes::{self, ArticleId, RouteError},
};

const NO_CHANGES_MESSAGE: &str = "You haven't made any changes!";

/// Submitted article form. Missing fields arrive as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ArticleForm {
    title: String,
    body: String,
}

impl From<ArticleForm> for ArticleInput {
    fn from(form: ArticleForm) -> Self {
        ArticleInput::new(form.title, form.body)
    }
}

/// A body that cannot be read as a form counts as a submission with empty fields.
fn submitted_input(form: Result<Form<ArticleForm>, FormRejection>) -> ArticleInput {
    match form {
        Ok(Form(form)) => form.into(),
        Err(rejection) => {
            debug!(
                target = "jotter::http::articles",
                error = %rejection,
                "unreadable form body treated as empty"
            );
            ArticleInput::default()
        }
    }
}

fn route_error(source: &'static str, err: RouteError) -> HttpError {
    HttpError::from_error(
        source,
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE,
        &err,
    )
}

pub(super) async fn show(
    State(state): State<HttpState>,
    ArticleId(id): ArticleId,
) -> Result<Response, HttpError> {
    const SOURCE: &str = "infra::http::articles::show";

    let article = state
        .articles
        .load(id)
        .await
        .map_err(|err| HttpError::from_article_error(SOURCE, err))?;
    let edit_url =
        routes::article_url(routes::ARTICLES_EDIT, id).map_err(|err| route_error(SOURCE, err))?;

    let view = ArticleShowView { article, edit_url };
    Ok(render_view_response(
        state.views.as_ref(),
        View::ArticleShow(&view),
        StatusCode::OK,
    ))
}

pub(super) async fn create(State(state): State<HttpState>) -> Result<Response, HttpError> {
    let target = routes::url_for(routes::ARTICLES_STORE, &[])
        .map_err(|err| route_error("infra::http::articles::create", err))?;

    let form = ArticleFormData::blank(target);
    Ok(render_view_response(
        state.views.as_ref(),
        View::ArticleCreate(&form),
        StatusCode::OK,
    ))
}

pub(super) async fn store(
    State(state): State<HttpState>,
    form: Result<Form<ArticleForm>, FormRejection>,
) -> Result<Response, HttpError> {
    const SOURCE: &str = "infra::http::articles::store";

    let input = submitted_input(form);
    let outcome = state
        .articles
        .store(&input)
        .await
        .map_err(|err| HttpError::from_article_error(SOURCE, err))?;

    match outcome {
        StoreOutcome::Created { id } => {
            Ok(Html(format!("insertion successful, ID is {id}")).into_response())
        }
        StoreOutcome::Invalid(errors) => {
            let target = routes::url_for(routes::ARTICLES_STORE, &[])
                .map_err(|err| route_error(SOURCE, err))?;
            let form = ArticleFormData::rejected(input, target, errors);
            Ok(render_view_response(
                state.views.as_ref(),
                View::ArticleCreate(&form),
                StatusCode::OK,
            ))
        }
    }
}

pub(super) async fn edit(
    State(state): State<HttpState>,
    ArticleId(id): ArticleId,
) -> Result<Response, HttpError> {
    const SOURCE: &str = "infra::http::articles::edit";

    let article = state
        .articles
        .load(id)
        .await
        .map_err(|err| HttpError::from_article_error(SOURCE, err))?;
    let target =
        routes::article_url(routes::ARTICLES_UPDATE, id).map_err(|err| route_error(SOURCE, err))?;

    let form = ArticleFormData::from_record(&article, target);
    Ok(render_view_response(
        state.views.as_ref(),
        View::ArticleEdit(&form),
        StatusCode::OK,
    ))
}

pub(super) async fn update(
    State(state): State<HttpState>,
    ArticleId(id): ArticleId,
    form: Result<Form<ArticleForm>, FormRejection>,
) -> Result<Response, HttpError> {
    const SOURCE: &str = "infra::http::articles::update";

    let input = submitted_input(form);
    let outcome = state
        .articles
        .update(id, &input)
        .await
        .map_err(|err| HttpError::from_article_error(SOURCE, err))?;

    match outcome {
        UpdateOutcome::Updated => {
            let location = routes::article_url(routes::ARTICLES_SHOW, id)
                .map_err(|err| route_error(SOURCE, err))?;
            // 302 rather than the 303 `Redirect::to` would send.
            Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
        }
        UpdateOutcome::Unchanged => Ok(Html(NO_CHANGES_MESSAGE).into_response()),
        UpdateOutcome::Invalid(errors) => {
            let target = routes::article_url(routes::ARTICLES_UPDATE, id)
                .map_err(|err| route_error(SOURCE, err))?;
            let form = ArticleFormData::rejected(input, target, errors);
            Ok(render_view_response(
                state.views.as_ref(),
                View::ArticleEdit(&form),
                StatusCode::OK,
            ))
        }
    }
}
