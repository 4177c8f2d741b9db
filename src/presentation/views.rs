use crate::application::error::HttpError;
use crate::domain::articles::{ArticleInput, ArticleRecord, BODY_FIELD, FieldErrors, TITLE_FIELD};
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

/// Data for the single-article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleShowView {
    pub article: ArticleRecord,
    pub edit_url: String,
}

/// Values, errors and submit target of the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFormData {
    pub title: String,
    pub body: String,
    pub target_url: String,
    pub errors: FieldErrors,
}

impl ArticleFormData {
    pub fn blank(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            ..Self::default()
        }
    }

    pub fn from_record(record: &ArticleRecord, target_url: impl Into<String>) -> Self {
        Self {
            title: record.title.clone(),
            body: record.body.clone(),
            target_url: target_url.into(),
            errors: FieldErrors::new(),
        }
    }

    /// Echo a rejected submission back with its errors.
    pub fn rejected(input: ArticleInput, target_url: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            title: input.title,
            body: input.body,
            target_url: target_url.into(),
            errors,
        }
    }

    pub fn title_error(&self) -> Option<&'static str> {
        self.errors.get(TITLE_FIELD)
    }

    pub fn body_error(&self) -> Option<&'static str> {
        self.errors.get(BODY_FIELD)
    }
}

/// A page the renderer knows how to produce.
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    ArticleShow(&'a ArticleShowView),
    ArticleCreate(&'a ArticleFormData),
    ArticleEdit(&'a ArticleFormData),
}

impl View<'_> {
    pub fn template_name(&self) -> &'static str {
        match self {
            View::ArticleShow(_) => "articles/show.html",
            View::ArticleCreate(_) => "articles/create.html",
            View::ArticleEdit(_) => "articles/edit.html",
        }
    }
}

/// Turns view data into HTML. Handlers only depend on this trait.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: View<'_>) -> Result<String, TemplateRenderError>;
}

/// Renderer backed by the compiled askama templates under `templates/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AskamaRenderer;

impl ViewRenderer for AskamaRenderer {
    fn render(&self, view: View<'_>) -> Result<String, TemplateRenderError> {
        let rendered = match view {
            View::ArticleShow(view) => ArticleShowTemplate { view }.render(),
            View::ArticleCreate(form) => ArticleCreateTemplate { form }.render(),
            View::ArticleEdit(form) => ArticleEditTemplate { form }.render(),
        };

        rendered.map_err(|err| {
            TemplateRenderError::new(
                "presentation::views::AskamaRenderer::render",
                "Template rendering failed",
                err,
            )
        })
    }
}

pub fn render_view_response(
    renderer: &dyn ViewRenderer,
    view: View<'_>,
    status: StatusCode,
) -> Response {
    match renderer.render(view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => HttpError::from(err).into_response(),
    }
}

#[derive(Template)]
#[template(path = "articles/show.html")]
struct ArticleShowTemplate<'a> {
    view: &'a ArticleShowView,
}

#[derive(Template)]
#[template(path = "articles/create.html")]
struct ArticleCreateTemplate<'a> {
    form: &'a ArticleFormData,
}

#[derive(Template)]
#[template(path = "articles/edit.html")]
struct ArticleEditTemplate<'a> {
    form: &'a ArticleFormData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::articles::validate_article;

    #[test]
    fn show_page_escapes_article_content() {
        let view = ArticleShowView {
            article: ArticleRecord {
                id: 5,
                title: "Tips & <tricks>".to_string(),
                body: "body with <script>alert(1)</script>".to_string(),
            },
            edit_url: "/articles/5/edit".to_string(),
        };

        let html = AskamaRenderer
            .render(View::ArticleShow(&view))
            .expect("render show");

        assert!(!html.contains("<tricks>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("/articles/5/edit"));
    }

    #[test]
    fn create_form_shows_errors_and_keeps_values() {
        let input = ArticleInput::new("Hi", "1234567890");
        let errors = validate_article(&input.title, &input.body);
        let form = ArticleFormData::rejected(input, "/articles", errors);

        let html = AskamaRenderer
            .render(View::ArticleCreate(&form))
            .expect("render create");

        assert!(html.contains(r#"action="/articles""#));
        assert!(html.contains("title length out of range"));
        assert!(html.contains("1234567890"));
        assert!(!html.contains("body too short"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let record = ArticleRecord {
            id: 9,
            title: "Existing title".to_string(),
            body: "existing body text".to_string(),
        };
        let form = ArticleFormData::from_record(&record, "/articles/9");

        let html = AskamaRenderer
            .render(View::ArticleEdit(&form))
            .expect("render edit");

        assert!(html.contains(r#"action="/articles/9""#));
        assert!(html.contains("Existing title"));
        assert!(html.contains("existing body text"));
    }

    #[test]
    fn template_names_follow_view_kind() {
        let form = ArticleFormData::blank("/articles");
        assert_eq!(
            View::ArticleCreate(&form).template_name(),
            "articles/create.html"
        );
        assert_eq!(View::ArticleEdit(&form).template_name(), "articles/edit.html");
    }
}
