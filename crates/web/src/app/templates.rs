//! HTML rendering.
//!
//! The template set is compiled into the binary and parsed once at startup;
//! a parse error there is fatal. Pages are rendered into a buffer first, so a
//! failing render turns into a clean 500 instead of a half-written page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use tera::{Context, Tera};

use snippetbox_core::{Snippet, human_date};

use crate::app::errors::AppError;

const TEMPLATES: [(&str, &str); 7] = [
    ("base.html", include_str!("../../ui/html/base.html")),
    ("partials/nav.html", include_str!("../../ui/html/partials/nav.html")),
    ("pages/home.html", include_str!("../../ui/html/pages/home.html")),
    ("pages/view.html", include_str!("../../ui/html/pages/view.html")),
    ("pages/create.html", include_str!("../../ui/html/pages/create.html")),
    ("pages/signup.html", include_str!("../../ui/html/pages/signup.html")),
    ("pages/login.html", include_str!("../../ui/html/pages/login.html")),
];

/// Parsed template cache. Read-only after construction, shared across requests.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        tracing::debug!(count = TEMPLATES.len(), "templates loaded");
        Ok(Self { tera })
    }

    /// Render `page` with `data`, answering with `status`.
    pub fn render(
        &self,
        status: StatusCode,
        page: &str,
        data: &TemplateData,
    ) -> Result<Response, AppError> {
        let context = Context::from_serialize(data)?;
        let body = self.tera.render(page, &context)?;
        Ok((status, Html(body)).into_response())
    }
}

/// Dynamic data available to every page.
#[derive(Debug, Default, Serialize)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    pub csrf_token: String,
    pub snippet: Option<SnippetView>,
    pub snippets: Vec<SnippetView>,
    /// The submitted (or blank) form, including its validator state.
    pub form: Option<serde_json::Value>,
}

impl TemplateData {
    pub fn with_form<F: Serialize>(mut self, form: &F) -> Result<Self, AppError> {
        self.form = Some(serde_json::to_value(form)?);
        Ok(self)
    }
}

/// A snippet with its timestamps pre-formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: String,
    pub expires: String,
}

impl From<Snippet> for SnippetView {
    fn from(s: Snippet) -> Self {
        Self {
            id: s.id.get(),
            title: s.title,
            content: s.content,
            created: human_date(s.created),
            expires: human_date(s.expires),
        }
    }
}
