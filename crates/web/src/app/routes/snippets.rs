use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use snippetbox_core::SnippetId;

use crate::app::errors::AppError;
use crate::app::forms::{SnippetCreateForm, decode_post_form};
use crate::app::services::AppServices;
use crate::context::PageContext;

/// Number of snippets listed on the home page.
pub const LATEST_LIMIT: u32 = 10;

pub async fn home(
    Extension(services): Extension<Arc<AppServices>>,
    page: PageContext,
) -> Result<Response, AppError> {
    let snippets = services.snippets.latest(LATEST_LIMIT).await?;

    let mut data = page.template_data().await?;
    data.snippets = snippets.into_iter().map(Into::into).collect();
    services.templates.render(StatusCode::OK, "pages/home.html", &data)
}

pub async fn view(
    Extension(services): Extension<Arc<AppServices>>,
    page: PageContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id: SnippetId = id.parse().map_err(|_| AppError::NotFound)?;
    let snippet = services.snippets.get(id).await?;

    let mut data = page.template_data().await?;
    data.snippet = Some(snippet.into());
    services.templates.render(StatusCode::OK, "pages/view.html", &data)
}

pub async fn create_form(
    Extension(services): Extension<Arc<AppServices>>,
    page: PageContext,
) -> Result<Response, AppError> {
    let data = page.form_template_data().await?.with_form(&SnippetCreateForm::blank())?;
    services.templates.render(StatusCode::OK, "pages/create.html", &data)
}

#[instrument(skip_all, err(level = "debug"))]
pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    page: PageContext,
    body: Bytes,
) -> Result<Response, AppError> {
    let mut form: SnippetCreateForm = decode_post_form(&body)?;

    if !form.validate() {
        let data = page.form_template_data().await?.with_form(&form)?;
        return services
            .templates
            .render(StatusCode::UNPROCESSABLE_ENTITY, "pages/create.html", &data);
    }

    let id = services
        .snippets
        .insert(&form.title, &form.content, form.expires)
        .await?;
    tracing::info!(snippet_id = %id, "snippet created");

    page.flash("Snippet successfully created!").await?;
    Ok(Redirect::to(&format!("/snippet/view/{id}")).into_response())
}
