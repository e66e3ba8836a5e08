use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use snippetbox_auth::session as keys;
use snippetbox_infra::StoreError;

use crate::app::errors::AppError;
use crate::app::forms::{LoginForm, SignupForm, decode_post_form};
use crate::app::services::AppServices;
use crate::context::PageContext;
use crate::login;
use crate::middleware::is_local_path;

/// Where a fresh login lands when no other page was requested.
pub const DEFAULT_AFTER_LOGIN: &str = "/snippet/create";

pub async fn signup_form(
    Extension(services): Extension<Arc<AppServices>>,
    page: PageContext,
) -> Result<Response, AppError> {
    let data = page.form_template_data().await?.with_form(&SignupForm::default())?;
    services.templates.render(StatusCode::OK, "pages/signup.html", &data)
}

#[instrument(skip_all, err(level = "debug"))]
pub async fn signup(
    Extension(services): Extension<Arc<AppServices>>,
    page: PageContext,
    body: Bytes,
) -> Result<Response, AppError> {
    let mut form: SignupForm = decode_post_form(&body)?;

    if form.validate() {
        match services
            .users
            .insert(&form.name, &form.email, &form.password)
            .await
        {
            Ok(()) => {
                tracing::info!("user signed up");
                page.flash("Your signup was successful. Please log in.").await?;
                return Ok(Redirect::to("/user/login").into_response());
            }
            Err(StoreError::DuplicateEmail) => {
                form.validator
                    .add_field_error("email", "Email address is already in use");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let data = page.form_template_data().await?.with_form(&form)?;
    services
        .templates
        .render(StatusCode::UNPROCESSABLE_ENTITY, "pages/signup.html", &data)
}

pub async fn login_form(
    Extension(services): Extension<Arc<AppServices>>,
    page: PageContext,
) -> Result<Response, AppError> {
    let data = page.form_template_data().await?.with_form(&LoginForm::default())?;
    services.templates.render(StatusCode::OK, "pages/login.html", &data)
}

#[instrument(skip_all, err(level = "debug"))]
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    page: PageContext,
    body: Bytes,
) -> Result<Response, AppError> {
    let mut form: LoginForm = decode_post_form(&body)?;

    if form.validate() {
        match services.users.authenticate(&form.email, &form.password).await {
            Ok(user_id) => {
                let session = &page.session;
                login::begin(session, user_id, services.settings.session_lifetime).await?;

                let target = session
                    .remove::<String>(keys::REDIRECT_AFTER_LOGIN)
                    .await?
                    .filter(|path| is_local_path(path))
                    .unwrap_or_else(|| DEFAULT_AFTER_LOGIN.to_string());

                tracing::info!(user_id = %user_id, "user logged in");
                return Ok(Redirect::to(&target).into_response());
            }
            Err(StoreError::InvalidCredentials) => {
                form.validator
                    .add_non_field_error("Email or password is incorrect");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let data = page.form_template_data().await?.with_form(&form)?;
    services
        .templates
        .render(StatusCode::UNPROCESSABLE_ENTITY, "pages/login.html", &data)
}

pub async fn logout(page: PageContext) -> Result<Response, AppError> {
    login::end(&page.session).await?;
    page.flash("You've been logged out successfully!").await?;
    Ok(Redirect::to("/").into_response())
}
