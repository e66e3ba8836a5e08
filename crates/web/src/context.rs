//! Request-scoped context: who is calling, their CSRF token, their session.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{Datelike, Utc};
use tower_sessions::Session;

use snippetbox_auth::{generate_csrf_token, session as keys};
use snippetbox_core::UserId;

use crate::app::errors::AppError;
use crate::app::templates::TemplateData;

/// Authentication status attached by the `authenticate` middleware.
///
/// `user_id` is only set when the session names a user that still exists.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    user_id: Option<UserId>,
}

impl AuthContext {
    pub fn new(user_id: Option<UserId>) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// The session's CSRF token, attached by the `csrf_protect` middleware.
///
/// Empty until a page with a form has been rendered for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfToken(pub String);

/// Everything a page handler needs besides its own inputs.
pub struct PageContext {
    pub session: Session,
    pub auth: AuthContext,
    pub csrf_token: CsrfToken,
}

impl PageContext {
    /// Base template data. Pops the pending flash message, if any.
    ///
    /// Leaves the session untouched when there is nothing to pop, so
    /// anonymous page views do not create stored sessions.
    pub async fn template_data(&self) -> Result<TemplateData, AppError> {
        let flash = match self.session.get::<String>(keys::FLASH).await? {
            Some(message) => {
                self.session.remove::<String>(keys::FLASH).await?;
                Some(message)
            }
            None => None,
        };

        Ok(TemplateData {
            current_year: Utc::now().year(),
            flash,
            is_authenticated: self.auth.is_authenticated(),
            csrf_token: self.csrf_token.0.clone(),
            ..TemplateData::default()
        })
    }

    /// Template data for a page that contains a form: the session gets a
    /// CSRF token if it has none yet.
    pub async fn form_template_data(&self) -> Result<TemplateData, AppError> {
        let mut data = self.template_data().await?;
        if data.csrf_token.is_empty() {
            let token = generate_csrf_token();
            self.session.insert(keys::CSRF_TOKEN, &token).await?;
            data.csrf_token = token;
        }
        Ok(data)
    }

    /// Queue a one-shot message for the next rendered page.
    pub async fn flash(&self, message: &str) -> Result<(), AppError> {
        self.session.insert(keys::FLASH, message).await?;
        Ok(())
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(anyhow::anyhow!(msg)))?;
        let auth = parts.extensions.get::<AuthContext>().copied().unwrap_or_default();
        let csrf_token = parts.extensions.get::<CsrfToken>().cloned().unwrap_or_default();

        Ok(Self {
            session,
            auth,
            csrf_token,
        })
    }
}
