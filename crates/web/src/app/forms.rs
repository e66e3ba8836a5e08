//! Submitted forms: decoding and field validation.
//!
//! Each form carries its own [`Validator`] so that a failed submission can be
//! re-rendered with the user's input and the error messages side by side.
//! Passwords are never serialized back into a page.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use snippetbox_auth::PASSWORD_MIN_CHARS;
use snippetbox_core::validator::{EMAIL_RX, matches, max_chars, min_chars, not_blank, permitted_value};
use snippetbox_core::{
    PERMITTED_EXPIRY_DAYS, SNIPPET_TITLE_MAX_CHARS, USER_EMAIL_MAX_CHARS, USER_NAME_MAX_CHARS,
    Validator,
};

use crate::app::errors::AppError;

const BLANK: &str = "This field cannot be blank";

fn too_long(max: usize) -> String {
    format!("This field cannot be more than {max} characters long")
}

/// Decode an `application/x-www-form-urlencoded` body.
///
/// Any decoding failure (bad encoding, non-numeric `expires`) is a client error.
pub fn decode_post_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_urlencoded::from_bytes(body).map_err(|e| AppError::bad_request(format!("form: {e}")))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SnippetCreateForm {
    pub title: String,
    pub content: String,
    pub expires: i32,
    #[serde(skip_deserializing)]
    pub validator: Validator,
}

impl SnippetCreateForm {
    /// Form shown on first visit; one year is preselected.
    pub fn blank() -> Self {
        Self {
            expires: 365,
            ..Self::default()
        }
    }

    pub fn validate(&mut self) -> bool {
        let v = &mut self.validator;
        v.check_field(not_blank(&self.title), "title", BLANK);
        v.check_field(
            max_chars(&self.title, SNIPPET_TITLE_MAX_CHARS),
            "title",
            &too_long(SNIPPET_TITLE_MAX_CHARS),
        );
        v.check_field(not_blank(&self.content), "content", BLANK);
        v.check_field(
            permitted_value(self.expires, &PERMITTED_EXPIRY_DAYS),
            "expires",
            "This field must equal 1, 7 or 365",
        );
        v.valid()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_deserializing)]
    pub validator: Validator,
}

impl SignupForm {
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validator;
        v.check_field(not_blank(&self.name), "name", BLANK);
        v.check_field(
            max_chars(&self.name, USER_NAME_MAX_CHARS),
            "name",
            &too_long(USER_NAME_MAX_CHARS),
        );
        v.check_field(not_blank(&self.email), "email", BLANK);
        v.check_field(
            max_chars(&self.email, USER_EMAIL_MAX_CHARS),
            "email",
            &too_long(USER_EMAIL_MAX_CHARS),
        );
        v.check_field(
            matches(&self.email, &EMAIL_RX),
            "email",
            "This field must be a valid email address",
        );
        v.check_field(not_blank(&self.password), "password", BLANK);
        v.check_field(
            min_chars(&self.password, PASSWORD_MIN_CHARS),
            "password",
            &format!("This field must be at least {PASSWORD_MIN_CHARS} characters long"),
        );
        v.valid()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_deserializing)]
    pub validator: Validator,
}

impl LoginForm {
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validator;
        v.check_field(not_blank(&self.email), "email", BLANK);
        v.check_field(
            matches(&self.email, &EMAIL_RX),
            "email",
            "This field must be a valid email address",
        );
        v.check_field(not_blank(&self.password), "password", BLANK);
        v.valid()
    }
}
