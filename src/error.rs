#[cfg(feature = "web")]
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error as ThisError;

/// Everything that can go wrong while serving a request
///
/// The first four variants are user-facing: handlers render their message back
/// into the form that produced them. The rest are infrastructure failures and
/// end up as a generic 500 page.
#[derive(Debug, ThisError)]
pub enum CalcError {
    /// Malformed input, e.g. a non-numeric field or mismatched passwords
    #[error("{0}")]
    Validation(String),

    /// A unique value (username or email) is already taken
    #[error("{0}")]
    Conflict(String),

    /// Well-formed input the requested operation is undefined for
    #[error("{0}")]
    Domain(String),

    /// Unknown username or wrong password; never says which
    #[error("Invalid username and/or password.")]
    InvalidCredentials,

    #[cfg(feature = "web")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[cfg(feature = "web")]
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[cfg(feature = "web")]
    #[error("Template syntax error: {0}")]
    TemplateSyntax(#[from] handlebars::TemplateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalcError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CalcError::Validation(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        CalcError::Domain(msg.into())
    }

    /// True for errors that should be shown to the user next to the form
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CalcError::Validation(_)
                | CalcError::Conflict(_)
                | CalcError::Domain(_)
                | CalcError::InvalidCredentials
        )
    }
}

#[cfg(feature = "web")]
impl IntoResponse for CalcError {
    fn into_response(self) -> Response {
        let status = match self {
            CalcError::Validation(_) | CalcError::Domain(_) => StatusCode::BAD_REQUEST,
            CalcError::Conflict(_) => StatusCode::CONFLICT,
            CalcError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            _ => {
                log::error!("request failed: {}", self);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Something went wrong</h1><p>Please try again later.</p>"),
                )
                    .into_response();
            }
        };
        (status, self.to_string()).into_response()
    }
}
