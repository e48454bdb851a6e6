use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use axum::{
    Form,
    extract::{FromRequestParts, State},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use rand_core::OsRng;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::app::{AppState, found};
use crate::error::CalcError;
use crate::store::{User, UserStore};

/// Name of the signed cookie carrying the user id
pub const SESSION_COOKIE: &str = "session";
/// How long a login lasts
const SESSION_HOURS: i64 = 24;

/// Login form data
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,

    /// Password in plaintext (only transmitted, never stored)
    #[serde(default)]
    pub password: String,
}

/// Registration form data
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,

    /// Optional; an empty value means no email
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,

    /// Must equal `password`
    #[serde(default)]
    pub confirmation: String,
}

/// Registers and authenticates users against the credential store
///
/// Constructed once at startup with an explicit [`UserStore`] and shared
/// through the application state.
#[derive(Clone)]
pub struct AuthService {
    store: UserStore,
    /// Verified against when a username is unknown, so that a missing user
    /// costs as much as a wrong password
    dummy_hash: Arc<str>,
}

impl AuthService {
    /// Create the service
    ///
    /// # Arguments
    /// * `store` - Credential store to read and write users
    ///
    /// # Errors
    /// * `CalcError::PasswordHash` if the dummy hash cannot be computed
    pub fn new(store: UserStore) -> Result<Self, CalcError> {
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = hash_password(salt.as_str())?;
        Ok(AuthService {
            store,
            dummy_hash: dummy_hash.into(),
        })
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &UserStore {
        &self.store
    }

    /// Register a new user
    ///
    /// # Arguments
    /// * `form` - Username, optional email, password and its confirmation
    ///
    /// # Returns
    /// * `Result<User, CalcError>` - The stored user, ready to be logged in
    ///
    /// # Errors
    /// * `CalcError::Validation` if username or password is empty, or the
    ///   passwords differ
    /// * `CalcError::Conflict` if the username or email is already in use
    pub async fn register(&self, form: &RegisterForm) -> Result<User, CalcError> {
        let username = form.username.trim();
        if username.is_empty() || form.password.is_empty() {
            return Err(CalcError::validation("Username and password cannot be empty."));
        }
        if form.password != form.confirmation {
            return Err(CalcError::validation("Passwords must match."));
        }

        let email = Some(form.email.trim()).filter(|e| !e.is_empty());
        let password_hash = hash_password(&form.password)?;
        let id = self.store.insert(username, email, &password_hash).await?;

        log::info!("registered user {} (id {})", username, id);
        Ok(User {
            id,
            username: username.to_string(),
            email: email.map(str::to_string),
            password_hash,
        })
    }

    /// Check a username/password pair
    ///
    /// # Returns
    /// * `Result<User, CalcError>` - The matching user
    ///
    /// # Errors
    /// * `CalcError::InvalidCredentials` if the user does not exist or the
    ///   password is wrong; the two cases are indistinguishable
    pub async fn login(&self, username: &str, password: &str) -> Result<User, CalcError> {
        let Some(user) = self.store.find_by_username(username.trim()).await? else {
            verify_password(password, &self.dummy_hash)?;
            log::info!("failed login for {}", username);
            return Err(CalcError::InvalidCredentials);
        };

        if verify_password(password, &user.password_hash)? {
            log::info!("user {} logged in", user.username);
            Ok(user)
        } else {
            log::info!("failed login for {}", username);
            Err(CalcError::InvalidCredentials)
        }
    }

    /// Resolve the user bound to the session cookie
    ///
    /// # Returns
    /// * `Ok(None)` when there is no cookie, the value is not an id, or the id
    ///   no longer exists
    pub async fn current_user(&self, jar: &SignedCookieJar) -> Result<Option<User>, CalcError> {
        let Some(id) = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| cookie.value().parse::<i64>().ok())
        else {
            return Ok(None);
        };
        self.store.find_by_id(id).await
    }
}

/// Hash a password using Argon2id with a random salt
fn hash_password(password: &str) -> Result<String, CalcError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CalcError::PasswordHash(e.to_string()))
}

/// Verify a password against a stored Argon2 hash
///
/// # Returns
/// * `Ok(false)` on mismatch; `Err` only if the stored hash is malformed
fn verify_password(password: &str, hash: &str) -> Result<bool, CalcError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| CalcError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Bind the session cookie to `user_id`
pub fn start_session(jar: SignedCookieJar, user_id: i64) -> SignedCookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, user_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(SESSION_HOURS));
    jar.add(cookie)
}

/// Drop the session cookie; harmless if there is none
pub fn end_session(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// The session and the user it belongs to, resolved once per request
pub struct Visitor {
    pub jar: SignedCookieJar,
    pub user: Option<User>,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Visitor {
    type Rejection = CalcError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = match SignedCookieJar::<Key>::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        let user = state.auth.current_user(&jar).await?;
        Ok(Visitor { jar, user })
    }
}

// Web handler functions below

/// Serve the login page
pub async fn serve_login_page(State(state): State<AppState>, visitor: Visitor) -> Response {
    state.views.page("login", visitor.user.as_ref(), json!({}))
}

/// Serve the registration page
pub async fn serve_register_page(State(state): State<AppState>, visitor: Visitor) -> Response {
    state.views.page("register", visitor.user.as_ref(), json!({}))
}

/// Handle user login requests
///
/// # Arguments
/// * `state` - Shared application state
/// * `visitor` - Session cookie jar and current user
/// * `credentials` - Form data containing the username and password
///
/// # Returns
/// * `Response` - 302 to `/` with a fresh session cookie, or the login page
///   with a generic failure message
pub async fn handle_login(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(credentials): Form<LoginForm>,
) -> Response {
    match state
        .auth
        .login(&credentials.username, &credentials.password)
        .await
    {
        Ok(user) => (start_session(visitor.jar, user.id), found("/")).into_response(),
        Err(e) if e.is_user_facing() => state.views.page(
            "login",
            visitor.user.as_ref(),
            json!({ "message": e.to_string() }),
        ),
        Err(e) => e.into_response(),
    }
}

/// Handle user registration
///
/// # Arguments
/// * `state` - Shared application state
/// * `visitor` - Session cookie jar and current user
/// * `form` - Form data containing username, email, password and confirmation
///
/// # Returns
/// * `Response` - 302 to `/` logged in as the new user, or the registration
///   page with the reason it failed
pub async fn handle_register(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<RegisterForm>,
) -> Response {
    match state.auth.register(&form).await {
        Ok(user) => (start_session(visitor.jar, user.id), found("/")).into_response(),
        Err(e) if e.is_user_facing() => state.views.page(
            "register",
            visitor.user.as_ref(),
            json!({ "message": e.to_string() }),
        ),
        Err(e) => e.into_response(),
    }
}

/// Handle user logout
///
/// Clears the session cookie and redirects home.
pub async fn handle_logout(jar: SignedCookieJar) -> Response {
    (end_session(jar), found("/")).into_response()
}
