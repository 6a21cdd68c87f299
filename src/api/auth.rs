use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    management::AccountError, server::AppState, success, upstream::Transport, utils, views,
    warning,
};

pub const INVALID_CREDENTIALS: &str = "Credentials Invalid";
pub const SIGNUP_UNAVAILABLE: &str = "Could not create the account. Please try again.";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password2: String,
}

impl SignupForm {
    fn validate(&self) -> Result<(), AccountError> {
        if [&self.email, &self.username, &self.password]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(AccountError::Incomplete);
        }
        if self.password != self.password2 {
            return Err(AccountError::PasswordMismatch);
        }
        Ok(())
    }
}

fn redirect_with_cookie(to: &str, cookie: String) -> Response {
    (AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(to)).into_response()
}

/// Redirects to `to` after queueing `message` in the visitor's session.
async fn redirect_with_flash<T: Transport>(
    state: &AppState<T>,
    token: Option<&str>,
    to: &str,
    message: &str,
) -> Response {
    let token = state.sessions.flash(token, message).await;
    redirect_with_cookie(to, utils::session_cookie(&token))
}

/// `GET /login`
pub async fn login_form<T: Transport>(
    State(state): State<AppState<T>>,
    headers: HeaderMap,
) -> Response {
    let token = utils::session_token(&headers);
    let flashes = state.sessions.take_flashes(token.as_deref()).await;
    views::login_page(&flashes).into_response()
}

/// `POST /login`
pub async fn login<T: Transport>(
    State(state): State<AppState<T>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response {
    let token = utils::session_token(&headers);

    match state.users.authenticate(&form.username, &form.password).await {
        Some(user) => {
            let new_token = state.sessions.login(token.as_deref(), &user.username).await;
            success!("{} logged in", user.username);
            redirect_with_cookie("/", utils::session_cookie(&new_token))
        }
        None => redirect_with_flash(&state, token.as_deref(), "/login", INVALID_CREDENTIALS).await,
    }
}

/// `GET /signup`
pub async fn signup_form<T: Transport>(
    State(state): State<AppState<T>>,
    headers: HeaderMap,
) -> Response {
    let token = utils::session_token(&headers);
    let flashes = state.sessions.take_flashes(token.as_deref()).await;
    views::signup_page(&flashes).into_response()
}

/// `POST /signup`
///
/// A rejected signup never writes to the user store and always lands back
/// on `/signup` with a message.
pub async fn signup<T: Transport>(
    State(state): State<AppState<T>>,
    headers: HeaderMap,
    Form(form): Form<SignupForm>,
) -> Response {
    let token = utils::session_token(&headers);

    if let Err(e) = form.validate() {
        return redirect_with_flash(&state, token.as_deref(), "/signup", &e.to_string()).await;
    }

    let created = state
        .users
        .create_account(&form.username, &form.email, &form.password)
        .await;

    match created {
        Ok(user) => {
            let new_token = state.sessions.login(token.as_deref(), &user.username).await;
            success!("{} signed up", user.username);
            redirect_with_cookie("/", utils::session_cookie(&new_token))
        }
        Err(e @ (AccountError::EmailTaken | AccountError::UsernameTaken)) => {
            redirect_with_flash(&state, token.as_deref(), "/signup", &e.to_string()).await
        }
        Err(e) => {
            warning!("signup for {} failed: {}", form.username, e);
            redirect_with_flash(&state, token.as_deref(), "/signup", SIGNUP_UNAVAILABLE).await
        }
    }
}

/// `GET /logout`, signed-in users only.
pub async fn logout<T: Transport>(State(state): State<AppState<T>>, headers: HeaderMap) -> Response {
    let token = utils::session_token(&headers);
    if state.sessions.user(token.as_deref()).await.is_none() {
        return Redirect::to("/login").into_response();
    }

    state.sessions.logout(token.as_deref()).await;
    redirect_with_cookie("/login", utils::expired_session_cookie())
}
