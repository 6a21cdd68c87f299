//! # API Module
//!
//! axum handlers for the inbound HTTP surface.
//!
//! ## Endpoints
//!
//! | Route | Handler | Login |
//! | --- | --- | --- |
//! | `GET /` | [`home`] | required |
//! | `GET/POST /search` | [`search_form`] / [`search`] | no |
//! | `GET /music/{track_id}` | [`music`] | no |
//! | `GET /profile/{artist_id}` | [`profile`] | no |
//! | `GET/POST /login` | [`login_form`] / [`login`] | no |
//! | `GET/POST /signup` | [`signup_form`] / [`signup`] | no |
//! | `GET /logout` | [`logout`] | required |
//! | `GET /health` | [`health`] | no |
//!
//! Page handlers always render. Whatever the catalog could assemble is
//! shown, with unavailable parts replaced by fallbacks. Auth handlers answer
//! with redirects and report problems as flash messages stored in the
//! visitor's session.
//!
//! Handlers are generic over the [`Transport`](crate::upstream::Transport)
//! so the router can be driven by a fake upstream in tests.

mod auth;
mod health;
mod pages;

pub use auth::{
    INVALID_CREDENTIALS, LoginForm, SIGNUP_UNAVAILABLE, SignupForm, login, login_form, logout,
    signup, signup_form,
};
pub use health::health;
pub use pages::{SearchForm, home, music, profile, search, search_form};
