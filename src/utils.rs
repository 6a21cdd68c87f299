use axum::http::{HeaderMap, header::COOKIE};
use base64::{Engine, engine::general_purpose::STANDARD};
use pbkdf2::pbkdf2_hmac_array;
use rand::{Rng, distr::Alphanumeric};
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const SESSION_COOKIE: &str = "tunefeed_session";

const HASH_SCHEME: &str = "pbkdf2_sha256";
pub const HASH_ROUNDS: u32 = 600_000;

fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_session_token() -> String {
    random_token(64)
}

pub fn generate_salt() -> String {
    random_token(22)
}

fn derive(password: &str, salt: &str, rounds: u32) -> [u8; 32] {
    pbkdf2_hmac_array::<Sha256, 32>(password.as_bytes(), salt.as_bytes(), rounds)
}

/// Hashes a password as `pbkdf2_sha256$<rounds>$<salt>$<base64 digest>`.
pub fn hash_password(password: &str) -> String {
    hash_password_with(password, &generate_salt(), HASH_ROUNDS)
}

pub fn hash_password_with(password: &str, salt: &str, rounds: u32) -> String {
    format!(
        "{}${}${}${}",
        HASH_SCHEME,
        rounds,
        salt,
        STANDARD.encode(derive(password, salt, rounds))
    )
}

/// Checks `password` against a value produced by [`hash_password`].
///
/// Malformed stored hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(4, '$');
    let (Some(scheme), Some(rounds), Some(salt), Some(expected)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if scheme != HASH_SCHEME || salt.is_empty() {
        return false;
    }
    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    if rounds == 0 {
        return false;
    }
    let Ok(expected) = STANDARD.decode(expected) else {
        return false;
    };

    derive(password, salt, rounds)
        .as_slice()
        .ct_eq(expected.as_slice())
        .into()
}

/// Reads the session token from the `Cookie` request headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying `token`.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, token
    )
}

/// `Set-Cookie` value that removes the session cookie.
pub fn expired_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    )
}
