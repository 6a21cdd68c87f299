use std::{fmt, io::Error, path::PathBuf};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{types::User, utils};

#[derive(Debug)]
pub enum AccountError {
    Incomplete,
    PasswordMismatch,
    EmailTaken,
    UsernameTaken,
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for AccountError {
    fn from(err: Error) -> Self {
        AccountError::IoError(err)
    }
}

impl From<serde_json::Error> for AccountError {
    fn from(err: serde_json::Error) -> Self {
        AccountError::SerdeError(err)
    }
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::Incomplete => write!(f, "All fields are required."),
            AccountError::PasswordMismatch => write!(f, "Password does not match."),
            AccountError::EmailTaken => write!(f, "Email is taken."),
            AccountError::UsernameTaken => write!(f, "Username is taken."),
            AccountError::IoError(e) => write!(f, "user store i/o failed: {}", e),
            AccountError::SerdeError(e) => write!(f, "user store is corrupt: {}", e),
        }
    }
}

impl std::error::Error for AccountError {}

/// Account store persisted as a JSON array of [`User`].
///
/// Every write rewrites the whole file; the store is sized for a handful of
/// local accounts.
pub struct UserManager {
    path: PathBuf,
    users: Mutex<Vec<User>>,
    hash_rounds: u32,
}

impl UserManager {
    /// Empty store that will persist to `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            users: Mutex::new(Vec::new()),
            hash_rounds: utils::HASH_ROUNDS,
        }
    }

    /// Loads the store at `path`; a missing file is an empty store.
    pub async fn load(path: PathBuf) -> Result<Self, AccountError> {
        let users = match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(AccountError::IoError(e)),
        };

        Ok(Self {
            path,
            users: Mutex::new(users),
            hash_rounds: utils::HASH_ROUNDS,
        })
    }

    /// PBKDF2 iteration count for accounts created from now on.
    ///
    /// Existing hashes keep the count they were stored with.
    pub fn with_hash_rounds(mut self, rounds: u32) -> Self {
        self.hash_rounds = rounds.max(1);
        self
    }

    async fn persist(&self, users: &[User]) -> Result<(), AccountError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(users)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Registers a new account.
    ///
    /// Fails without touching the store when the email or the username is
    /// already registered.
    pub async fn create_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        let mut users = self.users.lock().await;

        if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(AccountError::EmailTaken);
        }
        if users.iter().any(|u| u.username == username) {
            return Err(AccountError::UsernameTaken);
        }

        let user = User {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: utils::hash_password_with(
                password,
                &utils::generate_salt(),
                self.hash_rounds,
            ),
            date_joined: Utc::now().to_rfc3339(),
        };

        let mut updated = users.clone();
        updated.push(user.clone());
        self.persist(&updated).await?;
        *users = updated;

        Ok(user)
    }

    /// Returns the user when `username` exists and `password` matches.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let users = self.users.lock().await;
        users
            .iter()
            .find(|u| u.username == username)
            .filter(|u| utils::verify_password(password, &u.password_hash))
            .cloned()
    }

    pub async fn find(&self, username: &str) -> Option<User> {
        let users = self.users.lock().await;
        users.iter().find(|u| u.username == username).cloned()
    }

    pub async fn all(&self) -> Vec<User> {
        self.users.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.users.lock().await.len()
    }
}
