mod sessions;
mod users;

pub use sessions::{
    ANONYMOUS_TTL, MAX_ANONYMOUS_SESSIONS, SIGNED_IN_TTL, SessionLimits, SessionManager,
};
pub use users::{AccountError, UserManager};
