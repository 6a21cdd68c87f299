use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

use tokio::sync::Mutex;

use crate::utils;

/// Idle lifetime of a session that only carries flash messages.
pub const ANONYMOUS_TTL: Duration = Duration::from_secs(10 * 60);
/// Idle lifetime of a signed-in session.
pub const SIGNED_IN_TTL: Duration = Duration::from_secs(14 * 24 * 60 * 60);
/// Upper bound on concurrent anonymous sessions.
pub const MAX_ANONYMOUS_SESSIONS: usize = 1024;

/// Bounds applied to the session map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub anonymous_ttl: Duration,
    pub signed_in_ttl: Duration,
    /// Oldest anonymous sessions are dropped beyond this count.
    pub max_anonymous: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            anonymous_ttl: ANONYMOUS_TTL,
            signed_in_ttl: SIGNED_IN_TTL,
            max_anonymous: MAX_ANONYMOUS_SESSIONS,
        }
    }
}

#[derive(Debug, Clone)]
struct SessionData {
    username: Option<String>,
    flashes: Vec<String>,
    last_seen: Instant,
    /// Position in touch order, for least-recently-seen eviction.
    touched: u64,
}

impl SessionData {
    fn new(touched: u64) -> Self {
        Self {
            username: None,
            flashes: Vec::new(),
            last_seen: Instant::now(),
            touched,
        }
    }

    fn expired(&self, limits: &SessionLimits, now: Instant) -> bool {
        let ttl = match self.username {
            Some(_) => limits.signed_in_ttl,
            None => limits.anonymous_ttl,
        };
        now.saturating_duration_since(self.last_seen) >= ttl
    }
}

/// In-memory sessions keyed by the token stored in the session cookie.
///
/// A session exists for anonymous visitors too, so that one-shot flash
/// messages survive the redirect after a failed login or signup. Idle
/// sessions expire after [`SessionLimits`] and are swept whenever a session
/// is created; anonymous sessions are additionally capped in number.
pub struct SessionManager {
    sessions: Mutex<HashMap<String, SessionData>>,
    limits: SessionLimits,
    clock: AtomicU64,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::with_limits(SessionLimits::default())
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            limits,
            clock: AtomicU64::new(0),
        }
    }

    /// Username signed in under `token`, if any. Refreshes the session.
    pub async fn user(&self, token: Option<&str>) -> Option<String> {
        let token = token?;
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;

        let session = sessions.get_mut(token)?;
        if session.expired(&self.limits, now) {
            sessions.remove(token);
            return None;
        }
        session.last_seen = now;
        session.touched = self.tick();
        session.username.clone()
    }

    /// Signs `username` in and returns the new session token.
    ///
    /// The token is always fresh; pending flash messages carry over from the
    /// previous session.
    pub async fn login(&self, token: Option<&str>, username: &str) -> String {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        let mut data = token
            .and_then(|t| sessions.remove(t))
            .unwrap_or_else(|| SessionData::new(self.tick()));
        data.username = Some(username.to_string());
        data.last_seen = now;
        data.touched = self.tick();

        self.sweep(&mut sessions, now);

        let new_token = utils::generate_session_token();
        sessions.insert(new_token.clone(), data);
        new_token
    }

    /// Drops the session behind `token`.
    pub async fn logout(&self, token: Option<&str>) {
        if let Some(token) = token {
            self.sessions.lock().await.remove(token);
        }
    }

    /// Queues a one-shot message, creating an anonymous session if needed.
    ///
    /// Returns the token the message is stored under.
    pub async fn flash(&self, token: Option<&str>, message: &str) -> String {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;
        self.sweep(&mut sessions, now);

        let token = match token {
            Some(t) if sessions.contains_key(t) => t.to_string(),
            _ => {
                self.make_room_for_anonymous(&mut sessions);
                let t = utils::generate_session_token();
                sessions.insert(t.clone(), SessionData::new(self.tick()));
                t
            }
        };

        if let Some(data) = sessions.get_mut(&token) {
            data.flashes.push(message.to_string());
            data.last_seen = now;
            data.touched = self.tick();
        }
        token
    }

    /// Removes and returns the queued messages.
    pub async fn take_flashes(&self, token: Option<&str>) -> Vec<String> {
        let Some(token) = token else {
            return Vec::new();
        };
        let mut sessions = self.sessions.lock().await;
        sessions
            .get_mut(token)
            .map(|s| std::mem::take(&mut s.flashes))
            .unwrap_or_default()
    }

    pub async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    fn sweep(&self, sessions: &mut HashMap<String, SessionData>, now: Instant) {
        sessions.retain(|_, s| !s.expired(&self.limits, now));
    }

    /// Evicts the least recently seen anonymous sessions until one more fits.
    fn make_room_for_anonymous(&self, sessions: &mut HashMap<String, SessionData>) {
        let mut anonymous: Vec<(u64, String)> = sessions
            .iter()
            .filter(|(_, s)| s.username.is_none())
            .map(|(token, s)| (s.touched, token.clone()))
            .collect();

        let max = self.limits.max_anonymous.max(1);
        if anonymous.len() < max {
            return;
        }

        anonymous.sort();
        let excess = anonymous.len() + 1 - max;
        for (_, token) in anonymous.into_iter().take(excess) {
            sessions.remove(&token);
        }
    }
}
