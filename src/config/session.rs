use std::env;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "ajs_session";

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Signing secret for session tokens. Required; missing configuration
    /// aborts startup rather than failing per request.
    pub secret: String,
    /// Whether the session cookie carries the Secure flag. Tied to the
    /// deployment environment.
    pub cookie_secure: bool,
    /// Client-facing idle timeout before auto-logout, in seconds. Not
    /// enforced server-side.
    pub idle_timeout_secs: u64,
    /// Client-facing countdown shown before the idle logout fires.
    pub countdown_secs: u64,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("SESSION_SECRET").expect("SESSION_SECRET must be set"),
            cookie_secure: env::var("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            idle_timeout_secs: env::var("IDLE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(900), // 15 minutes
            countdown_secs: env::var("IDLE_COUNTDOWN_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        }
    }
}
