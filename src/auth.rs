use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable holding the shared admin password.
const ADMIN_PASSWORD_ENV: &str = "DIGIHART_ADMIN_PASSWORD";

/// Pluggable credential verifier so a real authentication provider can be
/// substituted without touching the command layer.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, password: &str) -> bool;
}

/// Single shared password, sourced from the environment. Not a real
/// authentication system; it only gates the session-local admin flag.
pub struct StaticCredential {
    password: String,
}

impl StaticCredential {
    pub fn new(password: String) -> Self {
        Self { password }
    }

    pub fn from_env() -> Self {
        let password = std::env::var(ADMIN_PASSWORD_ENV).unwrap_or_else(|_| {
            eprintln!(
                "{} not set, admin mode uses the default password",
                ADMIN_PASSWORD_ENV
            );
            "admin".to_string()
        });
        Self { password }
    }
}

impl CredentialCheck for StaticCredential {
    fn verify(&self, password: &str) -> bool {
        !self.password.is_empty() && password == self.password
    }
}

/// Session-local admin mode flag. Lives for the process, never persisted.
pub struct AdminSession {
    active: AtomicBool,
}

impl AdminSession {
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
        }
    }

    /// Attempt login. Wrong password leaves the session unchanged and returns
    /// false for the UI's transient notification; there is no lockout.
    pub fn login(&self, credentials: &dyn CredentialCheck, password: &str) -> bool {
        let ok = credentials.verify(password);
        if ok {
            self.active.store(true, Ordering::SeqCst);
        }
        ok
    }

    pub fn logout(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Default for AdminSession {
    fn default() -> Self {
        Self::new()
    }
}
