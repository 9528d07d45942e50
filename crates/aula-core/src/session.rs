//! Session context and the admin gate.
//!
//! The current user and their role are carried in an explicit
//! `SessionContext` handed down to command handlers, never in ambient
//! global state. Admin elevation is a single shared secret compared
//! against user input.

use std::fmt;

/// Who the current session is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Browsing without identifying.
    Guest,
    /// A student who has given a name and email.
    Student,
    /// Elevated via the shared secret.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Guest => write!(f, "guest"),
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Per-interaction session state, passed down explicitly.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub role: Role,
}

impl SessionContext {
    /// An anonymous session.
    pub fn guest() -> Self {
        Self {
            user_name: None,
            user_email: None,
            role: Role::Guest,
        }
    }

    /// A student session with the details they typed in.
    pub fn student(name: &str, email: &str) -> Self {
        Self {
            user_name: Some(name.to_string()),
            user_email: Some(email.to_string()),
            role: Role::Student,
        }
    }

    /// Elevate this session to admin if the secret matches the gate.
    /// Returns whether elevation happened.
    pub fn elevate(&mut self, gate: &AdminGate, secret: &str) -> bool {
        if gate.verify(secret) {
            self.role = Role::Admin;
            true
        } else {
            false
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Environment variable holding the admin shared secret.
pub const ADMIN_SECRET_ENV: &str = "AULA_ADMIN_SECRET";

/// Fallback secret used when the environment variable is unset.
const DEFAULT_ADMIN_SECRET: &str = "empower-a2";

/// The shared-secret admin gate.
///
/// There are no per-user credentials, no hashing, and no expiry; a
/// matching string elevates the session for the current interaction.
#[derive(Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    /// Build the gate from `AULA_ADMIN_SECRET`, falling back to the
    /// built-in default when unset or empty.
    pub fn from_env() -> Self {
        let secret = std::env::var(ADMIN_SECRET_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_SECRET.to_string());
        Self { secret }
    }

    /// Build a gate with an explicit secret (tests, embedding).
    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
        }
    }

    /// Compare user input against the shared secret.
    pub fn verify(&self, input: &str) -> bool {
        input == self.secret
    }
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate").field("secret", &"***").finish()
    }
}
