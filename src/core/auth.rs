//! Login results for the dual-mode (production/demo) sign-in
//!
//! Credential checking is delegated to an [`AuthProvider`]. The rest of the
//! crate only consumes the [`AuthResult`] shape it returns.

use crate::core::error::AuthError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which credential store a login targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Production,
    #[default]
    Demo,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Production => "production",
            AuthMode::Demo => "demo",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account role, which decides the landing dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    Admin,
    ItSupport,
    Partner,
    Manager,
    Veterinarian,
    Owner,
}

impl UserRole {
    pub const ALL: [UserRole; 6] = [
        UserRole::Admin,
        UserRole::ItSupport,
        UserRole::Partner,
        UserRole::Manager,
        UserRole::Veterinarian,
        UserRole::Owner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::ItSupport => "itSupport",
            UserRole::Partner => "partner",
            UserRole::Manager => "manager",
            UserRole::Veterinarian => "veterinarian",
            UserRole::Owner => "owner",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

/// Outcome of a sign-in attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,
    pub auth_mode: AuthMode,
}

impl AuthResult {
    pub fn granted(role: UserRole, mode: AuthMode) -> Self {
        Self {
            is_valid: true,
            user_role: Some(role),
            auth_mode: mode,
        }
    }

    pub fn denied(mode: AuthMode) -> Self {
        Self {
            is_valid: false,
            user_role: None,
            auth_mode: mode,
        }
    }
}

/// Sign-in form payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub mode: AuthMode,
}

/// A canned account for demo mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl DemoAccount {
    pub fn new(email: &str, password: &str, role: UserRole) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            role,
        }
    }

    /// One demo login per role
    pub fn defaults() -> Vec<DemoAccount> {
        vec![
            DemoAccount::new("admin@onebarn.ai", "demo123", UserRole::Admin),
            DemoAccount::new("it@onebarn.ai", "demo123", UserRole::ItSupport),
            DemoAccount::new("partner@onebarn.ai", "demo123", UserRole::Partner),
            DemoAccount::new("manager@onebarn.ai", "demo123", UserRole::Manager),
            DemoAccount::new("vet@onebarn.ai", "demo123", UserRole::Veterinarian),
            DemoAccount::new("owner@onebarn.ai", "demo123", UserRole::Owner),
        ]
    }
}

/// Trait for credential backends
///
/// Invalid credentials are reported as a denied [`AuthResult`]; `Err` is
/// reserved for a backend that cannot answer at all.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthResult, AuthError>;
}

/// Checks logins against the configured demo accounts
///
/// Production logins are refused with `ModeUnavailable`.
#[derive(Debug, Clone)]
pub struct DemoAuthProvider {
    accounts: Vec<DemoAccount>,
}

impl DemoAuthProvider {
    pub fn new(accounts: Vec<DemoAccount>) -> Self {
        Self { accounts }
    }
}

impl Default for DemoAuthProvider {
    fn default() -> Self {
        Self::new(DemoAccount::defaults())
    }
}

#[async_trait]
impl AuthProvider for DemoAuthProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthResult, AuthError> {
        if credentials.mode != AuthMode::Demo {
            return Err(AuthError::ModeUnavailable {
                mode: credentials.mode.to_string(),
            });
        }

        let email = credentials.email.trim();
        let account = self
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == credentials.password);

        match account {
            Some(account) => {
                tracing::info!(role = %account.role, "demo login accepted");
                Ok(AuthResult::granted(account.role, AuthMode::Demo))
            }
            None => {
                tracing::warn!("demo login rejected");
                Ok(AuthResult::denied(AuthMode::Demo))
            }
        }
    }
}
