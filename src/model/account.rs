//! User accounts.
//!
//! Accounts are keyed by username. Passwords and recovery answers are stored only as argon2
//! PHC strings, and the `Debug` impls here never print them.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Customer => f.write_str("customer"),
        }
    }
}

/// Lowercased and trimmed, so "  Fluffy " and "fluffy" hash the same.
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub email: String,
    pub recovery_question: String,
    pub recovery_answer_hash: String,
}

impl UserAccount {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl Debug for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccount")
            .field("username", &self.username)
            .field("role", &self.role)
            .field("email", &self.email)
            .field("recovery_question", &self.recovery_question)
            .finish_non_exhaustive()
    }
}

/// Registration request as typed by a person. Hashed by
/// [`AccountClient::create_account`](crate::clients::AccountClient::create_account).
#[derive(Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub email: String,
    pub recovery_question: String,
    pub recovery_answer: String,
}

impl NewAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
            email: String::new(),
            recovery_question: String::new(),
            recovery_answer: String::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_recovery(mut self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        self.recovery_question = question.into();
        self.recovery_answer = answer.into();
        self
    }
}

impl Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("role", &self.role)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Payload for creating an account. Secrets are already hashed.
#[derive(Clone)]
pub struct AccountCreate {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub email: String,
    pub recovery_question: String,
    pub recovery_answer_hash: String,
}

impl Debug for AccountCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCreate")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Payload for editing contact details.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub email: Option<String>,
    pub recovery_question: Option<String>,
}
