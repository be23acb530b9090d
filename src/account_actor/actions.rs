//! Custom actions for the Account actor.

use crate::model::Role;
use std::fmt;

/// Credential and role operations on one account.
///
/// `Debug` prints the variant only, never the secret it carries.
#[derive(Clone, PartialEq)]
pub enum AccountAction {
    /// Checks a plaintext password against the stored hash.
    Authenticate { password: String },
    /// Replaces the stored password hash.
    ChangePassword { password_hash: String },
    /// Checks a recovery answer. The answer is normalized before comparison.
    VerifyRecoveryAnswer { answer: String },
    ChangeRole(Role),
}

impl fmt::Debug for AccountAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountAction::Authenticate { .. } => f.write_str("Authenticate"),
            AccountAction::ChangePassword { .. } => f.write_str("ChangePassword"),
            AccountAction::VerifyRecoveryAnswer { .. } => f.write_str("VerifyRecoveryAnswer"),
            AccountAction::ChangeRole(role) => f.debug_tuple("ChangeRole").field(role).finish(),
        }
    }
}

/// Results from AccountActions - variants match 1:1 with AccountAction
#[derive(Debug, Clone, PartialEq)]
pub enum AccountActionResult {
    Authenticate(bool),
    ChangePassword(()),
    VerifyRecoveryAnswer(bool),
    ChangeRole(Role),
}
