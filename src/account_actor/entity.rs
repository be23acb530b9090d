//! [`ActorEntity`] implementation for [`UserAccount`].

use super::actions::{AccountAction, AccountActionResult};
use super::credentials;
use super::error::AccountError;
use super::AccountContext;
use crate::model::{normalize_answer, AccountCreate, AccountUpdate, UserAccount};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use tracing::info;

#[async_trait]
impl ActorEntity for UserAccount {
    type Id = String;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Action = AccountAction;
    type ActionResult = AccountActionResult;
    type Context = AccountContext;
    type Error = AccountError;

    fn id(&self) -> &String {
        &self.username
    }

    fn from_create_params(id: String, params: AccountCreate) -> Result<Self, Self::Error> {
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(AccountError::Validation(format!(
                "invalid username '{}'",
                id
            )));
        }
        if params.password_hash.is_empty() {
            return Err(AccountError::Validation("password must be set".into()));
        }
        Ok(Self {
            username: id,
            password_hash: params.password_hash,
            role: params.role,
            email: params.email.trim().to_string(),
            recovery_question: params.recovery_question,
            recovery_answer_hash: params.recovery_answer_hash,
        })
    }

    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        ctx.repo.upsert(self)?;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: AccountUpdate,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(email) = update.email {
            self.email = email.trim().to_string();
        }
        if let Some(question) = update.recovery_question {
            self.recovery_question = question;
        }
        ctx.repo.upsert(self)?;
        Ok(())
    }

    async fn on_delete(&self, ctx: &Self::Context) -> Result<(), Self::Error> {
        ctx.repo.remove(&self.username)?;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: AccountAction,
        ctx: &Self::Context,
    ) -> Result<AccountActionResult, Self::Error> {
        match action {
            AccountAction::Authenticate { password } => {
                let ok = credentials::verify(&password, &self.password_hash);
                info!(username = %self.username, ok, "Authentication attempt");
                Ok(AccountActionResult::Authenticate(ok))
            }
            AccountAction::ChangePassword { password_hash } => {
                if password_hash.is_empty() {
                    return Err(AccountError::Validation("password must be set".into()));
                }
                self.password_hash = password_hash;
                ctx.repo.upsert(self)?;
                Ok(AccountActionResult::ChangePassword(()))
            }
            AccountAction::VerifyRecoveryAnswer { answer } => {
                let ok = !self.recovery_answer_hash.is_empty()
                    && credentials::verify(&normalize_answer(&answer), &self.recovery_answer_hash);
                Ok(AccountActionResult::VerifyRecoveryAnswer(ok))
            }
            AccountAction::ChangeRole(role) => {
                self.role = role;
                ctx.repo.upsert(self)?;
                Ok(AccountActionResult::ChangeRole(role))
            }
        }
    }
}
