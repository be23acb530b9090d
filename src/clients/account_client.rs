//! # Account Client
//!
//! Typed API over the account actor. Secrets are hashed here, before they are sent, so the
//! actor's mailbox and logs only ever see PHC strings. Password checks send the plaintext in
//! an [`AccountAction::Authenticate`], whose `Debug` output is redacted.

use crate::account_actor::{AccountAction, AccountActionResult, AccountError, CredentialHasher};
use crate::model::{normalize_answer, AccountCreate, AccountUpdate, NewAccount, Role, UserAccount};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{info, instrument};

/// Client for interacting with the Account actor.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<UserAccount>,
    hasher: CredentialHasher,
}

fn unexpected(result: AccountActionResult) -> AccountError {
    AccountError::ActorCommunicationError(format!("unexpected action result: {:?}", result))
}

impl AccountClient {
    pub fn new(inner: ResourceClient<UserAccount>, hasher: CredentialHasher) -> Self {
        Self { inner, hasher }
    }

    /// Registers an account and returns its username.
    #[instrument(skip(self))]
    pub async fn create_account(&self, account: NewAccount) -> Result<String, AccountError> {
        if account.password.is_empty() {
            return Err(AccountError::Validation("password must be set".into()));
        }
        let recovery_answer = normalize_answer(&account.recovery_answer);
        let recovery_answer_hash = if recovery_answer.is_empty() {
            String::new()
        } else {
            self.hasher.hash(&recovery_answer)?
        };
        let params = AccountCreate {
            username: account.username,
            password_hash: self.hasher.hash(&account.password)?,
            role: account.role,
            email: account.email,
            recovery_question: account.recovery_question,
            recovery_answer_hash,
        };
        let username = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(%username, "Account created");
        Ok(username)
    }

    /// The account if the password matches, `None` for a wrong password or unknown user.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserAccount>, AccountError> {
        let action = AccountAction::Authenticate {
            password: password.to_string(),
        };
        let result = match self.inner.perform_action(username.to_string(), action).await {
            Ok(result) => result,
            Err(FrameworkError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(Self::map_error(e)),
        };
        match result {
            AccountActionResult::Authenticate(true) => self.get(username.to_string()).await,
            AccountActionResult::Authenticate(false) => Ok(None),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, username: &str) -> Result<bool, AccountError> {
        Ok(self.get(username.to_string()).await?.is_some())
    }

    #[instrument(skip(self, new_password))]
    pub async fn update_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        if new_password.is_empty() {
            return Err(AccountError::Validation("password must be set".into()));
        }
        let action = AccountAction::ChangePassword {
            password_hash: self.hasher.hash(new_password)?,
        };
        match self
            .inner
            .perform_action(username.to_string(), action)
            .await
            .map_err(Self::map_error)?
        {
            AccountActionResult::ChangePassword(()) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Parses `role` ("admin" or "customer") and assigns it.
    #[instrument(skip(self))]
    pub async fn update_role(&self, username: &str, role: &str) -> Result<Role, AccountError> {
        let role: Role = role.parse().map_err(AccountError::Validation)?;
        match self
            .inner
            .perform_action(username.to_string(), AccountAction::ChangeRole(role))
            .await
            .map_err(Self::map_error)?
        {
            AccountActionResult::ChangeRole(role) => Ok(role),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, answer))]
    pub async fn verify_recovery_answer(
        &self,
        username: &str,
        answer: &str,
    ) -> Result<bool, AccountError> {
        let action = AccountAction::VerifyRecoveryAnswer {
            answer: answer.to_string(),
        };
        match self
            .inner
            .perform_action(username.to_string(), action)
            .await
            .map_err(Self::map_error)?
        {
            AccountActionResult::VerifyRecoveryAnswer(ok) => Ok(ok),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_details(
        &self,
        username: &str,
        update: AccountUpdate,
    ) -> Result<UserAccount, AccountError> {
        self.inner
            .update(username.to_string(), update)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<UserAccount> for AccountClient {
    type Error = AccountError;

    fn inner(&self) -> &ResourceClient<UserAccount> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => AccountError::NotFound(id),
            FrameworkError::AlreadyExists(id) => AccountError::AlreadyExists(id),
            other => other
                .downcast_entity::<AccountError>()
                .unwrap_or_else(|e| AccountError::ActorCommunicationError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account_actor::credentials;
    use actor_framework::mock::{create_mock_client, expect_create, MockClient};

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(8, 1).unwrap()
    }

    fn account(username: &str, role: Role) -> UserAccount {
        UserAccount {
            username: username.to_string(),
            password_hash: hasher().hash("secret").unwrap(),
            role,
            email: String::new(),
            recovery_question: String::new(),
            recovery_answer_hash: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_account_hashes_secrets() {
        let (client, mut receiver) = create_mock_client::<UserAccount>(10);
        let accounts = AccountClient::new(client, hasher());

        let create_task = tokio::spawn(async move {
            accounts
                .create_account(
                    NewAccount::new("alice", "wonderland", Role::Customer)
                        .with_recovery("First pet?", "  Dinah "),
                )
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.username, "alice");
        assert!(credentials::verify("wonderland", &params.password_hash));
        assert!(credentials::verify("dinah", &params.recovery_answer_hash));
        responder.send(Ok("alice".to_string())).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_duplicate_username() {
        let mut mock = MockClient::<UserAccount>::new();
        mock.expect_create()
            .return_err(FrameworkError::AlreadyExists("alice".into()));
        let accounts = AccountClient::new(mock.client(), hasher());

        let result = accounts
            .create_account(NewAccount::new("alice", "pw", Role::Customer))
            .await;
        assert_eq!(result, Err(AccountError::AlreadyExists("alice".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_empty_password_rejected_before_sending() {
        let mock = MockClient::<UserAccount>::new();
        let accounts = AccountClient::new(mock.client(), hasher());

        let result = accounts
            .create_account(NewAccount::new("bob", "", Role::Customer))
            .await;
        assert!(matches!(result, Err(AccountError::Validation(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn test_authenticate() {
        let mut mock = MockClient::<UserAccount>::new();
        mock.expect_action("alice".to_string())
            .return_ok(AccountActionResult::Authenticate(true));
        mock.expect_get("alice".to_string())
            .return_ok(Some(account("alice", Role::Customer)));
        mock.expect_action("alice".to_string())
            .return_ok(AccountActionResult::Authenticate(false));
        mock.expect_action("nobody".to_string())
            .return_err(FrameworkError::NotFound("nobody".into()));
        let accounts = AccountClient::new(mock.client(), hasher());

        let ok = accounts.authenticate("alice", "secret").await.unwrap();
        assert_eq!(ok.map(|a| a.username), Some("alice".to_string()));
        assert_eq!(accounts.authenticate("alice", "wrong").await, Ok(None));
        assert_eq!(accounts.authenticate("nobody", "secret").await, Ok(None));
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_role_parses_first() {
        let mut mock = MockClient::<UserAccount>::new();
        mock.expect_action("alice".to_string())
            .return_ok(AccountActionResult::ChangeRole(Role::Admin));
        let accounts = AccountClient::new(mock.client(), hasher());

        assert_eq!(accounts.update_role("alice", "admin").await, Ok(Role::Admin));
        assert!(matches!(
            accounts.update_role("alice", "wizard").await,
            Err(AccountError::Validation(_))
        ));
        mock.verify();
    }
}
