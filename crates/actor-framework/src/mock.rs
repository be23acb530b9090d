//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a queue
//! of expectations instead of by an actor. Use it to test an actor or a service whose
//! dependencies are other actors, without spawning those actors.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **State** | None (scripted answers) | Real state management |
//! | **Use Case** | The code *around* a client | The actor itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Needs the right state (empty stock, missing user) |
//!
//! ## Testing Strategies
//!
//! * **Single actor**: spawn one `ResourceActor` with a `()` or throwaway context and drive it
//!   through its client. See `tests/integration_test.rs` in this crate.
//! * **Actor with mocked dependencies**: spawn the actor under test for real and give it
//!   `MockClient` clients in its context. The order actor tests in the store crate do this to
//!   script "account exists" and "stock reserved" answers.
//! * **Full system**: start every actor and exercise the flows end to end.
//!
//! ## Expectations
//!
//! Expectations are answered strictly in the order they were queued. A request that does not
//! match the next expectation (wrong kind, or wrong id) is recorded and its caller sees
//! [`FrameworkError::ActorDropped`]. [`MockClient::verify`] fails the test if any expectation
//! is left over or any request was unexpected.
//!
//! ```rust,ignore
//! let mut accounts = MockClient::<UserAccount>::new();
//! accounts.expect_get("alice".to_string()).return_ok(Some(alice));
//!
//! let mut inventory = MockClient::<Candy>::new();
//! inventory
//!     .expect_action(CandyId(1))
//!     .return_err(FrameworkError::EntityError(Box::new(InventoryError::InsufficientStock {
//!         requested: 5,
//!         available: 2,
//!     })));
//! ```
//!
//! ## Channel helpers
//!
//! [`create_mock_client`] returns a client plus the raw receiver, and the `expect_*` free
//! functions pop the next request off it. Use them when the test wants to inspect the payload
//! that was sent (the quantity of a `ReserveStock`, say) before answering.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Expectation::Get { id, .. } => format!("Get({})", id),
            Expectation::Create { .. } => "Create".to_string(),
            Expectation::List { .. } => "List".to_string(),
            Expectation::Update { id, .. } => format!("Update({})", id),
            Expectation::Delete { id, .. } => format!("Delete({})", id),
            Expectation::Action { id, .. } => format!("Action({})", id),
        }
    }
}

fn describe_request<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Get { id, .. } => format!("Get({})", id),
        ResourceRequest::Create { params, .. } => format!("Create({:?})", params),
        ResourceRequest::List { .. } => "List".to_string(),
        ResourceRequest::Update { id, .. } => format!("Update({})", id),
        ResourceRequest::Delete { id, .. } => format!("Delete({})", id),
        ResourceRequest::Action { id, action, .. } => format!("Action({}, {:?})", id, action),
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Candy>::new();
/// mock.expect_get(CandyId(1)).return_ok(Some(gummy));
/// mock.expect_create().return_ok(CandyId(2));
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    unexpected: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let unexpected = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let misses = unexpected.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        let wanted = expectation
                            .map(|e| e.describe())
                            .unwrap_or_else(|| "nothing".to_string());
                        misses.lock().unwrap().push(format!(
                            "got {}, expected {}",
                            describe_request(&request),
                            wanted
                        ));
                        // Dropping the request closes its oneshot, the caller sees ActorDropped.
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let misses = self.unexpected.lock().unwrap();
        if !misses.is_empty() {
            panic!("Unexpected requests: {}", misses.join("; "));
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let remaining: Vec<String> = exps.iter().map(|e| e.describe()).collect();
            panic!(
                "Not all expectations were met. {} remaining: {}",
                exps.len(),
                remaining.join(", ")
            );
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, id: T::Id) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Create {
            response: Err(error),
        });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> ListExpectationBuilder<T> {
    pub fn return_ok(self, items: Vec<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::List { response: Ok(items) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::List {
            response: Err(error),
        });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, updated: T) {
        self.expectations.lock().unwrap().push_back(Expectation::Update {
            id: self.id,
            response: Ok(updated),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Update {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        self.expectations.lock().unwrap().push_back(Expectation::Delete {
            id: self.id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Delete {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, result: T::ActionResult) {
        self.expectations.lock().unwrap().push_back(Expectation::Action {
            id: self.id,
            response: Ok(result),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().unwrap().push_back(Expectation::Action {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: it pulls requests with [`expect_create`] or [`expect_action`],
/// asserts on the payload and answers through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Pops the next request if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ActorEntity;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Jar {
        id: u32,
        label: String,
        count: u32,
    }

    #[derive(Debug)]
    struct JarCreate {
        label: String,
    }

    #[derive(Debug)]
    struct JarUpdate;

    #[derive(Debug, PartialEq)]
    enum JarAction {
        Take(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("jar error")]
    struct JarError;

    #[async_trait]
    impl ActorEntity for Jar {
        type Id = u32;
        type Create = JarCreate;
        type Update = JarUpdate;
        type Action = JarAction;
        type ActionResult = u32;
        type Context = ();
        type Error = JarError;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn from_create_params(id: u32, params: JarCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.label,
                count: 0,
            })
        }

        async fn on_update(&mut self, _: JarUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: JarAction, _: &()) -> Result<u32, Self::Error> {
            Ok(self.count)
        }
    }

    fn jar(id: u32, label: &str) -> Jar {
        Jar {
            id,
            label: label.to_string(),
            count: 12,
        }
    }

    #[tokio::test]
    async fn test_channel_helpers() {
        let (client, mut receiver) = create_mock_client::<Jar>(10);

        let task = tokio::spawn(async move {
            let id = client
                .create(JarCreate {
                    label: "mints".to_string(),
                })
                .await?;
            client.perform_action(id, JarAction::Take(3)).await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.label, "mints");
        responder.send(Ok(7)).unwrap();

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, 7);
        assert_eq!(action, JarAction::Take(3));
        responder.send(Ok(9)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 9);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Jar>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(jar(1, "mints")));
        mock.expect_list().return_ok(vec![jar(1, "mints"), jar(2, "toffee")]);
        mock.expect_delete(2).return_ok();

        let client = mock.client();
        let id = client
            .create(JarCreate {
                label: "mints".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap().unwrap();
        assert_eq!(fetched.label, "mints");
        assert_eq!(client.list().await.unwrap().len(), 2);
        client.delete(2).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_error_injection() {
        let mut mock = MockClient::<Jar>::new();
        mock.expect_action(1).return_err(FrameworkError::ActorClosed);
        mock.expect_update(1)
            .return_err(FrameworkError::NotFound("1".to_string()));

        let client = mock.client();
        assert!(matches!(
            client.perform_action(1, JarAction::Take(1)).await,
            Err(FrameworkError::ActorClosed)
        ));
        assert!(matches!(
            client.update(1, JarUpdate).await,
            Err(FrameworkError::NotFound(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests")]
    async fn test_wrong_id_is_reported() {
        let mut mock = MockClient::<Jar>::new();
        mock.expect_get(1).return_ok(None);

        let client = mock.client();
        let result = client.get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_leftover_expectation_is_reported() {
        let mut mock = MockClient::<Jar>::new();
        mock.expect_get(1).return_ok(None);
        mock.verify();
    }
}
