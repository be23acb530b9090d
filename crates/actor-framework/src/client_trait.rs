//! # ActorClient Trait
//!
//! Common interface for resource-specific clients. Implementors supply the inner
//! `ResourceClient` and an error mapping, and get `get`, `list` and `delete` for free.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard CRUD operations.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct InventoryClient {
///     inner: ResourceClient<Candy>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Candy> for InventoryClient {
///     type Error = InventoryError;
///
///     fn inner(&self) -> &ResourceClient<Candy> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> InventoryError {
///         e.downcast_entity::<InventoryError>()
///             .unwrap_or_else(|e| InventoryError::ActorCommunicationError(e.to_string()))
///     }
/// }
///
/// // get(), list() and delete() are now available on InventoryClient.
/// let gummy = client.get(CandyId(1)).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity, in id order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
