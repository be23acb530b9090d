//! # Generic Actor Server
//!
//! `ResourceActor` owns the entity store for one resource type and processes requests
//! one at a time. Nothing else touches the store, so it needs no locking.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

type IdGenerator<T> =
    Box<dyn Fn(&<T as ActorEntity>::Create) -> <T as ActorEntity>::Id + Send + Sync>;

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor (server) and its client.
/// 2. **Seed**: optionally preload entities read from storage with [`ResourceActor::with_entities`].
/// 3. **Wire & Run**: spawn `actor.run(context)` with the dependencies the entity hooks need.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Candy>::sequential(32, 1);
/// tokio::spawn(actor.with_entities(loaded).run(context));
/// let id = client.create(params).await?;
/// ```
///
/// ## Id assignment
///
/// Ids come from the generator passed to `new`. It sees the create payload, so a resource can be
/// keyed by a natural key (a username) or by a counter ([`ResourceActor::sequential`]). Creating an entity
/// whose id is already stored fails with [`FrameworkError::AlreadyExists`] and leaves the
/// existing entity alone.
///
/// ## Operations
///
/// * **Create**: assign id, `from_create_params`, `on_create`, insert.
/// * **Get**: clone of the stored entity, or `None`.
/// * **List**: clones of every entity, in id order.
/// * **Update**: `on_update` on the stored entity, returns the new state.
/// * **Delete**: `on_delete`, then remove.
/// * **Action**: `handle_action` on the stored entity, returns its result.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: IdGenerator<T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the request channel capacity. Callers wait when it is full.
    pub fn new(
        buffer_size: usize,
        next_id: impl Fn(&T::Create) -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: Box::new(next_id),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Like [`ResourceActor::new`], with ids `first_id`, `first_id + 1`, ... regardless of the
    /// payload. Pass `max_loaded_id + 1` when the actor is seeded from storage.
    pub fn sequential(buffer_size: usize, first_id: u32) -> (Self, ResourceClient<T>)
    where
        T::Id: From<u32>,
    {
        let counter = AtomicU32::new(first_id);
        Self::new(buffer_size, move |_params: &T::Create| {
            <T::Id as From<u32>>::from(counter.fetch_add(1, Ordering::SeqCst))
        })
    }

    /// Preloads entities, typically rows read back from disk. Later entries replace earlier
    /// ones with the same id. No hooks run.
    pub fn with_entities(mut self, entities: impl IntoIterator<Item = T>) -> Self {
        for entity in entities {
            self.store.insert(entity.id().clone(), entity);
        }
        self
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Candy" rather than "candy_store::model::candy::Candy"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id)(&params);
                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Already exists");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, %id, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    // Hooks mutate a copy so a failed update leaves the stored entity unchanged.
                    let mut candidate = item.clone();
                    match candidate.on_update(update, &context).await {
                        Ok(()) => {
                            *item = candidate.clone();
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(candidate));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut candidate = item.clone();
                    match candidate.handle_action(action, &context).await {
                        Ok(result) => {
                            *item = candidate;
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
