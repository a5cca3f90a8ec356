//! # Generic Actor Server
//!
//! `ResourceActor` owns the store for one entity type and processes requests strictly
//! one at a time. That sequential loop is the consistency model of the whole framework:
//! a request, including every await inside its hooks, is never interleaved with another
//! request to the same actor.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// The store is a `BTreeMap`, so `list` answers in ascending id order, which is also
/// creation order since ids come from a counter.
///
/// # Usage Pattern
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Sku { id: u32, on_hand: u32 }
/// #[derive(Debug)] struct SkuCreate { on_hand: u32 }
/// #[derive(Debug)] struct SkuUpdate;
/// #[derive(Debug)] enum SkuAction {}
/// #[derive(Debug, thiserror::Error)] #[error("sku error")] struct SkuError;
///
/// #[async_trait]
/// impl ActorEntity for Sku {
///     type Id = u32;
///     type Create = SkuCreate;
///     type Update = SkuUpdate;
///     type Query = ();
///     type Action = SkuAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = SkuError;
///
///     fn from_create_params(id: u32, p: SkuCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, on_hand: p.on_hand })
///     }
///     async fn on_update(&mut self, _: SkuUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: SkuAction, _: &()) -> Result<(), Self::Error> {
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Sku>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(SkuCreate { on_hand: 4 }).await.unwrap();
///     let all = client.list(()).await.unwrap();
///     assert_eq!(all.len(), 1);
///     assert_eq!(all[0].id, id);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Returns the first unique key of `candidate` already held by another entity.
    fn taken_key(&self, candidate: &T, except: Option<&T::Id>) -> Option<String> {
        let wanted = candidate.unique_keys();
        if wanted.is_empty() {
            return None;
        }
        self.store
            .iter()
            .filter(|(id, _)| Some(*id) != except)
            .flat_map(|(_, other)| other.unique_keys())
            .find(|key| wanted.contains(key))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// `context` is passed to every hook. It is typically a set of clients for the
    /// actors this entity depends on.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Some(key) = self.taken_key(&item, None) {
                        warn!(entity_type, %key, "Create rejected, key taken");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                        continue;
                    }
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { query, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&query))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?query, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut next = current.clone();
                    if let Err(e) = next.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(key) = self.taken_key(&next, Some(&id)) {
                        warn!(entity_type, %id, %key, "Update rejected, key taken");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                        continue;
                    }
                    self.store.insert(id.clone(), next.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(next));
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
                ResourceRequest::DeleteMany { ids, respond_to } => {
                    debug!(entity_type, ?ids, "DeleteMany");
                    let present: Vec<T::Id> = ids
                        .into_iter()
                        .filter(|id| self.store.contains_key(id))
                        .collect();

                    let mut refused = None;
                    for id in &present {
                        if let Some(item) = self.store.get(id) {
                            if let Err(e) = item.on_delete(&context).await {
                                warn!(
                                    entity_type,
                                    %id,
                                    error = %e,
                                    "on_delete failed, batch aborted"
                                );
                                refused = Some(e);
                                break;
                            }
                        }
                    }
                    if let Some(e) = refused {
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }

                    for id in &present {
                        self.store.remove(id);
                    }
                    info!(
                        entity_type,
                        removed = present.len(),
                        size = self.store.len(),
                        "Deleted batch"
                    );
                    let _ = respond_to.send(Ok(present));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
